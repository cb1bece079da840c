//! Client for endpoints that speak the Hugging Face text-generation pipeline
//! format (`{"inputs", "parameters"}` in, `[{"generated_text"}]` out).
//!
//! Unlike Ollama these endpoints honour every field of [`DecodingConfig`].

use crate::traits::{DecodingConfig, GenerationClient, LLMError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    do_sample: bool,
    num_beams: u32,
    repetition_penalty: f32,
    no_repeat_ngram_size: u32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct InferenceOutput {
    generated_text: String,
}

pub struct InferenceClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    decoding: DecodingConfig,
}

impl InferenceClient {
    /// Post generation requests to `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: None,
            decoding: DecodingConfig::default(),
        }
    }

    /// Send `token` as a bearer credential.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn parameters(&self, max_tokens: u32) -> InferenceParameters {
        InferenceParameters {
            max_new_tokens: max_tokens,
            do_sample: self.decoding.do_sample,
            num_beams: self.decoding.num_beams,
            repetition_penalty: self.decoding.repetition_penalty,
            no_repeat_ngram_size: self.decoding.no_repeat_ngram_size,
            return_full_text: false,
        }
    }
}

#[async_trait]
impl GenerationClient for InferenceClient {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, LLMError> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: self.parameters(max_tokens),
        };
        let mut req = self.http.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LLMError::Network(format!("inference endpoint returned {status}")));
        }
        let outputs: Vec<InferenceOutput> = resp
            .json()
            .await
            .map_err(|e| LLMError::InvalidResponse(e.to_string()))?;
        let text = outputs
            .into_iter()
            .next()
            .map(|o| o.generated_text)
            .ok_or_else(|| LLMError::InvalidResponse("empty output list".into()))?;
        debug!(endpoint = %self.endpoint, chars = text.len(), "inference generation finished");
        Ok(text.trim().to_string())
    }
}
