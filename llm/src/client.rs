//! HTTP client for an Ollama language model server.
//!
//! [`OllamaClient`] implements [`GenerationClient`] with the non-streaming
//! `/api/generate` endpoint. Ollama has no beam search or n-gram blocking, so
//! the fixed [`DecodingConfig`] is approximated with greedy decoding and the
//! repetition penalty.

use crate::traits::{DecodingConfig, GenerationClient, LLMError};
use async_trait::async_trait;
use tracing::debug;

use ollama_rs::{
    generation::completion::request::GenerationRequest, models::ModelOptions, Ollama,
};

pub struct OllamaClient {
    inner: Ollama,
    model: String,
    decoding: DecodingConfig,
}

impl OllamaClient {
    /// Connect to the server at `base_url` and generate with `model`.
    pub fn try_new(base_url: impl AsRef<str>, model: impl Into<String>) -> Result<Self, LLMError> {
        let inner = Ollama::try_new(base_url.as_ref())
            .map_err(|e| LLMError::Network(format!("invalid ollama url: {e}")))?;
        let decoding = DecodingConfig::default();
        debug!(
            num_beams = decoding.num_beams,
            no_repeat_ngram_size = decoding.no_repeat_ngram_size,
            "ollama backend decodes greedily; beam search and n-gram blocking are not available"
        );
        Ok(Self {
            inner,
            model: model.into(),
            decoding,
        })
    }

    fn options(&self, max_tokens: u32) -> ModelOptions {
        let mut options = ModelOptions::default()
            .repeat_penalty(self.decoding.repetition_penalty)
            .num_predict(i32::try_from(max_tokens).unwrap_or(i32::MAX))
            .seed(0);
        if !self.decoding.do_sample {
            options = options.temperature(0.0).top_k(1);
        }
        options
    }
}

#[async_trait]
impl GenerationClient for OllamaClient {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, LLMError> {
        let req = GenerationRequest::new(self.model.clone(), prompt.to_string())
            .options(self.options(max_tokens));
        let res = self
            .inner
            .generate(req)
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;
        debug!(model = %self.model, chars = res.response.len(), "ollama generation finished");
        Ok(res.response.trim().to_string())
    }
}
