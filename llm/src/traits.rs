use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
}

/// Decoding parameters sent with every generation request.
///
/// Generation is deterministic: sampling is disabled and beam search picks the
/// output. The repetition controls back up the "do not repeat" instructions
/// written into every prompt.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodingConfig {
    pub do_sample: bool,
    pub num_beams: u32,
    pub repetition_penalty: f32,
    pub no_repeat_ngram_size: u32,
}

impl Default for DecodingConfig {
    fn default() -> Self {
        Self {
            do_sample: false,
            num_beams: 4,
            repetition_penalty: 2.0,
            no_repeat_ngram_size: 3,
        }
    }
}

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate at most `max_tokens` new tokens for `prompt`.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, LLMError>;
}

#[async_trait]
impl<C: GenerationClient + ?Sized> GenerationClient for Arc<C> {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, LLMError> {
        (**self).generate(prompt, max_tokens).await
    }
}
