use thiserror::Error;

#[derive(Debug, Error)]
pub enum MentorError {
    /// A required free-text field was blank.
    #[error("Please enter a {0}")]
    EmptyInput(&'static str),
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("generation unavailable: {0}")]
    GenerationUnavailable(#[from] llm::LLMError),
}

impl MentorError {
    /// Whether the request was rejected before any generation call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MentorError::EmptyInput(_) | MentorError::InvalidParameters(_)
        )
    }
}
