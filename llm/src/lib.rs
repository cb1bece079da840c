//! Abstractions for calling text-generation models.
//!
//! The `llm` crate defines the [`GenerationClient`] trait together with the
//! fixed [`DecodingConfig`] every backend applies. Two backends are provided:
//! [`OllamaClient`] for a local Ollama server and [`InferenceClient`] for
//! endpoints that speak the Hugging Face text-generation pipeline format.

pub mod client;
pub mod inference;
pub mod traits;

pub use client::OllamaClient;
pub use inference::InferenceClient;
pub use traits::{DecodingConfig, GenerationClient, LLMError};

/// Ollama server used when none is configured.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Model requested from Ollama when none is configured.
pub const DEFAULT_MODEL: &str = "llama3.2";
