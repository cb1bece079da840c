use std::{sync::Arc, time::Duration};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use llm::{GenerationClient, InferenceClient, OllamaClient};
use mentor::{Mentor, TaskType, TokenBudget};

/// Which generation service answers students.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// A local Ollama server.
    Ollama,
    /// An endpoint speaking the Hugging Face text-generation pipeline format.
    Inference,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Emotion-aware academic mentor")]
pub struct Config {
    /// Address to bind the HTTP server
    #[arg(long, env = "ACADEMY_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: String,

    #[arg(long, env = "ACADEMY_BACKEND", value_enum, default_value_t = Backend::Ollama)]
    pub backend: Backend,

    #[arg(long, env = "OLLAMA_URL", default_value = llm::DEFAULT_OLLAMA_URL)]
    pub ollama_url: String,

    #[arg(long, env = "OLLAMA_MODEL", default_value = llm::DEFAULT_MODEL)]
    pub model: String,

    /// Full URL of the inference endpoint (required with `--backend inference`)
    #[arg(long, env = "INFERENCE_URL")]
    pub inference_url: Option<String>,

    #[arg(long, env = "INFERENCE_TOKEN", hide_env_values = true)]
    pub inference_token: Option<String>,

    /// Abandon a generation call after this many seconds
    #[arg(long, env = "ACADEMY_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[arg(long, default_value_t = TaskType::Explanation.default_max_tokens())]
    pub explanation_tokens: u32,

    #[arg(long, default_value_t = TaskType::Quiz.default_max_tokens())]
    pub quiz_tokens: u32,

    #[arg(long, default_value_t = TaskType::StudyPlan.default_max_tokens())]
    pub study_plan_tokens: u32,
}

impl Config {
    /// Build the client for the configured backend.
    pub fn generation_client(&self) -> anyhow::Result<Arc<dyn GenerationClient>> {
        match self.backend {
            Backend::Ollama => {
                let client = OllamaClient::try_new(&self.ollama_url, &self.model)
                    .with_context(|| format!("connecting to ollama at {}", self.ollama_url))?;
                Ok(Arc::new(client))
            }
            Backend::Inference => {
                let Some(url) = &self.inference_url else {
                    bail!("--inference-url is required for the inference backend");
                };
                let mut client = InferenceClient::new(url);
                if let Some(token) = &self.inference_token {
                    client = client.with_token(token);
                }
                Ok(Arc::new(client))
            }
        }
    }

    pub fn budget(&self) -> TokenBudget {
        TokenBudget {
            explanation: self.explanation_tokens,
            quiz: self.quiz_tokens,
            study_plan: self.study_plan_tokens,
        }
    }

    /// Wrap `client` in a [`Mentor`] carrying the configured limits.
    pub fn mentor(&self, client: Arc<dyn GenerationClient>) -> Mentor {
        let mentor = Mentor::new(client).with_budget(self.budget());
        match self.timeout_secs {
            Some(secs) => mentor.with_timeout(Duration::from_secs(secs)),
            None => mentor,
        }
    }
}
