use llm::{GenerationClient, LLMError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::emotion::{classify, EmotionLabel};
use crate::error::MentorError;
use crate::prompt_builder::{build_prompt, PromptRequest};
use crate::task::{TaskParameters, TaskType};

/// Maximum new tokens generated per task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenBudget {
    pub explanation: u32,
    pub quiz: u32,
    pub study_plan: u32,
}

impl TokenBudget {
    pub fn for_task(&self, task: TaskType) -> u32 {
        match task {
            TaskType::Explanation => self.explanation,
            TaskType::Quiz => self.quiz,
            TaskType::StudyPlan => self.study_plan,
        }
    }
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self {
            explanation: TaskType::Explanation.default_max_tokens(),
            quiz: TaskType::Quiz.default_max_tokens(),
            study_plan: TaskType::StudyPlan.default_max_tokens(),
        }
    }
}

/// A validated request, ready for generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prepared {
    pub task: TaskType,
    /// Set for explanations only.
    pub emotion: Option<EmotionLabel>,
    pub prompt: String,
    pub max_tokens: u32,
}

/// Turns student requests into generated explanations, quizzes and plans.
pub struct Mentor {
    client: Arc<dyn GenerationClient>,
    budget: TokenBudget,
    timeout: Option<Duration>,
}

impl Mentor {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            budget: TokenBudget::default(),
            timeout: None,
        }
    }

    pub fn with_budget(mut self, budget: TokenBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Give up on a generation call after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn budget(&self) -> TokenBudget {
        self.budget
    }

    /// Validate `params`, classify explanations and render the prompt.
    ///
    /// Nothing is sent to the model here, so a rejected request costs no
    /// inference.
    pub fn prepare(&self, params: TaskParameters) -> Result<Prepared, MentorError> {
        let (field, text) = params.text_field();
        if text.trim().is_empty() {
            return Err(MentorError::EmptyInput(field));
        }
        let task = params.task_type();
        let emotion = (task == TaskType::Explanation).then(|| classify(text));
        if let Some(label) = emotion {
            info!(emotion = %label, "classified question");
        }
        let request = PromptRequest {
            emotion,
            task,
            params,
        };
        let prompt = build_prompt(&request)?;
        debug!(%task, %prompt, "built prompt");
        Ok(Prepared {
            task,
            emotion: request.emotion,
            prompt,
            max_tokens: self.budget.for_task(task),
        })
    }

    /// Run the generation call for a prepared request. Failures are not retried.
    pub async fn complete(&self, prepared: &Prepared) -> Result<String, MentorError> {
        let call = self.client.generate(&prepared.prompt, prepared.max_tokens);
        let res = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or_else(|_| Err(LLMError::Timeout(limit))),
            None => call.await,
        };
        res.map_err(|e| {
            warn!(task = %prepared.task, error = %e, "generation failed");
            MentorError::GenerationUnavailable(e)
        })
    }
}
