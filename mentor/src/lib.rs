//! Core of the academic mentor.
//!
//! Free text from a student is classified into an [`EmotionLabel`] by
//! [`classify`], turned into a teaching prompt by [`build_prompt`], and sent to
//! a [`llm::GenerationClient`] by the [`Mentor`]. Per-session tallies live in
//! [`SessionContext`].
//!
//! ```
//! use mentor::{classify, EmotionLabel};
//!
//! assert_eq!(classify("I am confused about recursion"), EmotionLabel::Confused);
//! ```

pub mod agent;
pub mod emotion;
pub mod error;
pub mod prompt_builder;
pub mod session;
pub mod task;

pub use agent::{Mentor, Prepared, TokenBudget};
pub use emotion::{classify, EmotionLabel};
pub use error::MentorError;
pub use prompt_builder::{build_prompt, PromptRequest};
pub use session::{DashboardMode, SessionContext, SessionCounters, SessionRegistry, ViewState};
pub use task::{DailyTime, Difficulty, TaskParameters, TaskType};
