//! Prompt templates for explanations, quizzes and study plans.

use indoc::formatdoc;
use std::ops::RangeInclusive;

use crate::emotion::EmotionLabel;
use crate::error::MentorError;
use crate::task::{DailyTime, Difficulty, TaskParameters, TaskType};

/// Number of questions in every quiz.
pub const QUIZ_QUESTIONS: usize = 5;

/// Allowed length of a study plan in days.
pub const STUDY_PLAN_DAYS: RangeInclusive<u32> = 3..=30;

const NO_REPEAT: &str = "Do not repeat sentences.";

/// Teaching style used to explain a question to a student in a given mood.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExplanationStyle {
    pub persona: &'static str,
    pub guidance: &'static str,
    pub sections: &'static [&'static str],
}

pub static EXPLANATION_STYLES: [(EmotionLabel, ExplanationStyle); 4] = [
    (
        EmotionLabel::Confused,
        ExplanationStyle {
            persona: "an expert teacher",
            guidance: "Explain slowly, step by step, and use one easy example.",
            sections: &["Definition", "Step-by-step explanation", "Example", "Summary"],
        },
    ),
    (
        EmotionLabel::Stressed,
        ExplanationStyle {
            persona: "a friendly academic mentor",
            guidance: "Stay calm and supportive. Use short sentences.",
            sections: &["Simple explanation", "Easy example", "Motivation line"],
        },
    ),
    (
        EmotionLabel::Confident,
        ExplanationStyle {
            persona: "an expert mentor",
            guidance: "Move fast, go into advanced detail, and add one real-world application.",
            sections: &[
                "Quick explanation",
                "Advanced insight",
                "Real-world application",
                "Challenge question",
            ],
        },
    ),
    (
        EmotionLabel::Normal,
        ExplanationStyle {
            persona: "an expert teacher",
            guidance: "Give a plain, clear explanation.",
            sections: &["Definition", "Explanation", "2 examples", "Quick summary"],
        },
    ),
];

impl EmotionLabel {
    /// Teaching style for explanations given to a student in this state.
    pub fn explanation_style(&self) -> &'static ExplanationStyle {
        EXPLANATION_STYLES
            .iter()
            .find(|(label, _)| label == self)
            .map(|(_, style)| style)
            .unwrap_or(&EXPLANATION_STYLES[3].1)
    }
}

/// Everything needed to render one prompt.
///
/// `emotion` is required for explanations and ignored by the quiz and study
/// plan templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptRequest {
    pub emotion: Option<EmotionLabel>,
    pub task: TaskType,
    pub params: TaskParameters,
}

impl PromptRequest {
    /// Request whose task is taken from `params`.
    pub fn new(params: TaskParameters) -> Self {
        Self {
            emotion: None,
            task: params.task_type(),
            params,
        }
    }

    pub fn emotion(mut self, emotion: EmotionLabel) -> Self {
        self.emotion = Some(emotion);
        self
    }

    /// Override the task, e.g. when task and parameters arrive separately.
    pub fn task(mut self, task: TaskType) -> Self {
        self.task = task;
        self
    }
}

/// Render the prompt for `request`.
///
/// # Errors
///
/// [`MentorError::InvalidParameters`] when the parameters do not belong to
/// the requested task, an explanation has no emotion, the question or topic
/// is blank, or a study plan length is outside [`STUDY_PLAN_DAYS`].
pub fn build_prompt(request: &PromptRequest) -> Result<String, MentorError> {
    if request.params.task_type() != request.task {
        return Err(MentorError::InvalidParameters(format!(
            "{} parameters supplied for a {} task",
            request.params.task_type(),
            request.task
        )));
    }
    match &request.params {
        TaskParameters::Explanation { question } => {
            require_text("question", question)?;
            let emotion = request.emotion.ok_or_else(|| {
                MentorError::InvalidParameters("explanation requires an emotion".into())
            })?;
            Ok(explanation_prompt(emotion, question))
        }
        TaskParameters::Quiz { topic, difficulty } => {
            require_text("topic", topic)?;
            Ok(quiz_prompt(topic, *difficulty))
        }
        TaskParameters::StudyPlan {
            topic,
            days,
            daily_time,
        } => {
            require_text("topic", topic)?;
            if !STUDY_PLAN_DAYS.contains(days) {
                return Err(MentorError::InvalidParameters(format!(
                    "days must be between {} and {}, got {days}",
                    STUDY_PLAN_DAYS.start(),
                    STUDY_PLAN_DAYS.end()
                )));
            }
            Ok(study_plan_prompt(topic, *days, *daily_time))
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), MentorError> {
    if value.trim().is_empty() {
        return Err(MentorError::InvalidParameters(format!("{field} is empty")));
    }
    Ok(())
}

fn explanation_prompt(emotion: EmotionLabel, question: &str) -> String {
    let style = emotion.explanation_style();
    let mut out = formatdoc! {"
        You are {persona}.
        The student feels {mood}.
        {guidance}
        {no_repeat}

        Answer in this format:
        ",
        persona = style.persona,
        mood = emotion.as_str().to_uppercase(),
        guidance = style.guidance,
        no_repeat = NO_REPEAT,
    };
    for (i, section) in style.sections.iter().enumerate() {
        out.push_str(&format!("{}. {section}\n", i + 1));
    }
    out.push_str(&format!("\nQuestion: {question}"));
    out
}

fn quiz_prompt(topic: &str, difficulty: Difficulty) -> String {
    let mut out = formatdoc! {"
        You are an expert teacher.
        Create {count} {difficulty} quiz questions on: {topic}
        Write each answer right after its question.
        Follow every answer with a one-line explanation.
        Do not repeat questions or sentences.

        Format:
        ",
        count = QUIZ_QUESTIONS,
        difficulty = difficulty,
        topic = topic,
    };
    for n in 1..=QUIZ_QUESTIONS {
        out.push_str(&format!(
            "Q{n}) <question>\nA{n}) <answer>\nExplanation: <one line>\n"
        ));
    }
    out
}

fn study_plan_prompt(topic: &str, days: u32, daily_time: DailyTime) -> String {
    formatdoc! {"
        You are an expert mentor.
        Create a {days}-day study plan for: {topic}
        Daily study time: {daily_time}
        Plan day by day, from Day 1 to Day {days}.
        For each day use these sections:
        Day N:
        Topics: <what to learn>
        Tasks: <what to do>
        Practice: <exercises>
        Make Day {days} a revision day that reviews everything covered.
        {no_repeat}",
        days = days,
        topic = topic,
        daily_time = daily_time,
        no_repeat = NO_REPEAT,
    }
}
