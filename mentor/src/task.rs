use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of help the student asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Explanation,
    Quiz,
    StudyPlan,
}

impl TaskType {
    /// Generation budget used when none is configured.
    pub fn default_max_tokens(&self) -> u32 {
        match self {
            TaskType::Explanation => 260,
            TaskType::Quiz => 300,
            TaskType::StudyPlan => 320,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskType::Explanation => "explanation",
            TaskType::Quiz => "quiz",
            TaskType::StudyPlan => "study_plan",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        })
    }
}

/// Time the student can spend each day on a study plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DailyTime {
    #[serde(rename = "30 mins")]
    HalfHour,
    #[serde(rename = "1 hour")]
    OneHour,
    #[serde(rename = "2 hours")]
    TwoHours,
    #[serde(rename = "3 hours")]
    ThreeHours,
}

impl DailyTime {
    pub fn as_str(&self) -> &'static str {
        match self {
            DailyTime::HalfHour => "30 mins",
            DailyTime::OneHour => "1 hour",
            DailyTime::TwoHours => "2 hours",
            DailyTime::ThreeHours => "3 hours",
        }
    }
}

impl fmt::Display for DailyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs for one task, tagged by task name on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum TaskParameters {
    Explanation {
        question: String,
    },
    Quiz {
        topic: String,
        difficulty: Difficulty,
    },
    StudyPlan {
        topic: String,
        days: u32,
        daily_time: DailyTime,
    },
}

impl TaskParameters {
    pub fn explanation(question: impl Into<String>) -> Self {
        Self::Explanation {
            question: question.into(),
        }
    }

    pub fn quiz(topic: impl Into<String>, difficulty: Difficulty) -> Self {
        Self::Quiz {
            topic: topic.into(),
            difficulty,
        }
    }

    pub fn study_plan(topic: impl Into<String>, days: u32, daily_time: DailyTime) -> Self {
        Self::StudyPlan {
            topic: topic.into(),
            days,
            daily_time,
        }
    }

    pub fn task_type(&self) -> TaskType {
        match self {
            TaskParameters::Explanation { .. } => TaskType::Explanation,
            TaskParameters::Quiz { .. } => TaskType::Quiz,
            TaskParameters::StudyPlan { .. } => TaskType::StudyPlan,
        }
    }

    /// The free-text field the student typed, with its name.
    pub fn text_field(&self) -> (&'static str, &str) {
        match self {
            TaskParameters::Explanation { question } => ("question", question),
            TaskParameters::Quiz { topic, .. } | TaskParameters::StudyPlan { topic, .. } => {
                ("topic", topic)
            }
        }
    }
}
