//! Keyword based detection of how a student feels about a question.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emotional state inferred from a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionLabel {
    Stressed,
    Confused,
    Confident,
    Normal,
}

/// Keyword tables in priority order. The first table with a match wins.
pub static EMOTION_KEYWORDS: [(EmotionLabel, &[&str]); 3] = [
    (
        EmotionLabel::Stressed,
        &[
            "stress",
            "panic",
            "tension",
            "scared",
            "worried",
            "anxiety",
            "exam pressure",
        ],
    ),
    (
        EmotionLabel::Confused,
        &[
            "confuse",
            "don't understand",
            "cannot understand",
            "doubt",
            "help",
            "stuck",
            "hard",
            "difficult",
        ],
    ),
    (
        EmotionLabel::Confident,
        &[
            "easy",
            "i know",
            "understood",
            "simple",
            "clear",
            "got it",
            "quickly",
        ],
    ),
];

/// Classify `text` by case-insensitive substring matches.
///
/// Stressed beats confused, confused beats confident, and anything without a
/// match (including empty input) is [`EmotionLabel::Normal`].
pub fn classify(text: &str) -> EmotionLabel {
    let lowered = text.to_lowercase();
    EMOTION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(label, _)| *label)
        .unwrap_or(EmotionLabel::Normal)
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 4] = [
        EmotionLabel::Stressed,
        EmotionLabel::Confused,
        EmotionLabel::Confident,
        EmotionLabel::Normal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Stressed => "stressed",
            EmotionLabel::Confused => "confused",
            EmotionLabel::Confident => "confident",
            EmotionLabel::Normal => "normal",
        }
    }

    /// Short message shown to the student next to the answer.
    pub fn notice(&self) -> &'static str {
        match self {
            EmotionLabel::Stressed => "You seem stressed 😥 Take a breath, we will keep it short and calm.",
            EmotionLabel::Confused => "You seem confused 😟 Let me explain more slowly with an example.",
            EmotionLabel::Confident => "You seem confident 😎 Let's go a little deeper.",
            EmotionLabel::Normal => "Let me explain this in an easy way...",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
