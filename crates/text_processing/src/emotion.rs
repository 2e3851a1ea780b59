//! Emotion classification
//!
//! Greeting and small-talk phrases short-circuit to `(neutral, 3)` before
//! any sentiment is computed. Otherwise polarity decides:
//!
//! | polarity      | emotion    | intensity                       |
//! |---------------|------------|---------------------------------|
//! | `> 0.3`       | `happy`    | `min(5, round((p + 1) * 2.5))`  |
//! | `< -0.3`      | `stressed` | `min(5, round(abs(p) * 5) + 2)` |
//! | otherwise     | `neutral`  | `3`                             |
//!
//! A message that mixes a greeting with emotional words is still a
//! greeting here; reply composition re-checks for that combination.

use yoga_agent_core::{Emotion, EmotionResult, Language, MAX_INTENSITY};

use crate::keywords::{contains_any, normalize};
use crate::sentiment::{SentimentAnalyzer, SentimentResult};

const POSITIVE_THRESHOLD: f64 = 0.3;
const NEGATIVE_THRESHOLD: f64 = -0.3;

/// Greeting and small-talk phrases that override sentiment
const GREETING_PATTERNS: &[(Language, &[&str])] = &[
    (
        Language::Telugu,
        &["em chestunav", "enti chestunav", "ela unnav", "namaste"],
    ),
    (Language::Tamil, &["epdi iruka", "enna panra", "vanakkam"]),
    (Language::Hindi, &["kaise ho", "kya kar rahe ho", "namaste"]),
    (
        Language::English,
        &["how are you", "what are you doing", "hello", "hi"],
    ),
];

/// Greeting-override plus polarity classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct EmotionClassifier {
    sentiment: SentimentAnalyzer,
}

impl EmotionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `text`. Never fails and holds no state between calls.
    pub fn classify(&self, text: &str) -> EmotionResult {
        if let Some(language) = greeting_pattern_language(text) {
            tracing::debug!(pattern_language = %language, "Greeting pattern overrides sentiment");
            return EmotionResult::neutral();
        }
        let sentiment = self.sentiment.analyze(text);
        Self::from_polarity(sentiment.polarity)
    }

    /// Classify with a sentiment score computed by the caller
    pub fn classify_with(&self, text: &str, sentiment: &SentimentResult) -> EmotionResult {
        if greeting_pattern_language(text).is_some() {
            return EmotionResult::neutral();
        }
        Self::from_polarity(sentiment.polarity)
    }

    /// Map a polarity score onto an emotion and intensity
    pub fn from_polarity(polarity: f64) -> EmotionResult {
        let max = MAX_INTENSITY as f64;
        if polarity > POSITIVE_THRESHOLD {
            let intensity = ((polarity + 1.0) * 2.5).round().min(max);
            EmotionResult::new(Emotion::Happy, intensity as i64)
        } else if polarity < NEGATIVE_THRESHOLD {
            let intensity = ((polarity.abs() * 5.0).round() + 2.0).min(max);
            EmotionResult::new(Emotion::Stressed, intensity as i64)
        } else {
            EmotionResult::neutral()
        }
    }
}

/// Language of the first greeting pattern found in `text`, if any
pub fn greeting_pattern_language(text: &str) -> Option<Language> {
    let text = normalize(text);
    GREETING_PATTERNS
        .iter()
        .find(|(_, patterns)| contains_any(&text, patterns))
        .map(|(language, _)| *language)
}
