//! One-pass analysis of an inbound message
//!
//! Order: language → sentiment → emotion → context flags.

use serde::{Deserialize, Serialize};
use yoga_agent_core::{ContextFlags, EmotionResult, Language};

use crate::context::extract_context;
use crate::emotion::EmotionClassifier;
use crate::greeting::is_greeting;
use crate::language::LanguageDetector;
use crate::sentiment::{SentimentAnalyzer, SentimentResult};

/// Everything the reply engines need to know about one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAnalysis {
    pub language: Language,
    pub emotion: EmotionResult,
    pub sentiment: SentimentResult,
    pub context: ContextFlags,
    /// Short, greeting-only message
    pub is_greeting: bool,
}

/// Runs every analyzer over a message
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageAnalyzer {
    language: LanguageDetector,
    sentiment: SentimentAnalyzer,
    emotion: EmotionClassifier,
}

impl MessageAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyze(&self, text: &str) -> MessageAnalysis {
        let language = self.language.detect(text);
        let sentiment = self.sentiment.analyze(text);
        let emotion = self.emotion.classify_with(text, &sentiment);
        let context = extract_context(text);

        tracing::debug!(
            language = %language,
            emotion = %emotion.emotion,
            intensity = emotion.intensity,
            polarity = sentiment.polarity,
            subjectivity = sentiment.subjectivity,
            "Message analyzed"
        );

        MessageAnalysis {
            language,
            emotion,
            sentiment,
            context,
            is_greeting: is_greeting(text),
        }
    }
}
