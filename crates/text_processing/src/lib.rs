//! Text analysis for the yoga mood agent
//!
//! Every analyzer here is a total function over free text: malformed or
//! empty input degrades to `english`, `neutral` and intensity 3.
//!
//! - **Language detection**: phrase and word lists for romanized Telugu,
//!   Tamil and Hindi, falling back to English
//! - **Sentiment**: lexicon scorer producing polarity and subjectivity
//! - **Emotion**: greeting override, then polarity thresholds
//! - **Context**: independent keyword flags and greeting predicates
//!
//! # Example
//!
//! ```
//! use yoga_agent_core::{Emotion, Language};
//! use yoga_agent_text_processing::MessageAnalyzer;
//!
//! let analyzer = MessageAnalyzer::new();
//! let analysis = analyzer.analyze("kaise ho");
//! assert_eq!(analysis.language, Language::Hindi);
//! assert_eq!(analysis.emotion.emotion, Emotion::Neutral);
//! ```

pub mod context;
pub mod emotion;
pub mod greeting;
pub mod keywords;
pub mod language;
pub mod sentiment;

mod pipeline;

pub use context::{extract_context, is_chat_question, mentions_coping};
pub use emotion::{greeting_pattern_language, EmotionClassifier};
pub use greeting::{has_greeting_phrase, is_greeting, mentions_emotion_word};
pub use language::LanguageDetector;
pub use pipeline::{MessageAnalysis, MessageAnalyzer};
pub use sentiment::{SentimentAnalyzer, SentimentResult};
