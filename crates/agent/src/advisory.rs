//! Whole-conversation mood analysis
//!
//! All user messages are joined with single spaces and analyzed as one
//! text. `neutral` is reported as `happy`.

use serde::{Deserialize, Serialize};
use yoga_agent_core::{Emotion, Intensity, Language, Message};
use yoga_agent_text_processing::MessageAnalyzer;

const ADVISORIES: &[(Emotion, &str)] = &[
    (
        Emotion::Stressed,
        "Perfect for releasing tension and calming your mind.",
    ),
    (Emotion::Anxious, "Designed to ground you and reduce anxiety."),
    (
        Emotion::Sad,
        "Gentle poses to lift your mood and restore energy.",
    ),
    (
        Emotion::Angry,
        "Cooling poses to release anger and find peace.",
    ),
    (Emotion::Tired, "Energizing flow to boost your vitality."),
    (
        Emotion::Happy,
        "A balanced, energizing flow for overall wellness and positivity!",
    ),
];

const FALLBACK_ADVISORY: &str = "A balanced, energizing flow for overall wellness and positivity!";

/// Body of a `/api/analyze-conversation` reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub emotion: Emotion,
    pub intensity: Intensity,
    pub detected_language: Language,
    pub yoga_message: String,
    pub conversation_analysis: String,
}

/// One-line description of the sequence suited to `emotion`
pub fn yoga_advisory(emotion: Emotion) -> &'static str {
    ADVISORIES
        .iter()
        .find(|(e, _)| *e == emotion)
        .map(|(_, text)| *text)
        .unwrap_or(FALLBACK_ADVISORY)
}

/// Aggregate analysis of every user message in `history`.
///
/// Returns `None` when the history has no user messages.
pub fn analyze_conversation(
    analyzer: &MessageAnalyzer,
    history: &[Message],
) -> Option<ConversationSummary> {
    let user_messages: Vec<&str> = history
        .iter()
        .filter(|m| m.is_user())
        .map(|m| m.content.as_str())
        .collect();

    if user_messages.is_empty() {
        return None;
    }

    let combined = user_messages.join(" ");
    let analysis = analyzer.analyze(&combined);

    let emotion = match analysis.emotion.emotion {
        Emotion::Neutral => Emotion::Happy,
        other => other,
    };

    Some(ConversationSummary {
        emotion,
        intensity: analysis.emotion.intensity,
        detected_language: analysis.language,
        yoga_message: yoga_advisory(emotion).to_string(),
        conversation_analysis: format!("Analyzed {} messages", user_messages.len()),
    })
}
