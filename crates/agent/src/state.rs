//! Per-conversation voice state
//!
//! Each conversation owns its reply engine (with that engine's memory or
//! turn counter) and its own random source. The server keeps one
//! `ConversationState` per conversation id behind a mutex. Requests that
//! carry no id are answered from a detached state that is dropped after
//! the reply.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use yoga_agent_config::{ConversationConfig, VoiceResponder};
use yoga_agent_core::{user_turns, Emotion, Intensity, Language, Message};
use yoga_agent_text_processing::{MessageAnalysis, MessageAnalyzer};

use crate::contextual::ContextualEngine;
use crate::traits::Responder;
use crate::voice::VoiceResponseEngine;

/// Body of a `/api/voice-chat` reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceReply {
    pub response: String,
    pub emotion: Emotion,
    pub intensity: Intensity,
    pub detected_language: Language,
    pub ready_for_yoga: bool,
    pub conversation_turns: usize,
    /// Absent for detached conversations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

pub struct ConversationState {
    id: Option<String>,
    responder: Box<dyn Responder>,
    analyzer: MessageAnalyzer,
    config: ConversationConfig,
    rng: StdRng,
    replies: u64,
}

impl ConversationState {
    pub fn new(id: impl Into<String>, config: ConversationConfig) -> Self {
        Self::with_rng(Some(id.into()), config, StdRng::from_entropy())
    }

    /// State for a single reply that is not kept between requests
    pub fn detached(config: ConversationConfig) -> Self {
        Self::with_rng(None, config, StdRng::from_entropy())
    }

    /// Build with a fixed random source
    pub fn with_rng(id: Option<String>, config: ConversationConfig, rng: StdRng) -> Self {
        let responder: Box<dyn Responder> = match config.voice_responder {
            VoiceResponder::Contextual => Box::new(ContextualEngine::new(config.memory_size)),
            VoiceResponder::Scripted => {
                Box::new(VoiceResponseEngine::new(config.voice_emotion_turns))
            }
        };

        Self {
            id,
            responder,
            analyzer: MessageAnalyzer::new(),
            config,
            rng,
            replies: 0,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn responder_name(&self) -> &'static str {
        self.responder.name()
    }

    /// Replies produced so far
    pub fn replies(&self) -> u64 {
        self.replies
    }

    /// Analyze `message` and produce the voice reply
    pub fn respond(&mut self, message: &str, history: &[Message]) -> VoiceReply {
        let analysis = self.analyzer.analyze(message);
        self.respond_with(message, &analysis, history)
    }

    pub fn respond_with(
        &mut self,
        message: &str,
        analysis: &MessageAnalysis,
        history: &[Message],
    ) -> VoiceReply {
        let turns = user_turns(history);
        let emotion = analysis.emotion.emotion;
        let intensity = analysis.emotion.intensity;

        let response = self.responder.respond(message, analysis, &mut self.rng);
        self.replies += 1;

        let ready_for_yoga = turns >= self.config.voice_yoga_turn_threshold
            && emotion.is_distressed()
            && intensity >= self.config.voice_yoga_min_intensity;

        tracing::debug!(
            conversation_id = self.id.as_deref().unwrap_or("-"),
            responder = self.responder.name(),
            turns,
            ready_for_yoga,
            "Voice reply generated"
        );

        VoiceReply {
            response,
            emotion,
            intensity,
            detected_language: analysis.language,
            ready_for_yoga,
            conversation_turns: turns,
            conversation_id: self.id.clone(),
        }
    }
}

impl std::fmt::Debug for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationState")
            .field("id", &self.id)
            .field("responder", &self.responder.name())
            .field("replies", &self.replies)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yoga_agent_core::EmotionResult;
    use yoga_agent_text_processing::SentimentResult;

    fn history(user_messages: usize) -> Vec<Message> {
        (0..user_messages)
            .flat_map(|i| [Message::user(format!("turn {}", i)), Message::system("ok")])
            .collect()
    }

    fn state(responder: VoiceResponder) -> ConversationState {
        let config = ConversationConfig {
            voice_responder: responder,
            ..Default::default()
        };
        ConversationState::with_rng(Some("conv-1".to_string()), config, StdRng::seed_from_u64(9))
    }

    fn analysis(emotion: Emotion, intensity: i64) -> MessageAnalysis {
        MessageAnalysis {
            language: Language::English,
            emotion: EmotionResult::new(emotion, intensity),
            sentiment: SentimentResult::default(),
            context: Default::default(),
            is_greeting: false,
        }
    }

    #[test]
    fn test_contextual_is_default() {
        let state = ConversationState::new("abc", ConversationConfig::default());
        assert_eq!(state.responder_name(), "contextual");
        assert_eq!(state.id(), Some("abc"));
    }

    #[test]
    fn test_detached_reply_has_no_id() {
        let mut state = ConversationState::detached(ConversationConfig::default());
        let reply = state.respond("Busy at the office", &[]);
        assert_eq!(reply.conversation_id, None);
        assert_eq!(reply.response, "How's work going? Keeping busy?");

        let json = serde_json::to_value(&reply).unwrap();
        assert!(json.get("conversation_id").is_none());
    }

    #[test]
    fn test_greeting_reply_and_echo() {
        let mut state = state(VoiceResponder::Contextual);
        let reply = state.respond("kaise ho", &[]);
        assert_eq!(reply.detected_language, Language::Hindi);
        assert_eq!(reply.emotion, Emotion::Neutral);
        assert_eq!(reply.conversation_turns, 0);
        assert_eq!(reply.conversation_id.as_deref(), Some("conv-1"));
        assert!(!reply.ready_for_yoga);
        assert_eq!(state.replies(), 1);
    }

    #[test]
    fn test_yoga_gate() {
        let mut state = state(VoiceResponder::Scripted);

        let reply = state.respond_with("long week", &analysis(Emotion::Stressed, 4), &history(3));
        assert!(reply.ready_for_yoga);
        assert_eq!(reply.conversation_turns, 3);

        let reply = state.respond_with("long week", &analysis(Emotion::Stressed, 4), &history(2));
        assert!(!reply.ready_for_yoga);

        let reply = state.respond_with("long week", &analysis(Emotion::Stressed, 2), &history(4));
        assert!(!reply.ready_for_yoga);

        let reply = state.respond_with("long week", &analysis(Emotion::Happy, 5), &history(4));
        assert!(!reply.ready_for_yoga);
    }

    #[test]
    fn test_scripted_counter_is_per_conversation() {
        let mut first = state(VoiceResponder::Scripted);
        let mut second = state(VoiceResponder::Scripted);
        let input = analysis(Emotion::Tired, 3);

        first.respond_with("long week", &input, &[]);
        first.respond_with("long week", &input, &[]);
        let reply = second.respond_with("long week", &input, &[]);
        assert_eq!(reply.response, "You sound tired. Long day?");
    }
}
