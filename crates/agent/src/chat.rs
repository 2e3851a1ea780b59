//! Chat replies
//!
//! The response bucket is an ordered decision table; the first matching
//! row wins and `supportive_response` catches everything else:
//!
//! 1. objective text that is not a pure greeting → `general_chat`
//! 2. mentions a coping activity → `coping_response`
//! 3. pure greeting → `simple_greeting`
//! 4. classified `happy` → `happy_response`
//!
//! Reply text is chosen after the bucket. Small talk mixed with stress
//! gets a dedicated reply, small talk without any emotion word gets
//! another, and everything else uses the bucket's template.

use serde::{Deserialize, Serialize};
use yoga_agent_config::ConversationConfig;
use yoga_agent_core::{user_turns, ContextBucket, Emotion, Intensity, Language, Message};
use yoga_agent_text_processing::{
    has_greeting_phrase, is_chat_question, keywords::normalize, mentions_coping,
    mentions_emotion_word, MessageAnalysis, MessageAnalyzer,
};

use crate::phrasebook::{
    bucket_template, EMOTION_PLACEHOLDER, FOLLOW_UPS_DEFAULT, FOLLOW_UPS_HAPPY,
    FOLLOW_UPS_SMALL_TALK, SMALL_TALK, STRESSED_GREETING, YOGA_INVITATION,
};

/// Texts scoring below this subjectivity are treated as factual
pub const SUBJECTIVITY_THRESHOLD: f64 = 0.3;

/// Body of a `/api/chat-analyze` reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub emotion: Emotion,
    pub intensity: Intensity,
    pub detected_language: Language,
    pub follow_up_questions: Vec<String>,
    pub ready_for_yoga: bool,
    pub yoga_message: String,
    pub conversation_stage: ContextBucket,
}

/// Inputs to the bucket decision table
#[derive(Debug, Clone, Copy)]
struct BucketSignals {
    objective: bool,
    coping: bool,
    greeting: bool,
    emotion: Emotion,
}

type BucketRule = (fn(&BucketSignals) -> bool, ContextBucket);

const BUCKET_RULES: &[BucketRule] = &[
    (is_objective_chat, ContextBucket::GeneralChat),
    (mentions_coping_activity, ContextBucket::CopingResponse),
    (is_pure_greeting, ContextBucket::SimpleGreeting),
    (is_happy, ContextBucket::HappyResponse),
];

// A pure greeting carries no opinion words, so it is exempt from the
// objective-text row.
fn is_objective_chat(s: &BucketSignals) -> bool {
    s.objective && !s.greeting
}

fn mentions_coping_activity(s: &BucketSignals) -> bool {
    s.coping
}

fn is_pure_greeting(s: &BucketSignals) -> bool {
    s.greeting
}

fn is_happy(s: &BucketSignals) -> bool {
    s.emotion == Emotion::Happy
}

/// Pick the response bucket for a message. Exactly one bucket is returned.
pub fn select_bucket(message: &str, analysis: &MessageAnalysis) -> ContextBucket {
    let signals = BucketSignals {
        objective: analysis.sentiment.is_objective(SUBJECTIVITY_THRESHOLD),
        coping: mentions_coping(message),
        greeting: analysis.is_greeting,
        emotion: analysis.emotion.emotion,
    };

    BUCKET_RULES
        .iter()
        .find(|(matches, _)| matches(&signals))
        .map(|(_, bucket)| *bucket)
        .unwrap_or(ContextBucket::SupportiveResponse)
}

/// Reply text for a bucket, honouring the small-talk overrides
pub fn compose_reply(
    bucket: ContextBucket,
    language: Language,
    emotion: Emotion,
    message: &str,
) -> String {
    let small_talk = has_greeting_phrase(message);
    let emotional = mentions_emotion_word(message);

    if small_talk && emotional {
        if emotion == Emotion::Stressed || normalize(message).contains("tension") {
            return STRESSED_GREETING.get(language).to_string();
        }
    } else if small_talk {
        return SMALL_TALK.get(language).to_string();
    }

    bucket_template(bucket)
        .get(language)
        .replace(EMOTION_PLACEHOLDER, emotion.as_str())
}

/// Up to two canned follow-up questions
pub fn follow_up_questions(message: &str, emotion: Emotion, language: Language) -> Vec<String> {
    let table = if has_greeting_phrase(message) {
        &FOLLOW_UPS_SMALL_TALK
    } else if emotion == Emotion::Happy {
        &FOLLOW_UPS_HAPPY
    } else {
        &FOLLOW_UPS_DEFAULT
    };
    table.get(language).iter().map(|q| q.to_string()).collect()
}

/// Chat-path responder
#[derive(Debug, Clone)]
pub struct ChatResponder {
    analyzer: MessageAnalyzer,
    config: ConversationConfig,
}

impl ChatResponder {
    pub fn new(config: ConversationConfig) -> Self {
        Self {
            analyzer: MessageAnalyzer::new(),
            config,
        }
    }

    /// Analyze `message` and build the full reply
    pub fn respond(&self, message: &str, history: &[Message]) -> ChatReply {
        let analysis = self.analyzer.analyze(message);
        self.respond_with(message, &analysis, history)
    }

    /// Build the reply from an existing analysis
    pub fn respond_with(
        &self,
        message: &str,
        analysis: &MessageAnalysis,
        history: &[Message],
    ) -> ChatReply {
        let turns = user_turns(history);
        let language = analysis.language;
        let emotion = analysis.emotion.emotion;

        let bucket = select_bucket(message, analysis);
        let response = compose_reply(bucket, language, emotion, message);

        let ready_for_yoga = turns > self.config.chat_yoga_turn_threshold
            && emotion != Emotion::Neutral
            && bucket != ContextBucket::SimpleGreeting;

        let follow_ups =
            if bucket.allows_follow_ups() && !is_chat_question(message) && !analysis.is_greeting {
                let mut questions = follow_up_questions(message, emotion, language);
                questions.truncate(self.config.max_follow_up_questions);
                questions
            } else {
                Vec::new()
            };

        let yoga_message = if ready_for_yoga {
            YOGA_INVITATION.get(language).to_string()
        } else {
            String::new()
        };

        tracing::debug!(
            bucket = %bucket,
            turns,
            ready_for_yoga,
            follow_ups = follow_ups.len(),
            "Chat reply selected"
        );

        ChatReply {
            response,
            emotion,
            intensity: analysis.emotion.intensity,
            detected_language: language,
            follow_up_questions: follow_ups,
            ready_for_yoga,
            yoga_message,
            conversation_stage: bucket,
        }
    }
}

impl Default for ChatResponder {
    fn default() -> Self {
        Self::new(ConversationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(user_messages: usize) -> Vec<Message> {
        (0..user_messages)
            .flat_map(|i| {
                vec![
                    Message::user(format!("message {}", i)),
                    Message::system("ok"),
                ]
            })
            .collect()
    }

    #[test]
    fn test_hindi_greeting_end_to_end() {
        let reply = ChatResponder::default().respond("kaise ho", &[]);
        assert_eq!(reply.detected_language, Language::Hindi);
        assert_eq!(reply.emotion, Emotion::Neutral);
        assert_eq!(reply.intensity, 3);
        assert_eq!(reply.conversation_stage, ContextBucket::SimpleGreeting);
        assert_eq!(reply.response, "Yahan hun tumse baat karne! Tum kya kar rahe ho?");
        assert!(reply.follow_up_questions.is_empty());
        assert!(!reply.ready_for_yoga);
        assert_eq!(reply.yoga_message, "");
    }

    #[test]
    fn test_supportive_reply_with_follow_ups() {
        let reply = ChatResponder::default().respond("I feel stressed and tired", &history(1));
        assert_eq!(reply.emotion, Emotion::Stressed);
        assert_eq!(reply.conversation_stage, ContextBucket::SupportiveResponse);
        assert_eq!(
            reply.response,
            "I can sense you're feeling stressed. Want to talk about it?"
        );
        assert_eq!(
            reply.follow_up_questions,
            vec!["Want to talk about it?", "How are you feeling?"]
        );
        assert!(!reply.ready_for_yoga);
    }

    #[test]
    fn test_yoga_gating_needs_more_than_five_turns() {
        let responder = ChatResponder::default();

        let reply = responder.respond("I feel stressed and tired", &history(5));
        assert!(!reply.ready_for_yoga);

        let reply = responder.respond("I feel stressed and tired", &history(6));
        assert!(reply.ready_for_yoga);
        assert_eq!(reply.yoga_message, "Want to try some yoga? It might help.");
    }

    #[test]
    fn test_no_yoga_for_neutral_or_greeting() {
        let responder = ChatResponder::default();
        let reply = responder.respond("I went to the office", &history(10));
        assert_eq!(reply.emotion, Emotion::Neutral);
        assert!(!reply.ready_for_yoga);

        let reply = responder.respond("hey there", &history(10));
        assert_eq!(reply.conversation_stage, ContextBucket::SimpleGreeting);
        assert!(!reply.ready_for_yoga);
    }

    #[test]
    fn test_objective_text_is_general_chat() {
        let reply = ChatResponder::default().respond("I went to the office", &[]);
        assert_eq!(reply.conversation_stage, ContextBucket::GeneralChat);
        assert_eq!(reply.response, "Tell me more about what's going on.");
        assert_eq!(reply.follow_up_questions.len(), 2);
    }

    #[test]
    fn test_coping_beats_happy() {
        let reply = ChatResponder::default().respond("I love listening to music with friends", &[]);
        assert_eq!(reply.emotion, Emotion::Happy);
        assert_eq!(reply.conversation_stage, ContextBucket::CopingResponse);
        assert_eq!(reply.response, "That's great! Those things really help.");
        assert!(reply.follow_up_questions.is_empty());
    }

    #[test]
    fn test_small_talk_with_tension() {
        let reply =
            ChatResponder::default().respond("em chestunav, chala tension ga undi", &[]);
        assert_eq!(reply.detected_language, Language::Telugu);
        assert_eq!(
            reply.response,
            "Nuvvu tension lo unnav anipistundi. Emi jarigindi cheppu?"
        );
        assert_eq!(reply.conversation_stage, ContextBucket::SupportiveResponse);
        assert_eq!(
            reply.follow_up_questions,
            vec!["Nuvvu tho matladutunna!", "Nuvvu ela unnav? Day ela undi?"]
        );
    }

    #[test]
    fn test_small_talk_with_non_stress_emotion_uses_bucket() {
        let reply = ChatResponder::default().respond("kaise ho, main bahut happy hoon", &[]);
        assert_eq!(reply.emotion, Emotion::Neutral);
        assert_eq!(reply.conversation_stage, ContextBucket::SupportiveResponse);
        assert_eq!(
            reply.response,
            "Lagta hai tum neutral feel kar rahe ho. Baat karna hai?"
        );
    }

    #[test]
    fn test_questions_get_no_follow_ups() {
        let reply = ChatResponder::default().respond("why do I feel so sad?", &[]);
        assert_eq!(reply.conversation_stage, ContextBucket::SupportiveResponse);
        assert!(reply.follow_up_questions.is_empty());
    }

    #[test]
    fn test_follow_up_cap_is_configurable() {
        let config = ConversationConfig {
            max_follow_up_questions: 1,
            ..ConversationConfig::default()
        };
        let reply = ChatResponder::new(config).respond("I feel stressed and tired", &[]);
        assert_eq!(reply.follow_up_questions.len(), 1);
    }

    #[test]
    fn test_bucket_is_total() {
        let analyzer = MessageAnalyzer::new();
        for text in ["", "?", "hi", "music", "awful day", "great news", "namaste friends"] {
            let analysis = analyzer.analyze(text);
            // any of the five, never a panic
            let _ = select_bucket(text, &analysis).as_str();
        }
    }
}
