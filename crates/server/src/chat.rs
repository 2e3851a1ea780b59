//! Chat, voice-chat and conversation-analysis handlers

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use yoga_agent_agent::{
    analyze_conversation, ChatReply, ConversationState, ConversationSummary, VoiceReply,
};
use yoga_agent_core::Message;

use crate::metrics::{record_classification, record_request};
use crate::payload::Payload;
use crate::state::AppState;
use crate::ServerError;

const MESSAGE_REQUIRED: &str = "Message is required";
const MESSAGE_TOO_SHORT: &str = "Please provide a longer message";
const HISTORY_REQUIRED: &str = "Conversation history is required";

/// `POST /api/chat-analyze` body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_history: Option<Vec<Message>>,
}

/// `POST /api/voice-chat` body
#[derive(Debug, Deserialize)]
pub struct VoiceChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_history: Option<Vec<Message>>,
    /// Keeps reply state between requests when present
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// `POST /api/analyze-conversation` body
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub conversation_history: Option<Vec<Message>>,
}

/// Trimmed message, at least `min_chars` characters long
fn required_message(message: Option<&str>, min_chars: usize) -> Result<String, ServerError> {
    let message = message
        .ok_or_else(|| ServerError::InvalidRequest(MESSAGE_REQUIRED.to_string()))?
        .trim();

    if message.chars().count() < min_chars {
        return Err(ServerError::InvalidRequest(MESSAGE_TOO_SHORT.to_string()));
    }
    Ok(message.to_string())
}

/// `POST /api/chat-analyze`
pub async fn chat_analyze(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<Json<ChatReply>, ServerError> {
    record_request("chat_analyze");

    let request: ChatRequest = payload.require(MESSAGE_REQUIRED)?;
    let message = required_message(request.message.as_deref(), state.min_message_chars())?;
    let history = request.conversation_history.unwrap_or_default();

    let analysis = state.analyzer.analyze(&message);
    record_classification(analysis.language, analysis.emotion.emotion);

    let reply = state.chat.respond_with(&message, &analysis, &history);

    tracing::info!(
        language = %reply.detected_language,
        emotion = %reply.emotion,
        intensity = reply.intensity,
        stage = %reply.conversation_stage,
        ready_for_yoga = reply.ready_for_yoga,
        "Chat message analyzed"
    );

    Ok(Json(reply))
}

/// `POST /api/voice-chat`
pub async fn voice_chat(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<Json<VoiceReply>, ServerError> {
    record_request("voice_chat");

    let request: VoiceChatRequest = payload.require(MESSAGE_REQUIRED)?;
    let message = required_message(request.message.as_deref(), state.min_message_chars())?;
    let history = request.conversation_history.unwrap_or_default();

    let analysis = state.analyzer.analyze(&message);
    record_classification(analysis.language, analysis.emotion.emotion);

    let reply = match request.conversation_id.as_deref() {
        Some(id) => state
            .conversations
            .get_or_create(id)?
            .with_state(|s| s.respond_with(&message, &analysis, &history)),
        None => {
            let config = state.get_config().conversation.clone();
            ConversationState::detached(config).respond_with(&message, &analysis, &history)
        }
    };

    tracing::info!(
        conversation_id = reply.conversation_id.as_deref().unwrap_or("-"),
        language = %reply.detected_language,
        emotion = %reply.emotion,
        turns = reply.conversation_turns,
        ready_for_yoga = reply.ready_for_yoga,
        "Voice message answered"
    );

    Ok(Json(reply))
}

/// `POST /api/analyze-conversation`
pub async fn analyze(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<Json<ConversationSummary>, ServerError> {
    record_request("analyze_conversation");

    let request: AnalyzeRequest = payload.require(HISTORY_REQUIRED)?;
    let history = request
        .conversation_history
        .ok_or_else(|| ServerError::InvalidRequest(HISTORY_REQUIRED.to_string()))?;

    let summary = analyze_conversation(&state.analyzer, &history)
        .ok_or_else(|| ServerError::InvalidRequest("No user messages found".to_string()))?;

    record_classification(summary.detected_language, summary.emotion);
    Ok(Json(summary))
}
