//! Guided practice endpoints: session lifecycle and asana lookup

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use yoga_agent_core::{AsanaStep, Sequence, MAX_INTENSITY, MIN_INTENSITY};
use yoga_agent_persistence::{NewPracticeSession, DEFAULT_USER_ID};

use crate::metrics::record_request;
use crate::payload::{LooseInteger, Payload};
use crate::state::AppState;
use crate::ServerError;

const NO_DATA: &str = "No JSON data provided";
const SESSION_NOT_FOUND: &str = "Session not found";

/// Emotion whose sequence is used when the requested one has none
const FALLBACK_EMOTION: &str = "happy";

#[derive(Debug, Serialize)]
pub struct SequenceAsana {
    pub id: i64,
    pub name: String,
    pub sanskrit_name: String,
    pub overview_image: String,
    pub steps: Vec<AsanaStep>,
    /// Hold time in seconds
    pub duration: u32,
}

#[derive(Debug, Serialize)]
pub struct SequenceDetail {
    pub id: i64,
    pub name: String,
    pub total_duration: u32,
    pub asanas: Vec<SequenceAsana>,
}

#[derive(Debug, Serialize)]
pub struct SessionStarted {
    pub session_id: i64,
    pub sequence: SequenceDetail,
}

#[derive(Debug, Serialize)]
pub struct AsanaDetail {
    pub id: i64,
    pub name: String,
    pub sanskrit_name: String,
    pub overview_image: String,
    pub steps: Vec<AsanaStep>,
    pub difficulty: String,
    pub benefits: String,
}

/// `POST /api/session/start` body
#[derive(Debug, Default, Deserialize)]
pub struct SessionStartRequest {
    #[serde(default)]
    pub emotion: Option<String>,
    #[serde(default)]
    pub intensity: Option<LooseInteger>,
}

/// `POST /api/session/:id/update` and `/complete` body
#[derive(Debug, Default, Deserialize)]
pub struct ProgressRequest {
    /// Seconds practiced
    #[serde(default)]
    pub duration: Option<LooseInteger>,
}

/// Validated `(emotion, intensity)` from a session-start body
fn session_request(request: SessionStartRequest) -> Result<(String, u8), ServerError> {
    let required = || ServerError::InvalidRequest("emotion and intensity are required".to_string());

    let emotion = request
        .emotion
        .filter(|e| !e.is_empty())
        .ok_or_else(required)?;
    let intensity = request
        .intensity
        .filter(|i| !i.is_blank())
        .ok_or_else(required)?;

    let intensity = intensity
        .value()
        .ok_or_else(|| ServerError::InvalidRequest("intensity must be a number".to_string()))?;

    if !(i64::from(MIN_INTENSITY)..=i64::from(MAX_INTENSITY)).contains(&intensity) {
        return Err(ServerError::InvalidRequest(
            "intensity must be between 1 and 5".to_string(),
        ));
    }

    let emotion = if emotion == "neutral" {
        FALLBACK_EMOTION.to_string()
    } else {
        emotion
    };

    // Range checked above
    Ok((emotion, intensity as u8))
}

/// Optional `duration` in seconds
fn duration_field(request: &ProgressRequest) -> Result<Option<u32>, ServerError> {
    let Some(value) = &request.duration else {
        return Ok(None);
    };
    let seconds = value
        .value()
        .ok_or_else(|| ServerError::InvalidRequest("duration must be a number".to_string()))?;
    u32::try_from(seconds).map(Some).map_err(|_| {
        ServerError::InvalidRequest(format!(
            "duration must be between 0 and {} seconds",
            u32::MAX
        ))
    })
}

fn session_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse()
        .map_err(|_| ServerError::NotFound(SESSION_NOT_FOUND.to_string()))
}

/// Sequence for `emotion`: its own, else the fallback emotion's, else the
/// first in the catalog
async fn pick_sequence(state: &AppState, emotion: &str) -> Result<Option<Sequence>, ServerError> {
    let catalog = &state.persistence.catalog;

    if let Some(sequence) = catalog.sequence_for_emotion(emotion).await? {
        return Ok(Some(sequence));
    }
    if let Some(sequence) = catalog.sequence_for_emotion(FALLBACK_EMOTION).await? {
        return Ok(Some(sequence));
    }
    Ok(catalog.list_sequences().await?.into_iter().next())
}

/// `POST /api/session/start`
pub async fn start_session(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<(StatusCode, Json<SessionStarted>), ServerError> {
    record_request("session_start");

    let (emotion, intensity) = session_request(payload.require(NO_DATA)?)?;

    let sequence = pick_sequence(&state, &emotion)
        .await?
        .ok_or(ServerError::DatabaseUninitialized)?;

    let session = state
        .persistence
        .sessions
        .create(NewPracticeSession {
            user_id: DEFAULT_USER_ID,
            emotion,
            intensity,
            sequence_id: sequence.id,
        })
        .await?;

    let mut asanas = Vec::with_capacity(sequence.asana_sequence.len());
    for step in &sequence.asana_sequence {
        match state.persistence.catalog.get_asana(step.asana_id).await? {
            Some(asana) => asanas.push(SequenceAsana {
                id: asana.id,
                name: asana.name,
                sanskrit_name: asana.sanskrit_name,
                overview_image: asana.overview_image,
                steps: asana.steps,
                duration: step.duration,
            }),
            None => tracing::warn!(
                sequence_id = sequence.id,
                asana_id = step.asana_id,
                "Sequence references a missing asana"
            ),
        }
    }

    let body = SessionStarted {
        session_id: session.id,
        sequence: SequenceDetail {
            id: sequence.id,
            name: sequence.name,
            total_duration: sequence.total_duration,
            asanas,
        },
    };

    Ok((StatusCode::CREATED, Json(body)))
}

/// `POST /api/session/:id/update`
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<Json<Value>, ServerError> {
    record_request("session_update");
    record_progress(&state, &id, payload, false).await?;
    Ok(Json(
        serde_json::json!({ "message": "Session updated successfully" }),
    ))
}

/// `POST /api/session/:id/complete`
pub async fn complete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<Json<Value>, ServerError> {
    record_request("session_complete");
    record_progress(&state, &id, payload, true).await?;
    Ok(Json(
        serde_json::json!({ "message": "Session completed successfully" }),
    ))
}

async fn record_progress(
    state: &AppState,
    raw_id: &str,
    payload: Payload,
    complete: bool,
) -> Result<(), ServerError> {
    let id = session_id(raw_id)?;
    let mut session = state
        .persistence
        .sessions
        .get(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(SESSION_NOT_FOUND.to_string()))?;

    let request: ProgressRequest = payload.require(NO_DATA)?;
    if let Some(duration) = duration_field(&request)? {
        session.duration = Some(duration);
    }
    if complete {
        session.completed = true;
    }

    state.persistence.sessions.save(&session).await?;

    tracing::info!(
        session_id = id,
        completed = session.completed,
        duration = ?session.duration,
        "Practice session progress recorded"
    );
    Ok(())
}

/// `GET /api/asanas/:id`
pub async fn get_asana(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AsanaDetail>, ServerError> {
    record_request("asana");

    let not_found = || ServerError::NotFound("Asana not found".to_string());
    let id: i64 = id.parse().map_err(|_| not_found())?;
    let asana = state
        .persistence
        .catalog
        .get_asana(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(AsanaDetail {
        id: asana.id,
        name: asana.name,
        sanskrit_name: asana.sanskrit_name,
        overview_image: asana.overview_image,
        steps: asana.steps,
        difficulty: asana.difficulty,
        benefits: asana.benefits,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn start(value: Value) -> SessionStartRequest {
        serde_json::from_value(value).unwrap()
    }

    fn progress(value: Value) -> ProgressRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_session_request_validation() {
        let err = |v: Value| session_request(start(v)).unwrap_err().to_string();

        assert_eq!(err(json!({"emotion": "sad"})), "emotion and intensity are required");
        assert_eq!(err(json!({"emotion": "", "intensity": 3})), "emotion and intensity are required");
        assert_eq!(err(json!({"emotion": "sad", "intensity": 0})), "emotion and intensity are required");
        assert_eq!(err(json!({"emotion": "sad", "intensity": false})), "emotion and intensity are required");
        assert_eq!(err(json!({"emotion": "sad", "intensity": "lots"})), "intensity must be a number");
        assert_eq!(err(json!({"emotion": "sad", "intensity": [2]})), "intensity must be a number");
        assert_eq!(err(json!({"emotion": "sad", "intensity": "0"})), "intensity must be between 1 and 5");
        assert_eq!(err(json!({"emotion": "sad", "intensity": 6})), "intensity must be between 1 and 5");
    }

    #[test]
    fn test_session_request_accepts_strings_and_maps_neutral() {
        let (emotion, intensity) =
            session_request(start(json!({"emotion": "neutral", "intensity": "4"}))).unwrap();
        assert_eq!(emotion, "happy");
        assert_eq!(intensity, 4);
    }

    #[test]
    fn test_session_request_coerces_true_to_one() {
        let (emotion, intensity) =
            session_request(start(json!({"emotion": "tired", "intensity": true}))).unwrap();
        assert_eq!(emotion, "tired");
        assert_eq!(intensity, 1);
    }

    #[test]
    fn test_duration_field() {
        assert_eq!(duration_field(&progress(json!({"x": 1}))).unwrap(), None);
        assert_eq!(duration_field(&progress(json!({"duration": "90"}))).unwrap(), Some(90));
        assert_eq!(
            duration_field(&progress(json!({"duration": "soon"}))).unwrap_err().to_string(),
            "duration must be a number"
        );
    }

    #[test]
    fn test_duration_out_of_range() {
        let expected = "duration must be between 0 and 4294967295 seconds";
        for value in [json!(-5), json!(5_000_000_000u64)] {
            let err = duration_field(&progress(json!({ "duration": value }))).unwrap_err();
            assert_eq!(err.to_string(), expected);
        }
        assert_eq!(
            duration_field(&progress(json!({"duration": 4294967295u64}))).unwrap(),
            Some(u32::MAX)
        );
    }
}
