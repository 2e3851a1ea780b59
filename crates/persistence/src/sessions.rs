//! Practice session persistence
//!
//! Sessions are created once and then only updated: the client reports
//! elapsed duration while practicing and marks the session complete at
//! the end.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use yoga_agent_core::PracticeSession;

use crate::{PersistenceError, SqliteClient};

/// Fields of a session that are known before it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPracticeSession {
    pub user_id: i64,
    pub emotion: String,
    pub intensity: u8,
    pub sequence_id: i64,
}

#[async_trait]
pub trait PracticeSessionStore: Send + Sync {
    /// Insert a new, incomplete session and return it with its id
    async fn create(
        &self,
        session: NewPracticeSession,
    ) -> Result<PracticeSession, PersistenceError>;
    async fn get(&self, id: i64) -> Result<Option<PracticeSession>, PersistenceError>;
    /// Persist the mutable fields (`completed`, `duration`)
    async fn save(&self, session: &PracticeSession) -> Result<(), PersistenceError>;
    async fn count(&self) -> Result<u64, PersistenceError>;
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i64,
    user_id: i64,
    emotion: String,
    intensity: i64,
    sequence_id: i64,
    completed: bool,
    duration: Option<i64>,
    created_at: i64,
}

impl TryFrom<SessionRow> for PracticeSession {
    type Error = PersistenceError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let intensity = u8::try_from(row.intensity).map_err(|_| {
            PersistenceError::InvalidData(format!(
                "session {}: intensity out of range ({})",
                row.id, row.intensity
            ))
        })?;
        let duration = row
            .duration
            .map(u32::try_from)
            .transpose()
            .map_err(|_| {
                PersistenceError::InvalidData(format!("session {}: duration out of range", row.id))
            })?;

        Ok(PracticeSession {
            id: row.id,
            user_id: row.user_id,
            emotion: row.emotion,
            intensity,
            sequence_id: row.sequence_id,
            completed: row.completed,
            duration,
            created_at: DateTime::from_timestamp_millis(row.created_at).unwrap_or_else(Utc::now),
        })
    }
}

#[derive(Clone)]
pub struct SqlitePracticeSessionStore {
    client: SqliteClient,
}

impl SqlitePracticeSessionStore {
    pub fn new(client: SqliteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PracticeSessionStore for SqlitePracticeSessionStore {
    async fn create(
        &self,
        session: NewPracticeSession,
    ) -> Result<PracticeSession, PersistenceError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO sessions (user_id, emotion, intensity, sequence_id, completed, created_at)
            VALUES (?, ?, ?, ?, 0, ?)
            "#,
        )
        .bind(session.user_id)
        .bind(&session.emotion)
        .bind(i64::from(session.intensity))
        .bind(session.sequence_id)
        .bind(created_at.timestamp_millis())
        .execute(self.client.pool())
        .await?;

        let id = result.last_insert_rowid();

        tracing::info!(
            session_id = id,
            emotion = %session.emotion,
            intensity = session.intensity,
            sequence_id = session.sequence_id,
            "Practice session created"
        );

        Ok(PracticeSession {
            id,
            user_id: session.user_id,
            emotion: session.emotion,
            intensity: session.intensity,
            sequence_id: session.sequence_id,
            completed: false,
            duration: None,
            created_at,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<PracticeSession>, PersistenceError> {
        sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, emotion, intensity, sequence_id, completed, duration, created_at
            FROM sessions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.client.pool())
        .await?
        .map(PracticeSession::try_from)
        .transpose()
    }

    async fn save(&self, session: &PracticeSession) -> Result<(), PersistenceError> {
        sqlx::query("UPDATE sessions SET completed = ?, duration = ? WHERE id = ?")
            .bind(session.completed)
            .bind(session.duration.map(i64::from))
            .bind(session.id)
            .execute(self.client.pool())
            .await?;

        tracing::debug!(
            session_id = session.id,
            completed = session.completed,
            duration = ?session.duration,
            "Practice session saved"
        );

        Ok(())
    }

    async fn count(&self) -> Result<u64, PersistenceError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(self.client.pool())
            .await?;
        Ok(count.max(0) as u64)
    }
}
