//! User persistence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use yoga_agent_core::User;

use crate::{PersistenceError, SqliteClient};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: i64) -> Result<Option<User>, PersistenceError>;
    async fn insert(&self, user: &User) -> Result<(), PersistenceError>;
    async fn count(&self) -> Result<u64, PersistenceError>;
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    created_at: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            created_at: DateTime::from_timestamp_millis(row.created_at).unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Clone)]
pub struct SqliteUserStore {
    client: SqliteClient,
}

impl SqliteUserStore {
    pub fn new(client: SqliteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn get(&self, id: i64) -> Result<Option<User>, PersistenceError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.client.pool())
        .await?;

        Ok(row.map(User::from))
    }

    async fn insert(&self, user: &User) -> Result<(), PersistenceError> {
        sqlx::query("INSERT INTO users (id, username, email, created_at) VALUES (?, ?, ?, ?)")
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(user.created_at.timestamp_millis())
            .execute(self.client.pool())
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User created");
        Ok(())
    }

    async fn count(&self) -> Result<u64, PersistenceError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.client.pool())
            .await?;
        Ok(count.max(0) as u64)
    }
}
