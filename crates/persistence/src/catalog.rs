//! Asana and sequence catalog

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use yoga_agent_core::{Asana, AsanaStep, Sequence, SequenceStep};

use crate::{PersistenceError, SqliteClient};

/// Read access to the catalog plus wholesale replacement for seeding
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_asana(&self, id: i64) -> Result<Option<Asana>, PersistenceError>;
    /// All sequences ordered by id
    async fn list_sequences(&self) -> Result<Vec<Sequence>, PersistenceError>;
    /// Lowest-id sequence targeting `emotion`
    async fn sequence_for_emotion(
        &self,
        emotion: &str,
    ) -> Result<Option<Sequence>, PersistenceError>;
    async fn count_asanas(&self) -> Result<u64, PersistenceError>;
    async fn count_sequences(&self) -> Result<u64, PersistenceError>;
    /// Drop every asana and sequence and insert the given ones
    async fn replace_catalog(
        &self,
        asanas: &[Asana],
        sequences: &[Sequence],
    ) -> Result<(), PersistenceError>;
}

#[derive(sqlx::FromRow)]
struct AsanaRow {
    id: i64,
    name: String,
    sanskrit_name: String,
    overview_image: String,
    step_data: Json<Vec<AsanaStep>>,
    difficulty: String,
    benefits: String,
}

impl From<AsanaRow> for Asana {
    fn from(row: AsanaRow) -> Self {
        Asana {
            id: row.id,
            name: row.name,
            sanskrit_name: row.sanskrit_name,
            overview_image: row.overview_image,
            steps: row.step_data.0,
            difficulty: row.difficulty,
            benefits: row.benefits,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SequenceRow {
    id: i64,
    name: String,
    emotion: String,
    intensity_min: i64,
    intensity_max: i64,
    asana_sequence: Json<Vec<SequenceStep>>,
    total_duration: i64,
}

impl TryFrom<SequenceRow> for Sequence {
    type Error = PersistenceError;

    fn try_from(row: SequenceRow) -> Result<Self, Self::Error> {
        let invalid = |field: &str, value: i64| {
            PersistenceError::InvalidData(format!(
                "sequence {}: {} out of range ({})",
                row.id, field, value
            ))
        };

        Ok(Sequence {
            id: row.id,
            name: row.name,
            emotion: row.emotion,
            intensity_min: u8::try_from(row.intensity_min)
                .map_err(|_| invalid("intensity_min", row.intensity_min))?,
            intensity_max: u8::try_from(row.intensity_max)
                .map_err(|_| invalid("intensity_max", row.intensity_max))?,
            asana_sequence: row.asana_sequence.0,
            total_duration: u32::try_from(row.total_duration)
                .map_err(|_| invalid("total_duration", row.total_duration))?,
        })
    }
}

const SEQUENCE_COLUMNS: &str =
    "id, name, emotion, intensity_min, intensity_max, asana_sequence, total_duration";

/// SQLite implementation of the catalog
#[derive(Clone)]
pub struct SqliteCatalogStore {
    client: SqliteClient,
}

impl SqliteCatalogStore {
    pub fn new(client: SqliteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn get_asana(&self, id: i64) -> Result<Option<Asana>, PersistenceError> {
        let row = sqlx::query_as::<_, AsanaRow>(
            r#"
            SELECT id, name, sanskrit_name, overview_image, step_data, difficulty, benefits
            FROM asanas
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.client.pool())
        .await?;

        Ok(row.map(Asana::from))
    }

    async fn list_sequences(&self) -> Result<Vec<Sequence>, PersistenceError> {
        let query = format!("SELECT {} FROM sequences ORDER BY id", SEQUENCE_COLUMNS);
        sqlx::query_as::<_, SequenceRow>(&query)
            .fetch_all(self.client.pool())
            .await?
            .into_iter()
            .map(Sequence::try_from)
            .collect()
    }

    async fn sequence_for_emotion(
        &self,
        emotion: &str,
    ) -> Result<Option<Sequence>, PersistenceError> {
        let query = format!(
            "SELECT {} FROM sequences WHERE emotion = ? ORDER BY id LIMIT 1",
            SEQUENCE_COLUMNS
        );
        sqlx::query_as::<_, SequenceRow>(&query)
            .bind(emotion)
            .fetch_optional(self.client.pool())
            .await?
            .map(Sequence::try_from)
            .transpose()
    }

    async fn count_asanas(&self) -> Result<u64, PersistenceError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM asanas")
            .fetch_one(self.client.pool())
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn count_sequences(&self) -> Result<u64, PersistenceError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sequences")
            .fetch_one(self.client.pool())
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn replace_catalog(
        &self,
        asanas: &[Asana],
        sequences: &[Sequence],
    ) -> Result<(), PersistenceError> {
        let created_at = Utc::now().timestamp_millis();
        let mut tx = self.client.pool().begin().await?;

        sqlx::query("DELETE FROM sequences").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM asanas").execute(&mut *tx).await?;

        for asana in asanas {
            sqlx::query(
                r#"
                INSERT INTO asanas
                    (id, name, sanskrit_name, overview_image, step_data, difficulty, benefits, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(asana.id)
            .bind(&asana.name)
            .bind(&asana.sanskrit_name)
            .bind(&asana.overview_image)
            .bind(Json(&asana.steps))
            .bind(&asana.difficulty)
            .bind(&asana.benefits)
            .bind(created_at)
            .execute(&mut *tx)
            .await?;
        }

        for sequence in sequences {
            sqlx::query(
                r#"
                INSERT INTO sequences
                    (id, name, emotion, intensity_min, intensity_max, asana_sequence, total_duration, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(sequence.id)
            .bind(&sequence.name)
            .bind(&sequence.emotion)
            .bind(i64::from(sequence.intensity_min))
            .bind(i64::from(sequence.intensity_max))
            .bind(Json(&sequence.asana_sequence))
            .bind(i64::from(sequence.total_duration))
            .bind(created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            asanas = asanas.len(),
            sequences = sequences.len(),
            "Catalog replaced"
        );

        Ok(())
    }
}
