//! SQL implementation of the schedule repository

use crate::error::DbError;
use crate::repositories::schedule::ScheduleRepository;
use crate::DbClient;
use barberbook_common::models::WeeklySchedule;
use chrono::Utc;
use sqlx::Row;
use tracing::{debug, info};

const SCHEDULE_KEY: &str = "weekly_schedule";

/// SQL implementation of the schedule repository
#[derive(Debug, Clone)]
pub struct SqlScheduleRepository {
    db_client: DbClient,
}

impl SqlScheduleRepository {
    /// Create a new SQL schedule repository.
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

impl ScheduleRepository for SqlScheduleRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing settings schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Settings schema initialized successfully");
        Ok(())
    }

    async fn load(&self) -> Result<WeeklySchedule, DbError> {
        debug!("Loading weekly schedule");

        let query = "SELECT value FROM settings WHERE key = $1";

        let row = sqlx::query(query)
            .bind(SCHEDULE_KEY)
            .fetch_optional(self.db_client.pool())
            .await?;

        match row {
            Some(row) => {
                let raw: String = row
                    .try_get("value")
                    .map_err(|e| DbError::DecodeError(e.to_string()))?;
                serde_json::from_str(&raw).map_err(|e| DbError::DecodeError(e.to_string()))
            }
            None => Ok(WeeklySchedule::default()),
        }
    }

    async fn save(&self, schedule: &WeeklySchedule) -> Result<(), DbError> {
        debug!("Saving weekly schedule");

        let value =
            serde_json::to_string(schedule).map_err(|e| DbError::DecodeError(e.to_string()))?;

        let query = r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#;

        sqlx::query(query)
            .bind(SCHEDULE_KEY)
            .bind(&value)
            .bind(Utc::now().to_rfc3339())
            .execute(self.db_client.pool())
            .await?;

        info!("Weekly schedule saved successfully");
        Ok(())
    }
}
