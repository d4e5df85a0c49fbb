//! SQL implementation of the blocked date repository

use crate::error::DbError;
use crate::repositories::blocked_dates::BlockedDateRepository;
use crate::DbClient;
use barberbook_common::models::BlockedDate;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::{debug, info};

/// SQL implementation of the blocked date repository
#[derive(Debug, Clone)]
pub struct SqlBlockedDateRepository {
    db_client: DbClient,
}

impl SqlBlockedDateRepository {
    /// Create a new SQL blocked date repository.
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_blocked_date(row: &SqliteRow) -> Result<BlockedDate, DbError> {
    let date_raw: String = row
        .try_get("date")
        .map_err(|e| DbError::DecodeError(e.to_string()))?;
    let created_raw: String = row
        .try_get("created_at")
        .map_err(|e| DbError::DecodeError(e.to_string()))?;

    Ok(BlockedDate {
        id: row
            .try_get("id")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        date: NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        reason: row
            .try_get("reason")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        created_at: DateTime::parse_from_rfc3339(&created_raw)
            .map_err(|e| DbError::DecodeError(e.to_string()))?
            .with_timezone(&Utc),
    })
}

impl BlockedDateRepository for SqlBlockedDateRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing blocked dates schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS blocked_dates (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                reason TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(query).await?;

        self.db_client
            .execute("CREATE INDEX IF NOT EXISTS idx_blocked_dates_date ON blocked_dates(date)")
            .await?;

        info!("Blocked dates schema initialized successfully");
        Ok(())
    }

    async fn add(&self, blocked: BlockedDate) -> Result<BlockedDate, DbError> {
        debug!("Blocking date: {}", blocked.date);

        // Set semantics: blocking a date that is already blocked keeps the
        // existing entry.
        if let Some(existing) = self.find_by_date(blocked.date).await? {
            return Ok(existing);
        }

        let query = r#"
            INSERT INTO blocked_dates (id, date, reason, created_at)
            VALUES ($1, $2, $3, $4)
        "#;

        sqlx::query(query)
            .bind(&blocked.id)
            .bind(blocked.date.format("%Y-%m-%d").to_string())
            .bind(&blocked.reason)
            .bind(blocked.created_at.to_rfc3339())
            .execute(self.db_client.pool())
            .await?;

        info!("Date blocked: {}", blocked.date);
        Ok(blocked)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<BlockedDate>, DbError> {
        let query = r#"
            SELECT id, date, reason, created_at
            FROM blocked_dates
            WHERE date = $1
        "#;

        let row = sqlx::query(query)
            .bind(date.format("%Y-%m-%d").to_string())
            .fetch_optional(self.db_client.pool())
            .await?;

        row.as_ref().map(row_to_blocked_date).transpose()
    }

    async fn list(&self) -> Result<Vec<BlockedDate>, DbError> {
        let query = r#"
            SELECT id, date, reason, created_at
            FROM blocked_dates
            ORDER BY date
        "#;

        let rows = sqlx::query(query)
            .fetch_all(self.db_client.pool())
            .await?;

        rows.iter().map(row_to_blocked_date).collect()
    }

    async fn remove_by_date(&self, date: NaiveDate) -> Result<bool, DbError> {
        debug!("Unblocking date: {}", date);

        let result = sqlx::query("DELETE FROM blocked_dates WHERE date = $1")
            .bind(date.format("%Y-%m-%d").to_string())
            .execute(self.db_client.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
