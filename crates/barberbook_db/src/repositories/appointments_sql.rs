//! SQL implementation of the appointment repository

use crate::error::DbError;
use crate::repositories::appointments::AppointmentRepository;
use crate::DbClient;
use barberbook_common::models::{Appointment, AppointmentStatus, Extra, ServiceKind};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;
use tracing::{debug, info};

/// SQL implementation of the appointment repository
#[derive(Debug, Clone)]
pub struct SqlAppointmentRepository {
    db_client: DbClient,
}

impl SqlAppointmentRepository {
    /// Create a new SQL appointment repository.
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn get_text(row: &SqliteRow, column: &str) -> Result<String, DbError> {
    row.try_get(column)
        .map_err(|e| DbError::DecodeError(format!("{column}: {e}")))
}

fn row_to_appointment(row: &SqliteRow) -> Result<Appointment, DbError> {
    let date_raw = get_text(row, "date")?;
    let service_raw = get_text(row, "service")?;
    let extras_raw = get_text(row, "extras")?;
    let status_raw = get_text(row, "status")?;
    let created_raw = get_text(row, "created_at")?;
    let cancelled_raw: Option<String> = row
        .try_get("cancelled_at")
        .map_err(|e| DbError::DecodeError(e.to_string()))?;

    let service = ServiceKind::from_str(&service_raw).map_err(DbError::DecodeError)?;
    let status = AppointmentStatus::from_str(&status_raw).map_err(DbError::DecodeError)?;
    let extras: Vec<Extra> =
        serde_json::from_str(&extras_raw).map_err(|e| DbError::DecodeError(e.to_string()))?;
    let cancelled_at = cancelled_raw
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| DbError::DecodeError(e.to_string()))
        })
        .transpose()?;

    Ok(Appointment {
        id: get_text(row, "id")?,
        customer_name: get_text(row, "customer_name")?,
        customer_email: get_text(row, "customer_email")?,
        customer_phone: get_text(row, "customer_phone")?,
        service,
        extras,
        notes: row
            .try_get("notes")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        date: NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        time: get_text(row, "time")?,
        total_cents: row
            .try_get("total_cents")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        deposit_cents: row
            .try_get("deposit_cents")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        status,
        payment_reference: row
            .try_get("payment_reference")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        created_at: DateTime::parse_from_rfc3339(&created_raw)
            .map_err(|e| DbError::DecodeError(e.to_string()))?
            .with_timezone(&Utc),
        cancelled_at,
    })
}

impl AppointmentRepository for SqlAppointmentRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing appointments schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS appointments (
                id TEXT PRIMARY KEY,
                customer_name TEXT NOT NULL,
                customer_email TEXT NOT NULL,
                customer_phone TEXT NOT NULL,
                service TEXT NOT NULL,
                extras TEXT NOT NULL,
                notes TEXT,
                date TEXT NOT NULL,
                time TEXT NOT NULL,
                total_cents INTEGER NOT NULL,
                deposit_cents INTEGER NOT NULL,
                status TEXT NOT NULL,
                payment_reference TEXT,
                created_at TEXT NOT NULL,
                cancelled_at TEXT
            )
        "#;
        self.db_client.execute(query).await?;

        // Only confirmed rows compete for a slot; cancelled rows stay behind
        // as history without holding the slot.
        let index = r#"
            CREATE UNIQUE INDEX IF NOT EXISTS uq_appointments_confirmed_slot
            ON appointments(date, time)
            WHERE status = 'confirmed'
        "#;
        self.db_client.execute(index).await?;

        self.db_client
            .execute("CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(date)")
            .await?;

        info!("Appointments schema initialized successfully");
        Ok(())
    }

    async fn insert_confirmed(&self, appointment: &Appointment) -> Result<(), DbError> {
        debug!(
            "Inserting appointment {} at {} {}",
            appointment.id, appointment.date, appointment.time
        );

        let extras = serde_json::to_string(&appointment.extras)
            .map_err(|e| DbError::DecodeError(e.to_string()))?;

        let query = r#"
            INSERT INTO appointments (
                id, customer_name, customer_email, customer_phone,
                service, extras, notes, date, time,
                total_cents, deposit_cents, status, payment_reference,
                created_at, cancelled_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#;

        sqlx::query(query)
            .bind(&appointment.id)
            .bind(&appointment.customer_name)
            .bind(&appointment.customer_email)
            .bind(&appointment.customer_phone)
            .bind(appointment.service.as_str())
            .bind(&extras)
            .bind(&appointment.notes)
            .bind(appointment.date.format("%Y-%m-%d").to_string())
            .bind(&appointment.time)
            .bind(appointment.total_cents)
            .bind(appointment.deposit_cents)
            .bind(appointment.status.as_str())
            .bind(&appointment.payment_reference)
            .bind(appointment.created_at.to_rfc3339())
            .bind(appointment.cancelled_at.map(|t| t.to_rfc3339()))
            .execute(self.db_client.pool())
            .await?;

        info!(
            "Appointment {} confirmed for {} {}",
            appointment.id, appointment.date, appointment.time
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, DbError> {
        let query = "SELECT * FROM appointments WHERE id = $1";

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await?;

        row.as_ref().map(row_to_appointment).transpose()
    }

    async fn find_confirmed_at(
        &self,
        date: NaiveDate,
        time: &str,
    ) -> Result<Option<Appointment>, DbError> {
        let query = r#"
            SELECT * FROM appointments
            WHERE date = $1 AND time = $2 AND status = 'confirmed'
        "#;

        let row = sqlx::query(query)
            .bind(date.format("%Y-%m-%d").to_string())
            .bind(time)
            .fetch_optional(self.db_client.pool())
            .await?;

        row.as_ref().map(row_to_appointment).transpose()
    }

    async fn booked_times_for_date(&self, date: NaiveDate) -> Result<Vec<String>, DbError> {
        let query = r#"
            SELECT time FROM appointments
            WHERE date = $1 AND status = 'confirmed'
        "#;

        let rows = sqlx::query(query)
            .bind(date.format("%Y-%m-%d").to_string())
            .fetch_all(self.db_client.pool())
            .await?;

        rows.iter()
            .map(|row| {
                row.try_get("time")
                    .map_err(|e| DbError::DecodeError(e.to_string()))
            })
            .collect()
    }

    async fn list_from(&self, date: NaiveDate) -> Result<Vec<Appointment>, DbError> {
        let query = r#"
            SELECT * FROM appointments
            WHERE date >= $1
            ORDER BY date, created_at
        "#;

        let rows = sqlx::query(query)
            .bind(date.format("%Y-%m-%d").to_string())
            .fetch_all(self.db_client.pool())
            .await?;

        rows.iter().map(row_to_appointment).collect()
    }

    async fn mark_cancelled(&self, id: &str, cancelled_at: DateTime<Utc>) -> Result<bool, DbError> {
        debug!("Cancelling appointment {}", id);

        let query = r#"
            UPDATE appointments
            SET status = 'cancelled', cancelled_at = $1
            WHERE id = $2 AND status = 'confirmed'
        "#;

        let result = sqlx::query(query)
            .bind(cancelled_at.to_rfc3339())
            .bind(id)
            .execute(self.db_client.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_slot(
        &self,
        id: &str,
        new_date: NaiveDate,
        new_time: &str,
    ) -> Result<bool, DbError> {
        debug!("Rescheduling appointment {} to {} {}", id, new_date, new_time);

        // The partial unique index also guards this write: moving onto a
        // taken slot surfaces as a unique violation.
        let query = r#"
            UPDATE appointments
            SET date = $1, time = $2
            WHERE id = $3 AND status = 'confirmed'
        "#;

        let result = sqlx::query(query)
            .bind(new_date.format("%Y-%m-%d").to_string())
            .bind(new_time)
            .bind(id)
            .execute(self.db_client.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
