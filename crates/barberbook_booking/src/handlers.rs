// --- File: crates/barberbook_booking/src/handlers.rs ---

use crate::booking::{
    book_slot, cancel_appointment, reschedule_appointment, Actor, NewBooking,
};
use crate::error::BookingError;
use crate::logic::{
    resolve_availability, today_in_zone, validate_schedule, within_booking_horizon,
    SlotAvailability,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use barberbook_common::error::HttpStatusCode;
use barberbook_common::models::{Appointment, BlockedDate, DayStatus, WeeklySchedule};
use barberbook_common::services::{BoxedError, NotificationService, PaymentService};
use barberbook_config::AppConfig;
use barberbook_db::{
    AppointmentRepository, BlockedDateRepository, DbError, ScheduleRepository,
    SqlAppointmentRepository, SqlBlockedDateRepository, SqlScheduleRepository,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Shared state for the booking routes.
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub schedule_repo: SqlScheduleRepository,
    pub blocked_repo: SqlBlockedDateRepository,
    pub appointment_repo: SqlAppointmentRepository,
    pub payment_service: Option<Arc<dyn PaymentService<Error = BoxedError>>>,
    pub notification_service: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

fn error_response(err: BookingError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

fn db_error(err: DbError) -> (StatusCode, String) {
    error_response(BookingError::from(err))
}

#[derive(Deserialize, Debug)]
pub struct AvailabilityQuery {
    /// Date to resolve, YYYY-MM-DD.
    pub date: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AvailabilityResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-09-02"))]
    pub date: NaiveDate,
    pub day_status: DayStatus,
    pub slots: Vec<SlotAvailability>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub appointment: Appointment,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CancellationResponse {
    pub success: bool,
    pub message: String,
    pub appointment: Appointment,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RescheduleRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-09-03"))]
    pub date: NaiveDate,
    #[cfg_attr(feature = "openapi", schema(example = "11:20 AM"))]
    pub time: String,
}

#[derive(Deserialize, Debug)]
pub struct AppointmentsQuery {
    /// Earliest date to include; defaults to today in the shop time zone.
    pub from: Option<NaiveDate>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BlockDateRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-12-25"))]
    pub date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BlockedDatesResponse {
    pub blocked_dates: Vec<BlockedDate>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UnblockResponse {
    pub success: bool,
    pub removed: bool,
}

/// Handler to resolve availability for one day.
#[axum::debug_handler]
pub async fn get_availability_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, (StatusCode, String)> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid date format (YYYY-MM-DD)".to_string(),
        )
    })?;

    let booking_cfg = &state.config.booking;
    let today = today_in_zone(&booking_cfg.time_zone);

    // Outside the booking window: nothing to offer, whatever the schedule says.
    if !within_booking_horizon(date, today, booking_cfg.booking_horizon_days) {
        return Ok(Json(AvailabilityResponse {
            date,
            day_status: DayStatus::Past,
            slots: Vec::new(),
        }));
    }

    let schedule = state.schedule_repo.load().await.map_err(db_error)?;

    let mut blocked = HashSet::new();
    if state
        .blocked_repo
        .find_by_date(date)
        .await
        .map_err(db_error)?
        .is_some()
    {
        blocked.insert(date);
    }

    let booked: HashSet<String> = state
        .appointment_repo
        .booked_times_for_date(date)
        .await
        .map_err(db_error)?
        .into_iter()
        .collect();

    let availability = resolve_availability(
        date,
        today,
        &schedule,
        &blocked,
        &booked,
        booking_cfg.slot_duration_minutes,
    );

    Ok(Json(AvailabilityResponse {
        date,
        day_status: availability.day_status,
        slots: availability.slots,
    }))
}

/// Handler to book a slot.
#[axum::debug_handler]
pub async fn book_slot_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<NewBooking>,
) -> Result<Json<BookingResponse>, (StatusCode, String)> {
    let booking_cfg = &state.config.booking;
    let today = today_in_zone(&booking_cfg.time_zone);

    // The deposit is captured up front by the payment flow; when a payment
    // service is wired in, the reference must check out before any write.
    if let Some(payments) = state.payment_service.as_ref() {
        let reference = payload.payment_reference.as_deref().ok_or_else(|| {
            error_response(BookingError::Validation(
                "a payment reference is required".into(),
            ))
        })?;
        let intent = payments.confirm_payment_intent(reference).await.map_err(|e| {
            error!("Failed to verify deposit payment: {}", e);
            error_response(BookingError::Validation(
                "deposit payment could not be verified".into(),
            ))
        })?;
        if intent.status != "succeeded" || intent.amount < booking_cfg.deposit_cents {
            return Err(error_response(BookingError::Validation(
                "deposit payment could not be verified".into(),
            )));
        }
    }

    let schedule = state.schedule_repo.load().await.map_err(db_error)?;

    let mut blocked = HashSet::new();
    if state
        .blocked_repo
        .find_by_date(payload.date)
        .await
        .map_err(db_error)?
        .is_some()
    {
        blocked.insert(payload.date);
    }

    let appointment = book_slot(
        &state.appointment_repo,
        &schedule,
        &blocked,
        payload,
        today,
        booking_cfg,
    )
    .await
    .map_err(error_response)?;

    notify_booking_confirmed(&state, &appointment);

    Ok(Json(BookingResponse {
        success: true,
        message: "Appointment booked successfully.".to_string(),
        appointment,
    }))
}

async fn cancel_with_actor(
    state: &BookingState,
    id: &str,
    actor: Actor,
) -> Result<Json<CancellationResponse>, (StatusCode, String)> {
    let appointment = cancel_appointment(&state.appointment_repo, id, actor)
        .await
        .map_err(error_response)?;

    Ok(Json(CancellationResponse {
        success: true,
        message: "Appointment cancelled.".to_string(),
        appointment,
    }))
}

/// Handler for a customer cancelling their own appointment.
#[axum::debug_handler]
pub async fn cancel_appointment_handler(
    State(state): State<Arc<BookingState>>,
    Path(id): Path<String>,
) -> Result<Json<CancellationResponse>, (StatusCode, String)> {
    cancel_with_actor(&state, &id, Actor::Customer).await
}

/// Handler for an admin cancelling an appointment.
#[axum::debug_handler]
pub async fn admin_cancel_appointment_handler(
    State(state): State<Arc<BookingState>>,
    Path(id): Path<String>,
) -> Result<Json<CancellationResponse>, (StatusCode, String)> {
    cancel_with_actor(&state, &id, Actor::Admin).await
}

/// Handler to move an appointment to a new slot.
#[axum::debug_handler]
pub async fn reschedule_appointment_handler(
    State(state): State<Arc<BookingState>>,
    Path(id): Path<String>,
    Json(payload): Json<RescheduleRequest>,
) -> Result<Json<BookingResponse>, (StatusCode, String)> {
    let booking_cfg = &state.config.booking;
    let today = today_in_zone(&booking_cfg.time_zone);

    let schedule = state.schedule_repo.load().await.map_err(db_error)?;

    let mut blocked = HashSet::new();
    if state
        .blocked_repo
        .find_by_date(payload.date)
        .await
        .map_err(db_error)?
        .is_some()
    {
        blocked.insert(payload.date);
    }

    let appointment = reschedule_appointment(
        &state.appointment_repo,
        &schedule,
        &blocked,
        &id,
        payload.date,
        &payload.time,
        today,
        booking_cfg,
    )
    .await
    .map_err(error_response)?;

    Ok(Json(BookingResponse {
        success: true,
        message: "Appointment rescheduled.".to_string(),
        appointment,
    }))
}

/// Handler listing appointments for the admin dashboard.
#[axum::debug_handler]
pub async fn list_appointments_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<AppointmentsResponse>, (StatusCode, String)> {
    let from = query
        .from
        .unwrap_or_else(|| today_in_zone(&state.config.booking.time_zone));

    let appointments = state
        .appointment_repo
        .list_from(from)
        .await
        .map_err(db_error)?;

    Ok(Json(AppointmentsResponse { appointments }))
}

/// Handler returning the stored weekly schedule.
#[axum::debug_handler]
pub async fn get_schedule_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<WeeklySchedule>, (StatusCode, String)> {
    let schedule = state.schedule_repo.load().await.map_err(db_error)?;
    Ok(Json(schedule))
}

/// Handler replacing the weekly schedule.
///
/// The whole week is validated first; nothing is written when any day fails,
/// so a rejected save leaves the previous schedule in place.
#[axum::debug_handler]
pub async fn save_schedule_handler(
    State(state): State<Arc<BookingState>>,
    Json(schedule): Json<WeeklySchedule>,
) -> Result<Json<WeeklySchedule>, (StatusCode, String)> {
    validate_schedule(&schedule).map_err(error_response)?;
    state
        .schedule_repo
        .save(&schedule)
        .await
        .map_err(db_error)?;

    info!("Weekly schedule updated");
    Ok(Json(schedule))
}

/// Handler listing blocked dates.
#[axum::debug_handler]
pub async fn list_blocked_dates_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<BlockedDatesResponse>, (StatusCode, String)> {
    let blocked_dates = state.blocked_repo.list().await.map_err(db_error)?;
    Ok(Json(BlockedDatesResponse { blocked_dates }))
}

/// Handler blocking a date.
#[axum::debug_handler]
pub async fn block_date_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<BlockDateRequest>,
) -> Result<Json<BlockedDate>, (StatusCode, String)> {
    let entry = BlockedDate {
        id: Uuid::new_v4().to_string(),
        date: payload.date,
        reason: payload.reason.unwrap_or_else(|| "Unavailable".to_string()),
        created_at: Utc::now(),
    };

    let stored = state.blocked_repo.add(entry).await.map_err(db_error)?;
    info!(date = %stored.date, "Date blocked");
    Ok(Json(stored))
}

/// Handler unblocking a date. Removing a date that is not blocked still
/// succeeds; `removed` tells the caller whether anything changed.
#[axum::debug_handler]
pub async fn unblock_date_handler(
    State(state): State<Arc<BookingState>>,
    Path(date): Path<String>,
) -> Result<Json<UnblockResponse>, (StatusCode, String)> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid date format (YYYY-MM-DD)".to_string(),
        )
    })?;

    let removed = state
        .blocked_repo
        .remove_by_date(date)
        .await
        .map_err(db_error)?;
    if removed {
        info!(date = %date, "Date unblocked");
    }

    Ok(Json(UnblockResponse {
        success: true,
        removed,
    }))
}

/// Send the confirmation email and admin SMS for a fresh booking.
///
/// Fire and forget: the booking is already committed, so failures are logged
/// and never surfaced to the customer.
fn notify_booking_confirmed(state: &BookingState, appointment: &Appointment) {
    let Some(notifier) = state.notification_service.clone() else {
        return;
    };
    let notify_cfg = state.config.notify.clone();
    let appointment = appointment.clone();

    tokio::spawn(async move {
        let subject = "Your appointment is confirmed";
        let body = format!(
            "Hi {},\n\nYour {} appointment is confirmed for {} at {}.\n\
             Total: ${:.2} (deposit of ${:.2} received).\n\nSee you soon!",
            appointment.customer_name,
            appointment.service,
            appointment.date,
            appointment.time,
            appointment.total_cents as f64 / 100.0,
            appointment.deposit_cents as f64 / 100.0,
        );
        if let Err(e) = notifier
            .send_email(&appointment.customer_email, subject, &body, false)
            .await
        {
            error!("Failed to send confirmation email: {}", e);
        }

        if let Some(admin_phone) = notify_cfg.and_then(|cfg| cfg.admin_phone) {
            let sms = format!(
                "New booking: {} - {} on {} at {} ({})",
                appointment.customer_name,
                appointment.service,
                appointment.date,
                appointment.time,
                appointment.customer_phone,
            );
            if let Err(e) = notifier.send_sms(&admin_phone, &sms).await {
                error!("Failed to send booking SMS: {}", e);
            }
        }
    });
}
