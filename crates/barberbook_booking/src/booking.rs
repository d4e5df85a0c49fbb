// --- File: crates/barberbook_booking/src/booking.rs ---
//! The booking transaction and appointment lifecycle.
//!
//! The functions here own the write path. They re-validate the target slot
//! against the current schedule and blocked dates, then rely on the
//! appointment store's conditional insert for the final word on slot
//! ownership: when two requests race for one slot, exactly one insert lands
//! and the other surfaces as [`BookingError::SlotAlreadyBooked`].

use crate::error::BookingError;
use crate::logic::{generate_slots, within_booking_horizon};
use barberbook_common::models::{
    Appointment, AppointmentStatus, Extra, ServiceKind, WeeklySchedule,
};
use barberbook_config::BookingConfig;
use barberbook_db::AppointmentRepository;
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

/// Who initiated a lifecycle operation. Recorded in logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Customer,
    Admin,
}

impl Actor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Actor::Customer => "customer",
            Actor::Admin => "admin",
        }
    }
}

/// A booking request as it arrives from the customer flow, after payment has
/// been captured. `time` is the slot label from the availability response.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewBooking {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service: ServiceKind,
    #[serde(default)]
    pub extras: Vec<Extra>,
    #[serde(default)]
    pub notes: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-09-02"))]
    pub date: NaiveDate,
    #[cfg_attr(feature = "openapi", schema(example = "10:00 AM"))]
    pub time: String,
    pub total_cents: i64,
    #[serde(default)]
    pub payment_reference: Option<String>,
}

fn validate_contact(booking: &NewBooking) -> Result<(), BookingError> {
    if booking.customer_name.trim().is_empty() {
        return Err(BookingError::Validation("customer name is required".into()));
    }
    let email = booking.customer_email.trim();
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    };
    if !valid_email {
        return Err(BookingError::Validation(
            "a valid email address is required".into(),
        ));
    }
    let digits = booking
        .customer_phone
        .chars()
        .filter(|c| c.is_ascii_digit())
        .count();
    if digits < 7 {
        return Err(BookingError::Validation(
            "a valid phone number is required".into(),
        ));
    }
    Ok(())
}

/// Check that (date, time) names a real, bookable slot right now.
fn validate_target_slot(
    schedule: &WeeklySchedule,
    blocked: &HashSet<NaiveDate>,
    date: NaiveDate,
    time: &str,
    today: NaiveDate,
    policy: &BookingConfig,
) -> Result<(), BookingError> {
    if !within_booking_horizon(date, today, policy.booking_horizon_days) {
        return Err(BookingError::Validation(
            "the requested date is not open for booking".into(),
        ));
    }
    if blocked.contains(&date) {
        return Err(BookingError::Validation(
            "the shop is closed on the requested date".into(),
        ));
    }
    let day = schedule.day(date.weekday());
    if !day.enabled {
        return Err(BookingError::Validation(
            "the shop is closed on the requested date".into(),
        ));
    }
    let is_real_slot =
        generate_slots(day, policy.slot_duration_minutes).any(|slot| slot.label == time);
    if !is_real_slot {
        return Err(BookingError::Validation(
            "the requested time is not a bookable slot".into(),
        ));
    }
    Ok(())
}

/// Book a slot.
///
/// Re-validates the target against the current schedule, re-checks the slot,
/// then performs the conditional insert. The insert, not the pre-check, is
/// what guarantees the one-confirmed-appointment-per-slot invariant.
pub async fn book_slot<A: AppointmentRepository>(
    appointments: &A,
    schedule: &WeeklySchedule,
    blocked: &HashSet<NaiveDate>,
    booking: NewBooking,
    today: NaiveDate,
    policy: &BookingConfig,
) -> Result<Appointment, BookingError> {
    validate_contact(&booking)?;
    if booking.total_cents < policy.deposit_cents {
        return Err(BookingError::Validation(
            "total must cover the deposit".into(),
        ));
    }
    if booking.extras.iter().any(|extra| extra.price_cents < 0) {
        return Err(BookingError::Validation(
            "extras cannot have negative prices".into(),
        ));
    }
    validate_target_slot(
        schedule,
        blocked,
        booking.date,
        &booking.time,
        today,
        policy,
    )?;

    if appointments
        .find_confirmed_at(booking.date, &booking.time)
        .await?
        .is_some()
    {
        return Err(BookingError::SlotAlreadyBooked);
    }

    let appointment = Appointment {
        id: Uuid::new_v4().to_string(),
        customer_name: booking.customer_name,
        customer_email: booking.customer_email,
        customer_phone: booking.customer_phone,
        service: booking.service,
        extras: booking.extras,
        notes: booking.notes,
        date: booking.date,
        time: booking.time,
        total_cents: booking.total_cents,
        deposit_cents: policy.deposit_cents,
        status: AppointmentStatus::Confirmed,
        payment_reference: booking.payment_reference,
        created_at: Utc::now(),
        cancelled_at: None,
    };

    appointments.insert_confirmed(&appointment).await?;

    info!(
        appointment_id = %appointment.id,
        date = %appointment.date,
        time = %appointment.time,
        service = %appointment.service,
        "Appointment booked"
    );
    Ok(appointment)
}

/// Cancel an appointment.
///
/// Cancelling is idempotent: an already-cancelled appointment comes back
/// unchanged with no error, so retries and double-clicks are harmless. The
/// row is never deleted.
pub async fn cancel_appointment<A: AppointmentRepository>(
    appointments: &A,
    id: &str,
    actor: Actor,
) -> Result<Appointment, BookingError> {
    let existing = appointments
        .find_by_id(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("appointment {id}")))?;

    if existing.status == AppointmentStatus::Cancelled {
        info!(appointment_id = %id, actor = actor.as_str(), "Appointment already cancelled");
        return Ok(existing);
    }

    let cancelled_at = Utc::now();
    let changed = appointments.mark_cancelled(id, cancelled_at).await?;
    if !changed {
        // Lost a race with another cancel; the end state is the same.
        return appointments
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("appointment {id}")));
    }

    info!(appointment_id = %id, actor = actor.as_str(), "Appointment cancelled");
    Ok(Appointment {
        status: AppointmentStatus::Cancelled,
        cancelled_at: Some(cancelled_at),
        ..existing
    })
}

/// Move a confirmed appointment to a new slot.
///
/// The new slot gets the same validation as a fresh booking, and the update
/// runs under the same uniqueness guarantee as the insert.
pub async fn reschedule_appointment<A: AppointmentRepository>(
    appointments: &A,
    schedule: &WeeklySchedule,
    blocked: &HashSet<NaiveDate>,
    id: &str,
    new_date: NaiveDate,
    new_time: &str,
    today: NaiveDate,
    policy: &BookingConfig,
) -> Result<Appointment, BookingError> {
    let existing = appointments
        .find_by_id(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("appointment {id}")))?;

    if existing.status == AppointmentStatus::Cancelled {
        return Err(BookingError::Validation(
            "cancelled appointments cannot be rescheduled".into(),
        ));
    }

    validate_target_slot(schedule, blocked, new_date, new_time, today, policy)?;

    if let Some(holder) = appointments.find_confirmed_at(new_date, new_time).await? {
        if holder.id != id {
            return Err(BookingError::SlotAlreadyBooked);
        }
    }

    let moved = appointments.update_slot(id, new_date, new_time).await?;
    if !moved {
        // Cancelled between the read and the write.
        return Err(BookingError::Validation(
            "cancelled appointments cannot be rescheduled".into(),
        ));
    }

    info!(
        appointment_id = %id,
        date = %new_date,
        time = %new_time,
        "Appointment rescheduled"
    );
    Ok(Appointment {
        date: new_date,
        time: new_time.to_string(),
        ..existing
    })
}
