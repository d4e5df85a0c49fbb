// --- File: crates/barberbook_booking/src/logic.rs ---
//! Slot generation and availability resolution.
//!
//! Everything in this module is pure: the same schedule, blocked set and
//! booked set always produce the same answer. Slot arithmetic is done in
//! minutes from midnight so stepping never has to deal with time-of-day
//! wraparound.

use crate::error::BookingError;
use barberbook_common::models::{
    DaySchedule, DayStatus, Slot, SlotPeriod, WeeklySchedule,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::HashSet;

/// Availability of a single slot on a given day.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotAvailability {
    #[serde(with = "barberbook_common::models::hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub time: NaiveTime,
    #[cfg_attr(feature = "openapi", schema(example = "10:00 AM"))]
    pub label: String,
    pub period: SlotPeriod,
    pub booked: bool,
}

/// The resolved availability of one calendar day.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DayAvailability {
    pub day_status: DayStatus,
    pub slots: Vec<SlotAvailability>,
}

impl DayAvailability {
    fn without_slots(day_status: DayStatus) -> Self {
        DayAvailability {
            day_status,
            slots: Vec::new(),
        }
    }
}

fn minutes_from_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// The 12-hour display label for a time of day, e.g. "9:00 AM" or "12:00 PM".
///
/// This label is what gets stored on appointments, so it must stay stable:
/// availability resolution compares stored labels against generated ones.
pub fn slot_label(time: NaiveTime) -> String {
    let hour = time.hour();
    let display_hour = (hour + 11) % 12 + 1;
    let suffix = if hour < 12 { "AM" } else { "PM" };
    format!("{}:{:02} {}", display_hour, time.minute(), suffix)
}

/// Generate the bookable slots for one day of the weekly schedule.
///
/// Slots start at the day's opening time and step by `slot_duration_minutes`
/// while strictly before the closing time. Times inside an enabled break
/// window (half-open, start inclusive) are skipped. A disabled day, missing
/// times or an inverted window produce an empty sequence.
pub fn generate_slots(
    day: &DaySchedule,
    slot_duration_minutes: u32,
) -> impl Iterator<Item = Slot> {
    let duration = slot_duration_minutes.max(1) as usize;

    let (start_min, end_min) = match (day.enabled, day.start, day.end) {
        (true, Some(start), Some(end)) => (minutes_from_midnight(start), minutes_from_midnight(end)),
        _ => (0, 0),
    };

    let break_window = if day.break_enabled {
        match (day.break_start, day.break_end) {
            (Some(bs), Some(be)) => Some((minutes_from_midnight(bs), minutes_from_midnight(be))),
            _ => None,
        }
    } else {
        None
    };

    (start_min..end_min)
        .step_by(duration)
        .filter_map(move |minute| {
            if let Some((break_start, break_end)) = break_window {
                if minute >= break_start && minute < break_end {
                    return None;
                }
            }
            let time = NaiveTime::from_hms_opt(minute / 60, minute % 60, 0)?;
            let period = if minute < 12 * 60 {
                SlotPeriod::Morning
            } else {
                SlotPeriod::Afternoon
            };
            Some(Slot {
                label: slot_label(time),
                time,
                period,
            })
        })
}

/// Resolve what a customer may book on `date`.
///
/// Precedence: a past date wins over everything, then a blocked date, then a
/// closed weekday. Only an open day carries slots, each flagged as booked when
/// a confirmed appointment holds its label.
pub fn resolve_availability(
    date: NaiveDate,
    today: NaiveDate,
    schedule: &WeeklySchedule,
    blocked: &HashSet<NaiveDate>,
    booked_times: &HashSet<String>,
    slot_duration_minutes: u32,
) -> DayAvailability {
    if date < today {
        return DayAvailability::without_slots(DayStatus::Past);
    }
    if blocked.contains(&date) {
        return DayAvailability::without_slots(DayStatus::Blocked);
    }

    let day = schedule.day(date.weekday());
    if !day.enabled {
        return DayAvailability::without_slots(DayStatus::Closed);
    }

    let slots = generate_slots(day, slot_duration_minutes)
        .map(|slot| {
            let booked = booked_times.contains(&slot.label);
            SlotAvailability {
                time: slot.time,
                label: slot.label,
                period: slot.period,
                booked,
            }
        })
        .collect();

    DayAvailability {
        day_status: DayStatus::Open,
        slots,
    }
}

/// Whether `date` falls inside the booking window of `horizon_days` from
/// today (both ends inclusive).
pub fn within_booking_horizon(date: NaiveDate, today: NaiveDate, horizon_days: i64) -> bool {
    date >= today && date <= today + Duration::days(horizon_days)
}

/// Today's date in the shop's time zone. Falls back to UTC when the
/// configured zone name does not parse.
pub fn today_in_zone(time_zone: &str) -> NaiveDate {
    match time_zone.parse::<Tz>() {
        Ok(tz) => Utc::now().with_timezone(&tz).date_naive(),
        Err(_) => Utc::now().date_naive(),
    }
}

/// Validate a whole weekly schedule before it is saved.
///
/// The first failing day rejects the save; callers must not persist anything
/// on error. Enabled days need a start strictly before their end, and an
/// enabled break must sit fully inside the opening window.
pub fn validate_schedule(schedule: &WeeklySchedule) -> Result<(), BookingError> {
    for (weekday, day) in schedule.days() {
        if !day.enabled {
            continue;
        }

        let (start, end) = match (day.start, day.end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(BookingError::Validation(format!(
                    "{weekday}: open days need start and end times"
                )))
            }
        };
        if start >= end {
            return Err(BookingError::Validation(format!(
                "{weekday}: opening time must be before closing time"
            )));
        }

        if day.break_enabled {
            let (break_start, break_end) = match (day.break_start, day.break_end) {
                (Some(bs), Some(be)) => (bs, be),
                _ => {
                    return Err(BookingError::Validation(format!(
                        "{weekday}: an enabled break needs start and end times"
                    )))
                }
            };
            if break_start >= break_end {
                return Err(BookingError::Validation(format!(
                    "{weekday}: break start must be before break end"
                )));
            }
            if break_start < start || break_end > end {
                return Err(BookingError::Validation(format!(
                    "{weekday}: break must fall within opening hours"
                )));
            }
        }
    }

    Ok(())
}
