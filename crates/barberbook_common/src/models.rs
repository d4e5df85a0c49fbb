// --- File: crates/barberbook_common/src/models.rs ---
//! Shared domain models for the Barberbook application.
//!
//! These types are used across the booking, persistence and notification
//! crates. Times of day are serialized as "HH:MM" strings to match what the
//! admin UI reads and writes; dates use ISO 8601 (YYYY-MM-DD).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serde helpers for `Option<NaiveTime>` fields stored as "HH:MM".
pub mod hhmm_option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.serialize_str(&t.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(s) => NaiveTime::parse_from_str(&s, "%H:%M")
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/// Serde helpers for required `NaiveTime` fields stored as "HH:MM".
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}

/// The services offered by the shop. Closed enumeration: anything else is a
/// validation error at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Fade,
    Buzz,
    Trim,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Fade => "fade",
            ServiceKind::Buzz => "buzz",
            ServiceKind::Trim => "trim",
        }
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fade" => Ok(ServiceKind::Fade),
            "buzz" => Ok(ServiceKind::Buzz),
            "trim" => Ok(ServiceKind::Trim),
            other => Err(format!("unknown service: {other}")),
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An optional add-on chosen with a service. Price in the smallest currency
/// unit (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Extra {
    pub name: String,
    pub price_cents: i64,
}

/// Lifecycle status of an appointment. `confirmed -> cancelled` is the only
/// transition; cancelled is terminal and rows are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("unknown appointment status: {other}")),
        }
    }
}

/// A booked appointment. `time` holds the 12-hour slot label (e.g. "10:00 AM")
/// exactly as the slot generator produced it; the pair (date, time) identifies
/// the slot and carries the one-confirmed-appointment-per-slot invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Appointment {
    pub id: String,
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
    pub deposit_cents: i64,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub payment_reference: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// A date the shop is closed regardless of the weekly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BlockedDate {
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-12-25"))]
    pub date: NaiveDate,
    pub reason: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub created_at: DateTime<Utc>,
}

/// Opening hours for a single weekday. When `enabled` is false the remaining
/// fields are ignored. The break window is optional and must lie inside the
/// working window (validated at schedule-save time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DaySchedule {
    pub enabled: bool,
    #[serde(default, with = "hhmm_option")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "09:00"))]
    pub start: Option<NaiveTime>,
    #[serde(default, with = "hhmm_option")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "18:00"))]
    pub end: Option<NaiveTime>,
    #[serde(default)]
    pub break_enabled: bool,
    #[serde(default, with = "hhmm_option")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "12:00"))]
    pub break_start: Option<NaiveTime>,
    #[serde(default, with = "hhmm_option")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "13:00"))]
    pub break_end: Option<NaiveTime>,
}

impl DaySchedule {
    /// A closed day.
    pub fn closed() -> Self {
        DaySchedule {
            enabled: false,
            start: None,
            end: None,
            break_enabled: false,
            break_start: None,
            break_end: None,
        }
    }

    /// An open day without a break.
    pub fn open(start: NaiveTime, end: NaiveTime) -> Self {
        DaySchedule {
            enabled: true,
            start: Some(start),
            end: Some(end),
            break_enabled: false,
            break_start: None,
            break_end: None,
        }
    }
}

/// The shop's weekly opening hours. One field per weekday so the set of days
/// is closed at the type level; lookups go through [`WeeklySchedule::day`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WeeklySchedule {
    pub sunday: DaySchedule,
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
}

impl WeeklySchedule {
    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        match weekday {
            Weekday::Sun => &self.sunday,
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
        }
    }

    /// All seven days paired with their weekday, Sunday first.
    pub fn days(&self) -> [(Weekday, &DaySchedule); 7] {
        [
            (Weekday::Sun, &self.sunday),
            (Weekday::Mon, &self.monday),
            (Weekday::Tue, &self.tuesday),
            (Weekday::Wed, &self.wednesday),
            (Weekday::Thu, &self.thursday),
            (Weekday::Fri, &self.friday),
            (Weekday::Sat, &self.saturday),
        ]
    }
}

impl Default for WeeklySchedule {
    /// The hours the shop opened with: Mon-Fri 09:00-18:00, Sat 10:00-16:00,
    /// closed on Sunday.
    fn default() -> Self {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let sixteen = NaiveTime::from_hms_opt(16, 0, 0).unwrap();
        let eighteen = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
        WeeklySchedule {
            sunday: DaySchedule::closed(),
            monday: DaySchedule::open(nine, eighteen),
            tuesday: DaySchedule::open(nine, eighteen),
            wednesday: DaySchedule::open(nine, eighteen),
            thursday: DaySchedule::open(nine, eighteen),
            friday: DaySchedule::open(nine, eighteen),
            saturday: DaySchedule::open(ten, sixteen),
        }
    }
}

/// Whether a slot falls before or after noon. Used by the booking UI to group
/// the slot list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SlotPeriod {
    Morning,
    Afternoon,
}

/// A bookable time slot, derived from the weekly schedule. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Slot {
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub time: NaiveTime,
    #[cfg_attr(feature = "openapi", schema(example = "10:00 AM"))]
    pub label: String,
    pub period: SlotPeriod,
}

/// Why a day does or does not offer slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Open,
    Closed,
    Blocked,
    Past,
}
