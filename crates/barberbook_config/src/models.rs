// --- File: crates/barberbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://data/barberbook.db, overridable via APP_DATABASE__URL
}

// --- Booking Config ---
// Policy knobs for the slot generator and booking transaction.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// Length of a bookable slot in minutes.
    #[serde(default = "default_slot_duration")]
    pub slot_duration_minutes: u32,
    /// How far ahead customers may book, in days from today.
    #[serde(default = "default_booking_horizon")]
    pub booking_horizon_days: i64,
    /// Deposit collected at booking time, in the smallest currency unit.
    #[serde(default = "default_deposit")]
    pub deposit_cents: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// IANA time zone the shop operates in; "today" is computed here.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

fn default_slot_duration() -> u32 {
    40
}

fn default_booking_horizon() -> i64 {
    60
}

fn default_deposit() -> i64 {
    500
}

fn default_currency() -> String {
    "usd".to_string()
}

fn default_time_zone() -> String {
    "America/New_York".to_string()
}

impl Default for BookingConfig {
    fn default() -> Self {
        BookingConfig {
            slot_duration_minutes: default_slot_duration(),
            booking_horizon_days: default_booking_horizon(),
            deposit_cents: default_deposit(),
            currency: default_currency(),
            time_zone: default_time_zone(),
        }
    }
}

// --- Stripe Config ---
// Holds non-secret Stripe config. Secret key loaded directly from env var:
// STRIPE_SECRET_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StripeConfig {
    pub product_name: Option<String>,
}

// --- Notification Config ---
// Non-secret notification settings. Secrets loaded directly from env vars:
// SENDGRID_API_KEY, TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NotifyConfig {
    /// Sender address for confirmation emails.
    pub from_email: String,
    /// Twilio number SMS are sent from.
    pub sms_from: Option<String>,
    /// Phone number the shop owner receives booking SMS on.
    pub admin_phone: Option<String>,
}

// --- Admin Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AdminConfig {
    pub shared_secret: Option<String>, // Overridable via APP_ADMIN__SHARED_SECRET
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_stripe: bool,
    #[serde(default)]
    pub use_notify: bool,

    // Booking policy with sensible shop defaults
    #[serde(default)]
    pub booking: BookingConfig,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub stripe: Option<StripeConfig>,
    #[serde(default)]
    pub notify: Option<NotifyConfig>,
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}
