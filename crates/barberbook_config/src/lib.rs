// --- File: crates/barberbook_config/src/lib.rs ---
//! Configuration for the Barberbook application.
//!
//! Configuration is layered: `config/default.toml`, an optional
//! `config/{RUN_ENV}.toml` override file, then environment variables with the
//! `APP_` prefix (`__` as the section separator, e.g. `APP_SERVER__PORT`).
//! A `.env` file is loaded first so local development can keep secrets out of
//! the shell profile.

pub mod models;

pub use models::{
    AdminConfig, AppConfig, BookingConfig, DatabaseConfig, NotifyConfig, ServerConfig,
    StripeConfig,
};

use config::{Config, ConfigError, Environment, File};
use std::sync::Once;
use tracing::debug;

static DOTENV: Once = Once::new();

/// Load `.env` once per process.
pub fn ensure_dotenv_loaded() {
    DOTENV.call_once(|| {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded environment from .env file");
        }
    });
}

/// Load the application configuration.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "default".to_string());

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"));

    builder.build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_defaults_match_shop_policy() {
        let booking = BookingConfig::default();
        assert_eq!(booking.slot_duration_minutes, 40);
        assert_eq!(booking.booking_horizon_days, 60);
        assert_eq!(booking.deposit_cents, 500);
        assert_eq!(booking.time_zone, "America/New_York");
    }

    #[test]
    fn app_config_deserializes_with_minimal_input() {
        let raw = serde_json::json!({
            "server": { "host": "127.0.0.1", "port": 8080 }
        });
        let config: AppConfig = serde_json::from_value(raw).unwrap();
        assert!(!config.use_stripe);
        assert!(!config.use_notify);
        assert!(config.database.is_none());
        assert_eq!(config.booking.deposit_cents, 500);
    }
}
