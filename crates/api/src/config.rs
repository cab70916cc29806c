//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `WEEK_START`: First day of a calendar row, e.g. "mon" or "sunday" (default: Monday)
//! - `PREMIUM_PERCENT`: Share of a day's slots tagged premium (default: 25)
//! - `PREMIUM_FROM`: `HH:MM`; slots starting at or after it are premium. Overrides `PREMIUM_PERCENT`
//! - `PREMIUM_SURCHARGE_PERCENT`: Extra charge on premium slots (default: 50)
//! - `CALENDAR_WEBHOOK_URL`: Endpoint receiving calendar events; logged only when unset

use chrono::{NaiveTime, Weekday};
use eyre::{Result, WrapErr, eyre};
use slotbook_core::{config::SchedulingConfig, slots::PremiumPolicy};
use std::env;
use tracing::Level;

/// Configuration for the Slotbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Calendar webhook; events are only logged when absent
    pub calendar_webhook_url: Option<String>,

    pub scheduling: SchedulingConfig,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - Any of the scheduling variables is set to an unparseable value
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Integrations
        let calendar_webhook_url = env::var("CALENDAR_WEBHOOK_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let scheduling = scheduling_config(
            env::var("WEEK_START").ok().as_deref(),
            env::var("PREMIUM_PERCENT").ok().as_deref(),
            env::var("PREMIUM_FROM").ok().as_deref(),
            env::var("PREMIUM_SURCHARGE_PERCENT").ok().as_deref(),
        )?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            calendar_webhook_url,
            scheduling,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn parse_log_level(value: &str) -> Level {
    match value {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Builds the engine tunables from raw variable values. Unset values keep
/// their defaults; `premium_from` wins over `premium_percent`.
pub fn scheduling_config(
    week_start: Option<&str>,
    premium_percent: Option<&str>,
    premium_from: Option<&str>,
    premium_surcharge_percent: Option<&str>,
) -> Result<SchedulingConfig> {
    let mut config = SchedulingConfig::default();

    if let Some(value) = week_start {
        config.week_start = value
            .trim()
            .parse::<Weekday>()
            .map_err(|_| eyre!("Invalid WEEK_START value: {}", value))?;
    }

    if let Some(value) = premium_percent {
        let percent: u8 = value
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid PREMIUM_PERCENT value: {}", value))?;
        config.premium_policy = if percent == 0 {
            PremiumPolicy::Disabled
        } else {
            PremiumPolicy::Ratio { percent }
        };
    }

    if let Some(value) = premium_from {
        let time = NaiveTime::parse_from_str(value.trim(), "%H:%M")
            .wrap_err_with(|| format!("Invalid PREMIUM_FROM value: {}", value))?;
        config.premium_policy = PremiumPolicy::From { time };
    }

    if let Some(value) = premium_surcharge_percent {
        config.premium_surcharge_percent = value
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid PREMIUM_SURCHARGE_PERCENT value: {}", value))?;
    }

    Ok(config)
}
