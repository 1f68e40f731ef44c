use crate::core::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::env;

pub mod database;

pub use database::DatabaseConfig;

/// Main application configuration.
///
/// Built once in `main` and passed down explicitly; nothing in the crate
/// reads the environment after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub slack: SlackConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    /// Override for the Monday-only schedule gate (off-cycle manual runs)
    pub manual_run: bool,
    /// Explicit reference instant for the reporting window; defaults to now
    pub reference_date: Option<DateTime<Utc>>,
    /// Log outbound request payloads at debug level
    pub record_requests: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlackConfig {
    pub webhook_url: String,
    pub channel: String,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Operator account excluded from donation and expense metrics
    pub operator_collective_id: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let reference_date = match env::var("START_DATE") {
            Ok(raw) => Some(
                DateTime::parse_from_rfc3339(&raw)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|_| {
                        AppError::Configuration(format!(
                            "START_DATE is not a valid RFC 3339 timestamp: {}",
                            raw
                        ))
                    })?,
            ),
            Err(_) => None,
        };

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                manual_run: flag_set("MANUAL_RUN"),
                reference_date,
                record_requests: flag_set("RECORD_REQUESTS"),
            },
            database: DatabaseConfig::from_env()?,
            slack: SlackConfig {
                webhook_url: env::var("SLACK_WEBHOOK_URL").map_err(|_| {
                    AppError::Configuration("SLACK_WEBHOOK_URL not set".to_string())
                })?,
                channel: env::var("SLACK_CHANNEL").unwrap_or_else(|_| "#activity".to_string()),
            },
            report: ReportConfig {
                operator_collective_id: env::var("OPERATOR_COLLECTIVE_ID")
                    .unwrap_or_else(|_| "1".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid OPERATOR_COLLECTIVE_ID".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.slack.webhook_url.starts_with("http") {
            return Err(AppError::Configuration(
                "SLACK_WEBHOOK_URL must be an http(s) URL".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// True when running in the deployed production mode
    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

fn flag_set(name: &str) -> bool {
    matches!(
        env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes")
    )
}
