//! # Structured Logging
//!
//! Installs the process-wide `tracing` subscriber.

use std::env;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::types::{Error, Result};

/// Configuration for the logging system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// The log level to use when RUST_LOG is unset (trace, debug, info, warn, error)
    pub level: String,
    /// The service name for identification
    pub service_name: String,
    /// Whether to use JSON formatting
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            service_name: "unknown-service".to_string(),
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// `LOG_FORMAT=json` switches to JSON output; anything else is text.
    pub fn from_env<S: Into<String>>(service_name: S) -> Self {
        let json_format = env::var("LOG_FORMAT")
            .map(|v| v.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            service_name: service_name.into(),
            json_format,
            ..Default::default()
        }
    }
}

/// Initializes the structured logging system.
///
/// `log` records from dependencies are forwarded into `tracing`. Calling this
/// twice returns a configuration error.
pub fn init_logging(config: Option<LoggingConfig>) -> Result<()> {
    let config = config.unwrap_or_default();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},hyper=warn,reqwest=warn", config.level)));

    let subscriber = Registry::default().with(filter);

    let result = if config.json_format {
        let json_layer = fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_target(true);
        subscriber.with(json_layer).try_init()
    } else {
        let text_layer = fmt::layer().with_target(true);
        subscriber.with(text_layer).try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!(
        service = %config.service_name,
        json = config.json_format,
        "Logging initialized"
    );

    Ok(())
}
