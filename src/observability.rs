//! Logging setup.
//!
//! Structured logging through `tracing`. Development output is
//! human-readable; production emits one JSON object per event.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ServerConfig;

/// Logging configuration derived from the server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is unset.
    pub default_filter: String,
    /// Emit JSON lines instead of pretty text.
    pub json_format: bool,
    /// Include file and line of each event.
    pub include_location: bool,
}

impl LoggingConfig {
    pub fn from_server(server: &ServerConfig) -> Self {
        let production = server.is_production();
        Self {
            default_filter: server.log_level.clone(),
            json_format: production,
            include_location: !production,
        }
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Calling this
/// twice is harmless; the second call is ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let result = if config.json_format {
        let fmt_layer = fmt::layer()
            .json()
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_target(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_target(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
