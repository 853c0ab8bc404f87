//! Tracing setup for binaries embedding the engine.
//!
//! Logs go to stderr. `RUST_LOG` controls the filter (default `info`). `LOG_FORMAT=json` switches to
//! Bunyan-formatted JSON lines for log shippers; anything else gives the plain
//! human-readable formatter.

use tracing::subscriber::SetGlobalDefaultError;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init(app_name: &str, format: LogFormat) -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => {
            let subscriber = Registry::default()
                .with(filter)
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(app_name.to_string(), std::io::stderr));
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Pretty => {
            let subscriber = Registry::default()
                .with(filter)
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr));
            tracing::subscriber::set_global_default(subscriber)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_env() {
        temp_env::with_var("LOG_FORMAT", Some("JSON"), || {
            assert_eq!(LogFormat::from_env(), LogFormat::Json);
        });
        temp_env::with_var("LOG_FORMAT", None::<&str>, || {
            assert_eq!(LogFormat::from_env(), LogFormat::Pretty);
        });
    }
}
