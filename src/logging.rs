//! Structured logging setup.
//!
//! Everything in the crate logs through `tracing` macros with structured
//! fields. [`init_logging`] installs the subscriber: an `EnvFilter` (so
//! `RUST_LOG` still wins), a JSON or pretty `fmt` layer, and a non-blocking
//! stdout writer from `tracing-appender`.
//!
//! ```no_run
//! use greenlight::logging::{init_logging, LogConfig};
//!
//! let _guard = init_logging(&LogConfig::from_env()).expect("logging");
//! tracing::info!(port = 4000, "ready");
//! ```

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use std::env;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Lenient parse used for environment variables. Unknown values fall back
    /// to JSON.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Extra comma-separated `EnvFilter` directives, e.g. `greenlight::router=debug`.
    pub target_filter: Option<String>,
}

impl LogConfig {
    /// Read `GREENLIGHT_LOG_LEVEL`, `GREENLIGHT_LOG_FORMAT` and
    /// `GREENLIGHT_LOG_TARGET_FILTER`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("GREENLIGHT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("GREENLIGHT_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            target_filter: env::var("GREENLIGHT_LOG_TARGET_FILTER").ok(),
        }
    }

    /// Environment defaults overridden by the parsed command line.
    #[must_use]
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            log_level: config.log_level.clone(),
            format: config.log_format,
            ..Self::from_env()
        }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        // Client disconnects are logged by may_minihttp at info; keep warn+.
        if let Ok(directive) = "may_minihttp=warn".parse() {
            filter = filter.add_directive(directive);
        }

        if let Some(target_filter) = &self.target_filter {
            for directive in target_filter.split(',').map(str::trim).filter(|d| !d.is_empty()) {
                match directive.parse() {
                    Ok(d) => filter = filter.add_directive(d),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {directive}"),
                }
            }
        }
        filter
    }
}

/// Install the global subscriber. Keep the returned guard alive for the life of
/// the process; dropping it flushes and stops the background writer.
pub fn init_logging(config: &LogConfig) -> Result<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}
