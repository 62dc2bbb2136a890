//! Application context shared by every handler.

use crate::config::{Config, Environment};

/// Version reported by the health check.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dependencies handed to each handler. Built once in `main` and shared
/// read-only behind an `Arc`; there is no global state.
#[derive(Debug, Clone)]
pub struct Application {
    pub config: Config,
    pub version: &'static str,
}

impl Application {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            version: VERSION,
        }
    }

    #[must_use]
    pub fn env(&self) -> Environment {
        self.config.env
    }
}
