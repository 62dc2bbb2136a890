//! Coroutine runtime tuning read from the environment.
//!
//! `GREENLIGHT_STACK_SIZE` sets the stack size of every coroutine `may`
//! spawns, connection handlers included. Both decimal (`32768`) and hex
//! (`0x8000`) are accepted. Unset or unparsable values fall back to
//! [`DEFAULT_STACK_SIZE`].
//!
//! ```rust
//! use greenlight::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! assert!(config.stack_size > 0);
//! ```

use std::env;
use tracing::{info, warn};

pub const STACK_SIZE_ENV: &str = "GREENLIGHT_STACK_SIZE";

/// 32 KiB.
pub const DEFAULT_STACK_SIZE: usize = 0x8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub stack_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl RuntimeConfig {
    #[must_use]
    pub fn from_env() -> Self {
        match env::var(STACK_SIZE_ENV) {
            Ok(raw) => Self::from_value(&raw),
            Err(_) => Self::default(),
        }
    }

    /// Parse a stack size, falling back to the default on garbage or zero.
    #[must_use]
    pub fn from_value(raw: &str) -> Self {
        let raw = raw.trim();
        let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            Some(hex) => usize::from_str_radix(hex, 16),
            None => raw.parse::<usize>(),
        };
        match parsed {
            Ok(stack_size) if stack_size > 0 => Self { stack_size },
            _ => {
                warn!(value = raw, default = DEFAULT_STACK_SIZE, "ignoring invalid {STACK_SIZE_ENV}");
                Self::default()
            }
        }
    }

    /// Push the settings into the `may` runtime. Must run before the server
    /// starts.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
        info!(stack_size = self.stack_size, "coroutine runtime configured");
    }
}
