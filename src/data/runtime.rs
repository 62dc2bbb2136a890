//! Movie runtime in minutes, encoded on the wire as a `"<n> mins"` string.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("invalid runtime format")]
    InvalidFormat,
}

/// Whole minutes. The type itself accepts any `i32`; positivity is a
/// validation concern, not a decoding one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Runtime(pub i32);

impl Runtime {
    #[must_use]
    pub const fn minutes(self) -> i32 {
        self.0
    }
}

impl From<i32> for Runtime {
    fn from(minutes: i32) -> Self {
        Self(minutes)
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mins", self.0)
    }
}

impl FromStr for Runtime {
    type Err = RuntimeError;

    /// Parse `"<n> mins"`. The string is split on single spaces, so `"10  mins"`
    /// yields three tokens and is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(' ').collect();
        if parts.len() != 2 || parts[1] != "mins" {
            return Err(RuntimeError::InvalidFormat);
        }
        parts[0]
            .parse::<i32>()
            .map(Runtime)
            .map_err(|_| RuntimeError::InvalidFormat)
    }
}

impl Serialize for Runtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct RuntimeVisitor;

impl Visitor<'_> for RuntimeVisitor {
    type Value = Runtime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a runtime string such as \"102 mins\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Err(E::custom(RuntimeError::InvalidFormat))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Err(E::custom(RuntimeError::InvalidFormat))
    }
}

impl<'de> Deserialize<'de> for Runtime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Strings are parsed and `null` is a format error. Numbers and other
        // kinds reach serde's default visitors, which report an
        // "invalid type" shape error.
        deserializer.deserialize_any(RuntimeVisitor)
    }
}
