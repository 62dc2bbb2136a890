use std::fmt::{Display, Formatter};
use std::str::FromStr;
use ulid::Ulid;

/// Per-request identifier used to correlate log lines, backed by a ULID.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(Ulid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Reuse a well-formed `X-Request-Id` supplied by the client, otherwise
    /// mint a fresh one.
    #[must_use]
    pub fn from_header_or_new(header_value: Option<&str>) -> Self {
        header_value
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_default()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reuses_valid_header() {
        let original = RequestId::new();
        let header = original.to_string();
        assert_eq!(RequestId::from_header_or_new(Some(&header)), original);
    }

    #[test]
    fn test_replaces_garbage_header() {
        let id = RequestId::from_header_or_new(Some("not-a-ulid"));
        assert_eq!(id.to_string().len(), 26);
        let _ = RequestId::from_header_or_new(None);
    }
}
