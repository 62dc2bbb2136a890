//! Field-level validation.
//!
//! A [`Validator`] collects at most one message per field. Handlers create one per
//! request, run their checks against it and hand the resulting map to the error
//! responder when [`Validator::valid`] is false.
//!
//! ```
//! use greenlight::validator::{self, Validator};
//!
//! let mut v = Validator::new();
//! v.check(!"".is_empty(), "title", "must be provided");
//! v.check(validator::unique(&["drama", "drama"]), "genres", "must not contain duplicate values");
//! assert!(!v.valid());
//! assert_eq!(v.errors()["title"], "must be provided");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

/// Email address pattern from <https://html.spec.whatwg.org/#valid-e-mail-address>.
pub static EMAIL_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email regex is a valid pattern")
});

/// Accumulates validation errors keyed by field name.
///
/// The first message recorded for a field wins; later messages for the same
/// field are ignored. Errors are kept in a `BTreeMap` so the 422 payload lists
/// fields in a stable order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no check has failed.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    /// Record `message` for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Consume the validator, yielding the field → message map.
    #[must_use]
    pub fn into_errors(self) -> BTreeMap<String, String> {
        self.errors
    }
}

/// True if `value` equals one of `permitted`.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.iter().any(|p| p == value)
}

/// True if `value` matches `rx`.
pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.is_match(value)
}

/// True if every element of `values` is distinct. An empty slice is unique.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_validator_is_valid() {
        let v = Validator::new();
        assert!(v.valid());
        assert!(v.errors().is_empty());
    }

    #[test]
    fn test_first_message_wins() {
        let mut v = Validator::new();
        v.check(false, "k", "m");
        v.check(false, "k", "m2");
        v.add_error("k", "m3");
        assert_eq!(v.errors().len(), 1);
        assert_eq!(v.errors()["k"], "m");
    }

    #[test]
    fn test_passing_checks_record_nothing() {
        let mut v = Validator::new();
        v.check(true, "title", "must be provided");
        v.check(1 < 2, "year", "must be greater than 1888");
        assert!(v.valid());
    }

    #[test]
    fn test_errors_keep_one_entry_per_field() {
        let mut v = Validator::new();
        v.check(false, "title", "must be provided");
        v.check(false, "year", "must be provided");
        v.check(false, "title", "must not be more than 500 bytes long");
        let errors = v.into_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["title"], "must be provided");
        assert_eq!(errors["year"], "must be provided");
    }

    #[test]
    fn test_permitted_value() {
        assert!(permitted_value(&"staging", &["development", "staging", "production"]));
        assert!(!permitted_value(&"qa", &["development", "staging", "production"]));
        assert!(permitted_value(&3, &[1, 2, 3]));
        assert!(!permitted_value(&3, &[]));
    }

    #[test]
    fn test_matches_email() {
        assert!(matches("alice@example.com", &EMAIL_RX));
        assert!(matches("bob.smith+tag@mail.example.org", &EMAIL_RX));
        assert!(!matches("not-an-email", &EMAIL_RX));
        assert!(!matches("alice@", &EMAIL_RX));
    }

    #[test]
    fn test_unique() {
        assert!(unique::<String>(&[]));
        assert!(unique(&["drama", "romance", "war"]));
        assert!(!unique(&["drama", "romance", "drama"]));
        assert!(unique(&[3, 1, 2]));
    }

    proptest! {
        #[test]
        fn prop_distinct_strings_are_unique(
            set in prop::collection::hash_set("[a-z]{1,8}", 1..=5)
        ) {
            let values: Vec<String> = set.into_iter().collect();
            prop_assert!(unique(&values));
        }

        #[test]
        fn prop_any_duplicate_breaks_uniqueness(
            set in prop::collection::hash_set("[a-z]{1,8}", 1..=5),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut values: Vec<String> = set.into_iter().collect();
            let dup = values[pick.index(values.len())].clone();
            values.push(dup);
            prop_assert!(!unique(&values));
        }
    }
}
