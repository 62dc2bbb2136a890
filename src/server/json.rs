//! JSON envelope codec.
//!
//! [`write_json`] renders a payload (normally an [`Envelope`]) into a
//! [`JsonResponse`]; [`read_json`] decodes a request body into a typed
//! destination and sorts failures into [`DecodeError`] variants whose messages
//! are safe to return to the client.
//!
//! The destination of [`read_json`] must implement `DeserializeOwned`. Handing it
//! anything else is a programming error and is rejected by the compiler rather
//! than at runtime:
//!
//! ```compile_fail
//! struct NotDecodable;
//! let _: NotDecodable = greenlight::server::json::read_json(b"{}").unwrap();
//! ```

use super::response::JsonResponse;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, StatusCode};
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::error::Category;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fmt;
use std::io::{self, Read};
use thiserror::Error;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A JSON object with exactly one key naming the payload's role, such as
/// `{"movie": {...}}` or `{"error": "..."}`.
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a, T: ?Sized> {
    pub key: &'a str,
    pub payload: &'a T,
}

/// Wrap `payload` under `key`.
pub fn envelope<'a, T: ?Sized + Serialize>(key: &'a str, payload: &'a T) -> Envelope<'a, T> {
    Envelope { key, payload }
}

impl<T: ?Sized + Serialize> Serialize for Envelope<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, self.payload)?;
        map.end()
    }
}

/// Serialize `data` with tab indentation and a trailing newline.
///
/// Extra headers are copied first, then `Content-Type` is forced to JSON.
/// `None` and an empty map behave the same. The only failure is serialization
/// itself, which means a caller passed something that cannot become JSON.
pub fn write_json<T: ?Sized + Serialize>(
    status: StatusCode,
    data: &T,
    headers: Option<&HeaderMap>,
) -> Result<JsonResponse, serde_json::Error> {
    let mut body = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut body, PrettyFormatter::with_indent(b"\t"));
    data.serialize(&mut ser)?;
    body.push(b'\n');

    let mut out = headers.cloned().unwrap_or_default();
    out.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

    Ok(JsonResponse {
        status,
        headers: out,
        body,
    })
}

/// Why a request body could not be decoded. Every variant is a client error;
/// the `Display` text is what the client sees.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("body contains badly-formed JSON (at character {offset})")]
    Syntax { offset: usize },

    /// The body ended in the middle of a value.
    #[error("body contained badly-formed JSON")]
    Truncated,

    #[error("body contains incorrect JSON type for field {field:?}")]
    IncorrectFieldType { field: String },

    #[error("body contains incorrect JSON type (at character {offset})")]
    IncorrectType { offset: usize },

    #[error("body must not be empty")]
    Empty,

    #[error("body must only contain a single JSON value")]
    TrailingData,

    /// Rejected by the destination type itself, e.g. a malformed runtime.
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Decode exactly one JSON value from `body` into `T`.
pub fn read_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    let mut de = serde_json::Deserializer::from_slice(body);
    let value = T::deserialize(&mut de).map_err(|err| classify::<T>(body, &err))?;
    de.end().map_err(|_| DecodeError::TrailingData)?;
    Ok(value)
}

/// Read `reader` to the end, then decode as [`read_json`] does.
pub fn read_json_from<T: DeserializeOwned, R: Read>(mut reader: R) -> Result<T, DecodeError> {
    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;
    read_json(&body)
}

/// Decode into an existing destination, replacing its contents on success and
/// leaving it untouched on failure.
pub fn read_json_into<T: DeserializeOwned>(body: &[u8], dst: &mut T) -> Result<(), DecodeError> {
    *dst = read_json(body)?;
    Ok(())
}

fn classify<T: DeserializeOwned>(body: &[u8], err: &serde_json::Error) -> DecodeError {
    match err.classify() {
        Category::Eof if body.iter().all(u8::is_ascii_whitespace) => DecodeError::Empty,
        Category::Eof => DecodeError::Truncated,
        Category::Syntax => DecodeError::Syntax {
            offset: byte_offset(body, err.line(), err.column()),
        },
        Category::Data if is_shape_error(err) => match offending_field::<T>(body) {
            Some(field) => DecodeError::IncorrectFieldType { field },
            None => DecodeError::IncorrectType {
                offset: byte_offset(body, err.line(), err.column()),
            },
        },
        Category::Data => DecodeError::Invalid(message_without_position(err)),
        Category::Io => DecodeError::Io(io::Error::other(message_without_position(err))),
    }
}

/// serde reports a value of the wrong JSON kind, an out-of-range number or a
/// wrong-sized array with these prefixes. Anything else under
/// `Category::Data` came from a custom `Deserialize` impl.
fn is_shape_error(err: &serde_json::Error) -> bool {
    let msg = err.to_string();
    ["invalid type", "invalid value", "invalid length"]
        .iter()
        .any(|prefix| msg.starts_with(prefix))
}

/// Find the first top-level key, in body order, whose value alone fails to
/// decode into `T` with a shape error. A probe object holds a single key, so
/// the type error for that key is hit before any missing-field check. `None`
/// when the body is not an object or no key reproduces the error.
fn offending_field<T: DeserializeOwned>(body: &[u8]) -> Option<String> {
    let mut de = serde_json::Deserializer::from_slice(body);
    let Ok(BodyEntries(entries)) = BodyEntries::deserialize(&mut de) else {
        return None;
    };
    entries.into_iter().find_map(|(key, value)| {
        let mut probe = Map::with_capacity(1);
        probe.insert(key.clone(), value);
        match serde_json::from_value::<T>(Value::Object(probe)) {
            Err(e) if is_shape_error(&e) => Some(key),
            _ => None,
        }
    })
}

/// Top-level object members in the order they appear in the body.
/// `serde_json::Map` sorts its keys, which would name the wrong field when
/// several are mistyped.
struct BodyEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for BodyEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BodyEntriesVisitor)
    }
}

struct BodyEntriesVisitor;

impl<'de> Visitor<'de> for BodyEntriesVisitor {
    type Value = BodyEntries;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, Value>()? {
            entries.push(entry);
        }
        Ok(BodyEntries(entries))
    }
}

/// Convert serde_json's 1-based line and byte column into a byte offset into
/// `body`.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let preceding: usize = body
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    preceding + column
}

fn message_without_position(err: &serde_json::Error) -> String {
    let msg = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    match msg.strip_suffix(&suffix) {
        Some(stripped) => stripped.to_string(),
        None => msg,
    }
}
