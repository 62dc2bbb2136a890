use http::header::CONTENT_TYPE;
use http::{HeaderMap, StatusCode};
use may_minihttp::Response;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// A fully rendered response, independent of the transport.
///
/// Handlers and the error responder produce these; [`write_response`] copies
/// one onto the `may_minihttp` connection.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl JsonResponse {
    /// A response with no headers and no body.
    #[must_use]
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Parse the body back into a JSON value.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
    }
}

/// Header lines leaked so far. Every value written besides the JSON content
/// type comes from the routing table, so the set stays small.
static HEADER_LINES: Lazy<Mutex<HashSet<&'static str>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// `may_minihttp` only accepts `'static` header lines. The common
/// content-type line is static; any other distinct line is leaked once and
/// reused afterwards.
fn header_line(name: &http::HeaderName, value: &http::HeaderValue) -> &'static str {
    if *name == CONTENT_TYPE && value.as_bytes() == super::json::JSON_CONTENT_TYPE.as_bytes() {
        return "Content-Type: application/json";
    }
    let line = format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()));
    let mut lines = HEADER_LINES.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(existing) = lines.get(line.as_str()) {
        return *existing;
    }
    let leaked: &'static str = Box::leak(line.into_boxed_str());
    lines.insert(leaked);
    leaked
}

/// Copy `response` onto the connection.
pub fn write_response(res: &mut Response, response: JsonResponse) {
    let reason = response.status.canonical_reason().unwrap_or("Unknown");
    res.status_code(usize::from(response.status.as_u16()), reason);
    for (name, value) in &response.headers {
        res.header(header_line(name, value));
    }
    res.body_vec(response.body);
}
