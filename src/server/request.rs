use crate::ids::RequestId;
use http::Method;
use may_minihttp::Request;
use std::collections::HashMap;
use std::io::{self, Read};
use tracing::debug;

/// Request data extracted from `may_minihttp` before routing.
///
/// The body is kept as raw bytes: decoding and its error classification belong
/// to [`crate::server::json::read_json`]. A failure while reading the body is
/// kept so the handler that needs the body can report it.
#[derive(Debug)]
pub struct ParsedRequest {
    pub request_id: RequestId,
    pub method: Method,
    /// Path without the query string.
    pub path: String,
    /// Header names are lowercased.
    pub headers: HashMap<String, String>,
    /// Decoded query string. No current endpoint takes query parameters;
    /// they are extracted here so handlers that do need no extra plumbing.
    pub query_params: HashMap<String, String>,
    pub body: io::Result<Vec<u8>>,
}

impl ParsedRequest {
    /// Build a request without a socket. Used by tests and by callers that
    /// already hold the pieces.
    #[must_use]
    pub fn new(method: Method, target: &str, body: impl Into<Vec<u8>>) -> Self {
        let (path, query) = split_target(target);
        Self {
            request_id: RequestId::new(),
            method,
            path: path.to_string(),
            headers: HashMap::new(),
            query_params: parse_query_params(query),
            body: Ok(body.into()),
        }
    }

    /// Get a header by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

fn split_target(target: &str) -> (&str, &str) {
    match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    }
}

/// Decode a `a=1&b=2` query string. Later duplicates overwrite earlier ones.
#[must_use]
pub fn parse_query_params(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Extract a [`ParsedRequest`] from a `may_minihttp::Request`.
///
/// Methods outside the standard set become extension methods, which the router
/// answers with 405 or 404. `httparse` has already validated the token, so the
/// `GET` fallback is never taken for a request that reached us.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = Method::from_bytes(req.method().as_bytes()).unwrap_or(Method::GET);
    let (path, query) = split_target(req.path());
    let path = if path.is_empty() { "/" } else { path }.to_string();
    let query_params = parse_query_params(query);

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).into_owned(),
            )
        })
        .collect();

    let request_id =
        RequestId::from_header_or_new(headers.get("x-request-id").map(String::as_str));

    let mut buf = Vec::new();
    let body = req.body().read_to_end(&mut buf).map(|_| buf);

    debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        header_count = headers.len(),
        body_bytes = body.as_ref().map(Vec::len).ok(),
        "HTTP request parsed"
    );

    ParsedRequest {
        request_id,
        method,
        path,
        headers,
        query_params,
        body,
    }
}
