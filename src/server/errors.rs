//! Centralized error responder.
//!
//! Handlers return `Result<JsonResponse, AppError>`. Every `AppError` is turned
//! into an `{"error": ...}` envelope here, so status codes and payload shapes
//! are the same across endpoints.

use super::json::{envelope, write_json, DecodeError};
use super::request::ParsedRequest;
use super::response::JsonResponse;
use crate::router::allow_value;
use http::header::ALLOW;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use thiserror::Error;
use tracing::error;

pub const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";
pub const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";

#[derive(Debug, Error)]
pub enum AppError {
    /// Anything unexpected. The cause is logged, never sent.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),

    #[error("the requested resource could not be found")]
    NotFound,

    #[error("the {method} method is not supported for this resource.")]
    MethodNotAllowed { method: Method, allowed: Vec<Method> },

    #[error(transparent)]
    BadRequest(#[from] DecodeError),

    #[error("failed validation")]
    FailedValidation(BTreeMap<String, String>),
}

/// Request bodies are decoded through [`DecodeError`], so a bare serde_json
/// error reaching a handler boundary comes from encoding a response.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.into())
    }
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::FailedValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Log an error together with the request it belongs to.
pub fn log_error(req: &ParsedRequest, err: &dyn Display) {
    error!(
        request_id = %req.request_id,
        request_method = %req.method,
        request_url = %req.path,
        error = %err,
        "request failed"
    );
}

/// Render `err` as a JSON error response.
pub fn error_response(req: &ParsedRequest, err: &AppError) -> JsonResponse {
    let status = err.status();
    match err {
        AppError::Internal(cause) => {
            log_error(req, &format_args!("{cause:#}"));
            respond(req, status, SERVER_ERROR_MESSAGE, None)
        }
        AppError::NotFound => respond(req, status, NOT_FOUND_MESSAGE, None),
        AppError::MethodNotAllowed { allowed, .. } => {
            let mut headers = HeaderMap::new();
            if let Ok(value) = HeaderValue::from_str(&allow_value(allowed)) {
                headers.insert(ALLOW, value);
            }
            respond(req, status, &err.to_string(), Some(&headers))
        }
        AppError::BadRequest(decode) => respond(req, status, &decode.to_string(), None),
        AppError::FailedValidation(errors) => respond(req, status, errors, None),
    }
}

/// Wrap `message` in an error envelope. If even that cannot be serialized,
/// log it and fall back to an empty 500.
fn respond<T: ?Sized + Serialize>(
    req: &ParsedRequest,
    status: StatusCode,
    message: &T,
    headers: Option<&HeaderMap>,
) -> JsonResponse {
    match write_json(status, &envelope("error", message), headers) {
        Ok(response) => response,
        Err(err) => {
            log_error(req, &err);
            JsonResponse::empty(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
