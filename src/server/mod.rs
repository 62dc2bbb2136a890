//! HTTP plumbing: request extraction, the JSON codec, the error responder and
//! the `may_minihttp` service that ties them to the router.

pub mod errors;
pub mod http_server;
pub mod json;
pub mod request;
pub mod response;
pub mod service;

pub use errors::{error_response, AppError};
pub use http_server::{HttpServer, ServerHandle};
pub use json::{envelope, read_json, write_json, DecodeError, Envelope};
pub use request::{parse_request, ParsedRequest};
pub use response::{write_response, JsonResponse};
pub use service::AppService;
