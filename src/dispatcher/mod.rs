//! # Dispatcher Module
//!
//! Maps handler names from the routing table to handler functions and invokes
//! them. Handlers run on the connection's coroutine; nothing is queued or
//! shared between requests.
//!
//! ```rust
//! use greenlight::dispatcher::Dispatcher;
//! use greenlight::server::json::{envelope, write_json};
//! use http::StatusCode;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register_handler("ping", |_app, _req, _route| {
//!     Ok(write_json(StatusCode::OK, &envelope("ping", "pong"), None)?)
//! });
//! assert!(dispatcher.has_handler("ping"));
//! ```

mod core;

pub use self::core::{Dispatcher, HandlerFn, HandlerResult};
