//! # greenlight
//!
//! A small JSON REST API for a movie catalog, served on `may` coroutines by
//! `may_minihttp`.
//!
//! ## Architecture
//!
//! - **[`validator`]** - field-keyed accumulator for validation messages
//! - **[`data`]** - the `Movie` model, its checks and the `Runtime` value type
//! - **[`server`]** - request extraction, the JSON envelope codec, the error
//!   responder and the `HttpService` implementation
//! - **[`router`]** - regex routing table with 404/405 outcomes
//! - **[`dispatcher`]** - handler registry keyed by route name
//! - **[`handlers`]** - the endpoints and their routing table
//! - **[`config`]**, **[`logging`]**, **[`runtime_config`]** - startup plumbing
//!
//! ## Request flow
//!
//! ```text
//! may_minihttp ─► parse_request ─► Router::route ─► Dispatcher::dispatch ─► handler
//!                                       │                                    │
//!                                  404 / 405                        Ok(JsonResponse)
//!                                       │                          Err(AppError)
//!                                       ▼                                    ▼
//!                                 error_response ◄──────────────────── responder
//! ```
//!
//! ## Endpoints
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | `GET` | `/v1/healthcheck` | [`handlers::healthcheck`] |
//! | `POST` | `/v1/movies` | [`handlers::create_movie`] |
//! | `GET` | `/v1/movies/{id}` | [`handlers::show_movie`] |
//!
//! ## Example
//!
//! ```rust
//! use greenlight::app::Application;
//! use greenlight::config::Config;
//! use greenlight::server::{AppService, ParsedRequest};
//! use http::{Method, StatusCode};
//! use std::sync::Arc;
//!
//! let service = AppService::new(Arc::new(Application::new(Config::default())));
//! let res = service.handle(&ParsedRequest::new(Method::GET, "/v1/movies/7", ""));
//! assert_eq!(res.status, StatusCode::OK);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod dispatcher;
pub mod handlers;
pub mod ids;
pub mod logging;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod validator;
