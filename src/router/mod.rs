//! # Router Module
//!
//! Matches `(method, path)` pairs against the routing table and extracts path
//! parameters.
//!
//! Patterns use `{name}` placeholders (`/v1/movies/{id}`) and are compiled once
//! at startup into anchored regexes. A lookup has one of these outcomes:
//!
//! - [`RouteOutcome::Matched`]: a route exists for this path and method
//! - [`RouteOutcome::MethodNotAllowed`]: the path exists, the method does not
//! - [`RouteOutcome::Options`]: an `OPTIONS` request for a known path
//! - [`RouteOutcome::RedirectTrailingSlash`]: `/v1/healthcheck/` for `/v1/healthcheck`
//! - [`RouteOutcome::NotFound`]: no pattern matches the path
//!
//! ```rust
//! use greenlight::router::{RouteMeta, RouteOutcome, Router};
//! use http::Method;
//!
//! let router = Router::new(vec![RouteMeta::new(Method::GET, "/v1/movies/{id}", "show_movie")]);
//! match router.route(&Method::GET, "/v1/movies/42") {
//!     RouteOutcome::Matched(m) => assert_eq!(m.get_path_param("id"), Some("42")),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

mod core;

pub use self::core::{allow_value, ParamVec, RouteMatch, RouteMeta, RouteOutcome, Router, MAX_INLINE_PARAMS};
