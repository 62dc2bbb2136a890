//! Endpoint handlers and the routing table that points at them.
//!
//! Each handler has the [`HandlerFn`] signature: it reads what it needs from
//! the request, returns a JSON response on success and leaves every failure
//! to the error responder.

mod healthcheck;
mod movies;

pub use healthcheck::healthcheck;
pub use movies::{create_movie, show_movie};

use crate::dispatcher::{Dispatcher, HandlerFn};
use crate::router::{RouteMatch, RouteMeta};
use crate::server::errors::AppError;
use http::Method;

/// Every endpoint: method, pattern, handler name, handler.
const ENDPOINTS: &[(Method, &str, &str, HandlerFn)] = &[
    (Method::GET, "/v1/healthcheck", "healthcheck", healthcheck),
    (Method::POST, "/v1/movies", "create_movie", create_movie),
    (Method::GET, "/v1/movies/{id}", "show_movie", show_movie),
];

/// The routing table for [`crate::router::Router::new`].
#[must_use]
pub fn routes() -> Vec<RouteMeta> {
    ENDPOINTS
        .iter()
        .map(|(method, pattern, name, _)| RouteMeta::new(method.clone(), *pattern, *name))
        .collect()
}

/// Register every handler named by [`routes`].
pub fn register_all(dispatcher: &mut Dispatcher) {
    for (_, _, name, handler) in ENDPOINTS {
        dispatcher.register_handler(*name, *handler);
    }
}

/// Read the `id` path parameter. Anything that is not a positive integer
/// cannot name a record, so it is reported as not found.
pub(crate) fn read_id_param(route: &RouteMatch) -> Result<i64, AppError> {
    route
        .get_path_param("id")
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id >= 1)
        .ok_or(AppError::NotFound)
}
