use crate::app::Application;
use crate::router::RouteMatch;
use crate::server::errors::AppError;
use crate::server::request::ParsedRequest;
use crate::server::response::JsonResponse;
use anyhow::anyhow;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

pub type HandlerResult = Result<JsonResponse, AppError>;

/// Signature shared by every endpoint handler.
pub type HandlerFn = fn(&Application, &ParsedRequest, &RouteMatch) -> HandlerResult;

/// Registry of named handlers.
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: HashMap<String, HandlerFn>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Dispatcher").field("handlers", &names).finish()
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous registration.
    pub fn register_handler(&mut self, name: impl Into<String>, handler: HandlerFn) {
        let name = name.into();
        debug!(handler_name = %name, "Handler registered");
        self.handlers.insert(name, handler);
    }

    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Invoke the handler named by `route`. A route without a registered
    /// handler is a wiring mistake and is reported as an internal error.
    pub fn dispatch(&self, app: &Application, req: &ParsedRequest, route: &RouteMatch) -> HandlerResult {
        let name = route.handler_name();
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| anyhow!("no handler registered for route {name:?}"))?;
        handler(app, req, route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::router::{RouteMeta, RouteOutcome, Router};
    use http::{Method, StatusCode};

    fn route_for(name: &str) -> RouteMatch {
        let router = Router::new(vec![RouteMeta::new(Method::GET, "/x", name)]);
        match router.route(&Method::GET, "/x") {
            RouteOutcome::Matched(m) => m,
            other => panic!("unexpected {other:?}"),
        }
    }

    fn teapot(_: &Application, _: &ParsedRequest, _: &RouteMatch) -> HandlerResult {
        Ok(JsonResponse::empty(StatusCode::IM_A_TEAPOT))
    }

    #[test]
    fn test_dispatches_registered_handler() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_handler("teapot", teapot);
        let app = Application::new(Config::default());
        let req = ParsedRequest::new(Method::GET, "/x", "");
        let res = dispatcher.dispatch(&app, &req, &route_for("teapot")).unwrap();
        assert_eq!(res.status, StatusCode::IM_A_TEAPOT);
    }

    #[test]
    fn test_missing_handler_is_internal_error() {
        let dispatcher = Dispatcher::new();
        let app = Application::new(Config::default());
        let req = ParsedRequest::new(Method::GET, "/x", "");
        let err = dispatcher.dispatch(&app, &req, &route_for("ghost")).unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
