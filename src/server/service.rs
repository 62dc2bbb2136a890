use super::errors::{error_response, AppError};
use super::request::{parse_request, ParsedRequest};
use super::response::{write_response, JsonResponse};
use crate::app::Application;
use crate::dispatcher::Dispatcher;
use crate::handlers;
use crate::router::{allow_value, RouteOutcome, Router};
use http::header::{ALLOW, LOCATION};
use http::{HeaderValue, Method, StatusCode};
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// The `may_minihttp` service. Cloned once per connection; every field is
/// shared behind an `Arc` and never mutated after construction.
#[derive(Debug, Clone)]
pub struct AppService {
    pub app: Arc<Application>,
    pub router: Arc<Router>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppService {
    /// Build a service with every endpoint registered.
    #[must_use]
    pub fn new(app: Arc<Application>) -> Self {
        let mut dispatcher = Dispatcher::new();
        handlers::register_all(&mut dispatcher);
        Self::with_parts(app, Router::new(handlers::routes()), dispatcher)
    }

    #[must_use]
    pub fn with_parts(app: Arc<Application>, router: Router, dispatcher: Dispatcher) -> Self {
        Self {
            app,
            router: Arc::new(router),
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Route `req`, run its handler and turn any failure into an error
    /// response. Does no I/O.
    #[must_use]
    pub fn handle(&self, req: &ParsedRequest) -> JsonResponse {
        let result = match self.router.route(&req.method, &req.path) {
            RouteOutcome::Matched(route) => self.dispatcher.dispatch(&self.app, req, &route),
            RouteOutcome::MethodNotAllowed(allowed) => Err(AppError::MethodNotAllowed {
                method: req.method.clone(),
                allowed,
            }),
            RouteOutcome::Options(allowed) => Ok(options_response(&allowed)),
            RouteOutcome::RedirectTrailingSlash(location) => {
                Ok(redirect_response(&req.method, &location))
            }
            RouteOutcome::NotFound => Err(AppError::NotFound),
        };
        result.unwrap_or_else(|err| error_response(req, &err))
    }
}

/// Empty 200 listing the methods a path supports.
fn options_response(allowed: &[Method]) -> JsonResponse {
    let mut res = JsonResponse::empty(StatusCode::OK);
    if let Ok(value) = HeaderValue::from_str(&allow_value(allowed)) {
        res.headers.insert(ALLOW, value);
    }
    res
}

/// 301 for `GET`, 308 otherwise so the method and body are replayed.
fn redirect_response(method: &Method, location: &str) -> JsonResponse {
    let status = if *method == Method::GET {
        StatusCode::MOVED_PERMANENTLY
    } else {
        StatusCode::PERMANENT_REDIRECT
    };
    let mut res = JsonResponse::empty(status);
    if let Ok(value) = HeaderValue::from_str(location) {
        res.headers.insert(LOCATION, value);
    }
    res
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let start = Instant::now();
        let parsed = parse_request(req);
        let response = self.handle(&parsed);

        info!(
            request_id = %parsed.request_id,
            method = %parsed.method,
            path = %parsed.path,
            user_agent = parsed.header("user-agent").unwrap_or("-"),
            status = response.status.as_u16(),
            latency_us = start.elapsed().as_micros() as u64,
            "request completed"
        );

        write_response(res, response);
        Ok(())
    }
}
