use crate::app::Application;
use crate::dispatcher::HandlerResult;
use crate::router::RouteMatch;
use crate::server::json::write_json;
use crate::server::request::ParsedRequest;
use http::StatusCode;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SystemInfo<'a> {
    environment: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct Health<'a> {
    status: &'static str,
    system_info: SystemInfo<'a>,
}

/// `GET /v1/healthcheck`: report availability, environment and version.
pub fn healthcheck(app: &Application, _req: &ParsedRequest, _route: &RouteMatch) -> HandlerResult {
    let body = Health {
        status: "available",
        system_info: SystemInfo {
            environment: app.env().as_str(),
            version: app.version,
        },
    };
    Ok(write_json(StatusCode::OK, &body, None)?)
}
