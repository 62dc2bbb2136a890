use super::read_id_param;
use crate::app::Application;
use crate::data::{validate_movie, CreateMovieInput, Movie, Runtime};
use crate::dispatcher::HandlerResult;
use crate::router::RouteMatch;
use crate::server::errors::AppError;
use crate::server::json::{envelope, read_json, write_json, DecodeError};
use crate::server::request::ParsedRequest;
use crate::validator::Validator;
use chrono::Utc;
use http::StatusCode;
use std::io;
use tracing::debug;

/// `POST /v1/movies`: decode, validate and echo the input back.
pub fn create_movie(_app: &Application, req: &ParsedRequest, _route: &RouteMatch) -> HandlerResult {
    let body = match &req.body {
        Ok(body) => body,
        Err(err) => {
            let err = io::Error::new(err.kind(), err.to_string());
            return Err(DecodeError::Io(err).into());
        }
    };
    let input: CreateMovieInput = read_json(body)?;

    let movie = Movie::from_input(input.clone());
    let mut v = Validator::new();
    validate_movie(&mut v, &movie);
    if !v.valid() {
        return Err(AppError::FailedValidation(v.into_errors()));
    }

    debug!(request_id = %req.request_id, title = %input.title, "movie input accepted");
    Ok(write_json(StatusCode::OK, &envelope("movie", &input), None)?)
}

/// `GET /v1/movies/{id}`: return a placeholder record for `id`.
pub fn show_movie(_app: &Application, _req: &ParsedRequest, route: &RouteMatch) -> HandlerResult {
    let id = read_id_param(route)?;
    let movie = Movie {
        id,
        created_at: Utc::now(),
        title: "Casablanca".to_string(),
        year: 1942,
        runtime: Runtime(102),
        genres: vec!["drama".into(), "romance".into(), "war".into()],
        version: 1,
    };
    Ok(write_json(StatusCode::OK, &envelope("movie", &movie), None)?)
}
