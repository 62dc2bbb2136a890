mod common;

use common::TestServer;
use greenlight::config::Environment;
use serde_json::json;

#[test]
fn test_create_movie_echoes_input() {
    let server = TestServer::start(Environment::Development);
    let res = server.post_json(
        "/v1/movies",
        r#"{"title":"Moana","year":2016,"runtime":"107 mins","genres":["animation","adventure"]}"#,
    );
    assert_eq!(res.status, 200);
    assert_eq!(
        res.json(),
        json!({"movie": {
            "title": "Moana",
            "year": 2016,
            "runtime": "107 mins",
            "genres": ["animation", "adventure"]
        }})
    );
}

#[test]
fn test_create_movie_failed_validation() {
    let server = TestServer::start(Environment::Development);
    let res = server.post_json(
        "/v1/movies",
        r#"{"title":"","year":1800,"runtime":"0 mins","genres":[]}"#,
    );
    assert_eq!(res.status, 422);
    assert_eq!(
        res.json(),
        json!({"error": {
            "title": "must be provided",
            "year": "must be greater than 1888",
            "runtime": "must be provided",
            "genres": "must contain at least 1 genre"
        }})
    );
}

#[test]
fn test_create_movie_null_fields_reach_validation() {
    let server = TestServer::start(Environment::Development);
    let res = server.post_json(
        "/v1/movies",
        r#"{"title":null,"year":null,"runtime":"90 mins","genres":null}"#,
    );
    assert_eq!(res.status, 422);
    assert_eq!(
        res.json(),
        json!({"error": {
            "title": "must be provided",
            "year": "must be provided",
            "genres": "must contain at least 1 genre"
        }})
    );
}

#[test]
fn test_create_movie_null_runtime_is_bad_request() {
    let server = TestServer::start(Environment::Development);
    let res = server.post_json(
        "/v1/movies",
        r#"{"title":"Moana","year":2016,"runtime":null,"genres":["animation"]}"#,
    );
    assert_eq!(res.status, 400);
    assert_eq!(res.json(), json!({"error": "invalid runtime format"}));
}

#[test]
fn test_create_movie_empty_body() {
    let server = TestServer::start(Environment::Development);
    let res = server.post_json("/v1/movies", "");
    assert_eq!(res.status, 400);
    assert_eq!(res.json(), json!({"error": "body must not be empty"}));
}

#[test]
fn test_create_movie_decode_errors() {
    let server = TestServer::start(Environment::Development);
    let cases = [
        (r#"{"year":"not-a-number"}"#, r#"body contains incorrect JSON type for field "year""#),
        (r#"{"runtime": 107}"#, r#"body contains incorrect JSON type for field "runtime""#),
        (r#"{"runtime": "107 minutes"}"#, "invalid runtime format"),
        (r#"{"year":"x","genres":5}"#, r#"body contains incorrect JSON type for field "year""#),
        (r#"{"title": "Moana", }"#, "body contains badly-formed JSON (at character 20)"),
        (r#"{"title": "Moana""#, "body contained badly-formed JSON"),
        (r#"{"title": "Moana"} {}"#, "body must only contain a single JSON value"),
    ];
    for (body, message) in cases {
        let res = server.post_json("/v1/movies", body);
        assert_eq!(res.status, 400, "{body}");
        assert_eq!(res.json(), json!({"error": message}), "{body}");
    }
}

#[test]
fn test_create_movie_wrong_top_level_type() {
    let server = TestServer::start(Environment::Development);
    let res = server.post_json("/v1/movies", r#""Moana""#);
    assert_eq!(res.status, 400);
    let message = res.json()["error"].as_str().unwrap().to_string();
    assert!(
        message.starts_with("body contains incorrect JSON type (at character "),
        "{message}"
    );
}

#[test]
fn test_show_movie() {
    let server = TestServer::start(Environment::Development);
    let res = server.get("/v1/movies/123");
    assert_eq!(res.status, 200);
    let movie = &res.json()["movie"];
    assert_eq!(movie["id"], 123);
    assert_eq!(movie["title"], "Casablanca");
    assert_eq!(movie["year"], 1942);
    assert_eq!(movie["runtime"], "102 mins");
    assert_eq!(movie["genres"], json!(["drama", "romance", "war"]));
    assert_eq!(movie["version"], 1);
}

#[test]
fn test_show_movie_bad_ids_are_not_found() {
    let server = TestServer::start(Environment::Development);
    for path in ["/v1/movies/0", "/v1/movies/abc", "/v1/movies/-1"] {
        let res = server.get(path);
        assert_eq!(res.status, 404, "{path}");
        assert_eq!(
            res.json(),
            json!({"error": "the requested resource could not be found"})
        );
    }
}
