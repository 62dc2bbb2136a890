mod common;

use common::TestServer;
use greenlight::config::Environment;
use serde_json::json;

#[test]
fn test_unknown_path_is_not_found() {
    let server = TestServer::start(Environment::Development);
    let res = server.get("/v2/movies");
    assert_eq!(res.status, 404);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(
        res.json(),
        json!({"error": "the requested resource could not be found"})
    );
}

#[test]
fn test_wrong_method_is_not_allowed() {
    let server = TestServer::start(Environment::Development);
    let res = server.send("DELETE /v1/healthcheck HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert_eq!(res.status, 405);
    assert_eq!(res.header("allow"), Some("GET"));
    assert_eq!(
        res.json(),
        json!({"error": "the DELETE method is not supported for this resource."})
    );
}

#[test]
fn test_get_on_collection_is_not_allowed() {
    let server = TestServer::start(Environment::Development);
    let res = server.get("/v1/movies");
    assert_eq!(res.status, 405);
    assert_eq!(res.header("allow"), Some("POST"));
}

#[test]
fn test_query_string_is_ignored_for_routing() {
    let server = TestServer::start(Environment::Development);
    let res = server.get("/v1/movies/5?fields=title");
    assert_eq!(res.status, 200);
    assert_eq!(res.json()["movie"]["id"], 5);
}

#[test]
fn test_options_lists_allowed_methods() {
    let server = TestServer::start(Environment::Development);
    let res = server.send("OPTIONS /v1/healthcheck HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert_eq!(res.status, 200);
    assert_eq!(res.header("allow"), Some("GET, OPTIONS"));
    assert!(res.body.is_empty());
}

#[test]
fn test_trailing_slash_is_redirected() {
    let server = TestServer::start(Environment::Development);
    let res = server.get("/v1/healthcheck/");
    assert_eq!(res.status, 301);
    assert_eq!(res.header("location"), Some("/v1/healthcheck"));

    let res = server.get("/v1/movies/7/");
    assert_eq!(res.status, 404);
}

#[test]
fn test_repeated_method_not_allowed_keeps_allow_header() {
    let server = TestServer::start(Environment::Development);
    for _ in 0..3 {
        let res = server.send("DELETE /v1/movies HTTP/1.1\r\nHost: localhost\r\n\r\n");
        assert_eq!(res.status, 405);
        assert_eq!(res.header("allow"), Some("POST"));
    }
}
