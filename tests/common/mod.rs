#![allow(dead_code)]

use greenlight::app::Application;
use greenlight::config::{Config, Environment};
use greenlight::server::{AppService, HttpServer, ServerHandle};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Once};
use std::time::Duration;

static MAY_INIT: Once = Once::new();

/// Configure may once per test binary.
pub fn setup_may_runtime() {
    MAY_INIT.call_once(|| {
        may::config().set_stack_size(0x8000);
    });
}

/// A live server on an ephemeral localhost port. Stopped on drop.
pub struct TestServer {
    handle: Option<ServerHandle>,
    pub addr: SocketAddr,
}

impl TestServer {
    pub fn start(env: Environment) -> Self {
        setup_may_runtime();
        let config = Config {
            env,
            ..Config::default()
        };
        let service = AppService::new(Arc::new(Application::new(config)));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let handle = HttpServer(service).start(addr).unwrap();
        handle.wait_ready().unwrap();
        Self {
            handle: Some(handle),
            addr,
        }
    }

    pub fn get(&self, path: &str) -> TestResponse {
        self.send(&format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n"))
    }

    pub fn post_json(&self, path: &str, body: &str) -> TestResponse {
        self.send(&format!(
            "POST {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ))
    }

    /// Write a raw HTTP/1.1 request and read exactly one response.
    pub fn send(&self, raw: &str) -> TestResponse {
        let mut stream = TcpStream::connect(self.addr).unwrap();
        stream.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
        stream.write_all(raw.as_bytes()).unwrap();
        read_response(&mut stream)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop();
        }
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    /// Lowercased header names.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

fn read_response(stream: &mut TcpStream) -> TestResponse {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let status = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
        .unwrap();
    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let len: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < len {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before body was complete");
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(len);

    TestResponse {
        status,
        headers,
        body,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
