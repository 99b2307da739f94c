//! Common test utilities for fetch integration tests.

#![allow(dead_code, unused_imports)]

mod fixtures;

pub use fixtures::*;

use repo_fetch::{FetchConfig, FetchEngine};
use std::io::{Read, Write};
use std::net::TcpListener;
use wiremock::MockServer;

/// Engine whose API and web requests both go to `server`.
pub fn engine_for(server: &MockServer) -> FetchEngine {
    FetchEngine::new(
        FetchConfig::default()
            .with_api_base(server.uri())
            .with_web_base(server.uri()),
    )
}

/// Records every progress report for later assertions.
#[derive(Default)]
pub struct ProgressLog {
    pub events: Vec<(f64, String)>,
}

impl ProgressLog {
    pub fn record(&mut self, fraction: f64, message: &str) {
        self.events.push((fraction, message.to_string()));
    }

    pub fn last(&self) -> &(f64, String) {
        self.events.last().expect("no progress reported")
    }

    pub fn messages(&self) -> Vec<&str> {
        self.events.iter().map(|(_, m)| m.as_str()).collect()
    }

    pub fn assert_in_range(&self) {
        for (fraction, message) in &self.events {
            assert!(
                (0.0..=1.0).contains(fraction),
                "fraction {} out of range for {:?}",
                fraction,
                message
            );
        }
    }
}

/// Serve one request with `body` in chunked encoding and no `Content-Length`.
///
/// Returns the base URL. Any request path gets the same body.
pub fn serve_chunked_once(body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }

        stream
            .write_all(
                b"HTTP/1.1 200 OK\r\n\
                  Content-Type: application/octet-stream\r\n\
                  Transfer-Encoding: chunked\r\n\
                  Connection: close\r\n\r\n",
            )
            .unwrap();
        for chunk in body.chunks(4096) {
            write!(stream, "{:x}\r\n", chunk.len()).unwrap();
            stream.write_all(chunk).unwrap();
            stream.write_all(b"\r\n").unwrap();
        }
        stream.write_all(b"0\r\n\r\n").unwrap();
        stream.flush().unwrap();
    });

    format!("http://{}", addr)
}
