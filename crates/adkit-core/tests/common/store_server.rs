//! Minimal HTTP/1.1 server playing the content store for integration tests.
//!
//! Serves a fixed path-to-body map. HEAD answers with Content-Length only,
//! GET returns the body, unknown paths get 404. Per-path status overrides
//! simulate a misbehaving store.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Default)]
pub struct StoreFiles {
    files: HashMap<String, Vec<u8>>,
    statuses: HashMap<String, u16>,
}

impl StoreFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file under an absolute path like `/grip/Pin.stl`.
    pub fn file(mut self, path: &str, body: &[u8]) -> Self {
        self.files.insert(path.to_string(), body.to_vec());
        self
    }

    /// Forces a status for a path, regardless of method.
    pub fn status(mut self, path: &str, status: u16) -> Self {
        self.statuses.insert(path.to_string(), status);
        self
    }
}

/// Starts the server in a background thread. Returns the base URL without a
/// trailing slash. The server runs until the process exits.
pub fn start(store: StoreFiles) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let store = Arc::new(store);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let store = Arc::clone(&store);
            thread::spawn(move || handle(stream, &store));
        }
    });
    format!("http://127.0.0.1:{port}")
}

fn handle(mut stream: std::net::TcpStream, store: &StoreFiles) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = match parse_request_line(request) {
        Some(v) => v,
        None => return,
    };

    if let Some(&status) = store.statuses.get(path) {
        let _ = write!(
            stream,
            "HTTP/1.1 {} {}\r\nContent-Length: 0\r\n\r\n",
            status,
            reason(status)
        );
        return;
    }

    let body = match store.files.get(path) {
        Some(body) => body,
        None => {
            let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n");
            return;
        }
    };

    if method.eq_ignore_ascii_case("HEAD") {
        let _ = write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n",
            body.len()
        );
        return;
    }
    if method.eq_ignore_ascii_case("GET") {
        let _ = write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(body);
        return;
    }
    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
}

/// Returns (method, path) from the request line.
fn parse_request_line(request: &str) -> Option<(&str, &str)> {
    let line = request.lines().next()?;
    let mut parts = line.split_whitespace();
    Some((parts.next()?, parts.next()?))
}

fn reason(status: u16) -> &'static str {
    match status {
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
