#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use microserve::http::connection::Connection;
use microserve::server::ServerState;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// A response read back off the wire.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub content_type: Option<String>,
    pub content_length: Option<usize>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn body_str(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("body is not JSON")
    }
}

pub fn parse_response(raw: &[u8]) -> RawResponse {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no header terminator");
    let head = std::str::from_utf8(&raw[..split]).expect("head is not UTF-8");
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap();
    let mut parts = status_line.splitn(3, ' ');
    assert_eq!(parts.next(), Some("HTTP/1.1"));
    let status = parts.next().unwrap().parse().unwrap();
    let reason = parts.next().unwrap_or_default().to_string();

    let mut content_type = None;
    let mut content_length = None;
    for line in lines {
        let (key, value) = line.split_once(':').expect("malformed header");
        match key.to_ascii_lowercase().as_str() {
            "content-type" => content_type = Some(value.trim().to_string()),
            "content-length" => content_length = Some(value.trim().parse().unwrap()),
            _ => {}
        }
    }

    RawResponse {
        status,
        reason,
        content_type,
        content_length,
        body,
    }
}

/// Runs one connection over an in-memory pipe and returns the raw reply.
pub async fn exchange(state: Arc<ServerState>, request: &[u8]) -> Vec<u8> {
    exchange_with(state, request, false).await
}

/// Like [`exchange`], optionally closing the client's write half after the
/// request has been sent.
pub async fn exchange_with(state: Arc<ServerState>, request: &[u8], close_write: bool) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(256 * 1024);
    let handle = tokio::spawn(async move {
        let mut conn = Connection::new(server, state);
        conn.run().await
    });

    client.write_all(request).await.unwrap();
    if close_write {
        client.shutdown().await.unwrap();
    }

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    handle.await.unwrap().unwrap();
    out
}

/// A fresh, empty scratch directory unique to this process and `name`.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("microserve-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
