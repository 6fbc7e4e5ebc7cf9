//! In-process mock of the hub REST API plus a mock decoder script.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path as FsPath, PathBuf};
use std::sync::{Arc, Mutex};

/// What the mock answers on `POST /api/tts_get_url`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtsMode {
    /// 200 with a URL to a valid compressed payload.
    Ok,
    /// 500 with an error body.
    Fail,
    /// 200 with a body that has no `url`.
    NoUrl,
    /// 200 with a URL whose payload is not audio.
    Corrupt,
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct HubState {
    addr: SocketAddr,
    tts_mode: TtsMode,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockHub {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockHub {
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn record(state: &HubState, method: &str, path: String, headers: &HeaderMap, body: &Bytes) {
    state.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path,
        authorization: header(headers, "authorization"),
        content_type: header(headers, "content-type"),
        body: serde_json::from_slice(body).ok(),
    });
}

async fn tts_get_url(State(state): State<HubState>, headers: HeaderMap, body: Bytes) -> Response {
    record(&state, "POST", "/api/tts_get_url".to_string(), &headers, &body);
    match state.tts_mode {
        TtsMode::Ok => Json(json!({
            "url": format!("http://{}/api/tts_proxy/speech.mp3", state.addr),
            "path": "/api/tts_proxy/speech.mp3",
        }))
        .into_response(),
        TtsMode::Fail => (StatusCode::INTERNAL_SERVER_ERROR, "tts platform unavailable").into_response(),
        TtsMode::NoUrl => Json(json!({ "path": "/api/tts_proxy/speech.mp3" })).into_response(),
        TtsMode::Corrupt => Json(json!({
            "url": format!("http://{}/api/tts_proxy/corrupt.mp3", state.addr),
        }))
        .into_response(),
    }
}

async fn tts_proxy(
    State(state): State<HubState>,
    Path(file): Path<String>,
    headers: HeaderMap,
) -> Response {
    record(&state, "GET", format!("/api/tts_proxy/{}", file), &headers, &Bytes::new());
    if file == "speech.mp3" {
        // ID3 tag followed by filler; enough for the mock decoder.
        (StatusCode::OK, b"ID3\x04\x00\x00\x00\x00\x00\x00mock-mpeg-frames".to_vec()).into_response()
    } else {
        (StatusCode::OK, b"<html>not audio</html>".to_vec()).into_response()
    }
}

async fn service(
    State(state): State<HubState>,
    Path((domain, service)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, "POST", format!("/api/services/{}/{}", domain, service), &headers, &body);
    if domain == "unknown" {
        (StatusCode::BAD_REQUEST, "Service not found.").into_response()
    } else {
        Json(json!([{ "entity_id": "switch.door", "state": "on" }])).into_response()
    }
}

async fn webhook(
    State(state): State<HubState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, "POST", format!("/api/webhook/{}", id), &headers, &body);
    StatusCode::OK.into_response()
}

/// Starts a mock hub on an ephemeral port.
pub async fn spawn_hub(tts_mode: TtsMode) -> MockHub {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let state = HubState {
        addr,
        tts_mode,
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/api/tts_get_url", post(tts_get_url))
        .route("/api/tts_proxy/{file}", get(tts_proxy))
        .route("/api/services/{domain}/{service}", post(service))
        .route("/api/webhook/{id}", post(webhook))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockHub { addr, requests }
}

/// Returns a URL on which nothing is listening.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

/// Writes an ffmpeg stand-in that accepts inputs starting with an ID3 tag and
/// emits a minimal RIFF/WAVE file; anything else fails with exit code 1.
pub fn mock_decoder(dir: &FsPath) -> PathBuf {
    let script = dir.join("mock_ffmpeg.sh");
    std::fs::write(
        &script,
        r#"#!/bin/sh
in=""
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -i) in="$2"; shift 2 ;;
    *) out="$1"; shift ;;
  esac
done
if [ "$(head -c 3 "$in")" != "ID3" ]; then
  echo "$in: Invalid data found when processing input" >&2
  exit 1
fi
printf 'RIFFxxxxWAVEfmt data' > "$out"
"#,
    )
    .unwrap();
    let mut perms = std::fs::metadata(&script).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&script, perms).unwrap();
    script
}

/// Starts a raw listener that answers every request with a 500 whose body is
/// cut short of its declared `Content-Length`, so reading the body fails.
pub async fn spawn_truncated_error_hub() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            let _ = stream
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\n\
                      content-type: text/plain\r\n\
                      content-length: 64\r\n\r\n\
                      partial",
                )
                .await;
            let _ = stream.shutdown().await;
        }
    });
    format!("http://{}/api", addr)
}

fn request_complete(request: &[u8]) -> bool {
    let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&request[..end]).to_ascii_lowercase();
    let length = head
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= end + 4 + length
}
