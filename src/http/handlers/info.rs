//! Service information and chaos hooks.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::Path;

use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use crate::http::request::request_id;
use crate::http::response::{yaml, HandlerError};
use crate::http::server::AppState;
use crate::version::{GIT_COMMIT, VERSION};

/// Runtime description served on `/`.
#[derive(Debug, Serialize)]
pub struct RuntimeInfo {
    pub hostname: String,
    pub version: &'static str,
    pub revision: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
    pub num_cpu: usize,
}

impl RuntimeInfo {
    pub fn current() -> Self {
        Self {
            hostname: hostname(),
            version: VERSION,
            revision: GIT_COMMIT,
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            num_cpu: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

fn hostname() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .filter(|h| !h.is_empty())
        .or_else(|| {
            std::fs::read_to_string("/etc/hostname")
                .ok()
                .map(|h| h.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn is_browser(headers: &HeaderMap) -> bool {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ua| ua.contains("Mozilla"))
}

/// `GET /`: the UI page for browsers, YAML runtime info for everything else.
pub async fn index(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, HandlerError> {
    tracing::debug!(request_id = %request_id(&headers), peer = %peer, "Index requested");

    if is_browser(&headers) {
        let page = Path::new(&state.config.ui.path).join("vue.html");
        let html = tokio::fs::read_to_string(&page)
            .await
            .map_err(|e| HandlerError::UiTemplate {
                path: page.display().to_string(),
                reason: e.to_string(),
            })?;
        return Ok(Html(html).into_response());
    }

    yaml(&RuntimeInfo::current())
}

/// `GET /version`
pub async fn version() -> Result<Response, HandlerError> {
    let info = BTreeMap::from([("commit", GIT_COMMIT), ("version", VERSION)]);
    yaml(&info)
}

/// `/error`: always fails.
pub async fn error() -> (StatusCode, &'static str) {
    tracing::error!("Error triggered");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

/// `/panic`: terminate the process.
pub async fn panic() -> StatusCode {
    tracing::error!("Kill switch triggered");
    std::process::exit(1)
}
