//! Simulated work.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::http::request::{read_body, request_id};
use crate::http::response::HandlerError;
use crate::http::server::AppState;

/// Body of `POST /job`.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JobRequest {
    /// Seconds to sleep before answering. Absent or null means zero.
    pub wait: Option<i64>,
}

impl JobRequest {
    pub fn delay(&self) -> Option<Duration> {
        match self.wait {
            Some(secs) if secs > 0 => Some(Duration::from_secs(secs as u64)),
            _ => None,
        }
    }
}

/// Parse a job body. It must be a JSON object; a `null` document is treated
/// as an empty job.
pub fn parse_job(body: &[u8]) -> Result<JobRequest, HandlerError> {
    let bad_request = |e: serde_json::Error| HandlerError::BadRequest(e.to_string());

    match serde_json::from_slice::<Option<Map<String, Value>>>(body).map_err(bad_request)? {
        Some(fields) => JobRequest::deserialize(Value::Object(fields)).map_err(bad_request),
        None => Ok(JobRequest::default()),
    }
}

/// `POST /job`: sleep `wait` seconds, then answer 202 "Job done".
pub async fn job(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, &'static str), HandlerError> {
    let body = read_body(body, state.config.security.body_limit()).await?;

    tracing::debug!(
        request_id = %request_id(&headers),
        peer = %peer,
        payload = %String::from_utf8_lossy(&body),
        "Payload received"
    );

    let job = parse_job(&body)?;
    if let Some(delay) = job.delay() {
        tracing::debug!(wait_secs = delay.as_secs(), "Simulating work");
        tokio::time::sleep(delay).await;
    }

    Ok((StatusCode::ACCEPTED, "Job done"))
}
