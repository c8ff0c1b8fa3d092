//! Echo handlers.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};

use crate::http::request::{read_body, request_id};
use crate::http::response::{yaml, HandlerError};
use crate::http::server::AppState;
use crate::store;

/// `POST /echo`: return the body unchanged with 202.
pub async fn echo(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, Bytes), HandlerError> {
    let body = read_body(body, state.config.security.body_limit()).await?;

    tracing::debug!(
        request_id = %request_id(&headers),
        peer = %peer,
        digest = %store::digest(&body),
        bytes = body.len(),
        "Payload received"
    );

    Ok((StatusCode::ACCEPTED, body))
}

/// `/echo/headers`: YAML map of header name to every value sent under it.
pub async fn echo_headers(headers: HeaderMap) -> Result<Response, HandlerError> {
    yaml(&header_map(&headers))
}

fn header_map(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        map.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}
