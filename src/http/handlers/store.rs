//! Content store handlers.

use std::net::SocketAddr;

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
};

use crate::http::request::{read_body, request_id};
use crate::http::response::HandlerError;
use crate::http::server::AppState;

/// `POST /write`: store the body, answer with its digest.
pub async fn write(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, String), HandlerError> {
    let body = read_body(body, state.config.security.body_limit()).await?;
    let digest = state.store.put(&body).await?;

    tracing::debug!(
        request_id = %request_id(&headers),
        peer = %peer,
        digest = %digest,
        bytes = body.len(),
        "Write command received"
    );

    Ok((StatusCode::ACCEPTED, digest))
}

/// `POST /read`: the body is a digest, answer with the stored bytes.
pub async fn read(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, Bytes), HandlerError> {
    let body = read_body(body, state.config.security.body_limit()).await?;
    let digest = String::from_utf8_lossy(&body);
    let digest = digest.trim();

    let content = state.store.get(digest).await?;

    tracing::debug!(
        request_id = %request_id(&headers),
        peer = %peer,
        digest = %digest,
        bytes = content.len(),
        "Read command received"
    );

    Ok((StatusCode::ACCEPTED, Bytes::from(content)))
}
