//! Backend proxy.
//!
//! Forwards the request body to the configured upstream with a single POST
//! and answers 202 with whatever the upstream returned. The upstream status
//! code is not propagated.

use axum::{
    body::{Body, Bytes},
    extract::{Extension, State},
    http::{HeaderMap, Method, Request, StatusCode, Uri},
};

use crate::http::request::{read_body, request_id, ClientRequestId};
use crate::http::response::{error_chain, HandlerError};
use crate::http::server::AppState;
use crate::observability::trace_context::{TraceContext, X_B3_TRACEID};

/// `POST /backend`.
pub async fn backend(
    State(state): State<AppState>,
    Extension(client_request_id): Extension<ClientRequestId>,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, Bytes), HandlerError> {
    let body = read_body(body, state.config.security.body_limit()).await?;

    let url = state
        .config
        .backend
        .url
        .as_deref()
        .ok_or(HandlerError::NoBackendConfigured)?;

    // Trace headers go upstream as the client sent them, not as generated here.
    let mut inbound = headers.clone();
    client_request_id.restore(&mut inbound);

    let request = build_upstream_request(url, &inbound, body)?;
    let request_id = request_id(&headers);

    tracing::debug!(
        request_id = %request_id,
        backend = %url,
        traced = request.headers().contains_key(X_B3_TRACEID),
        "Forwarding to backend"
    );

    let response = state
        .client
        .request(request)
        .await
        .map_err(|e| HandlerError::UpstreamUnreachable(error_chain(&e)))?;

    let upstream_status = response.status();
    let body = axum::body::to_bytes(Body::new(response.into_body()), usize::MAX)
        .await
        .map_err(|e| HandlerError::UpstreamRead(error_chain(&e)))?;

    tracing::debug!(
        request_id = %request_id,
        backend = %url,
        upstream_status = %upstream_status,
        payload = %String::from_utf8_lossy(&body),
        "Payload received from backend"
    );

    Ok((StatusCode::ACCEPTED, body))
}

/// Build the outbound POST, carrying trace headers only when the inbound
/// request has a trace id.
pub fn build_upstream_request(
    url: &str,
    inbound: &HeaderMap,
    body: Bytes,
) -> Result<Request<Body>, HandlerError> {
    let uri: Uri = url
        .parse()
        .map_err(|e: axum::http::uri::InvalidUri| HandlerError::BackendRequest(e.to_string()))?;

    let mut request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::from(body))
        .map_err(|e| HandlerError::BackendRequest(e.to_string()))?;

    if let Some(ctx) = TraceContext::extract(inbound) {
        ctx.inject(request.headers_mut());
    }

    Ok(request)
}
