//! Request handling helpers.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Remember the request ID as the client sent it, before generation
//! - Echo the request ID back on the response
//! - Read request bodies under the configured size limit
//!
//! # Design Decisions
//! - Request ID added as early as possible so every span and log line has it

use axum::body::{Body, Bytes};
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::http::response::HandlerError;
use crate::observability::trace_context::X_REQUEST_ID;

/// The inbound `x-request-id` exactly as the client sent it, if at all.
#[derive(Debug, Clone, Default)]
pub struct ClientRequestId(pub Option<HeaderValue>);

impl ClientRequestId {
    /// Put the client's value back into `headers`, dropping a generated one.
    pub fn restore(&self, headers: &mut HeaderMap) {
        match &self.0 {
            Some(value) => {
                headers.insert(X_REQUEST_ID, value.clone());
            }
            None => {
                headers.remove(&X_REQUEST_ID);
            }
        }
    }
}

/// Middleware recording [`ClientRequestId`]. Must run outside
/// [`set_request_id_layer`].
pub async fn capture_client_request_id(mut request: Request, next: Next) -> Response {
    let sent = request.headers().get(&X_REQUEST_ID).cloned();
    request.extensions_mut().insert(ClientRequestId(sent));
    next.run(request).await
}

/// Layer assigning `x-request-id` to requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer copying `x-request-id` from the request onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// The request ID, or `"unknown"` when absent or not valid UTF-8.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Buffer the whole body, failing if it exceeds `limit` bytes.
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes, HandlerError> {
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| HandlerError::BodyRead(crate::http::response::error_chain(&e)))
}
