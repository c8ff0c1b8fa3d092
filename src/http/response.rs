//! Response construction and error mapping.
//!
//! # Responsibilities
//! - Serialize diagnostic payloads as YAML text
//! - Map handler errors to HTTP responses
//! - Answer restricted routes hit with the wrong method
//!
//! # Design Decisions
//! - Every error kind becomes 500 with the error text as the body; the kind
//!   is kept for logs only
//! - Wrong method is 406, logged at debug

use std::error::Error as StdError;

use axum::{
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::store::StoreError;

/// Failures surfaced by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("blob {digest} not found")]
    NotFound { digest: String },

    #[error("{0}")]
    StorageWrite(String),

    #[error("{0}")]
    StorageRead(String),

    #[error("Backend not specified, set backend_url env var")]
    NoBackendConfigured,

    #[error("Backend request invalid: {0}")]
    BackendRequest(String),

    #[error("Backend call failed: {0}")]
    UpstreamUnreachable(String),

    #[error("Reading the backend response body failed: {0}")]
    UpstreamRead(String),

    #[error("{0}")]
    Serialization(String),

    #[error("Reading the request body failed: {0}")]
    BodyRead(String),

    #[error("{path}: {reason}")]
    UiTemplate { path: String, reason: String },
}

impl HandlerError {
    /// Stable name used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::BadRequest(_) => "bad_request",
            HandlerError::NotFound { .. } => "not_found",
            HandlerError::StorageWrite(_) => "storage_write",
            HandlerError::StorageRead(_) => "storage_read",
            HandlerError::NoBackendConfigured => "no_backend_configured",
            HandlerError::BackendRequest(_) => "backend_request",
            HandlerError::UpstreamUnreachable(_) => "upstream_unreachable",
            HandlerError::UpstreamRead(_) => "upstream_read",
            HandlerError::Serialization(_) => "serialization",
            HandlerError::BodyRead(_) => "body_read",
            HandlerError::UiTemplate { .. } => "ui_template",
        }
    }
}

impl From<StoreError> for HandlerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(digest) => HandlerError::NotFound { digest },
            e @ StoreError::Write { .. } => HandlerError::StorageWrite(e.to_string()),
            e @ StoreError::Read { .. } => HandlerError::StorageRead(e.to_string()),
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match &self {
            HandlerError::NotFound { digest } => {
                tracing::warn!(kind = self.kind(), digest = %digest, "Blob lookup missed");
            }
            _ => {
                tracing::error!(kind = self.kind(), error = %self, "Request failed");
            }
        }
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Render an error together with its sources, outermost first.
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(e) = source {
        let text = e.to_string();
        if !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = e.source();
    }
    out
}

/// Serialize `value` as a `text/plain` YAML document.
pub fn yaml<T: Serialize>(value: &T) -> Result<Response, HandlerError> {
    let body = serde_yaml::to_string(value).map_err(|e| HandlerError::Serialization(e.to_string()))?;
    Ok((
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )],
        body,
    )
        .into_response())
}

/// Method fallback for routes that accept a single method.
pub async fn not_acceptable(method: Method, uri: Uri) -> StatusCode {
    tracing::debug!(method = %method, path = %uri.path(), "Method not accepted");
    StatusCode::NOT_ACCEPTABLE
}

/// Router fallback for unknown paths.
pub async fn not_found(uri: Uri) -> StatusCode {
    tracing::debug!(path = %uri.path(), "No route matched");
    StatusCode::NOT_FOUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn store_errors_keep_their_kind() {
        let err: HandlerError = StoreError::NotFound("abc".into()).into();
        assert_eq!(err.kind(), "not_found");

        let err: HandlerError = StoreError::Write {
            digest: "abc".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert_eq!(err.kind(), "storage_write");
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn every_kind_is_a_500_with_text() {
        let response = HandlerError::NoBackendConfigured.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = HandlerError::NotFound { digest: "x".into() }.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_chain_includes_sources() {
        let inner = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        let outer = StoreError::Read {
            digest: "abc".into(),
            source: inner,
        };
        let text = error_chain(&outer);
        assert!(text.starts_with("reading blob abc failed"));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn yaml_is_plain_text() {
        let mut map = std::collections::BTreeMap::new();
        map.insert("version", "1.0.0");
        let response = yaml(&map).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
