//! Watched configuration files.

use axum::{extract::State, response::Response};

use crate::http::response::{yaml, HandlerError};
use crate::http::server::AppState;

/// `GET /configs`: YAML map of file name to content. Empty when no watcher
/// is attached.
pub async fn configs(State(state): State<AppState>) -> Result<Response, HandlerError> {
    let files = state
        .configs
        .as_ref()
        .map(|provider| provider.snapshot())
        .unwrap_or_default();

    yaml(&files)
}
