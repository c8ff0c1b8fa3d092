//! Orchestration probes and the readiness toggle.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;

fn probe(up: bool) -> Response {
    if up {
        (StatusCode::OK, "OK").into_response()
    } else {
        StatusCode::SERVICE_UNAVAILABLE.into_response()
    }
}

/// `GET /healthz`
pub async fn healthz(State(state): State<AppState>) -> Response {
    probe(state.probes.is_live())
}

/// `GET /readyz`
pub async fn readyz(State(state): State<AppState>) -> Response {
    probe(state.probes.is_ready())
}

/// `POST /readyz/enable`
pub async fn enable(State(state): State<AppState>) -> StatusCode {
    state.probes.set_ready(true);
    StatusCode::OK
}

/// `POST /readyz/disable`
pub async fn disable(State(state): State<AppState>) -> StatusCode {
    state.probes.set_ready(false);
    StatusCode::OK
}
