//! B3 trace context propagation.
//!
//! A request carries a trace context only when it has a non-empty
//! `x-b3-traceid`. In that case all four headers are forwarded together,
//! missing ones as empty values; otherwise none are.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
pub const X_B3_SPANID: HeaderName = HeaderName::from_static("x-b3-spanid");
pub const X_B3_SAMPLED: HeaderName = HeaderName::from_static("x-b3-sampled");
pub const X_B3_TRACEID: HeaderName = HeaderName::from_static("x-b3-traceid");

/// Trace identifiers copied from an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub request_id: HeaderValue,
    pub span_id: HeaderValue,
    pub sampled: HeaderValue,
    pub trace_id: HeaderValue,
}

impl TraceContext {
    /// Extract the context, or `None` when no trace id is present.
    pub fn extract(headers: &HeaderMap) -> Option<Self> {
        let trace_id = headers.get(&X_B3_TRACEID).filter(|v| !v.is_empty())?.clone();
        let get = |name: &HeaderName| {
            headers
                .get(name)
                .cloned()
                .unwrap_or_else(|| HeaderValue::from_static(""))
        };

        Some(Self {
            request_id: get(&X_REQUEST_ID),
            span_id: get(&X_B3_SPANID),
            sampled: get(&X_B3_SAMPLED),
            trace_id,
        })
    }

    /// Set all four headers on an outbound request, replacing existing values.
    pub fn inject(&self, headers: &mut HeaderMap) {
        headers.insert(X_REQUEST_ID, self.request_id.clone());
        headers.insert(X_B3_SPANID, self.span_id.clone());
        headers.insert(X_B3_SAMPLED, self.sampled.clone());
        headers.insert(X_B3_TRACEID, self.trace_id.clone());
    }
}
