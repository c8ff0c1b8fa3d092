//! End-to-end tests for the `/backend` proxy.

use axum::http::StatusCode;

mod common;

#[tokio::test]
async fn missing_backend_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let server = common::start_server(common::config(dir.path())).await;

    let res = common::client()
        .post(server.url("/backend"))
        .body("payload")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.text().await.unwrap().contains("backend_url"));
}

#[tokio::test]
async fn forwards_body_and_returns_upstream_body() {
    let (backend_addr, seen) = common::start_recording_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::config(dir.path());
    config.backend.url = Some(format!("http://{}/echo", backend_addr));
    let server = common::start_server(config).await;

    let res = common::client()
        .post(server.url("/backend"))
        .body("ping through")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::ACCEPTED);
    assert_eq!(res.text().await.unwrap(), "ping through");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    for name in ["x-request-id", "x-b3-spanid", "x-b3-sampled", "x-b3-traceid"] {
        assert!(!seen[0].contains_key(name), "{} must not be forwarded", name);
    }
}

#[tokio::test]
async fn propagates_trace_headers_when_traced() {
    let (backend_addr, seen) = common::start_recording_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::config(dir.path());
    config.backend.url = Some(format!("http://{}/echo", backend_addr));
    let server = common::start_server(config).await;

    let res = common::client()
        .post(server.url("/backend"))
        .header("x-request-id", "req-7")
        .header("x-b3-spanid", "span-7")
        .header("x-b3-sampled", "1")
        .header("x-b3-traceid", "trace-7")
        .header("x-unrelated", "dropped")
        .body("traced")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::ACCEPTED);
    assert_eq!(res.text().await.unwrap(), "traced");

    let seen = seen.lock().unwrap();
    let headers = &seen[0];
    assert_eq!(headers["x-request-id"], "req-7");
    assert_eq!(headers["x-b3-spanid"], "span-7");
    assert_eq!(headers["x-b3-sampled"], "1");
    assert_eq!(headers["x-b3-traceid"], "trace-7");
    assert!(!headers.contains_key("x-unrelated"));
}

#[tokio::test]
async fn missing_request_id_is_forwarded_empty_when_traced() {
    let (backend_addr, seen) = common::start_recording_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::config(dir.path());
    config.backend.url = Some(format!("http://{}/echo", backend_addr));
    let server = common::start_server(config).await;

    let res = common::client()
        .post(server.url("/backend"))
        .header("x-b3-traceid", "trace-8")
        .body("traced")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::ACCEPTED);
    assert!(res.headers().contains_key("x-request-id"));

    let seen = seen.lock().unwrap();
    let headers = &seen[0];
    assert_eq!(headers["x-b3-traceid"], "trace-8");
    assert_eq!(headers["x-request-id"], "");
    assert_eq!(headers["x-b3-spanid"], "");
    assert_eq!(headers["x-b3-sampled"], "");
}

#[tokio::test]
async fn upstream_status_is_not_propagated() {
    let backend_addr = common::start_fixed_backend(503, "upstream is sad").await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::config(dir.path());
    config.backend.url = Some(format!("http://{}/", backend_addr));
    let server = common::start_server(config).await;

    let res = common::client()
        .post(server.url("/backend"))
        .body("anything")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::ACCEPTED);
    assert_eq!(res.text().await.unwrap(), "upstream is sad");
}

#[tokio::test]
async fn unreachable_upstream_is_a_500_with_transport_error() {
    let backend_addr = common::closed_port().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::config(dir.path());
    config.backend.url = Some(format!("http://{}/", backend_addr));
    let server = common::start_server(config).await;

    let res = common::client()
        .post(server.url("/backend"))
        .body("anything")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.text().await.unwrap().starts_with("Backend call failed"));
}

#[tokio::test]
async fn truncated_upstream_body_is_a_500() {
    let backend_addr = common::start_truncating_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::config(dir.path());
    config.backend.url = Some(format!("http://{}/", backend_addr));
    let server = common::start_server(config).await;

    let res = common::client()
        .post(server.url("/backend"))
        .body("anything")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res
        .text()
        .await
        .unwrap()
        .starts_with("Reading the backend response body failed"));
}
