#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use domain::fetch::FetchOutcome;
use lunar_tiles_adapters::outgoing::http_reqwest::upstream_reqwest::{
    ReqwestUpstreamAdapter, ReqwestUpstreamConfig,
};
use lunar_tiles_application::ports::outgoing::upstream::UpstreamTilePort;
use tokio::net::TcpListener;

const TILE_BODY: &[u8] = b"\xFF\xD8\xFFfake-jpeg";

async fn tile() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/jpeg")], TILE_BODY)
}

async fn identity(headers: HeaderMap) -> impl IntoResponse {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let referer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if user_agent.starts_with("Mozilla/5.0") && referer == "https://trek.nasa.gov/" {
        ([(header::CONTENT_TYPE, "image/png")], TILE_BODY).into_response()
    } else {
        StatusCode::FORBIDDEN.into_response()
    }
}

async fn html() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html")],
        "<html>maintenance</html>",
    )
}

async fn empty_image() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/jpeg")], Vec::<u8>::new())
}

async fn broken() -> impl IntoResponse {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn slow() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(5)).await;
    ([(header::CONTENT_TYPE, "image/jpeg")], TILE_BODY)
}

async fn spawn_upstream() -> SocketAddr {
    let router = Router::new()
        .route("/tile.jpg", get(tile))
        .route("/identity.png", get(identity))
        .route("/html.jpg", get(html))
        .route("/empty.jpg", get(empty_image))
        .route("/broken.jpg", get(broken))
        .route("/slow.jpg", get(slow));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    address
}

fn adapter(timeout: Duration) -> ReqwestUpstreamAdapter {
    ReqwestUpstreamAdapter::new(&ReqwestUpstreamConfig {
        timeout,
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
        referer: "https://trek.nasa.gov/".to_string(),
    })
    .unwrap()
}

#[tokio::test]
async fn image_response_is_success() {
    let address = spawn_upstream().await;

    let outcome = adapter(Duration::from_secs(5))
        .fetch(&format!("http://{address}/tile.jpg"))
        .await;

    assert_eq!(outcome, FetchOutcome::Success(TILE_BODY.to_vec()));
}

#[tokio::test]
async fn browser_identity_headers_are_sent() {
    let address = spawn_upstream().await;

    let outcome = adapter(Duration::from_secs(5))
        .fetch(&format!("http://{address}/identity.png"))
        .await;

    assert!(outcome.is_success(), "{outcome}");
}

#[tokio::test]
async fn missing_tile_is_not_available() {
    let address = spawn_upstream().await;

    let outcome = adapter(Duration::from_secs(5))
        .fetch(&format!("http://{address}/nope.jpg"))
        .await;

    assert!(outcome.is_not_available());
}

#[tokio::test]
async fn server_error_keeps_status_code() {
    let address = spawn_upstream().await;

    let outcome = adapter(Duration::from_secs(5))
        .fetch(&format!("http://{address}/broken.jpg"))
        .await;

    assert_eq!(outcome, FetchOutcome::UpstreamError(500));
}

#[tokio::test]
async fn non_image_and_empty_bodies_are_invalid_content() {
    let address = spawn_upstream().await;
    let upstream = adapter(Duration::from_secs(5));

    let html = upstream.fetch(&format!("http://{address}/html.jpg")).await;
    let empty = upstream.fetch(&format!("http://{address}/empty.jpg")).await;

    assert!(matches!(html, FetchOutcome::InvalidContent(reason) if reason.contains("text/html")));
    assert!(matches!(empty, FetchOutcome::InvalidContent(_)));
}

#[tokio::test]
async fn slow_upstream_times_out_as_network_error() {
    let address = spawn_upstream().await;

    let outcome = adapter(Duration::from_millis(200))
        .fetch(&format!("http://{address}/slow.jpg"))
        .await;

    assert!(matches!(outcome, FetchOutcome::NetworkError(reason) if reason.contains("timed out")));
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let outcome = adapter(Duration::from_secs(5))
        .fetch(&format!("http://{address}/tile.jpg"))
        .await;

    assert!(matches!(outcome, FetchOutcome::NetworkError(_)));
}
