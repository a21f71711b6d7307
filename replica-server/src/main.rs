use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Json;
use lb_test_util::{ErrorResponse, HealthResponse};

mod system;

const DEFAULT_PORT: u16 = 8080;

/// Identity of this replica, fixed at startup.
#[derive(Clone)]
struct ReplicaInfo {
    project: String,
    container_id: String,
}

fn main() {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();
    let _g = rt.enter();
    if let Err(err) = rt.block_on(run_server()) {
        eprintln!("replica server failed: {err:#}");
        std::process::exit(1);
    }
}

async fn run_server() -> anyhow::Result<()> {
    let port = match env::var("PORT") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
        Err(_) => DEFAULT_PORT,
    };
    let project = env::var("PROJECT_NAME").unwrap_or_else(|_| "Unknown-Project".to_string());
    let container_id = system::hostname();

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    println!("{project} server listening on port {port}, container ID: {container_id}");

    let state = ReplicaInfo {
        project,
        container_id,
    };
    let router = axum::Router::new()
        .route("/", get(get_health))
        .route("/api", get(get_health))
        .fallback(not_found)
        .with_state(state);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server terminated")
}

async fn get_health(
    State(info): State<ReplicaInfo>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Json<HealthResponse> {
    Json(health_payload(&info, client_ip(&headers, peer)))
}

async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    println!("Request not found");
    (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found()))
}

fn health_payload(info: &ReplicaInfo, client_ip: String) -> HealthResponse {
    HealthResponse {
        status: "success".to_string(),
        project: info.project.clone(),
        message: "Infrastructure health check successful!".to_string(),
        container_id: info.container_id.clone(),
        client_ip,
        system_metrics: system::snapshot(),
    }
}

/// Behind the proxy the peer address is the proxy itself, so the forwarded
/// header wins when present.
fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| peer.ip().to_string())
}
