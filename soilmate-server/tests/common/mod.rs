//! Shared test utilities for soilmate-server integration tests

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use soilmate_server::{AppState, Integrations, IntegrationsConfig, ServerConfig, SoilmateServer};
use tokio::net::TcpListener;

/// A request received by the fake upstream
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Captured {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Captured {
    #[allow(dead_code)]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Fake third-party service that records requests and answers with a fixed reply
#[derive(Clone)]
pub struct Upstream {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<Captured>>>,
}

impl Upstream {
    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    #[allow(dead_code)]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    #[allow(dead_code)]
    pub fn captured(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct UpstreamState {
    requests: Arc<Mutex<Vec<Captured>>>,
    status: StatusCode,
    reply: &'static str,
}

/// Spawn a fake upstream that answers every POST with `status` and `reply`
#[allow(dead_code)]
pub async fn spawn_upstream(status: StatusCode, reply: &'static str) -> Upstream {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = UpstreamState {
        requests: Arc::clone(&requests),
        status,
        reply,
    };

    async fn record(
        State(state): State<UpstreamState>,
        uri: axum::http::Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> (StatusCode, &'static str) {
        state.requests.lock().unwrap().push(Captured {
            path: uri.path().to_string(),
            headers,
            body,
        });
        (state.status, state.reply)
    }

    let router = Router::new()
        .route("/*path", post(record))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Upstream { addr, requests }
}

/// Creates a test server with every integration disabled
#[allow(dead_code)]
pub async fn create_test_server() -> (Arc<AppState>, SocketAddr) {
    let state = Arc::new(AppState::new_for_testing());
    let addr = spawn_server(SoilmateServer::with_state(
        ServerConfig::default(),
        Arc::clone(&state),
    ))
    .await;
    (state, addr)
}

/// Creates a test server with the given integrations
#[allow(dead_code)]
pub async fn create_test_server_with_integrations(
    config: IntegrationsConfig,
) -> (Arc<AppState>, SocketAddr) {
    let integrations = Integrations::from_config(&config).unwrap();
    let state = Arc::new(AppState::new(integrations));
    let addr = spawn_server(SoilmateServer::with_state(
        ServerConfig::default(),
        Arc::clone(&state),
    ))
    .await;
    (state, addr)
}

/// Spawns server in background task, returns bound address
async fn spawn_server(server: SoilmateServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run_with_listener(listener).await;
    });

    // Brief delay to ensure server is accepting connections
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    addr
}
