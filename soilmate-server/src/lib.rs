//! soilmate-server - HTTP server for the Soilmate quiz
//!
//! Serves the quiz questions and plant catalog, matches answers to plants,
//! keeps visit attribution in cookies, and relays matches and leads to the
//! configured outside services.

mod error;
pub mod http;
pub mod integrations;
pub mod middleware;
mod state;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub use error::ServerError;
pub use http::create_router;
pub use integrations::{EmailService, Integrations, IntegrationsConfig};
pub use state::AppState;

/// The main soilmate server
pub struct SoilmateServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl SoilmateServer {
    /// Create a server whose integrations are built from configuration
    pub fn new(config: ServerConfig, integrations: &IntegrationsConfig) -> Result<Self, ServerError> {
        let integrations = Integrations::from_config(integrations)?;
        let state = AppState::new(integrations).with_secure_cookies(config.secure_cookies);
        Ok(Self {
            config,
            state: Arc::new(state),
        })
    }

    /// Create a server with custom state (for testing)
    pub fn with_state(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the shared application state
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Run the server, binding to the configured address
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: addr.clone(),
                source: e,
            })?;

        tracing::info!("soilmate server listening on {}", addr);

        self.run_with_listener(listener).await
    }

    /// Run the server on an already-bound listener
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<(), ServerError> {
        let router = create_router(self.state);
        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }
}

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7460;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Mark attribution cookies `Secure`; set when served over https
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            secure_cookies: false,
        }
    }
}

impl ServerConfig {
    /// Create a new server config
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Get the address string for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
