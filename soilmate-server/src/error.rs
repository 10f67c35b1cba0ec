//! Server error types

use thiserror::Error;

use crate::integrations::IntegrationError;

/// Errors that can occur in the soilmate server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Outbound integrations could not be set up
    #[error("integration setup failed: {0}")]
    Integration(#[from] IntegrationError),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}
