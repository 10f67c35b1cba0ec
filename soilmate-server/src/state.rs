//! Shared application state for the soilmate server

use chrono::{DateTime, Utc};
use soilmate_core::Matcher;

use crate::integrations::Integrations;

/// Shared application state accessible by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Matches answers against the plant catalog
    pub matcher: Matcher,
    /// Outbound integrations
    pub integrations: Integrations,
    /// Mark attribution cookies `Secure`
    pub secure_cookies: bool,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state with the standard catalog
    pub fn new(integrations: Integrations) -> Self {
        Self {
            matcher: Matcher::default(),
            integrations,
            secure_cookies: false,
            started_at: Utc::now(),
        }
    }

    /// State with every integration disabled (for testing)
    pub fn new_for_testing() -> Self {
        Self::new(Integrations::disabled())
    }

    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
