//! Visit attribution
//!
//! Captures which campaign brought a visitor (UTM parameters and ad click
//! ids), where they came from, and where they landed, and keeps it in
//! site-wide storage for 90 days so later form submissions can carry it.

mod record;
mod store;
mod tracker;

use std::time::Duration;

pub use record::{AttributionField, AttributionRecord};
pub use store::{
    AttributionStore, CookieJar, MemoryStore, PendingCookie, load_record, persist_record,
};
pub use tracker::{AttributionUpdate, Visit, track_visit, update_attribution};

/// How long each stored field lives after its last write
pub const ATTRIBUTION_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 90);
