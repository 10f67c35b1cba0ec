//! Once-per-visit attribution update
//!
//! Campaign fields follow the latest campaign: values on the landing URL
//! replace stored ones key by key. The initial referrer and landing page
//! follow the first touch: once stored they are never replaced.

use tracing::debug;

use super::ATTRIBUTION_MAX_AGE;
use super::record::{AttributionField, AttributionRecord};
use super::store::{AttributionStore, load_record, persist_record};

/// What the tracker sees of a page visit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visit<'a> {
    /// Query string, with or without the leading `?`
    pub query: &'a str,
    pub path: &'a str,
    /// Incoming referrer; empty when the browser sent none
    pub referrer: &'a str,
}

impl<'a> Visit<'a> {
    pub fn new(path: &'a str, query: &'a str, referrer: &'a str) -> Self {
        Self {
            query,
            path,
            referrer,
        }
    }

    /// Path plus query string, as the page was first reached
    pub fn landing_page(&self) -> String {
        let query = self.query.strip_prefix('?').unwrap_or(self.query);
        if query.is_empty() {
            self.path.to_string()
        } else {
            format!("{}?{}", self.path, query)
        }
    }
}

/// Result of merging a visit into stored attribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionUpdate {
    pub record: AttributionRecord,
    /// Whether the merged record should be written back
    pub should_persist: bool,
}

/// Merge a visit into the stored record without touching storage
pub fn update_attribution(visit: &Visit<'_>, stored: &AttributionRecord) -> AttributionUpdate {
    let from_url = AttributionRecord::from_query(visit.query);
    let url_has_campaign = !from_url.is_empty();

    let mut record = stored.clone();
    if url_has_campaign {
        record.overlay(&from_url);
    }

    let missing_referrer = !stored.contains(AttributionField::InitialReferrer);
    let missing_landing_page = !stored.contains(AttributionField::LandingPage);

    if missing_referrer {
        record.set(AttributionField::InitialReferrer, visit.referrer);
    }
    if missing_landing_page {
        record.set(AttributionField::LandingPage, visit.landing_page());
    }

    let should_persist =
        url_has_campaign || stored.is_empty() || missing_referrer || missing_landing_page;

    AttributionUpdate {
        record,
        should_persist,
    }
}

/// Load, merge and, when something changed, persist attribution for a visit
pub fn track_visit<S: AttributionStore + ?Sized>(
    store: &mut S,
    visit: &Visit<'_>,
) -> AttributionUpdate {
    let stored = load_record(store);
    let update = update_attribution(visit, &stored);

    if update.should_persist {
        persist_record(store, &update.record, ATTRIBUTION_MAX_AGE);
        debug!(
            path = visit.path,
            fields = update.record.len(),
            "attribution persisted"
        );
    }

    update
}
