//! Attribution fields and records

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named piece of attribution context
///
/// Campaign fields come from the landing URL's query string. The two touch
/// fields describe the very first visit and are never overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionField {
    UtmSource,
    UtmMedium,
    UtmCampaign,
    UtmTerm,
    UtmContent,
    /// Google Ads click id
    Gclid,
    /// Meta click id
    Fbclid,
    /// Microsoft Ads click id
    Msclkid,
    /// Display & Video 360 click id
    Dclid,
    /// TikTok click id
    Ttclid,
    InitialReferrer,
    LandingPage,
}

impl AttributionField {
    /// Query keys recognized on the landing URL
    pub const CAMPAIGN: [AttributionField; 10] = [
        Self::UtmSource,
        Self::UtmMedium,
        Self::UtmCampaign,
        Self::UtmTerm,
        Self::UtmContent,
        Self::Gclid,
        Self::Fbclid,
        Self::Msclkid,
        Self::Dclid,
        Self::Ttclid,
    ];

    /// Every field, campaign fields first
    pub const ALL: [AttributionField; 12] = [
        Self::UtmSource,
        Self::UtmMedium,
        Self::UtmCampaign,
        Self::UtmTerm,
        Self::UtmContent,
        Self::Gclid,
        Self::Fbclid,
        Self::Msclkid,
        Self::Dclid,
        Self::Ttclid,
        Self::InitialReferrer,
        Self::LandingPage,
    ];

    /// Query parameter and cookie name
    pub fn key(self) -> &'static str {
        match self {
            Self::UtmSource => "utm_source",
            Self::UtmMedium => "utm_medium",
            Self::UtmCampaign => "utm_campaign",
            Self::UtmTerm => "utm_term",
            Self::UtmContent => "utm_content",
            Self::Gclid => "gclid",
            Self::Fbclid => "fbclid",
            Self::Msclkid => "msclkid",
            Self::Dclid => "dclid",
            Self::Ttclid => "ttclid",
            Self::InitialReferrer => "initial_referrer",
            Self::LandingPage => "landing_page",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Whether the field is read from the landing URL
    pub fn is_campaign(self) -> bool {
        !matches!(self, Self::InitialReferrer | Self::LandingPage)
    }
}

impl fmt::Display for AttributionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Attribution values keyed by field; empty values are never held
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributionRecord(BTreeMap<AttributionField, String>);

impl AttributionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the recognized campaign parameters from a query string
    ///
    /// Accepts the query with or without its leading `?`. Only the first
    /// occurrence of a key counts, and empty values are dropped.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut record = Self::new();
        let mut seen = HashSet::new();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let Some(field) = AttributionField::from_key(&key) else {
                continue;
            };
            if !field.is_campaign() || !seen.insert(field) {
                continue;
            }
            record.set(field, value);
        }

        record
    }

    pub fn get(&self, field: AttributionField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: AttributionField) -> bool {
        self.0.contains_key(&field)
    }

    /// Store a value; empty values are ignored. Returns whether it was stored.
    pub fn set(&mut self, field: AttributionField, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() {
            return false;
        }
        self.0.insert(field, value);
        true
    }

    pub fn with(mut self, field: AttributionField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Overwrite fields with every value held by `other`
    pub fn overlay(&mut self, other: &AttributionRecord) {
        for (field, value) in other.iter() {
            self.0.insert(field, value.to_string());
        }
    }

    /// Whether any campaign field is held
    pub fn has_campaign(&self) -> bool {
        self.0.keys().any(|field| field.is_campaign())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributionField, &str)> {
        self.0.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Values keyed by their query/cookie name, for forwarding to collectors
    pub fn to_key_map(&self) -> BTreeMap<&'static str, String> {
        self.0
            .iter()
            .map(|(field, value)| (field.key(), value.clone()))
            .collect()
    }
}

impl FromIterator<(AttributionField, String)> for AttributionRecord {
    fn from_iter<T: IntoIterator<Item = (AttributionField, String)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.set(field, value);
        }
        record
    }
}
