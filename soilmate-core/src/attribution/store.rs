//! Persistent storage for attribution fields
//!
//! Each field is stored as its own entry with its own expiry, the way a
//! browser keeps one cookie per field. The tracker only talks to the
//! [`AttributionStore`] trait; [`CookieJar`] backs it with HTTP cookie
//! headers and [`MemoryStore`] keeps entries in a map.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::record::{AttributionField, AttributionRecord};

/// Key-value storage with per-entry expiry
pub trait AttributionStore {
    /// Current value for a key, if present and not expired
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value, starting a fresh expiry window
    fn set(&mut self, key: &str, value: &str, max_age: Duration);
}

/// Read every attribution field currently held by a store
pub fn load_record<S: AttributionStore + ?Sized>(store: &S) -> AttributionRecord {
    AttributionField::ALL
        .into_iter()
        .filter_map(|field| store.get(field.key()).map(|value| (field, value)))
        .collect()
}

/// Write every field of a record, refreshing each entry's expiry
pub fn persist_record<S: AttributionStore + ?Sized>(
    store: &mut S,
    record: &AttributionRecord,
    max_age: Duration,
) {
    for (field, value) in record.iter() {
        store.set(field.key(), value, max_age);
    }
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-memory store that also counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, MemoryEntry>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls made so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// When the entry for a key expires
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|entry| entry.expires_at)
    }

    /// Seed an entry that expires at a given time, without counting a write
    pub fn insert_expiring(&mut self, key: &str, value: &str, expires_at: DateTime<Utc>) {
        self.entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at,
            },
        );
    }
}

impl AttributionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.value.clone())
    }

    fn set(&mut self, key: &str, value: &str, max_age: Duration) {
        let max_age = chrono::Duration::from_std(max_age).unwrap_or(chrono::Duration::MAX);
        let expires_at = Utc::now()
            .checked_add_signed(max_age)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.insert_expiring(key, value, expires_at);
        self.writes += 1;
    }
}

/// A cookie write waiting to be sent back to the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCookie {
    pub name: String,
    pub value: String,
    pub max_age: Duration,
}

/// Cookies of one request, plus the writes its response should carry
///
/// Cookies are site-wide (`Path=/`), `SameSite=Lax`, and `Secure` when the
/// site is served over https. Values are percent-encoded on the wire.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    incoming: HashMap<String, String>,
    pending: Vec<PendingCookie>,
    secure: bool,
}

impl CookieJar {
    /// Parse a `Cookie` request header (`a=1; b=2`)
    pub fn from_header(header: Option<&str>, secure: bool) -> Self {
        let mut incoming = HashMap::new();

        for pair in header.unwrap_or_default().split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            let value = urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string());
            incoming.entry(name.to_string()).or_insert(value);
        }

        Self {
            incoming,
            pending: Vec::new(),
            secure,
        }
    }

    pub fn pending(&self) -> &[PendingCookie] {
        &self.pending
    }

    /// Render pending writes as `Set-Cookie` header values
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.pending
            .iter()
            .map(|cookie| {
                let mut header = format!(
                    "{}={}; Path=/; Max-Age={}; SameSite=Lax",
                    cookie.name,
                    urlencoding::encode(&cookie.value),
                    cookie.max_age.as_secs()
                );
                if self.secure {
                    header.push_str("; Secure");
                }
                header
            })
            .collect()
    }
}

impl AttributionStore for CookieJar {
    fn get(&self, key: &str) -> Option<String> {
        self.pending
            .iter()
            .rev()
            .find(|cookie| cookie.name == key)
            .map(|cookie| cookie.value.clone())
            .or_else(|| self.incoming.get(key).cloned())
            .filter(|value| !value.is_empty())
    }

    fn set(&mut self, key: &str, value: &str, max_age: Duration) {
        self.pending.push(PendingCookie {
            name: key.to_string(),
            value: value.to_string(),
            max_age,
        });
    }
}
