//! Attribution middleware for axum
//!
//! Page navigations (GET outside `/api/`) run the attribution tracker
//! against the request's cookies. Every other request only reads the stored
//! record. Either way the record is attached to the request extensions.
//! Tracked cookies are only written back when the page was actually served,
//! so missing pages and stray asset requests never claim the landing page.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, header},
    middleware::Next,
    response::Response,
};
use soilmate_core::{
    AttributionRecord, CookieJar, Visit, attribution::load_record, track_visit,
};

use crate::AppState;

/// Build a cookie jar from the request's `Cookie` header
pub fn cookie_jar(headers: &HeaderMap, secure: bool) -> CookieJar {
    let cookies = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok());
    CookieJar::from_header(cookies, secure)
}

/// Append `Set-Cookie` headers for every write made to the jar
pub fn append_set_cookies(jar: &CookieJar, headers: &mut HeaderMap) {
    for cookie in jar.set_cookie_headers() {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("Skipping invalid Set-Cookie value: {}", e),
        }
    }
}

fn is_page_visit(request: &Request) -> bool {
    request.method() == Method::GET && !request.uri().path().starts_with("/api/")
}

/// Attribution middleware function
pub async fn attribution_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut jar = cookie_jar(request.headers(), state.secure_cookies);

    let record: AttributionRecord = if is_page_visit(&request) {
        let referrer = request
            .headers()
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");
        let uri = request.uri();
        let visit = Visit::new(uri.path(), uri.query().unwrap_or(""), referrer);
        track_visit(&mut jar, &visit).record
    } else {
        load_record(&jar)
    };

    request.extensions_mut().insert(record);

    let mut response = next.run(request).await;
    if response.status().is_success() {
        append_set_cookies(&jar, response.headers_mut());
    }
    response
}
