//! Landing page
//!
//! The one page the server renders itself. Visits to it are the page
//! navigations the attribution middleware records.

use axum::{
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Soilmate - Find Your Perfect Plant Companion | Ekondo</title>
</head>
<body>
<main>
<h1>Find Your Soilmate</h1>
<p>The plant that grows with you. Discover your perfect green companion through our fun personality quiz.</p>
<ol>
<li>Take our fun 5-question personality quiz</li>
<li>Get matched with your perfect plant soilmate</li>
<li>Bring your new green friend home</li>
</ol>
</main>
</body>
</html>
"#;

/// Serve the landing page
pub async fn index() -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Body::from(INDEX_HTML))
        .unwrap_or_else(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Page unavailable").into_response())
}
