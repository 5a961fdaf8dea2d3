//! Dashboard Page
//!
//! - GET / - The single-page dashboard

use axum::response::Html;

const DASHBOARD_HTML: &str = include_str!("../dashboard.html");

/// GET /
pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
