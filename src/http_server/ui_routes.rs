//! Browser UI Routes
//!
//! Serves the single-page quote browser. Assets are compiled into the binary.

use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const MAIN_JS: &str = include_str!("../../assets/main.js");

/// Create UI routes
pub fn ui_routes() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/static/main.js", get(main_js_handler))
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn main_js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        MAIN_JS,
    )
}
