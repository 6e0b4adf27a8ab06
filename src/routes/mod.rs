mod api;
mod pages;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/login", post(pages::login))
        .route("/logout", post(pages::logout))
        // No size limit is enforced on uploads; bodies are only counted.
        .route(
            "/files",
            post(pages::add_files).layer(DefaultBodyLimit::disable()),
        )
        .route("/files/:index/remove", post(pages::remove_file))
        .route("/reset", post(pages::reset_draft))
        .route("/submit", post(pages::submit))
        .route("/submissions/:id/status", post(pages::set_status))
        .route("/submissions/:id/grade", post(pages::grade))
        .route("/submissions/:id/delete", post(pages::delete))
        .route("/export", get(api::export_csv))
        .route("/api/session", get(api::session))
        .route("/api/submissions", get(api::submissions))
        .route("/api/metrics", get(api::metrics))
        .route("/api/courses", get(api::courses))
        .route("/api/statuses", get(api::statuses))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
