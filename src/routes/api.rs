use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use std::sync::Arc;

use crate::state::AppState;
use crate::store::{Course, Status, Submission};
use crate::view::{project, to_csv, Metrics, ViewQuery, EXPORT_CONTENT_TYPE, EXPORT_FILENAME};

pub async fn session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.store.read().await;
    Json(serde_json::json!({
        "user": session.identity(),
        "role": session.role(),
        "submitting": session.is_submitting(),
    }))
}

/// Same rows as the dashboard table for the signed-in role.
pub async fn submissions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Json<Vec<Submission>> {
    let session = state.store.read().await;
    let rows = match session.active_role() {
        Some(role) => project(session.submissions(), role, session.identity(), &query),
        None => Vec::new(),
    };
    Json(rows)
}

/// `null` unless a reviewer is signed in.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Json<Option<Metrics>> {
    let session = state.store.read().await;
    let metrics = session
        .active_role()
        .filter(|role| role.can_review())
        .map(|_| Metrics::compute(session.submissions()));
    Json(metrics)
}

pub async fn courses() -> Json<&'static [Course]> {
    Json(Course::ALL)
}

pub async fn statuses() -> Json<&'static [Status]> {
    Json(Status::ALL)
}

/// CSV download of the filtered table. Students are sent back to the dashboard.
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Response {
    let session = state.store.read().await;
    let role = match session.active_role() {
        Some(role) if role.can_review() => role,
        _ => return Redirect::to("/").into_response(),
    };

    let rows = project(session.submissions(), role, session.identity(), &query);
    tracing::info!(rows = rows.len(), "exporting submissions");

    (
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        to_csv(&rows),
    )
        .into_response()
}
