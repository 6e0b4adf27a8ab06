use axum::{
    extract::{Multipart, Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;
use tracing::{debug, info};

use crate::auth::{self, Credentials};
use crate::error::AppError;
use crate::intake::{self, IntakeFields};
use crate::state::AppState;
use crate::store::{known_variant, Course, FileMeta, Role, Status, SubmissionPatch};
use crate::templates::render;
use crate::view::{project, Metrics, ViewQuery};

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Result<Html<String>, AppError> {
    let session = state.store.read().await;
    let role = session.role();

    let mut ctx = Context::new();
    ctx.insert("role", &role);
    ctx.insert("roles", Role::ALL);
    ctx.insert("user", &session.identity());

    let Some(user) = session.identity() else {
        return render(&state.tera, "login.html", &ctx);
    };

    let rows = project(session.submissions(), role, Some(user), &query);
    ctx.insert("submissions", &rows);
    ctx.insert("query", &query);
    ctx.insert("statuses", Status::ALL);
    ctx.insert("courses", Course::ALL);
    ctx.insert("can_review", &role.can_review());
    ctx.insert("can_delete", &role.can_delete());

    let metrics = role
        .can_review()
        .then(|| Metrics::compute(session.submissions()));
    let draft = (!role.can_review()).then(|| session.draft());
    ctx.insert("metrics", &metrics);
    ctx.insert("draft", &draft);
    ctx.insert("submitting", &session.is_submitting());

    render(&state.tera, "dashboard.html", &ctx)
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(credentials): Form<Credentials>,
) -> Redirect {
    match auth::verify(&credentials) {
        Some((role, identity)) => {
            info!(%role, email = %identity.email, "signed in");
            state.store.write().await.login(role, identity);
        }
        None => debug!("sign-in refused: blank field or unknown role"),
    }
    Redirect::to("/")
}

pub async fn logout(State(state): State<Arc<AppState>>) -> Redirect {
    state.store.write().await.logout();
    info!("signed out");
    Redirect::to("/")
}

/// Adds every `files` part to the draft. Only names and sizes are kept.
pub async fn add_files(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut files = Vec::new();

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some("files") {
            continue;
        }
        let name = field.file_name().unwrap_or("").to_string();
        let mut size = 0u64;
        while let Some(chunk) = field.chunk().await? {
            size += chunk.len() as u64;
        }
        // An empty file input still posts one nameless part.
        if name.is_empty() {
            continue;
        }
        files.push(FileMeta { name, size });
    }

    if !files.is_empty() {
        debug!(count = files.len(), "files attached to draft");
        state.store.write().await.draft_mut().add_files(files);
    }
    Ok(Redirect::to("/"))
}

pub async fn remove_file(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Redirect {
    state.store.write().await.draft_mut().remove_file(index);
    Redirect::to("/")
}

pub async fn reset_draft(State(state): State<Arc<AppState>>) -> Redirect {
    state.store.write().await.draft_mut().reset();
    Redirect::to("/")
}

pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<IntakeFields>,
) -> Redirect {
    intake::submit(&state.store, fields, state.config.upload_delay).await;
    Redirect::to("/")
}

#[derive(Deserialize)]
pub struct StatusForm {
    #[serde(default, deserialize_with = "known_variant")]
    status: Option<Status>,
}

pub async fn set_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Redirect {
    let mut session = state.store.write().await;
    if !session.active_role().is_some_and(|r| r.can_review()) {
        debug!(%id, "status change refused");
        return Redirect::to("/");
    }
    let Some(status) = form.status else {
        debug!(%id, "status change refused: unknown status");
        return Redirect::to("/");
    };
    if session.patch(&id, SubmissionPatch::status(status)) {
        info!(%id, %status, "status changed");
    }
    Redirect::to("/")
}

/// A missing `grade` is a cancelled prompt and changes nothing.
#[derive(Deserialize)]
pub struct GradeForm {
    grade: Option<String>,
}

pub async fn grade(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<GradeForm>,
) -> Redirect {
    let mut session = state.store.write().await;
    if !session.active_role().is_some_and(|r| r.can_review()) {
        debug!(%id, "grading refused");
        return Redirect::to("/");
    }
    if let Some(grade) = form.grade {
        if session.patch(&id, SubmissionPatch::grade(grade.clone())) {
            info!(%id, %grade, "graded");
        }
    }
    Redirect::to("/")
}

pub async fn delete(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Redirect {
    let mut session = state.store.write().await;
    if !session.active_role().is_some_and(|r| r.can_delete()) {
        debug!(%id, "delete refused");
        return Redirect::to("/");
    }
    if session.remove(&id) {
        info!(%id, "submission deleted");
    }
    Redirect::to("/")
}
