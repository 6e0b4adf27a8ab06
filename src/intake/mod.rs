use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::store::{
    known_variant, Course, Identity, IntakeDraft, Role, SharedStore, Status, Submission,
};

/// Text fields of the upload form. Files arrive separately and live in the draft.
#[derive(Debug, Default, Deserialize)]
pub struct IntakeFields {
    /// `None` when the field is missing or names no known course.
    #[serde(default, deserialize_with = "known_variant")]
    pub course: Option<Course>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: String,
}

/// Millisecond timestamp plus 32 random bits.
pub fn generate_submission_id() -> String {
    format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        &Uuid::new_v4().simple().to_string()[..8]
    )
}

/// One record per attached file, or `None` when the draft has no title or no files.
pub fn build_batch(
    draft: &IntakeDraft,
    identity: &Identity,
    uploaded_at: DateTime<Utc>,
) -> Option<Vec<Submission>> {
    if draft.title.is_empty() || draft.files.is_empty() {
        return None;
    }

    let batch = draft
        .files
        .iter()
        .map(|file| Submission {
            id: generate_submission_id(),
            student_name: identity.name.clone(),
            student_email: identity.email.clone(),
            course: draft.course,
            title: draft.title.clone(),
            notes: draft.notes.clone(),
            file_name: file.name.clone(),
            size: file.size,
            uploaded_at,
            status: Status::Pending,
            grade: None,
            reviewer: None,
        })
        .collect();

    Some(batch)
}

/// Accepts the draft for upload. The records are appended after `delay`,
/// all at once, and the draft is cleared at the same moment.
///
/// Returns `false` without touching the collection when nobody is signed in
/// as a student or the draft is incomplete. An unknown course is refused
/// before the draft is touched.
pub async fn submit(store: &SharedStore, fields: IntakeFields, delay: Duration) -> bool {
    let Some(course) = fields.course else {
        debug!("intake refused: unknown course");
        return false;
    };

    let batch = {
        let mut session = store.write().await;

        let draft = session.draft_mut();
        draft.course = course;
        draft.title = fields.title;
        draft.notes = fields.notes;

        if session.role() != Role::Student {
            debug!(role = %session.role(), "intake refused for non-student role");
            return false;
        }
        let Some(identity) = session.identity().cloned() else {
            debug!("intake refused without a signed-in user");
            return false;
        };
        let Some(batch) = build_batch(session.draft(), &identity, Utc::now()) else {
            debug!("intake refused: title or files missing");
            return false;
        };

        session.begin_upload();
        batch
    };

    info!(files = batch.len(), title = %batch[0].title, "upload accepted");

    let store = store.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let count = batch.len();
        store.write().await.finish_upload(batch);
        info!(count, "submission batch appended");
    });

    true
}
