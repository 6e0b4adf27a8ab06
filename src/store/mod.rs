mod models;

pub use models::*;

use std::sync::Arc;
use tokio::sync::RwLock;

pub type SharedStore = Arc<RwLock<SessionStore>>;

pub fn create_store() -> SharedStore {
    Arc::new(RwLock::new(SessionStore::default()))
}

/// The one session of this process: who is signed in, every submission, and
/// the upload form in progress.
///
/// All operations are total. Unknown ids are ignored rather than reported.
#[derive(Debug, Default)]
pub struct SessionStore {
    role: Role,
    identity: Option<Identity>,
    submissions: Vec<Submission>,
    draft: IntakeDraft,
    in_flight: usize,
}

impl SessionStore {
    pub fn login(&mut self, role: Role, identity: Identity) {
        self.role = role;
        self.identity = Some(identity);
    }

    /// Forgets the identity. Submissions and the last role stay.
    pub fn logout(&mut self) {
        self.identity = None;
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The role, but only while someone is signed in.
    pub fn active_role(&self) -> Option<Role> {
        self.identity.as_ref().map(|_| self.role)
    }

    /// Newest batch goes first; order inside the batch is kept.
    pub fn append(&mut self, mut records: Vec<Submission>) {
        records.append(&mut self.submissions);
        self.submissions = records;
    }

    pub fn patch(&mut self, id: &str, patch: SubmissionPatch) -> bool {
        match self.submissions.iter_mut().find(|s| s.id == id) {
            Some(submission) => {
                patch.apply(submission);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.submissions.len();
        self.submissions.retain(|s| s.id != id);
        self.submissions.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&Submission> {
        self.submissions.iter().find(|s| s.id == id)
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn draft(&self) -> &IntakeDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut IntakeDraft {
        &mut self.draft
    }

    /// True while at least one accepted upload has not landed yet.
    pub fn is_submitting(&self) -> bool {
        self.in_flight > 0
    }

    pub(crate) fn begin_upload(&mut self) {
        self.in_flight += 1;
    }

    pub(crate) fn finish_upload(&mut self, records: Vec<Submission>) {
        self.append(records);
        self.draft.reset();
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}
