mod export;
mod metrics;

pub use export::{to_csv, EXPORT_CONTENT_TYPE, EXPORT_FILENAME};
pub use metrics::Metrics;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::store::{Identity, Role, Status, Submission};

/// Status dropdown value: a concrete status or the "All" sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(status) => status.as_str(),
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    /// Unknown values widen to `All` instead of rejecting the request.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().map(Self::Only).unwrap_or(Self::All))
    }
}

/// Search box and status dropdown of the submissions table.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub status: StatusFilter,
}

impl ViewQuery {
    fn matches_text(&self, submission: &Submission) -> bool {
        if self.q.is_empty() {
            return true;
        }
        format!(
            "{} {} {}",
            submission.title, submission.course, submission.student_name
        )
        .to_lowercase()
        .contains(&self.q.to_lowercase())
    }
}

/// Rows the active role may see, filtered by `query`, newest first.
///
/// A student without an identity sees nothing.
pub fn project(
    submissions: &[Submission],
    role: Role,
    identity: Option<&Identity>,
    query: &ViewQuery,
) -> Vec<Submission> {
    let mut rows: Vec<Submission> = submissions
        .iter()
        .filter(|s| {
            !role.is_owner_scoped() || identity.is_some_and(|me| me.email == s.student_email)
        })
        .filter(|s| query.matches_text(s))
        .filter(|s| query.status.matches(s.status))
        .cloned()
        .collect();

    rows.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
    rows
}
