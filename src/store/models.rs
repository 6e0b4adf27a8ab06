use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review state of a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Pending,
    Reviewed,
    Approved,
    Rejected,
    #[serde(rename = "Needs Changes")]
    NeedsChanges,
}

impl Status {
    /// All statuses in the order they are offered to reviewers.
    pub const ALL: &'static [Status] = &[
        Self::Pending,
        Self::Reviewed,
        Self::Approved,
        Self::Rejected,
        Self::NeedsChanges,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Reviewed => "Reviewed",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::NeedsChanges => "Needs Changes",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("status", s))
    }
}

/// Courses a student can submit against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Course {
    #[default]
    #[serde(rename = "CS101")]
    Cs101,
    #[serde(rename = "ENG202")]
    Eng202,
    #[serde(rename = "MATH150")]
    Math150,
    #[serde(rename = "PHY210")]
    Phy210,
}

impl Course {
    pub const ALL: &'static [Course] = &[Self::Cs101, Self::Eng202, Self::Math150, Self::Phy210];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cs101 => "CS101",
            Self::Eng202 => "ENG202",
            Self::Math150 => "MATH150",
            Self::Phy210 => "PHY210",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Course {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|course| course.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("course", s))
    }
}

/// Who is using the portal. Ordered from least to most privileged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub const ALL: &'static [Role] = &[Self::Student, Self::Faculty, Self::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Admin => "admin",
        }
    }

    /// Students only ever see their own submissions.
    pub fn is_owner_scoped(&self) -> bool {
        matches!(self, Self::Student)
    }

    /// Change status, grade, export and read metrics.
    pub fn can_review(&self) -> bool {
        !self.is_owner_scoped()
    }

    pub fn can_delete(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("role", s))
    }
}

/// Error when a form or query value is not one of the known variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Form field holding an enum by its display string. A value that names no
/// variant becomes `None` so the handler can refuse the action itself.
pub fn known_variant<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().ok())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// Metadata of an attached file. Contents are never kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub student_name: String,
    pub student_email: String,
    pub course: Course,
    pub title: String,
    pub notes: String,
    pub file_name: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
    pub status: Status,
    pub grade: Option<String>,
    /// Reserved. Nothing assigns a reviewer yet.
    pub reviewer: Option<String>,
}

/// Fields a reviewer may change. Ownership and identity are not representable here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmissionPatch {
    pub status: Option<Status>,
    pub grade: Option<String>,
}

impl SubmissionPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            grade: None,
        }
    }

    /// Grading always moves the submission to `Reviewed`.
    pub fn grade(grade: impl Into<String>) -> Self {
        Self {
            status: Some(Status::Reviewed),
            grade: Some(grade.into()),
        }
    }

    pub(crate) fn apply(self, submission: &mut Submission) {
        if let Some(status) = self.status {
            submission.status = status;
        }
        if let Some(grade) = self.grade {
            submission.grade = Some(grade);
        }
    }
}

/// Pending upload form. The course survives a reset, the rest does not.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IntakeDraft {
    pub course: Course,
    pub title: String,
    pub notes: String,
    pub files: Vec<FileMeta>,
}

impl IntakeDraft {
    pub fn add_files(&mut self, files: impl IntoIterator<Item = FileMeta>) {
        self.files.extend(files);
    }

    pub fn remove_file(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
        }
    }

    pub fn reset(&mut self) {
        self.title.clear();
        self.notes.clear();
        self.files.clear();
    }
}
