use serde::Serialize;
use std::collections::HashSet;

use crate::store::{Status, Submission};

/// Dashboard counters over the whole collection, regardless of filters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub reviewed: usize,
    pub users_count: usize,
}

impl Metrics {
    pub fn compute(submissions: &[Submission]) -> Self {
        let count = |status: Status| submissions.iter().filter(|s| s.status == status).count();
        let students: HashSet<&str> = submissions
            .iter()
            .map(|s| s.student_email.as_str())
            .collect();

        Self {
            total: submissions.len(),
            pending: count(Status::Pending),
            approved: count(Status::Approved),
            reviewed: count(Status::Reviewed),
            users_count: students.len(),
        }
    }
}
