use chrono::SecondsFormat;

use crate::store::Submission;

pub const EXPORT_FILENAME: &str = "submissions.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv;charset=utf-8;";

const HEADERS: [&str; 9] = [
    "Title",
    "Course",
    "Student",
    "File",
    "SizeKB",
    "UploadedAt",
    "Status",
    "Grade",
    "Reviewer",
];

fn csv_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Kilobytes with one decimal, exact halves rounded up.
fn size_kb(bytes: u64) -> String {
    let tenths = (u128::from(bytes) * 10 + 512) / 1024;
    format!("{}.{}", tenths / 10, tenths % 10)
}

fn row(s: &Submission) -> String {
    [
        s.title.clone(),
        s.course.to_string(),
        s.student_name.clone(),
        s.file_name.clone(),
        size_kb(s.size),
        s.uploaded_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        s.status.to_string(),
        s.grade.clone().unwrap_or_default(),
        s.reviewer.clone().unwrap_or_default(),
    ]
    .iter()
    .map(|field| csv_quote(field))
    .collect::<Vec<_>>()
    .join(",")
}

/// Header line plus one fully quoted line per row, `\n` separated, no trailing newline.
pub fn to_csv(rows: &[Submission]) -> String {
    std::iter::once(HEADERS.join(","))
        .chain(rows.iter().map(row))
        .collect::<Vec<_>>()
        .join("\n")
}
