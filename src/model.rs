use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum CompletionStatus {
    Passed,
    Failed,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Not Started")]
    NotStarted,
}

impl CompletionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::InProgress => "In Progress",
            Self::NotStarted => "Not Started",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub student_name: String,
    pub course_name: String,
    pub status: CompletionStatus,
    pub score: f64,
    pub completion_date: String,
    pub composite_key: String,
    pub source_row: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportRow {
    #[serde(rename = "Students")]
    pub students: String,
    #[serde(rename = "Course Name")]
    pub course_name: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Exam Score")]
    pub exam_score: String,
    #[serde(rename = "Certificates Earned")]
    pub certificates_earned: String,
    #[serde(rename = "Course Completion Date")]
    pub course_completion_date: String,
    #[serde(rename = "Student Course Name")]
    pub student_course_name: String,
}

pub const IMPORT_COLUMNS: [&str; 7] = [
    "Students",
    "Course Name",
    "Status",
    "Exam Score",
    "Certificates Earned",
    "Course Completion Date",
    "Student Course Name",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub passed: usize,
    pub failed: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: CompletionStatus) {
        match status {
            CompletionStatus::Passed => self.passed += 1,
            CompletionStatus::Failed => self.failed += 1,
            CompletionStatus::InProgress => self.in_progress += 1,
            CompletionStatus::NotStarted => self.not_started += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub path: String,
    pub format: String,
    pub sha256: String,
    pub row_count: usize,
    pub column_count: usize,
    pub sections: Vec<String>,
    pub header_pairs_resolved: usize,
    pub skipped_rows: usize,
    pub record_count: usize,
    pub status_counts: StatusCounts,
    pub import_path: String,
    pub records_json_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub passing_score: u8,
    pub input_count: usize,
    pub inputs: Vec<InputSummary>,
}
