use crate::model::{CompletionStatus, StudentRecord};

use super::header::{AssessmentColumns, HeaderMapping};
use super::patterns::POST_ASSESSMENT_MARKER;

pub const DEFAULT_PASSING_SCORE: u8 = 70;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ExtractOptions {
    pub passing_score: u8,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            passing_score: DEFAULT_PASSING_SCORE,
        }
    }
}

// Only one assessment per row is ever chosen, even when a section has several.
pub fn select_assessment(mapping: &HeaderMapping) -> Option<(&str, &AssessmentColumns)> {
    mapping
        .iter()
        .find(|(name, _)| name.contains(POST_ASSESSMENT_MARKER))
        .or_else(|| {
            mapping.iter().find(|(name, _)| {
                let lowered = name.to_ascii_lowercase();
                lowered.contains("post") || lowered.contains("assessment")
            })
        })
        .or_else(|| mapping.iter().next())
}

/// Parses a percentage cell. Anything unparseable reads as `0.0`, which is
/// indistinguishable from a recorded zero.
pub fn parse_score(cell: &str) -> f64 {
    let trimmed = cell.trim();
    let numeric = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    numeric
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

pub fn classify_status(score: f64, passing_score: u8, has_any_date: bool) -> CompletionStatus {
    if score >= f64::from(passing_score) {
        CompletionStatus::Passed
    } else if score != 0.0 {
        CompletionStatus::Failed
    } else if has_any_date {
        CompletionStatus::InProgress
    } else {
        CompletionStatus::NotStarted
    }
}

fn cell_at(row: &[String], index: Option<usize>) -> Option<&str> {
    index.and_then(|index| row.get(index)).map(|cell| cell.trim())
}

pub fn extract_record(
    row: &[String],
    row_index: usize,
    course_name: &str,
    mapping: &HeaderMapping,
    options: &ExtractOptions,
) -> Option<StudentRecord> {
    let (_, selected) = select_assessment(mapping)?;

    let score = cell_at(row, Some(selected.score))
        .map(parse_score)
        .unwrap_or(0.0);
    let completion_date = cell_at(row, selected.date_completed)
        .unwrap_or("")
        .to_string();

    let has_any_date = mapping
        .iter()
        .any(|(_, columns)| cell_at(row, columns.date_completed).is_some_and(|cell| !cell.is_empty()));
    let status = classify_status(score, options.passing_score, has_any_date);

    let student_name = row.first().map(|cell| cell.trim()).unwrap_or("").to_string();
    let composite_key = format!("{student_name}-{course_name}");

    Some(StudentRecord {
        student_name,
        course_name: course_name.to_string(),
        status,
        score,
        completion_date,
        composite_key,
        source_row: row_index,
    })
}
