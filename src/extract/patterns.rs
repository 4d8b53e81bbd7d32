use anyhow::{Context, Result};
use regex::Regex;

pub const COLUMN_LABELS: [&str; 7] = [
    "Progress",
    "Test Score",
    "Date Completed",
    "Minutes Spent",
    "Score",
    "Time Spent",
    "Raw Score",
];

pub const TEST_SCORE_LABEL: &str = "Test Score";

pub const SUB_ITEM_MARKERS: [&str; 2] = ["Objective", "Sub-Domain"];

pub const POST_ASSESSMENT_MARKER: &str = "Post-Assessment";

#[derive(Debug, Clone)]
pub struct RowPatterns {
    section_heading: Regex,
}

impl RowPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            section_heading: Regex::new(
                r"^\s*(?i:domain|section|module|unit|chapter|course)\s+\d+\s*[:\-–—]\s*(?P<title>\S.*?)\s*$",
            )
            .context("failed to compile section heading regex")?,
        })
    }

    pub fn section_title(&self, cell: &str) -> Option<String> {
        self.section_heading
            .captures(cell)
            .and_then(|captures| captures.name("title"))
            .map(|title| title.as_str().to_string())
    }

    pub fn is_column_label(&self, cell: &str) -> bool {
        COLUMN_LABELS.contains(&cell.trim())
    }

    pub fn has_sub_item_marker(&self, cell: &str) -> bool {
        SUB_ITEM_MARKERS.iter().any(|marker| cell.contains(marker))
    }
}
