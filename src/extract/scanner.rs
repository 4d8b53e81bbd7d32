use anyhow::Result;
use tracing::debug;

use crate::grid::{RawGrid, is_blank_row};

use super::aggregate::RecordAggregator;
use super::header::{HeaderMapping, resolve_header_pair};
use super::patterns::RowPatterns;
use super::record::{ExtractOptions, extract_record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Blank,
    SectionHeader { title: String },
    SubItem,
    HeaderPair,
    StudentData,
    Other,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::SectionHeader { .. } => "section_header",
            Self::SubItem => "sub_item",
            Self::HeaderPair => "header_pair",
            Self::StudentData => "student_data",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub sections: Vec<String>,
    pub header_pairs_resolved: usize,
    pub skipped_rows: usize,
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub records: RecordAggregator,
    pub summary: ScanSummary,
}

#[derive(Debug, Default)]
struct ScanState {
    current_section: Option<String>,
    mapping: HeaderMapping,
}

#[derive(Debug, Clone)]
pub struct SectionScanner {
    patterns: RowPatterns,
    options: ExtractOptions,
}

impl SectionScanner {
    pub fn new(options: ExtractOptions) -> Result<Self> {
        Ok(Self {
            patterns: RowPatterns::new()?,
            options,
        })
    }

    pub fn classify(&self, cells: &[String]) -> RowKind {
        if is_blank_row(cells) {
            return RowKind::Blank;
        }

        let first = cells.first().map(|cell| cell.trim()).unwrap_or("");
        if let Some(title) = self.patterns.section_title(first) {
            return RowKind::SectionHeader { title };
        }
        if cells.iter().any(|cell| self.patterns.has_sub_item_marker(cell)) {
            return RowKind::SubItem;
        }
        if cells.iter().any(|cell| self.patterns.is_column_label(cell)) {
            return RowKind::HeaderPair;
        }
        if !first.is_empty() {
            return RowKind::StudentData;
        }

        RowKind::Other
    }

    pub fn resolve_header_at(&self, grid: &RawGrid, index: usize) -> HeaderMapping {
        let second = grid.row(index).unwrap_or(&[]);
        let first = grid.preceding_non_blank(index).unwrap_or(&[]);
        resolve_header_pair(first, second)
    }

    pub fn scan(&self, grid: &RawGrid) -> Extraction {
        let mut state = ScanState::default();
        let mut extraction = Extraction::default();

        for (index, row) in grid.rows().iter().enumerate() {
            match self.classify(row) {
                RowKind::Blank | RowKind::SubItem | RowKind::Other => {}
                RowKind::SectionHeader { title } => {
                    debug!(row = index, section = %title, "section header");
                    extraction.summary.sections.push(title.clone());
                    state.current_section = Some(title);
                    state.mapping = HeaderMapping::default();
                }
                RowKind::HeaderPair => {
                    state.mapping = self.resolve_header_at(grid, index);
                    extraction.summary.header_pairs_resolved += 1;
                    debug!(
                        row = index,
                        assessments = state.mapping.len(),
                        names = ?state.mapping.names().collect::<Vec<_>>(),
                        "resolved header pair"
                    );
                }
                RowKind::StudentData => {
                    let record = match state.current_section.as_deref() {
                        Some(section) if !state.mapping.is_empty() => {
                            extract_record(row, index, section, &state.mapping, &self.options)
                        }
                        _ => None,
                    };

                    match record {
                        Some(record) => extraction.records.push(record),
                        None => {
                            extraction.summary.skipped_rows += 1;
                            debug!(
                                row = index,
                                has_section = state.current_section.is_some(),
                                has_header = !state.mapping.is_empty(),
                                "student row outside a resolved header; skipped"
                            );
                        }
                    }
                }
            }
        }

        extraction
    }
}
