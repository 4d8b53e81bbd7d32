use serde::Serialize;

use super::patterns::TEST_SCORE_LABEL;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AssessmentColumns {
    pub score: usize,
    /// Positional: the column right after the score, whatever it holds.
    pub date_completed: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMapping {
    entries: Vec<(String, AssessmentColumns)>,
}

impl HeaderMapping {
    pub fn insert(&mut self, name: String, columns: AssessmentColumns) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = columns,
            None => self.entries.push((name, columns)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssessmentColumns)> {
        self.entries
            .iter()
            .map(|(name, columns)| (name.as_str(), columns))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn combine_header_rows(first: &[String], second: &[String]) -> Vec<String> {
    let width = first.len().max(second.len());

    (0..width)
        .map(|index| {
            let outer = first.get(index).map(|cell| cell.trim()).unwrap_or("");
            let inner = second.get(index).map(|cell| cell.trim()).unwrap_or("");
            match (outer.is_empty(), inner.is_empty()) {
                (false, false) => format!("{outer} {inner}"),
                (false, true) => outer.to_string(),
                (true, false) => inner.to_string(),
                (true, true) => String::new(),
            }
        })
        .collect()
}

pub fn assessment_name(combined_header: &str) -> String {
    combined_header
        .replace(TEST_SCORE_LABEL, " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

pub fn resolve_header_pair(first: &[String], second: &[String]) -> HeaderMapping {
    let combined = combine_header_rows(first, second);
    let mut mapping = HeaderMapping::default();

    for (index, header) in combined.iter().enumerate() {
        if !header.contains(TEST_SCORE_LABEL) {
            continue;
        }

        let date_completed = (index + 1 < combined.len()).then_some(index + 1);
        mapping.insert(
            assessment_name(header),
            AssessmentColumns {
                score: index,
                date_completed,
            },
        );
    }

    mapping
}
