use crate::model::{ImportRow, StatusCounts, StudentRecord};

#[derive(Debug, Clone, Default)]
pub struct RecordAggregator {
    records: Vec<StudentRecord>,
}

impl RecordAggregator {
    pub fn push(&mut self, record: StudentRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for record in &self.records {
            counts.record(record.status);
        }
        counts
    }

    pub fn import_rows(&self) -> Vec<ImportRow> {
        self.records.iter().map(import_row).collect()
    }
}

pub fn import_row(record: &StudentRecord) -> ImportRow {
    ImportRow {
        students: record.student_name.clone(),
        course_name: record.course_name.clone(),
        status: record.status.as_str().to_string(),
        exam_score: format!("{}", record.score),
        certificates_earned: String::new(),
        course_completion_date: record.completion_date.clone(),
        student_course_name: record.composite_key.clone(),
    }
}
