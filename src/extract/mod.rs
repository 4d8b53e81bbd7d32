mod aggregate;
mod header;
mod patterns;
mod record;
mod scanner;

pub use header::AssessmentColumns;
pub use patterns::{POST_ASSESSMENT_MARKER, TEST_SCORE_LABEL};
pub use record::{DEFAULT_PASSING_SCORE, ExtractOptions};
pub use scanner::{RowKind, SectionScanner};
