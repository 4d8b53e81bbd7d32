use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::extract::DEFAULT_PASSING_SCORE;

#[derive(Parser, Debug)]
#[command(
    name = "progress-normalizer",
    version,
    about = "Normalize learning-platform progress reports for grade import"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract one import row per student per course section.
    Normalize(NormalizeArgs),
    /// Drop time/score detail columns and sort students by post-assessment score.
    Clean(CleanArgs),
    /// Show how each row of a report is classified.
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[arg(
        long,
        default_value_t = DEFAULT_PASSING_SCORE,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub passing_score: u8,

    #[arg(long)]
    pub sheet: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum SortOrder {
    Ascending,
    Descending,
    Unsorted,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
            Self::Unsorted => "unsorted",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CleanArgs {
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = SortOrder::Descending)]
    pub sort_order: SortOrder,

    #[arg(long)]
    pub sheet: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    pub input: PathBuf,

    #[arg(long)]
    pub sheet: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
