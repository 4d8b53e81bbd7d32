use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::NormalizeArgs;
use crate::export::write_import_csv;
use crate::extract::{ExtractOptions, SectionScanner};
use crate::grid::{InputFormat, RawGrid, load_grid};
use crate::model::{InputSummary, NormalizeRunManifest};
use crate::util::{
    now_utc_string, sha256_file, sibling_output_path, utc_compact_string, write_json_pretty,
};

const IMPORT_SUFFIX: &str = "_import.csv";
const RECORDS_SUFFIX: &str = "_records.json";

struct LoadedInput {
    path: PathBuf,
    format: InputFormat,
    sha256: String,
    grid: RawGrid,
}

pub fn run(args: NormalizeArgs) -> Result<()> {
    let run_id = format!("normalize-{}", utc_compact_string(Utc::now()));
    let options = ExtractOptions {
        passing_score: args.passing_score,
    };
    let scanner = SectionScanner::new(options)?;

    info!(
        run_id = %run_id,
        inputs = args.inputs.len(),
        passing_score = options.passing_score,
        "starting normalize"
    );

    // Every input must load before any output is written.
    let mut loaded = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        loaded.push(LoadedInput {
            path: path.clone(),
            format: InputFormat::from_path(path)?,
            sha256: sha256_file(path)?,
            grid: load_grid(path, args.sheet.as_deref())?,
        });
    }

    let mut summaries = Vec::with_capacity(loaded.len());
    for input in &loaded {
        summaries.push(normalize_input(&scanner, input, &args)?);
    }

    let total_records = summaries.iter().map(|summary| summary.record_count).sum::<usize>();

    if let Some(manifest_path) = &args.manifest_path {
        let manifest = NormalizeRunManifest {
            manifest_version: 1,
            run_id: run_id.clone(),
            generated_at: now_utc_string(),
            passing_score: options.passing_score,
            input_count: summaries.len(),
            inputs: summaries,
        };
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote run manifest");
    }

    info!(run_id = %run_id, records = total_records, "normalize completed");
    Ok(())
}

fn normalize_input(
    scanner: &SectionScanner,
    input: &LoadedInput,
    args: &NormalizeArgs,
) -> Result<InputSummary> {
    let extraction = scanner.scan(&input.grid);
    let records = &extraction.records;

    if records.records().is_empty() {
        warn!(
            path = %input.path.display(),
            sections = extraction.summary.sections.len(),
            header_pairs = extraction.summary.header_pairs_resolved,
            "no student records extracted"
        );
    }

    let output_dir = args.output_dir.as_deref();
    let import_path = sibling_output_path(&input.path, output_dir, IMPORT_SUFFIX);
    write_import_csv(&import_path, &records.import_rows())?;

    let records_json_path = if args.json {
        let path = sibling_output_path(&input.path, output_dir, RECORDS_SUFFIX);
        write_json_pretty(&path, &records.records())?;
        info!(path = %path.display(), "wrote records json");
        Some(path.display().to_string())
    } else {
        None
    };

    let status_counts = records.status_counts();
    info!(
        path = %input.path.display(),
        sections = extraction.summary.sections.len(),
        records = records.records().len(),
        skipped_rows = extraction.summary.skipped_rows,
        passed = status_counts.passed,
        failed = status_counts.failed,
        in_progress = status_counts.in_progress,
        not_started = status_counts.not_started,
        "normalized input"
    );

    Ok(InputSummary {
        path: input.path.display().to_string(),
        format: input.format.as_str().to_string(),
        sha256: input.sha256.clone(),
        row_count: input.grid.len(),
        column_count: input.grid.width(),
        sections: extraction.summary.sections.clone(),
        header_pairs_resolved: extraction.summary.header_pairs_resolved,
        skipped_rows: extraction.summary.skipped_rows,
        record_count: records.records().len(),
        status_counts,
        import_path: import_path.display().to_string(),
        records_json_path,
    })
}
