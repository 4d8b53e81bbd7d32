use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InspectArgs;
use crate::extract::{AssessmentColumns, ExtractOptions, RowKind, SectionScanner};
use crate::grid::{RawGrid, load_grid};

#[derive(Debug, Clone, Serialize)]
struct AssessmentReport {
    name: String,
    #[serde(flatten)]
    columns: AssessmentColumns,
}

#[derive(Debug, Clone, Serialize)]
struct RowReport {
    row: usize,
    kind: &'static str,
    first_cell: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    assessments: Vec<AssessmentReport>,
}

#[derive(Debug, Clone, Serialize)]
struct InspectResponse {
    input: String,
    row_count: usize,
    column_count: usize,
    rows: Vec<RowReport>,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let grid = load_grid(&args.input, args.sheet.as_deref())?;
    let scanner = SectionScanner::new(ExtractOptions::default())?;

    let response = InspectResponse {
        input: args.input.display().to_string(),
        row_count: grid.len(),
        column_count: grid.width(),
        rows: inspect_rows(&scanner, &grid),
    };

    if args.json {
        write_json_response(&response)?;
    } else {
        write_text_response(&response)?;
    }

    info!(rows = response.row_count, "inspect completed");
    Ok(())
}

fn inspect_rows(scanner: &SectionScanner, grid: &RawGrid) -> Vec<RowReport> {
    grid.rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let kind = scanner.classify(row);
            let assessments = if kind == RowKind::HeaderPair {
                scanner
                    .resolve_header_at(grid, index)
                    .iter()
                    .map(|(name, columns)| AssessmentReport {
                        name: name.to_string(),
                        columns: *columns,
                    })
                    .collect()
            } else {
                Vec::new()
            };
            let section = match &kind {
                RowKind::SectionHeader { title } => Some(title.clone()),
                _ => None,
            };

            RowReport {
                row: index,
                kind: kind.as_str(),
                first_cell: row.first().map(|cell| cell.trim().to_string()).unwrap_or_default(),
                section,
                assessments,
            }
        })
        .collect()
}

fn write_json_response(response: &InspectResponse) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, response)
        .context("failed to serialize inspect json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_response(response: &InspectResponse) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Input: {}", response.input)?;
    writeln!(
        output,
        "Grid: rows={} columns={}",
        response.row_count, response.column_count
    )?;

    for row in &response.rows {
        write!(output, "{:>5}\t{:<14}\t{}", row.row, row.kind, row.first_cell)?;
        if let Some(section) = &row.section {
            write!(output, "\tsection={section}")?;
        }
        writeln!(output)?;

        for assessment in &row.assessments {
            let date_column = assessment
                .columns
                .date_completed
                .map(|column| column.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                output,
                "\t\tassessment={:?} score_column={} date_column={}",
                assessment.name, assessment.columns.score, date_column
            )?;
        }
    }

    output.flush()?;
    Ok(())
}
