use std::borrow::Cow;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveTime;
use encoding_rs::WINDOWS_1252;
use tracing::{debug, info, warn};

use super::{RawGrid, rectangularize};

const DELIMITER: char = ',';

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputFormat {
    DelimitedText,
    Workbook,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .with_context(|| format!("input has no file extension: {}", path.display()))?;

        match extension.as_str() {
            "csv" | "txt" => Ok(Self::DelimitedText),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            other => bail!(
                "unsupported input format '.{other}': {}",
                path.display()
            ),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DelimitedText => "csv",
            Self::Workbook => "workbook",
        }
    }
}

pub fn load_grid(path: &Path, sheet: Option<&str>) -> Result<RawGrid> {
    let format = InputFormat::from_path(path)?;
    let grid = match format {
        InputFormat::DelimitedText => load_delimited(path)?,
        InputFormat::Workbook => load_workbook(path, sheet)?,
    };

    info!(
        path = %path.display(),
        format = format.as_str(),
        rows = grid.len(),
        columns = grid.width(),
        "loaded input grid"
    );
    if grid.is_empty() {
        warn!(path = %path.display(), "input grid has no rows");
    }

    Ok(grid)
}

fn load_delimited(path: &Path) -> Result<RawGrid> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let raw = decode_text(&bytes);
    let text = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
    parse_delimited(text).with_context(|| format!("failed to parse {}", path.display()))
}

// Exports saved from desktop spreadsheet tools are often Windows-1252.
pub(super) fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            debug!("input is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text
        }
    }
}

pub(super) fn parse_delimited(text: &str) -> Result<RawGrid> {
    let padded = rectangularize(text, DELIMITER);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(padded.as_bytes());

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed delimited row {}", index + 1))?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }

    Ok(RawGrid::from_rows(rows))
}

fn load_workbook(path: &Path, sheet: Option<&str>) -> Result<RawGrid> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    let sheet_name = select_sheet(&workbook.sheet_names(), sheet)
        .with_context(|| format!("failed to select worksheet in {}", path.display()))?;
    debug!(sheet = %sheet_name, "reading worksheet");

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read worksheet '{sheet_name}' in {}", path.display()))?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>())
        .collect::<Vec<_>>();

    Ok(RawGrid::from_rows(rows))
}

pub(super) fn select_sheet(names: &[String], requested: Option<&str>) -> Result<String> {
    match requested {
        Some(name) if names.iter().any(|candidate| candidate == name) => Ok(name.to_string()),
        Some(name) => bail!(
            "worksheet '{name}' not found; available: {}",
            names.join(", ")
        ),
        None => names.first().cloned().context("workbook has no worksheets"),
    }
}

pub(super) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        Data::Float(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) if datetime.time() == NaiveTime::MIN => {
                datetime.format("%Y-%m-%d").to_string()
            }
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => value.as_f64().to_string(),
        },
        Data::Error(error) => error.to_string(),
    }
}
