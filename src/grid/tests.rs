use std::fs;
use std::path::Path;

use calamine::{CellErrorType, Data, ExcelDateTime, ExcelDateTimeType};

use super::load::{cell_text, decode_text, parse_delimited, select_sheet};
use super::*;

fn delimiter_counts(text: &str) -> Vec<usize> {
    text.lines()
        .map(|line| line.chars().filter(|ch| *ch == ',').count())
        .collect()
}

#[test]
fn rectangularize_pads_short_lines_to_the_widest() {
    let input = "Domain 1: Word\n,Pre-Assessment,Post-Assessment\nAlice,50%\n";
    let output = rectangularize(input, ',');

    assert_eq!(
        output,
        "Domain 1: Word,,\n,Pre-Assessment,Post-Assessment\nAlice,50%,\n"
    );
    assert!(delimiter_counts(&output).iter().all(|count| *count == 2));
}

#[test]
fn rectangularize_is_idempotent() {
    let input = "a\nb,c,d\r\n,\ne";
    let once = rectangularize(input, ',');
    let twice = rectangularize(&once, ',');

    assert_eq!(once, twice);
    assert_eq!(once, "a,,\nb,c,d\r\n,,\ne,,");
}

#[test]
fn rectangularize_preserves_line_order_and_content() {
    let input = "first,1\nsecond\nthird,3,x\n";
    let output = rectangularize(input, ',');

    let stripped = output
        .lines()
        .map(|line| line.trim_end_matches(','))
        .collect::<Vec<_>>();
    assert_eq!(stripped, vec!["first,1", "second", "third,3,x"]);
}

#[test]
fn rectangularize_handles_empty_input() {
    assert_eq!(rectangularize("", ','), "");
}

#[test]
fn from_rows_pads_ragged_rows() {
    let grid = RawGrid::from_rows(vec![
        vec!["a".to_string()],
        vec!["b".to_string(), "c".to_string(), "d".to_string()],
    ]);

    assert_eq!(grid.width(), 3);
    assert!(grid.rows().iter().all(|row| row.len() == 3));
    assert_eq!(grid.row(0), Some(&["a".to_string(), String::new(), String::new()][..]));
}

#[test]
fn preceding_non_blank_skips_blank_rows() {
    let grid = RawGrid::from_rows(vec![
        vec!["".to_string(), "Post-Assessment".to_string()],
        vec![" ".to_string(), "".to_string()],
        vec!["".to_string(), "Test Score".to_string()],
    ]);

    let first_line = grid.preceding_non_blank(2).expect("header first line");
    assert_eq!(first_line[1], "Post-Assessment");
    assert!(grid.preceding_non_blank(0).is_none());
}

#[test]
fn parse_delimited_yields_rectangular_grid() {
    let grid = parse_delimited("Domain 1: Word\n\n,Test Score,Date Completed\nAlice,85%,9/4/2024\n")
        .expect("parse");

    assert_eq!(grid.width(), 3);
    assert_eq!(grid.len(), 4);
    assert_eq!(grid.rows()[0][0], "Domain 1: Word");
    assert!(is_blank_row(&grid.rows()[1]));
    assert_eq!(grid.rows()[3][2], "9/4/2024");
}

#[test]
fn parse_delimited_keeps_blank_separator_rows() {
    let grid = parse_delimited("a,b\n,\nc,d\n").expect("parse");

    assert_eq!(grid.len(), 3);
    assert!(is_blank_row(&grid.rows()[1]));
}

#[test]
fn load_grid_reads_ragged_csv_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("progress.csv");
    fs::write(&path, "\u{feff}Domain 1: Word\nAlice,50%,85%\n").expect("write csv");

    let grid = load_grid(&path, None).expect("load");
    assert_eq!(grid.width(), 3);
    assert_eq!(grid.rows()[0][0], "Domain 1: Word");
    assert_eq!(grid.rows()[1][2], "85%");
}

#[test]
fn load_grid_rejects_unsupported_extension() {
    let err = load_grid(Path::new("report.pdf"), None).expect_err("unsupported");
    assert!(err.to_string().contains("unsupported input format"));
}

#[test]
fn load_grid_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.csv");

    let err = load_grid(&path, None).expect_err("missing file");
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn input_format_detection_is_case_insensitive() {
    assert_eq!(
        InputFormat::from_path(Path::new("REPORT.XLSX")).expect("format"),
        InputFormat::Workbook
    );
    assert_eq!(
        InputFormat::from_path(Path::new("report.Csv")).expect("format"),
        InputFormat::DelimitedText
    );
}

#[test]
fn load_grid_decodes_windows_1252_exports() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("progress.csv");
    fs::write(&path, b"Domain 1: Word\nJos\xe9 Pe\xf1a,85%\n").expect("write csv");

    let grid = load_grid(&path, None).expect("load");
    assert_eq!(grid.rows()[1][0], "Jos\u{e9} Pe\u{f1}a");
    assert_eq!(grid.rows()[1][1], "85%");
}

#[test]
fn decode_text_keeps_valid_utf8_untouched() {
    let text = decode_text("Zo\u{eb},91%".as_bytes());
    assert_eq!(text, "Zo\u{eb},91%");
}

#[test]
fn cell_text_renders_dates_as_calendar_text() {
    let date = Data::DateTime(ExcelDateTime::new(45539.0, ExcelDateTimeType::DateTime, false));
    assert_eq!(cell_text(&date), "2024-09-04");

    let with_time = Data::DateTime(ExcelDateTime::new(45539.5, ExcelDateTimeType::DateTime, false));
    assert_eq!(cell_text(&with_time), "2024-09-04 12:00:00");

    let iso = Data::DateTimeIso("2024-09-04T00:00:00".to_string());
    assert_eq!(cell_text(&iso), "2024-09-04T00:00:00");
}

#[test]
fn cell_text_renders_scalar_cells() {
    assert_eq!(cell_text(&Data::Empty), "");
    assert_eq!(cell_text(&Data::String("85%".to_string())), "85%");
    assert_eq!(cell_text(&Data::Int(72)), "72");
    assert_eq!(cell_text(&Data::Float(3.0)), "3");
    assert_eq!(cell_text(&Data::Float(0.85)), "0.85");
    assert_eq!(cell_text(&Data::Bool(true)), "true");
    assert_eq!(cell_text(&Data::Error(CellErrorType::Div0)), "#DIV/0!");
}

#[test]
fn select_sheet_defaults_to_first_and_rejects_unknown_names() {
    let names = vec!["Progress".to_string(), "Summary".to_string()];

    assert_eq!(select_sheet(&names, None).expect("first"), "Progress");
    assert_eq!(select_sheet(&names, Some("Summary")).expect("named"), "Summary");

    let err = select_sheet(&names, Some("Scores")).expect_err("unknown sheet");
    assert!(err.to_string().contains("worksheet 'Scores' not found"));

    let err = select_sheet(&[], None).expect_err("no sheets");
    assert!(err.to_string().contains("no worksheets"));
}

#[test]
fn load_grid_reports_unreadable_workbook() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("progress.xlsx");
    fs::write(&path, b"not a zip archive").expect("write workbook");

    let err = load_grid(&path, None).expect_err("corrupt workbook");
    assert!(err.to_string().contains("failed to open workbook"));
}
