use std::cmp::Ordering;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::{CleanArgs, SortOrder};
use crate::export::write_grid_csv;
use crate::extract::{POST_ASSESSMENT_MARKER, TEST_SCORE_LABEL};
use crate::grid::{RawGrid, load_grid};
use crate::util::sibling_output_path;

const DROPPED_COLUMN_LABELS: [&str; 2] = ["minutes spent", "score"];

pub fn run(args: CleanArgs) -> Result<()> {
    let grid = load_grid(&args.input, args.sheet.as_deref())?;
    let input_width = grid.width();

    let cleaned = sort_post_assessment_blocks(drop_detail_columns(grid), args.sort_order);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_output_path(&args.input, None, "_clean.csv"));
    write_grid_csv(&output, &cleaned)?;

    info!(
        input = %args.input.display(),
        output = %output.display(),
        dropped_columns = input_width - cleaned.width(),
        sort_order = args.sort_order.as_str(),
        "clean completed"
    );
    Ok(())
}

fn is_dropped_label(cell: &str) -> bool {
    let normalized = cell.trim().to_lowercase();
    DROPPED_COLUMN_LABELS.contains(&normalized.as_str())
}

pub fn drop_detail_columns(grid: RawGrid) -> RawGrid {
    let keep = (0..grid.width())
        .map(|column| !grid.rows().iter().any(|row| is_dropped_label(&row[column])))
        .collect::<Vec<bool>>();

    let rows = grid
        .into_rows()
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&keep)
                .filter_map(|(cell, keep)| keep.then_some(cell))
                .collect::<Vec<String>>()
        })
        .collect::<Vec<_>>();

    RawGrid::from_rows(rows)
}

fn score_value(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    trimmed
        .strip_suffix('%')
        .unwrap_or(trimmed)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub fn sort_post_assessment_blocks(grid: RawGrid, order: SortOrder) -> RawGrid {
    if order == SortOrder::Unsorted {
        return grid;
    }

    let post_columns = (0..grid.width())
        .filter(|column| {
            grid.rows()
                .iter()
                .any(|row| row[*column].contains(POST_ASSESSMENT_MARKER))
        })
        .collect::<Vec<usize>>();

    let mut rows = grid.into_rows();
    for column in post_columns {
        let label_rows = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row[column].trim() == TEST_SCORE_LABEL)
            .map(|(index, _)| index)
            .collect::<Vec<usize>>();

        for label_row in label_rows {
            let Some(start) =
                (label_row + 1..rows.len()).find(|index| !rows[*index][column].trim().is_empty())
            else {
                continue;
            };
            let end = (start..rows.len())
                .find(|index| rows[*index][column].trim().is_empty())
                .unwrap_or(rows.len());

            debug!(column, start, end, "sorting post-assessment block");
            sort_block(&mut rows[start..end], column, order);
        }
    }

    RawGrid::from_rows(rows)
}

fn sort_block(block: &mut [Vec<String>], column: usize, order: SortOrder) {
    block.sort_by(|a, b| {
        match (score_value(&a[column]), score_value(&b[column])) {
            (Some(left), Some(right)) => {
                let ordering = left.partial_cmp(&right).unwrap_or(Ordering::Equal);
                if order == SortOrder::Descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> RawGrid {
        RawGrid::from_rows(
            rows.iter()
                .map(|cells| cells.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    fn column(grid: &RawGrid, index: usize) -> Vec<&str> {
        grid.rows().iter().map(|row| row[index].as_str()).collect()
    }

    fn report() -> RawGrid {
        grid(&[
            &["Domain 1: Word", "", "", "", ""],
            &["", "Lesson 1", "", "Post-Assessment", ""],
            &["", "Minutes Spent", "Score", "Test Score", "Date Completed"],
            &["Alice", "12", "80%", "72%", "9/4/2024"],
            &["Bob", "30", "60%", "N/A", ""],
            &["Cara", "25", "90%", "91%", "9/5/2024"],
            &["Dee", "5", "10%", "40%", "9/6/2024"],
            &["", "", "", "", ""],
            &["Summary", "", "", "", ""],
        ])
    }

    #[test]
    fn drop_detail_columns_removes_minutes_and_score_columns() {
        let cleaned = drop_detail_columns(report());

        assert_eq!(cleaned.width(), 3);
        assert_eq!(cleaned.rows()[2], vec!["", "Test Score", "Date Completed"]);
        assert_eq!(cleaned.rows()[3], vec!["Alice", "72%", "9/4/2024"]);
    }

    #[test]
    fn sort_orders_block_descending_with_unparseable_last() {
        let sorted = sort_post_assessment_blocks(drop_detail_columns(report()), SortOrder::Descending);

        assert_eq!(
            column(&sorted, 0),
            vec!["Domain 1: Word", "", "", "Cara", "Alice", "Dee", "Bob", "", "Summary"]
        );
    }

    #[test]
    fn sort_orders_block_ascending() {
        let sorted = sort_post_assessment_blocks(drop_detail_columns(report()), SortOrder::Ascending);

        assert_eq!(&column(&sorted, 0)[3..7], &["Dee", "Alice", "Cara", "Bob"]);
    }

    #[test]
    fn unsorted_keeps_row_order() {
        let cleaned = drop_detail_columns(report());
        let sorted = sort_post_assessment_blocks(cleaned.clone(), SortOrder::Unsorted);
        assert_eq!(sorted, cleaned);
    }
}
