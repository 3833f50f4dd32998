use crate::config::TableSettings;
use crate::model::{DetectedTable, PageLines};
use crate::table_parse::split_cells;

fn flush_current(
    rows: &mut Vec<Vec<String>>,
    top: f64,
    min_rows: usize,
    tables: &mut Vec<DetectedTable>,
) {
    if rows.len() >= min_rows {
        tables.push(DetectedTable {
            rows: std::mem::take(rows),
            top,
        });
    } else {
        rows.clear();
    }
}

/// Groups consecutive columnar lines into tables. A line joins the current
/// candidate when its cell count reaches `min_cols` and it sits within
/// `row_gap_tolerance` of the previous row; anything else flushes the
/// candidate. Each table records the top coordinate of its first row.
pub(crate) fn detect_tables(page: &PageLines, settings: &TableSettings) -> Vec<DetectedTable> {
    let min_cols = settings.min_cols.max(2);
    let min_rows = settings.min_rows.max(2);

    let mut tables = Vec::new();
    let mut current_rows: Vec<Vec<String>> = Vec::new();
    let mut current_top = 0.0_f64;
    let mut last_row_top = 0.0_f64;

    for line in &page.lines {
        let cells = split_cells(&line.text, settings, min_cols);
        if cells.len() < min_cols {
            flush_current(&mut current_rows, current_top, min_rows, &mut tables);
            continue;
        }

        if !current_rows.is_empty() && (line.top - last_row_top).abs() > settings.row_gap_tolerance
        {
            flush_current(&mut current_rows, current_top, min_rows, &mut tables);
        }

        if current_rows.is_empty() {
            current_top = line.top;
        }
        last_row_top = line.top;
        current_rows.push(cells);
    }

    flush_current(&mut current_rows, current_top, min_rows, &mut tables);
    tables
}
