use crate::config::{ColumnStrategy, TableSettings};

/// Splits a line into cells on tabs and runs of two or more spaces. Single
/// spaces stay inside a cell so multi-word values survive.
pub(crate) fn split_line_into_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut whitespace_run = 0_usize;

    for ch in trimmed.chars() {
        if ch == '\t' {
            if !current.trim().is_empty() {
                cells.push(current.trim().to_string());
                current.clear();
            }
            whitespace_run = 0;
            continue;
        }

        if ch.is_whitespace() {
            whitespace_run += 1;
            if whitespace_run >= 2 {
                if !current.trim().is_empty() {
                    cells.push(current.trim().to_string());
                    current.clear();
                }
                continue;
            }
            current.push(' ');
            continue;
        }

        whitespace_run = 0;
        current.push(ch);
    }

    if !current.trim().is_empty() {
        cells.push(current.trim().to_string());
    }

    cells
}

pub(crate) fn soft_split_line_into_cells(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Applies the configured column strategy to one line.
pub(crate) fn split_cells(line: &str, settings: &TableSettings, min_cols: usize) -> Vec<String> {
    match settings.column_strategy {
        ColumnStrategy::Whitespace => split_line_into_cells(line),
        ColumnStrategy::SingleSpace => soft_split_line_into_cells(line),
        ColumnStrategy::Auto => {
            let cells = split_line_into_cells(line);
            if cells.len() >= min_cols {
                return cells;
            }

            // Prose lines soft-split into many "cells"; only accept the soft
            // split when the line does not read like a sentence.
            let soft_cells = soft_split_line_into_cells(line);
            let has_numeric = soft_cells
                .iter()
                .any(|cell| cell.chars().any(|ch| ch.is_ascii_digit()));
            let looks_like_sentence = ['.', '!', '?']
                .iter()
                .any(|punctuation| line.trim_end().ends_with(*punctuation));
            if soft_cells.len() >= min_cols
                && !looks_like_sentence
                && (has_numeric || soft_cells.len() <= 6)
            {
                soft_cells
            } else {
                cells
            }
        }
    }
}
