use std::fs;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use crate::error::ScrapeError;
use crate::model::TabularResult;

/// Derives a filesystem-safe file stem from a table title: lowercased, with
/// whitespace mapped to underscores and every character outside
/// `[alphanumeric . _ -]` replaced by an underscore.
#[must_use]
pub fn slug_filename(title: &str) -> String {
    let slug = title
        .trim()
        .to_lowercase()
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect::<String>();

    if slug.chars().all(|ch| ch == '_') {
        "table".to_string()
    } else {
        slug
    }
}

/// Writes one table as `<results_path>/results/<slug>.csv`, creating the
/// results directory when needed. Returns the path written.
pub(crate) fn write_table(
    results_path: &Path,
    title: &str,
    table: &TabularResult,
) -> Result<PathBuf, ScrapeError> {
    let results_dir = results_path.join("results");
    fs::create_dir_all(&results_dir)?;

    let path = results_dir.join(format!("{}.csv", slug_filename(title)));
    let mut writer = WriterBuilder::new().from_path(&path)?;
    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{slug_filename, write_table};
    use crate::model::TabularResult;

    #[test]
    fn slug_lowercases_and_replaces_spaces() {
        assert_eq!(slug_filename("Table One"), "table_one");
    }

    #[test]
    fn slug_is_deterministic_and_idempotent() {
        assert_eq!(slug_filename("Table One"), slug_filename("Table One"));
        assert_eq!(slug_filename("table_one"), "table_one");
    }

    #[test]
    fn slug_strips_filesystem_unsafe_characters() {
        assert_eq!(slug_filename("Q1/Q2 Results"), "q1_q2_results");
        assert_eq!(slug_filename("a\u{0}b"), "a_b");
    }

    #[test]
    fn degenerate_title_falls_back_to_table() {
        assert_eq!(slug_filename("///"), "table");
        assert_eq!(slug_filename(""), "table");
    }

    #[test]
    fn written_csv_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let table = TabularResult {
            header: vec!["A".to_string(), "B".to_string()],
            rows: vec![vec!["1".to_string(), "2".to_string()]],
        };

        let path = write_table(dir.path(), "Round Trip", &table)
            .expect("table should be written");
        assert!(path.ends_with("results/round_trip.csv"));

        let mut reader = csv::Reader::from_path(&path).expect("CSV should be readable");
        let header = reader
            .headers()
            .expect("header row should parse")
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        assert_eq!(header, table.header);

        let rows = reader
            .records()
            .map(|record| {
                record
                    .expect("row should parse")
                    .iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        assert_eq!(rows, table.rows);
    }
}
