use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::error::ScrapeError;

/// Splitting strategy for turning a text line into table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnStrategy {
    /// Split on tabs and runs of two or more spaces.
    #[default]
    Whitespace,
    /// Split on every whitespace gap.
    SingleSpace,
    /// Whitespace first, falling back to single-space splitting for lines
    /// that look columnar but use single-space separators.
    Auto,
}

/// Table-detection settings, passed through from the `table_settings` mapping
/// in the configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableSettings {
    pub column_strategy: ColumnStrategy,
    /// Minimum cells per line for the line to count as a table row.
    pub min_cols: usize,
    /// Minimum rows for a candidate group to count as a table.
    pub min_rows: usize,
    /// Maximum vertical distance in points between consecutive rows of the
    /// same table; a larger gap starts a new table.
    pub row_gap_tolerance: f64,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            column_strategy: ColumnStrategy::default(),
            min_cols: 2,
            min_rows: 2,
            row_gap_tolerance: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub pdf_url: String,
    pub table_settings: TableSettings,
    pub pattern: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ScrapeError> {
        let raw = fs::read_to_string(path).map_err(|source| ScrapeError::ConfigNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        if self.pdf_url.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig(
                "pdf_url must not be empty".to_string(),
            ));
        }
        if self.pattern.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig(
                "pattern must not be empty".to_string(),
            ));
        }
        self.compiled_pattern().map(|_| ())
    }

    /// Compiles the title pattern, rejecting invalid regex syntax before any
    /// network traffic happens.
    pub fn compiled_pattern(&self) -> Result<Regex, ScrapeError> {
        Regex::new(&self.pattern)
            .map_err(|error| ScrapeError::InvalidConfig(format!("invalid title pattern: {error}")))
    }
}
