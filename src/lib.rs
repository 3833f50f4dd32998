mod config;
mod csv_out;
mod error;
mod fetch;
mod model;
mod pdf_text;
mod table_detect;
mod table_parse;
mod titles;
mod warning;

use std::path::Path;

use indexmap::IndexMap;
use lopdf::Document;
use regex::Regex;
use tracing::{error, info};

pub use crate::config::{ColumnStrategy, Config, TableSettings};
pub use crate::csv_out::slug_filename;
pub use crate::error::ScrapeError;
pub use crate::model::TabularResult;
pub use crate::warning::{RunWarning, WarningCode};

use crate::model::PageLines;

/// Outcome of processing one document: the titled tables in discovery order
/// plus every non-fatal per-table outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub tables: IndexMap<String, TabularResult>,
    pub warnings: Vec<RunWarning>,
}

fn process_page(
    page: &PageLines,
    pattern: &Regex,
    settings: &TableSettings,
    warnings: &mut Vec<RunWarning>,
) -> Vec<(String, TabularResult)> {
    let titles = titles::find_titles(page, pattern);
    let detected = table_detect::detect_tables(page, settings);

    let mut out = Vec::new();
    for table in detected {
        let Some(title) = titles::associate(&titles, table.top) else {
            warnings.push(
                RunWarning::new(
                    WarningCode::NoTitleAbove,
                    "no title above the table; table skipped",
                )
                .with_page(page.page_number),
            );
            continue;
        };

        match TabularResult::from_grid(&table.rows) {
            Some(result) => out.push((title.text.clone(), result)),
            None => warnings.push(
                RunWarning::new(
                    WarningCode::EmptyTable,
                    "table grid has no data rows below its header; table skipped",
                )
                .with_page(page.page_number)
                .with_title(title.text.clone()),
            ),
        }
    }

    out
}

/// Processes an in-memory PDF: extracts positioned lines per page, detects
/// tables, associates each with the nearest title above it, and merges the
/// per-page results with last-write-wins on duplicate titles.
pub fn process_bytes(
    bytes: &[u8],
    pattern: &Regex,
    settings: &TableSettings,
) -> Result<RunReport, ScrapeError> {
    let document = Document::load_mem(bytes)?;
    let pages = pdf_text::extract_page_lines(&document);

    let mut tables = IndexMap::new();
    let mut warnings = Vec::new();
    for page in &pages {
        for (title, table) in process_page(page, pattern, settings, &mut warnings) {
            info!(
                page = page.page_number,
                title = %title,
                rows = table.rows.len(),
                "table extracted"
            );
            tables.insert(title, table);
        }
    }

    if tables.is_empty() {
        warnings.push(RunWarning::new(
            WarningCode::NoTablesDetected,
            "no titled tables were detected in the document",
        ));
    }

    Ok(RunReport { tables, warnings })
}

/// Writes every table of the report under `<results_path>/results/`. Write
/// failures are logged and returned as warnings; the remaining tables are
/// still written.
pub fn write_results(report: &RunReport, results_path: &Path) -> (usize, Vec<RunWarning>) {
    let mut written = 0_usize;
    let mut warnings = Vec::new();

    for (title, table) in &report.tables {
        match csv_out::write_table(results_path, title, table) {
            Ok(path) => {
                info!(title = %title, path = %path.display(), "table saved");
                written += 1;
            }
            Err(write_error) => {
                error!(title = %title, "failed to save table: {write_error}");
                warnings.push(
                    RunWarning::new(WarningCode::WriteFailed, write_error.to_string())
                        .with_title(title.clone()),
                );
            }
        }
    }

    (written, warnings)
}

/// Drives one run: holds the configuration, the compiled title pattern, and
/// the fetched document bytes.
pub struct Scraper {
    config: Config,
    title_pattern: Regex,
    pdf_bytes: Option<Vec<u8>>,
}

impl Scraper {
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let title_pattern = config.compiled_pattern()?;
        Ok(Self {
            config,
            title_pattern,
            pdf_bytes: None,
        })
    }

    /// Downloads the configured PDF into memory.
    pub fn fetch(&mut self) -> Result<(), ScrapeError> {
        self.pdf_bytes = Some(fetch::fetch_pdf_bytes(&self.config.pdf_url)?);
        Ok(())
    }

    /// Extracts all titled tables from the fetched document. Fails with
    /// [`ScrapeError::DocumentNotLoaded`] when called before [`Self::fetch`].
    pub fn process(&self) -> Result<RunReport, ScrapeError> {
        let bytes = self
            .pdf_bytes
            .as_deref()
            .ok_or(ScrapeError::DocumentNotLoaded)?;
        process_bytes(bytes, &self.title_pattern, &self.config.table_settings)
    }
}
