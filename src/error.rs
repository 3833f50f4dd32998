use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("configuration file not found at {}: {source}", path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse YAML configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to fetch PDF: {0}")]
    Fetch(String),

    #[error("PDF not loaded; fetch the document before processing it")]
    DocumentNotLoaded,

    #[error("failed to open PDF document: {0}")]
    DocumentProcess(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}
