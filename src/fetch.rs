use tracing::info;
use url::Url;

use crate::error::ScrapeError;

/// Downloads the PDF with a single blocking GET and buffers the whole body.
pub(crate) fn fetch_pdf_bytes(pdf_url: &str) -> Result<Vec<u8>, ScrapeError> {
    let parsed = Url::parse(pdf_url)
        .map_err(|error| ScrapeError::Fetch(format!("invalid PDF URL '{pdf_url}': {error}")))?;

    let response = reqwest::blocking::get(parsed.clone())
        .map_err(|error| ScrapeError::Fetch(format!("request to '{parsed}' failed: {error}")))?;
    let response = response
        .error_for_status()
        .map_err(|error| ScrapeError::Fetch(format!("PDF request failed: {error}")))?;

    let bytes = response
        .bytes()
        .map_err(|error| ScrapeError::Fetch(format!("failed to read PDF body: {error}")))?;
    if bytes.is_empty() {
        return Err(ScrapeError::Fetch("fetched PDF is empty".to_string()));
    }

    info!(url = %parsed, size = bytes.len(), "PDF downloaded");
    Ok(bytes.to_vec())
}
