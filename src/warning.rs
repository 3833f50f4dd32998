#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
    NoTitleAbove,
    EmptyTable,
    WriteFailed,
    NoTablesDetected,
}

/// A non-fatal, per-table or per-write outcome. Collected into the run report
/// so callers can inspect what was skipped without parsing log output.
#[derive(Debug, Clone, PartialEq)]
pub struct RunWarning {
    pub code: WarningCode,
    pub message: String,
    pub page: Option<u32>,
    pub title: Option<String>,
}

impl RunWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            page: None,
            title: None,
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
