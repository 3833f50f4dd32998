/// One line of page text with its top coordinate in points, measured from the
/// top edge of the page (increasing downward).
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLines {
    pub page_number: u32,
    pub lines: Vec<TextLine>,
}

/// A fragment of page text matching the configured title pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch {
    pub text: String,
    pub top: f64,
}

/// A detected table: its cell grid plus the top coordinate of its first row.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedTable {
    pub rows: Vec<Vec<String>>,
    pub top: f64,
}

/// Header + data rows, ready to be written out as one CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularResult {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularResult {
    /// Builds a result from a raw cell grid. The first row becomes the header
    /// and every data row is resized to the header width. Returns `None` when
    /// the grid has no data rows below its header.
    pub(crate) fn from_grid(grid: &[Vec<String>]) -> Option<Self> {
        let (header, data) = grid.split_first()?;
        if header.is_empty() || data.is_empty() {
            return None;
        }

        let width = header.len();
        let rows = data
            .iter()
            .map(|row| {
                let mut out = row.clone();
                out.resize(width, String::new());
                out
            })
            .collect();

        Some(Self {
            header: header.clone(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TabularResult;

    #[test]
    fn first_row_becomes_header_and_rows_are_padded() {
        let grid = vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["1".to_string()],
            vec!["2".to_string(), "3".to_string(), "extra".to_string()],
        ];

        let result = TabularResult::from_grid(&grid).expect("grid should build");
        assert_eq!(result.header, vec!["A", "B"]);
        assert_eq!(result.rows[0], vec!["1", ""]);
        assert_eq!(result.rows[1], vec!["2", "3"]);
    }

    #[test]
    fn header_only_grid_yields_none() {
        let grid = vec![vec!["A".to_string(), "B".to_string()]];
        assert!(TabularResult::from_grid(&grid).is_none());
    }
}
