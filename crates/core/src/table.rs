//! Tabular sheet model shared by workbook readers and the roster loader.

use serde::{Deserialize, Serialize};

/// A single cell value as read from a worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Spreadsheet error code such as `#N/A`.
    Error(String),
}

impl CellValue {
    /// Text form of the cell.
    ///
    /// Integral numbers drop their fractional part, so a class stored as `5`
    /// reads back as "5" rather than "5.0".
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Bool(true) => "TRUE".to_string(),
            Self::Bool(false) => "FALSE".to_string(),
            Self::Error(code) => code.clone(),
        }
    }

    /// True when the cell carries no visible text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// True when the cell holds no usable value: blank, or a spreadsheet
    /// error such as `#N/A` left by a failed lookup.
    pub fn is_missing(&self) -> bool {
        self.is_blank() || matches!(self, Self::Error(_))
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A named worksheet: a header row plus data rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name as shown on the workbook tab.
    pub name: String,

    /// Column names from the header row, in order.
    pub columns: Vec<String>,

    /// Data rows; each row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a sheet with the given header and no rows.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(cells);
    }

    /// Rename the column at `index`.
    pub fn rename_column(&mut self, index: usize, name: &str) {
        if let Some(column) = self.columns.get_mut(index) {
            *column = name.to_string();
        }
    }

    /// Row views in order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |cells| Record {
            columns: &self.columns,
            cells,
        })
    }
}

/// A borrowed row with access to its cells by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    cells: &'a [CellValue],
}

impl<'a> Record<'a> {
    /// Create a record view over a header and a row of cells.
    pub fn new(columns: &'a [String], cells: &'a [CellValue]) -> Self {
        Self { columns, cells }
    }

    /// Cell in the first column named exactly `name`.
    pub fn get(&self, name: &str) -> Option<&'a CellValue> {
        self.columns
            .iter()
            .position(|c| c == name)
            .and_then(|idx| self.cells.get(idx))
    }
}

/// Merge single-column sheets side by side into one sheet named "Merged".
///
/// Each input sheet contributes one column named after the sheet (trimmed);
/// shorter columns are padded with empty cells.
pub fn merge_single_column_sheets(sheets: Vec<Sheet>) -> Sheet {
    let columns: Vec<String> = sheets.iter().map(|s| s.name.trim().to_string()).collect();
    let height = sheets.iter().map(|s| s.rows.len()).max().unwrap_or(0);

    let mut merged = Sheet::new("Merged", columns);
    for row_idx in 0..height {
        let cells = sheets
            .iter()
            .map(|s| {
                s.rows
                    .get(row_idx)
                    .and_then(|row| row.first())
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();
        merged.push_row(cells);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_column(name: &str, values: &[&str]) -> Sheet {
        let mut sheet = Sheet::new(name, vec!["Header".to_string()]);
        for v in values {
            sheet.push_row(vec![CellValue::from(*v)]);
        }
        sheet
    }

    #[test]
    fn test_cell_to_text() {
        assert_eq!(CellValue::Empty.to_text(), "");
        assert_eq!(CellValue::Number(5.0).to_text(), "5");
        assert_eq!(CellValue::Number(-12.0).to_text(), "-12");
        assert_eq!(CellValue::Number(2.5).to_text(), "2.5");
        assert_eq!(CellValue::Bool(true).to_text(), "TRUE");
        assert_eq!(CellValue::Error("#N/A".into()).to_text(), "#N/A");
        assert_eq!(CellValue::Text(" 5A ".into()).to_text(), " 5A ");
    }

    #[test]
    fn test_cell_is_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("   ".into()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(!CellValue::Text("x".into()).is_blank());
    }

    #[test]
    fn test_cell_is_missing() {
        assert!(CellValue::Empty.is_missing());
        assert!(CellValue::Text(" ".into()).is_missing());
        assert!(CellValue::Error("#N/A".into()).is_missing());
        assert!(!CellValue::Error("#N/A".into()).is_blank());
        assert!(!CellValue::Number(0.0).is_missing());
    }

    #[test]
    fn test_push_row_pads_and_truncates() {
        let mut sheet = Sheet::new("S", vec!["A".into(), "B".into()]);
        sheet.push_row(vec![CellValue::from("x")]);
        sheet.push_row(vec![
            CellValue::from("1"),
            CellValue::from("2"),
            CellValue::from("3"),
        ]);
        assert_eq!(sheet.rows[0], vec![CellValue::from("x"), CellValue::Empty]);
        assert_eq!(sheet.rows[1].len(), 2);
    }

    #[test]
    fn test_record_lookup_is_exact() {
        let sheet = {
            let mut s = Sheet::new("S", vec!["Stream".into(), "first name".into()]);
            s.push_row(vec![CellValue::from("A"), CellValue::from("Ann")]);
            s
        };
        let record = sheet.records().next().unwrap();
        assert_eq!(record.get("Stream"), Some(&CellValue::from("A")));
        assert!(record.get("First Name").is_none());
        assert!(record.get("stream").is_none());
    }

    #[test]
    fn test_merge_single_column_sheets() {
        let merged = merge_single_column_sheets(vec![
            single_column(" 5A ", &["Smith, John", "Doe, Jane"]),
            single_column("5B", &["Roe, Rick"]),
        ]);

        assert_eq!(merged.name, "Merged");
        assert_eq!(merged.columns, vec!["5A", "5B"]);
        assert_eq!(merged.rows.len(), 2);
        assert_eq!(merged.rows[1][0], CellValue::from("Doe, Jane"));
        assert_eq!(merged.rows[1][1], CellValue::Empty);
    }
}
