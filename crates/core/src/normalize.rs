//! Header normalization and column resolution for roster sheets.
//!
//! Roster exports spell headers inconsistently ("first name", "FirstName",
//! " First  Name"). Headers are compared by a key that ignores case and all
//! whitespace, against an explicit alias table per canonical field. The
//! mapping is resolved once per sheet and then applied by renaming the matched
//! columns to their canonical names.

use crate::table::{CellValue, Sheet};
use crate::types::{Mode, DEFAULT_STREAM};
use crate::{Error, Result};
use unicode_normalization::UnicodeNormalization;

/// Canonical column names.
pub const CLASS: &str = "Class";
pub const STREAM: &str = "Stream";
pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const STUDENT_NAME: &str = "Student Name";

/// Reduce a header to its comparison key: compatibility-normalized,
/// lower-cased, with every whitespace character removed.
pub fn normalize_header(text: &str) -> String {
    text.nfkc()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Roster fields that are looked up by header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Class,
    Stream,
    FirstName,
    LastName,
    StudentName,
}

impl Field {
    /// Name the matched column is renamed to.
    pub fn canonical(&self) -> &'static str {
        match self {
            Field::Class => CLASS,
            Field::Stream => STREAM,
            Field::FirstName => FIRST_NAME,
            Field::LastName => LAST_NAME,
            Field::StudentName => STUDENT_NAME,
        }
    }

    /// Header spellings accepted for this field, in preference order.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Class => &["Class"],
            Field::Stream => &["Stream"],
            Field::FirstName => &["First Name"],
            Field::LastName => &["Last Name"],
            Field::StudentName => &["Student Name", "Name"],
        }
    }

    /// Grouping field for a mode.
    pub fn group_for(mode: Mode) -> Self {
        match mode {
            Mode::EnglishProgram => Field::Class,
            Mode::Fs => Field::Stream,
        }
    }
}

/// Precomputed comparison keys for a sheet's header row.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    keys: Vec<String>,
}

impl HeaderIndex {
    pub fn new(columns: &[String]) -> Self {
        Self {
            keys: columns.iter().map(|c| normalize_header(c)).collect(),
        }
    }

    /// First column matching `target` after normalization.
    pub fn find_column(&self, target: &str) -> Option<usize> {
        let target = normalize_header(target);
        self.keys.iter().position(|k| *k == target)
    }

    /// First column matching the field, trying aliases in preference order.
    pub fn find(&self, field: Field) -> Option<usize> {
        field
            .aliases()
            .iter()
            .find_map(|alias| self.find_column(alias))
    }
}

/// Where the name data lives in a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameColumns {
    /// Separate first and last name columns.
    Split { first: usize, last: usize },
    /// One "Last, First" column.
    Combined(usize),
}

/// Resolved column positions for one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub group_field: Field,
    pub group: usize,
    pub names: NameColumns,
}

impl ColumnMapping {
    /// Resolve the grouping and name columns of `sheet` for `mode`.
    pub fn resolve(sheet: &Sheet, mode: Mode) -> Result<Self> {
        let index = HeaderIndex::new(&sheet.columns);
        let group_field = Field::group_for(mode);

        let group = index.find(group_field).ok_or_else(|| {
            Error::sheet(
                &sheet.name,
                format!(
                    "Column similar to '{}' not found in the Excel file. Try to change mode",
                    group_field.canonical()
                ),
            )
        })?;

        let names = match (index.find(Field::FirstName), index.find(Field::LastName)) {
            (Some(first), Some(last)) => NameColumns::Split { first, last },
            _ => {
                let combined = index.find(Field::StudentName).ok_or_else(|| {
                    Error::sheet(
                        &sheet.name,
                        "Missing name fields: expected either 'First Name'/'Last Name' or 'Student Name' with comma.",
                    )
                })?;
                NameColumns::Combined(combined)
            }
        };

        Ok(Self {
            group_field,
            group,
            names,
        })
    }

    /// Rename matched columns to their canonical names and fill missing
    /// grouping cells with the default stream.
    pub fn apply(&self, sheet: &mut Sheet) {
        match self.names {
            NameColumns::Split { first, last } => {
                sheet.rename_column(first, FIRST_NAME);
                sheet.rename_column(last, LAST_NAME);
            }
            NameColumns::Combined(idx) => sheet.rename_column(idx, STUDENT_NAME),
        }
        sheet.rename_column(self.group, self.group_field.canonical());

        for row in &mut sheet.rows {
            if let Some(cell) = row.get_mut(self.group) {
                if cell.is_missing() {
                    *cell = CellValue::Text(DEFAULT_STREAM.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(columns: &[&str]) -> Sheet {
        Sheet::new("2024", columns.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("First Name"), "firstname");
        assert_eq!(normalize_header("  FIRST\tname "), "firstname");
        assert_eq!(normalize_header("FirstName"), "firstname");
        assert_eq!(normalize_header("First\u{00A0}Name"), "firstname");
        // Full-width letters from CJK input methods
        assert_eq!(normalize_header("Ｃｌａｓｓ"), "class");
    }

    #[test]
    fn test_find_column_first_match_wins() {
        let columns: Vec<String> = vec!["class".into(), "CLASS".into()];
        let index = HeaderIndex::new(&columns);
        assert_eq!(index.find_column("Class"), Some(0));
        assert_eq!(index.find_column("Stream"), None);
    }

    #[test]
    fn test_student_name_preferred_over_name() {
        let columns: Vec<String> = vec!["Name".into(), "student name".into()];
        let index = HeaderIndex::new(&columns);
        assert_eq!(index.find(Field::StudentName), Some(1));

        let columns: Vec<String> = vec!["Stream".into(), " name".into()];
        let index = HeaderIndex::new(&columns);
        assert_eq!(index.find(Field::StudentName), Some(1));
    }

    #[test]
    fn test_resolve_split_names() {
        let s = sheet(&["class ", "first name", "LastName"]);
        let mapping = ColumnMapping::resolve(&s, Mode::EnglishProgram).unwrap();
        assert_eq!(mapping.group, 0);
        assert_eq!(mapping.group_field, Field::Class);
        assert_eq!(mapping.names, NameColumns::Split { first: 1, last: 2 });
    }

    #[test]
    fn test_resolve_falls_back_to_combined_when_one_half_missing() {
        let s = sheet(&["Stream", "First Name", "Name"]);
        let mapping = ColumnMapping::resolve(&s, Mode::Fs).unwrap();
        assert_eq!(mapping.names, NameColumns::Combined(2));
    }

    #[test]
    fn test_resolve_missing_group_column_suggests_mode() {
        let s = sheet(&["Class", "First Name", "Last Name"]);
        let err = ColumnMapping::resolve(&s, Mode::Fs).unwrap_err();
        match err {
            Error::SheetNormalization { sheet, message } => {
                assert_eq!(sheet, "2024");
                assert!(message.contains("'Stream'"));
                assert!(message.contains("change mode"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_missing_names() {
        let s = sheet(&["Class", "First Name", "Age"]);
        let err = ColumnMapping::resolve(&s, Mode::EnglishProgram).unwrap_err();
        assert!(err.to_string().contains("Missing name fields"));
    }

    #[test]
    fn test_apply_renames_and_fills_default() {
        let mut s = sheet(&[" stream", "FIRST NAME", "last name"]);
        s.push_row(vec![
            CellValue::Empty,
            CellValue::from("Ann"),
            CellValue::from("Lee"),
        ]);
        s.push_row(vec![
            CellValue::from("   "),
            CellValue::from("Bo"),
            CellValue::from("Wu"),
        ]);

        let mapping = ColumnMapping::resolve(&s, Mode::Fs).unwrap();
        mapping.apply(&mut s);

        assert_eq!(s.columns, vec![STREAM, FIRST_NAME, LAST_NAME]);
        assert_eq!(s.rows[0][0], CellValue::Text(DEFAULT_STREAM.into()));
        assert_eq!(s.rows[1][0], CellValue::Text(DEFAULT_STREAM.into()));
    }

    #[test]
    fn test_apply_replaces_error_group_cells() {
        let mut s = sheet(&["Class", "Student Name"]);
        s.push_row(vec![CellValue::Error("#N/A".into()), CellValue::from("Lee, Ann")]);

        let mapping = ColumnMapping::resolve(&s, Mode::EnglishProgram).unwrap();
        mapping.apply(&mut s);

        assert_eq!(s.rows[0][0], CellValue::Text(DEFAULT_STREAM.into()));
        assert_eq!(s.rows[0][1], CellValue::from("Lee, Ann"));
    }
}
