//! Roster loading: sheet normalization, class grouping and card chunking.

use crate::normalize::{ColumnMapping, CLASS, FIRST_NAME, LAST_NAME, STREAM, STUDENT_NAME};
use crate::table::{merge_single_column_sheets, Record, Sheet};
use crate::types::{ClassGroup, Mode, Student, DEFAULT_STREAM, DEFAULT_STUDENTS_PER_CARD};
use crate::{Error, Result};
use std::collections::HashMap;

/// Turns parsed sheets into fixed-size class groups.
#[derive(Debug, Clone)]
pub struct RosterLoader {
    mode: Mode,
    students_per_card: usize,
}

impl RosterLoader {
    /// Create a loader for `mode` with the default card size.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            students_per_card: DEFAULT_STUDENTS_PER_CARD,
        }
    }

    /// Set the number of student rows per card.
    pub fn with_students_per_card(mut self, students_per_card: usize) -> Self {
        self.students_per_card = students_per_card;
        self
    }

    /// Load every sheet of a workbook.
    ///
    /// Sheets are processed independently. If any sheet fails, the whole load
    /// fails with every sheet's message; otherwise the groups of all sheets are
    /// returned in sheet order, then group discovery order.
    pub fn load_sheets(&self, sheets: Vec<Sheet>) -> Result<Vec<ClassGroup>> {
        if self.students_per_card == 0 {
            return Err(Error::Load(
                "students per card must be a positive number".to_string(),
            ));
        }

        let sheets = prepare_sheets(sheets)?;
        let mut all_groups = Vec::new();
        let mut errors = Vec::new();

        for sheet in sheets {
            let sheet_name = sheet.name.clone();
            match self.load_sheet(sheet) {
                Ok(groups) => {
                    log::debug!("Sheet '{}': {} card(s)", sheet_name, groups.len());
                    all_groups.extend(groups);
                }
                Err(e) => {
                    log::warn!("Sheet '{}' failed: {}", sheet_name, e);
                    errors.push(format!("Sheet '{}': {}", sheet_name, e));
                }
            }
        }

        if !errors.is_empty() {
            return Err(Error::SheetsFailed(errors));
        }

        log::info!("Loaded {} card(s) in {} mode", all_groups.len(), self.mode.label());
        Ok(all_groups)
    }

    /// Normalize one sheet and split it into class groups.
    pub fn load_sheet(&self, mut sheet: Sheet) -> Result<Vec<ClassGroup>> {
        let mapping = ColumnMapping::resolve(&sheet, self.mode)?;
        log::debug!(
            "Sheet '{}': group column {:?} at {}, names {:?}",
            sheet.name,
            mapping.group_field,
            mapping.group,
            mapping.names
        );
        mapping.apply(&mut sheet);

        // Distinct group values in first-seen order.
        let mut order: Vec<(String, Vec<Student>)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (record, cells) in sheet.records().zip(&sheet.rows) {
            let value = cells
                .get(mapping.group)
                .map(|c| c.to_text().trim().to_string())
                .unwrap_or_default();
            let student = row_to_student(&record)?;

            let slot = *positions.entry(value.clone()).or_insert_with(|| {
                order.push((value, Vec::new()));
                order.len() - 1
            });
            order[slot].1.push(student);
        }

        let mut groups = Vec::new();
        for (name, students) in order {
            groups.extend(chunk_students(
                &name,
                &sheet.name,
                students,
                self.students_per_card,
            ));
        }

        Ok(groups)
    }
}

/// Apply the single-column recovery path.
///
/// When every sheet has exactly one column, the workbook is treated as one
/// class per sheet and merged into a single "Merged" sheet whose columns are
/// the sheet names. Any other shape is returned unchanged.
pub fn prepare_sheets(sheets: Vec<Sheet>) -> Result<Vec<Sheet>> {
    if sheets.is_empty() {
        return Err(Error::Load("workbook contains no sheets".to_string()));
    }

    if sheets.iter().all(|s| s.columns.len() == 1) {
        log::warn!(
            "All {} sheet(s) have a single column; merging them into one sheet",
            sheets.len()
        );
        return Ok(vec![merge_single_column_sheets(sheets)]);
    }

    Ok(sheets)
}

/// Split a class's students into padded cards of `per_card` rows.
pub fn chunk_students(
    name: &str,
    cohort: &str,
    students: Vec<Student>,
    per_card: usize,
) -> Vec<ClassGroup> {
    students
        .chunks(per_card.max(1))
        .map(|chunk| {
            let mut group = ClassGroup::new(name, cohort);
            group.students = chunk.to_vec();
            group.pad_students(per_card);
            group
        })
        .collect()
}

/// Convert a normalized row into a student.
///
/// Uses "First Name"/"Last Name" when present, otherwise splits "Student Name"
/// on its first comma into last and first name.
pub fn row_to_student(record: &Record<'_>) -> Result<Student> {
    let stream = row_stream(record);

    if let (Some(first), Some(last)) = (record.get(FIRST_NAME), record.get(LAST_NAME)) {
        return Ok(Student::with_stream(
            first.to_text().trim(),
            last.to_text().trim(),
            stream,
        ));
    }

    if let Some(name) = record.get(STUDENT_NAME) {
        let (last, first) = split_combined_name(&name.to_text());
        return Ok(Student::with_stream(first, last, stream));
    }

    Err(Error::RowConversion("missing name fields.".to_string()))
}

/// Split "Last, First" on the first comma. Without a comma the whole value is
/// the last name.
pub fn split_combined_name(value: &str) -> (String, String) {
    match value.split_once(',') {
        Some((last, first)) => (last.trim().to_string(), first.trim().to_string()),
        None => (value.trim().to_string(), String::new()),
    }
}

fn row_stream(record: &Record<'_>) -> String {
    record
        .get(STREAM)
        .or_else(|| record.get(CLASS))
        .filter(|c| !c.is_missing())
        .map(|c| c.to_text().trim().to_string())
        .unwrap_or_else(|| DEFAULT_STREAM.to_string())
}
