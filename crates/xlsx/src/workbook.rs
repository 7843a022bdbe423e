//! Opening roster workbooks from disk.

use crate::parser::XlsxParser;
use roster_core::{ClassGroup, Error, Mode, Result, RosterLoader, Sheet, WorkbookFormat};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read every sheet of the workbook at `path`.
///
/// The format is detected from the file header, falling back to the
/// extension. Legacy binary workbooks are rejected.
pub fn read_workbook(path: impl AsRef<Path>) -> Result<Vec<Sheet>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::Load(format!("Failed to open {}: {}", path.display(), e)))?;
    let mut reader = BufReader::new(file);

    let mut magic = Vec::with_capacity(8);
    reader
        .by_ref()
        .take(8)
        .read_to_end(&mut magic)
        .map_err(|e| Error::Load(format!("Failed to read file header: {}", e)))?;

    let format = WorkbookFormat::from_magic(&magic)
        .or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .and_then(WorkbookFormat::from_extension)
        })
        .ok_or_else(|| Error::Load(format!("{} is not an Excel workbook", path.display())))?;

    match format {
        WorkbookFormat::Xlsx => {
            log::debug!("Parsing {} as XLSX", path.display());
            // Re-open so the ZIP reader sees the file from the start
            let file = File::open(path)
                .map_err(|e| Error::Load(format!("Failed to open {}: {}", path.display(), e)))?;
            XlsxParser::new().parse(BufReader::new(file))
        }
        WorkbookFormat::Xls => Err(Error::Load(
            "legacy .xls workbooks are not supported; save as .xlsx".to_string(),
        )),
    }
}

/// Load a roster workbook and split it into padded class groups.
pub fn load_classgroups(
    path: impl AsRef<Path>,
    mode: Mode,
    students_per_card: usize,
) -> Result<Vec<ClassGroup>> {
    let sheets = read_workbook(path)?;
    RosterLoader::new(mode)
        .with_students_per_card(students_per_card)
        .load_sheets(sheets)
}
