//! XLSX (Office Open XML) reader backend for roster loading.
//!
//! Parses .xlsx files, which are ZIP archives of SpreadsheetML documents, into
//! ordered named sheets for the roster loader.

pub mod parser;
pub mod workbook;

pub use parser::XlsxParser;
pub use workbook::{load_classgroups, read_workbook};
