//! Error types for roster loading and card rendering.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a roster or rendering its cards.
#[derive(Error, Debug)]
pub enum Error {
    /// The workbook could not be opened, parsed, or is not a supported format.
    #[error("Failed to load Excel file: {0}")]
    Load(String),

    /// A sheet lacks a resolvable grouping or name column.
    #[error("{message}")]
    SheetNormalization { sheet: String, message: String },

    /// One or more sheets failed; each entry is already labeled with its sheet.
    #[error("Some sheets failed to process:\n{}", .0.join("\n"))]
    SheetsFailed(Vec<String>),

    /// A row could not be turned into a student.
    #[error("Unable to construct Student: {0}")]
    RowConversion(String),

    /// Unknown theme name.
    #[error("Unsupported theme: {0}")]
    Theme(String),

    /// Invalid theme configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// SVG construction or rasterization failed.
    #[error("Render error: {0}")]
    Render(String),

    /// Failed to create or write an output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a sheet normalization error.
    pub fn sheet(sheet: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SheetNormalization {
            sheet: sheet.into(),
            message: message.into(),
        }
    }
}
