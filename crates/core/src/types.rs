//! Domain types for roster records and card groups.

use serde::{Deserialize, Serialize};

/// Stream value used when a row carries none.
pub const DEFAULT_STREAM: &str = "Default";

/// Default number of student rows on one card.
pub const DEFAULT_STUDENTS_PER_CARD: usize = 15;

/// A single student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub first_name: String,
    pub last_name: String,
    pub stream: String,
}

impl Student {
    /// Create a student with the default stream.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::with_stream(first_name, last_name, DEFAULT_STREAM)
    }

    /// Create a student belonging to the given stream.
    pub fn with_stream(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        stream: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            stream: stream.into(),
        }
    }

    /// Blank row used to fill a card up to its fixed size.
    pub fn blank(stream: impl Into<String>) -> Self {
        Self::with_stream("", "", stream)
    }

    /// "Last, First" display form.
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// True for padding rows.
    pub fn is_blank(&self) -> bool {
        self.first_name.is_empty() && self.last_name.is_empty()
    }
}

/// One card's worth of students from a single class or stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    /// Class or stream identifier shown in the card header.
    pub name: String,

    /// Sheet the students came from.
    pub cohort: String,

    /// Students in original row order.
    pub students: Vec<Student>,
}

impl ClassGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>, cohort: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cohort: cohort.into(),
            students: Vec::new(),
        }
    }

    /// Add a student to the end of the group.
    pub fn add_student(&mut self, student: Student) {
        self.students.push(student);
    }

    /// Append blank students until the group holds `target_count` rows.
    ///
    /// Never removes students from a group that is already at or above the target.
    pub fn pad_students(&mut self, target_count: usize) {
        while self.students.len() < target_count {
            self.students.push(Student::blank(self.name.clone()));
        }
    }

    /// Students that came from the roster, excluding padding.
    pub fn real_students(&self) -> impl Iterator<Item = &Student> {
        self.students.iter().filter(|s| !s.is_blank())
    }
}

/// Which roster layout the workbook follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Students are grouped by a "Class" column.
    EnglishProgram,
    /// Students are grouped by a "Stream" column.
    Fs,
}

impl Mode {
    /// Parse a mode label. Anything other than "English Program" behaves like FS.
    pub fn from_label(label: &str) -> Self {
        if label == "English Program" {
            Self::EnglishProgram
        } else {
            Self::Fs
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EnglishProgram => "English Program",
            Self::Fs => "FS",
        }
    }

    /// Canonical name of the column students are grouped by.
    pub fn group_column(&self) -> &'static str {
        match self {
            Self::EnglishProgram => "Class",
            Self::Fs => "Stream",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

/// The container format of a roster workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkbookFormat {
    /// Modern XLSX (Office Open XML).
    Xlsx,
    /// Legacy XLS (OLE/CFB binary).
    Xls,
}

impl WorkbookFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // XLSX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Xlsx);
        }

        // XLS is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::Xls);
        }

        None
    }
}
