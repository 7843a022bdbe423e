//! Core roster types, column normalization, class grouping, themes and card
//! layout for printable student name cards.

pub mod error;
pub mod layout;
pub mod loader;
pub mod normalize;
pub mod table;
pub mod theme;
pub mod types;

pub use error::{Error, Result};
pub use layout::{CardLayout, FontFit, TextMeasure};
pub use loader::RosterLoader;
pub use table::{CellValue, Record, Sheet};
pub use theme::{get_theme_colors, Rgb, Theme, ThemeRegistry};
pub use types::{ClassGroup, Mode, Student, WorkbookFormat};
