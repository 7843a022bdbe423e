//! Card layout in normalized grid units.
//!
//! A card is `CARD_WIDTH` units wide and one unit per row tall, with row 0 at
//! the top. The layout is a flat list of bands, labels and one divider that
//! any drawing backend can paint; text sizes are decided here through a
//! [`TextMeasure`] supplied by the backend.

use crate::theme::{Rgb, Theme};
use crate::types::ClassGroup;

/// Total card width in units.
pub const CARD_WIDTH: f64 = 3.0;

/// Share of the width taken by the left (last name) column.
pub const LEFT_COLUMN_FRACTION: f64 = 2.0 / 5.0;

/// Share of the width taken by the right (first name) column.
pub const RIGHT_COLUMN_FRACTION: f64 = 3.0 / 5.0;

pub const HEADER_FONT_SIZE: u32 = 16;
pub const SUBHEADER_FONT_SIZE: u32 = 12;
pub const DEFAULT_FONT_SIZE: u32 = 12;
pub const MIN_FONT_SIZE: u32 = 8;

/// Texts up to this many characters are never shrunk.
pub const SHRINK_THRESHOLD_CHARS: usize = 22;

/// Maximum rendered width of a student name, in screen pixels.
pub const MAX_TEXT_WIDTH_PX: f64 = 200.0;

pub const LAST_NAME_LABEL: &str = "Last Name";
pub const FIRST_NAME_LABEL: &str = "First Name";

/// Measures rendered text width.
pub trait TextMeasure {
    /// Width in pixels of `text` drawn bold at `font_size` points.
    fn measure_text(&self, text: &str, font_size: u32) -> f64;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, u32) -> f64,
{
    fn measure_text(&self, text: &str, font_size: u32) -> f64 {
        self(text, font_size)
    }
}

/// Auto-shrink policy for student names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontFit {
    pub default_size: u32,
    pub min_size: u32,
    pub max_width_px: f64,
    pub threshold_chars: usize,
}

impl Default for FontFit {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_FONT_SIZE,
            min_size: MIN_FONT_SIZE,
            max_width_px: MAX_TEXT_WIDTH_PX,
            threshold_chars: SHRINK_THRESHOLD_CHARS,
        }
    }
}

impl FontFit {
    /// Largest size in `default_size..=min_size` whose width fits, or the
    /// floor if none does. Short texts skip measuring entirely.
    pub fn size_for(&self, text: &str, measure: &dyn TextMeasure) -> u32 {
        if text.chars().count() <= self.threshold_chars {
            return self.default_size;
        }

        (self.min_size..=self.default_size)
            .rev()
            .find(|&size| measure.measure_text(text, size) <= self.max_width_px)
            .unwrap_or(self.min_size)
    }
}

/// What a horizontal band represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandKind {
    Header,
    SubHeader,
    Student(usize),
}

/// A full-width filled row with a black outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub kind: BandKind,
    pub row: usize,
    pub fill: Rgb,
}

/// Bold text centered on (`x`, `row + 0.5`).
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f64,
    pub row: usize,
    pub size: u32,
}

impl Label {
    /// Vertical center in units from the top.
    pub fn y(&self) -> f64 {
        self.row as f64 + 0.5
    }
}

/// Vertical line separating the two name columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divider {
    pub x: f64,
    pub top_row: usize,
    pub bottom_row: usize,
}

/// Everything needed to paint one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: f64,
    pub left_width: f64,
    pub right_width: f64,
    pub rows: usize,
    pub bands: Vec<Band>,
    pub labels: Vec<Label>,
    pub divider: Divider,
}

impl CardLayout {
    /// Lay out `group`: header, sub-header, then one row per student.
    pub fn build(
        group: &ClassGroup,
        theme: &Theme,
        fit: &FontFit,
        measure: &dyn TextMeasure,
    ) -> Self {
        let rows = group.students.len() + 2;
        let width = CARD_WIDTH;
        let left_width = width * LEFT_COLUMN_FRACTION;
        let right_width = width * RIGHT_COLUMN_FRACTION;
        let left_center = left_width / 2.0;
        let right_center = left_width + right_width / 2.0;

        let mut bands = Vec::with_capacity(rows);
        let mut labels = Vec::with_capacity(rows * 2);

        bands.push(Band {
            kind: BandKind::Header,
            row: 0,
            fill: theme.header,
        });
        labels.push(Label {
            text: group.name.clone(),
            x: width / 2.0,
            row: 0,
            size: HEADER_FONT_SIZE,
        });

        bands.push(Band {
            kind: BandKind::SubHeader,
            row: 1,
            fill: theme.subheader,
        });
        labels.push(Label {
            text: LAST_NAME_LABEL.to_string(),
            x: left_center,
            row: 1,
            size: SUBHEADER_FONT_SIZE,
        });
        labels.push(Label {
            text: FIRST_NAME_LABEL.to_string(),
            x: right_center,
            row: 1,
            size: SUBHEADER_FONT_SIZE,
        });

        for (i, student) in group.students.iter().enumerate() {
            let row = i + 2;
            bands.push(Band {
                kind: BandKind::Student(i),
                row,
                fill: if i % 2 == 0 { Rgb::WHITE } else { theme.alt_row },
            });

            for (text, x) in [
                (&student.last_name, left_center),
                (&student.first_name, right_center),
            ] {
                if text.is_empty() {
                    continue;
                }
                labels.push(Label {
                    text: text.clone(),
                    x,
                    row,
                    size: fit.size_for(text, measure),
                });
            }
        }

        Self {
            width,
            left_width,
            right_width,
            rows,
            bands,
            labels,
            divider: Divider {
                x: left_width,
                top_row: 1,
                bottom_row: rows,
            },
        }
    }
}
