//! Font discovery and text measurement through the SVG text engine.

use crate::svg::text_element;
use resvg::usvg::{self, fontdb, Node};
use roster_core::{Error, Result, TextMeasure};
use std::path::PathBuf;
use std::sync::Arc;

/// Sans-serif families tried in order when no font file is given.
const PREFERRED_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Arial",
    "Helvetica",
    "Noto Sans",
];

/// Screen resolution text widths are reported in.
pub const MEASURE_DPI: f64 = 100.0;

/// Build a font database from system fonts plus `font_files`.
///
/// The generic `sans-serif` family is pointed at the first family of the
/// first font file, or else at the first preferred family installed.
pub fn font_database(font_files: &[PathBuf]) -> Result<fontdb::Database> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let system_faces = db.len();

    for path in font_files {
        db.load_font_file(path).map_err(|e| {
            Error::Config(format!("Failed to load font {}: {}", path.display(), e))
        })?;
    }

    let family = db
        .faces()
        .nth(system_faces)
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
        .or_else(|| {
            PREFERRED_FAMILIES
                .iter()
                .find(|name| has_family(&db, name))
                .map(|name| name.to_string())
        })
        .or_else(|| {
            db.faces()
                .next()
                .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
        });

    match family {
        Some(name) => {
            log::debug!("Using '{}' for sans-serif ({} faces)", name, db.len());
            db.set_sans_serif_family(name);
        }
        None => log::warn!("No fonts found; card text will not be drawn"),
    }

    Ok(db)
}

fn has_family(db: &fontdb::Database, name: &str) -> bool {
    db.faces()
        .any(|face| face.families.iter().any(|(family, _)| family == name))
}

/// SVG parsing options sharing one font database.
pub fn svg_options(db: fontdb::Database) -> usvg::Options<'static> {
    let mut options = usvg::Options::default();
    options.fontdb = Arc::new(db);
    options
}

/// Measures text by laying it out with the same engine that rasterizes cards.
pub struct SvgTextMeasure<'a> {
    options: &'a usvg::Options<'static>,
    dpi: f64,
}

impl<'a> SvgTextMeasure<'a> {
    pub fn new(options: &'a usvg::Options<'static>) -> Self {
        Self {
            options,
            dpi: MEASURE_DPI,
        }
    }

    /// Width of the laid-out text in points, or 0 if nothing could be shaped.
    pub fn width_pt(&self, text: &str, font_size: u32) -> f64 {
        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="4000" height="200">{}</svg>"#,
            text_element(text, 0.0, 100.0, font_size, false)
        );

        match usvg::Tree::from_str(&svg, self.options) {
            Ok(tree) => text_width(tree.root()).unwrap_or(0.0),
            Err(e) => {
                log::warn!("Failed to measure '{}': {}", text, e);
                0.0
            }
        }
    }
}

impl TextMeasure for SvgTextMeasure<'_> {
    fn measure_text(&self, text: &str, font_size: u32) -> f64 {
        self.width_pt(text, font_size) * self.dpi / 72.0
    }
}

/// Width of the first text node under `group`.
fn text_width(group: &usvg::Group) -> Option<f64> {
    group.children().iter().find_map(|node| match node {
        Node::Text(text) => Some(text.bounding_box().width() as f64),
        Node::Group(child) => text_width(child),
        _ => None,
    })
}
