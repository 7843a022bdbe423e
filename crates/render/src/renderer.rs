//! Rendering class groups to PNG card files.

use crate::fonts::{font_database, svg_options, SvgTextMeasure};
use crate::output::{card_output_path, write_atomically};
use crate::raster::{rasterize, OUTPUT_DPI};
use crate::svg::{build_svg, Geometry};
use resvg::usvg;
use roster_core::{CardLayout, ClassGroup, FontFit, Result, Theme, ThemeRegistry};
use std::fs;
use std::path::{Path, PathBuf};

/// Renders class groups as name cards.
///
/// Holds the loaded font database, so one renderer should be reused across
/// all cards of a run.
pub struct CardRenderer {
    themes: ThemeRegistry,
    options: usvg::Options<'static>,
    geometry: Geometry,
    fit: FontFit,
    dpi: f64,
}

impl CardRenderer {
    /// Renderer with the built-in themes and system fonts.
    pub fn new() -> Result<Self> {
        Self::with_font_files(&[])
    }

    /// Renderer that also loads `font_files`; the first one becomes the card
    /// font.
    pub fn with_font_files(font_files: &[PathBuf]) -> Result<Self> {
        let db = font_database(font_files)?;
        Ok(Self {
            themes: ThemeRegistry::builtin(),
            options: svg_options(db),
            geometry: Geometry::default(),
            fit: FontFit::default(),
            dpi: OUTPUT_DPI,
        })
    }

    pub fn with_themes(mut self, themes: ThemeRegistry) -> Self {
        self.themes = themes;
        self
    }

    /// Compute the card layout for `group`.
    pub fn layout(&self, group: &ClassGroup, theme: &Theme) -> CardLayout {
        let measure = SvgTextMeasure::new(&self.options);
        CardLayout::build(group, theme, &self.fit, &measure)
    }

    /// The card as an SVG document.
    pub fn render_svg(&self, group: &ClassGroup, theme: &Theme) -> String {
        build_svg(&self.layout(group, theme), &self.geometry)
    }

    /// The card as PNG bytes.
    pub fn render_png(&self, group: &ClassGroup, theme: &Theme) -> Result<Vec<u8>> {
        let layout = self.layout(group, theme);
        let svg = build_svg(&layout, &self.geometry);
        let size = self.geometry.pixel_size(&layout, self.dpi);
        rasterize(&svg, &self.options, size, self.dpi)
    }

    /// Render `group` with the named theme and write it to
    /// `<output_dir>/<cohort>/<name>/<name>_<index>.png`.
    ///
    /// Unknown themes fail before anything touches the filesystem.
    pub fn render_class_card(
        &self,
        group: &ClassGroup,
        output_dir: &Path,
        card_index: usize,
        theme_name: &str,
    ) -> Result<PathBuf> {
        let theme = self.themes.get(theme_name)?;
        let png = self.render_png(group, &theme)?;

        let path = card_output_path(output_dir, &group.cohort, &group.name, card_index);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_atomically(&path, &png)?;

        log::debug!("Wrote {} ({} bytes)", path.display(), png.len());
        Ok(path)
    }
}

/// Render one card with the built-in themes and system fonts.
///
/// Loads fonts on every call; use [`CardRenderer`] for batches.
pub fn render_class_card(
    group: &ClassGroup,
    output_base_dir: impl AsRef<Path>,
    card_index: usize,
    theme: &str,
) -> Result<PathBuf> {
    CardRenderer::new()?.render_class_card(group, output_base_dir.as_ref(), card_index, theme)
}
