//! SVG drawing of a card layout.
//!
//! SVG user units are points. The default geometry mirrors a 6 inch wide
//! figure with half an inch per row, minus the usual plot margins.

use roster_core::layout::CardLayout;
use roster_core::Rgb;
use std::fmt::Write;

/// Width of one layout unit, in points.
pub const UNIT_WIDTH_PT: f64 = 111.6;

/// Height of one card row, in points.
pub const ROW_HEIGHT_PT: f64 = 27.72;

/// Outline and divider width, in points.
pub const STROKE_WIDTH_PT: f64 = 1.0;

/// Font family requested for all card text.
pub const FONT_FAMILY: &str = "sans-serif";

/// Mapping from layout units to points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub unit_width: f64,
    pub row_height: f64,
    pub stroke_width: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            unit_width: UNIT_WIDTH_PT,
            row_height: ROW_HEIGHT_PT,
            stroke_width: STROKE_WIDTH_PT,
        }
    }
}

impl Geometry {
    /// Margin around the grid so outer strokes are not clipped.
    pub fn padding(&self) -> f64 {
        self.stroke_width
    }

    /// Canvas size in points, cropped to the grid plus its outline.
    pub fn canvas_size(&self, layout: &CardLayout) -> (f64, f64) {
        (
            layout.width * self.unit_width + 2.0 * self.padding(),
            layout.rows as f64 * self.row_height + 2.0 * self.padding(),
        )
    }

    /// Canvas size in whole pixels at `dpi`.
    pub fn pixel_size(&self, layout: &CardLayout, dpi: f64) -> (u32, u32) {
        let (w, h) = self.canvas_size(layout);
        let scale = dpi / 72.0;
        ((w * scale).ceil() as u32, (h * scale).ceil() as u32)
    }

    fn x(&self, units: f64) -> f64 {
        self.padding() + units * self.unit_width
    }

    fn y(&self, rows: f64) -> f64 {
        self.padding() + rows * self.row_height
    }
}

/// Render a layout as a standalone SVG document.
pub fn build_svg(layout: &CardLayout, geometry: &Geometry) -> String {
    let (width, height) = geometry.canvas_size(layout);
    let stroke = geometry.stroke_width;
    let mut s = String::with_capacity(256 + layout.bands.len() * 200);

    let _ = writeln!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}" height="{h:.2}" viewBox="0 0 {w:.2} {h:.2}">"#,
        w = width,
        h = height
    );

    for band in &layout.bands {
        let _ = writeln!(
            s,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            geometry.x(0.0),
            geometry.y(band.row as f64),
            layout.width * geometry.unit_width,
            geometry.row_height,
            band.fill,
            Rgb::BLACK,
            stroke
        );
    }

    let divider = &layout.divider;
    let _ = writeln!(
        s,
        r#"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
        geometry.y(divider.top_row as f64),
        geometry.y(divider.bottom_row as f64),
        Rgb::BLACK,
        stroke,
        x = geometry.x(divider.x)
    );

    for label in &layout.labels {
        let _ = writeln!(s, "{}", text_element(&label.text, geometry.x(label.x), geometry.y(label.y()), label.size, true));
    }

    s.push_str("</svg>\n");
    s
}

/// A bold `<text>` element.
///
/// When `centered`, the text is centered on (`x`, `y`); otherwise it starts at
/// `x` on baseline `y`.
pub fn text_element(text: &str, x: f64, y: f64, size: u32, centered: bool) -> String {
    let anchor = if centered {
        r#" text-anchor="middle" dominant-baseline="central""#
    } else {
        ""
    };
    format!(
        r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-weight="bold" font-size="{}" fill="{}"{}>{}</text>"#,
        x,
        y,
        FONT_FAMILY,
        size,
        Rgb::BLACK,
        anchor,
        escape_xml(text)
    )
}

/// Escape text for use in XML content.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
