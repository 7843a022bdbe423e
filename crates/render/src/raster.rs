//! SVG rasterization and PNG encoding.

use resvg::{tiny_skia, usvg};
use roster_core::{Error, Result};

/// Print resolution of rendered cards.
pub const OUTPUT_DPI: f64 = 300.0;

const METERS_PER_INCH: f64 = 0.0254;

/// Rasterize an SVG document (in points) at `dpi` onto a white background and
/// encode it as PNG.
///
/// `size_px` is the target pixel size; the tree and pixmap are dropped before
/// returning on every path.
pub fn rasterize(
    svg: &str,
    options: &usvg::Options<'_>,
    size_px: (u32, u32),
    dpi: f64,
) -> Result<Vec<u8>> {
    let tree = usvg::Tree::from_str(svg, options)
        .map_err(|e| Error::Render(format!("SVG parse error: {}", e)))?;

    let (width, height) = size_px;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Render(format!("cannot allocate {}x{} pixmap", width, height)))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let scale = (dpi / 72.0) as f32;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    encode_png(&pixmap, dpi)
}

/// Encode an opaque pixmap as PNG carrying its physical resolution.
pub fn encode_png(pixmap: &tiny_skia::Pixmap, dpi: f64) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let pixels_per_meter = (dpi / METERS_PER_INCH).round() as u32;

    let mut encoder = png::Encoder::new(&mut bytes, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: pixels_per_meter,
        yppu: pixels_per_meter,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder
        .write_header()
        .map_err(|e| Error::Render(format!("PNG header: {}", e)))?;
    // The background is opaque, so premultiplied data equals straight RGBA.
    writer
        .write_image_data(pixmap.data())
        .map_err(|e| Error::Render(format!("PNG data: {}", e)))?;
    writer
        .finish()
        .map_err(|e| Error::Render(format!("PNG finish: {}", e)))?;

    Ok(bytes)
}
