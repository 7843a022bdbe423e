//! Card renderer: lays out a class group, draws it as SVG and rasterizes it
//! to a 300 DPI PNG at a deterministic output path.

pub mod fonts;
pub mod output;
pub mod raster;
pub mod renderer;
pub mod svg;

pub use output::card_output_path;
pub use renderer::{render_class_card, CardRenderer};
pub use svg::Geometry;
