//! glyphpack: turn TrueType glyphs into packed 1-bit device font data.
//! Features: rasterizer seam, column-major encoding, previews, C font tables.

mod bitmap;
mod error;
mod font;
pub mod glyph;
pub mod preview;
pub mod raster;
pub mod table;

pub use bitmap::{MonoBitmap, COVERAGE_THRESHOLD};
pub use error::{PackError, Result};
pub use font::{FontSpec, DEFAULT_TRIM, MAX_SIZE};
pub use glyph::{
    encode_glyph, pack_bitmap, BitOrder, ByteLayout, EncodeOptions, EncodedGlyph, Measurement,
};
pub use table::FontTable;

// Test utilities
pub mod test_support;

/// Text measurement and rendering provided by a font engine.
///
/// The encoder only consumes this capability; it never rasterizes outlines
/// itself.
pub trait TextRasterizer {
    /// Horizontal advance of `text` at `size` pixels per em.
    fn advance_width(&self, text: &str, size: u32) -> Result<f32>;

    /// Draw `text` onto `canvas` with the top of the line (the ascender) at
    /// `(x, y)`. Pixels falling outside the canvas are clipped.
    fn render(
        &self,
        text: &str,
        size: u32,
        x: i32,
        y: i32,
        canvas: &mut MonoBitmap,
    ) -> Result<()>;
}
