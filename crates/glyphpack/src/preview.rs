//! Whole-line previews used to judge size, offset and height settings.
use crate::{FontSpec, MonoBitmap, Result, TextRasterizer};

/// Default canvas width of a preview line in pixels.
pub const PREVIEW_WIDTH: usize = 512;
/// Default upscale factor when showing a preview on a desktop display.
pub const PREVIEW_SCALE: usize = 4;

/// Sample strings covering the printable ASCII letters and digits.
pub const SAMPLE_LINES: [&str; 2] = [
    "abcdefghijklmnopqrstuvwxyz ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "The quick brown fox jumps over the lazy dog. 0123456789",
];

/// Render `text` into a `width` x `spec.height` canvas, shifted down by
/// `spec.offset` rows. Ink beyond the canvas is clipped.
pub fn render_line<R: TextRasterizer + ?Sized>(
    rasterizer: &R,
    spec: &FontSpec,
    text: &str,
    width: usize,
) -> Result<MonoBitmap> {
    spec.validate()?;
    let mut canvas = MonoBitmap::new(width, spec.height as usize);
    rasterizer.render(text, spec.size, 0, spec.offset, &mut canvas)?;
    Ok(canvas)
}

/// Render every line of [`SAMPLE_LINES`] at [`PREVIEW_WIDTH`].
pub fn render_samples<R: TextRasterizer + ?Sized>(
    rasterizer: &R,
    spec: &FontSpec,
) -> Result<Vec<MonoBitmap>> {
    SAMPLE_LINES
        .iter()
        .map(|line| render_line(rasterizer, spec, line, PREVIEW_WIDTH))
        .collect()
}
