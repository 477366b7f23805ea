use std::path::Path;

use anyhow::{bail, Result};
use glyphpack::MonoBitmap;
use image::{GrayImage, Luma};

/// Draw a bitmap with half-block characters, two pixel rows per line.
pub fn render_blocks(bitmap: &MonoBitmap) -> String {
    let mut out = String::new();
    for y in (0..bitmap.height()).step_by(2) {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..bitmap.width() {
            let top = bitmap.get(x as i32, y as i32);
            let bottom = bitmap.get(x as i32, y as i32 + 1);
            out.push(match (top, bottom) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        // frame the glyph cell so blank columns stay visible
        out.push('│');
    }
    out
}

/// Stack bitmaps vertically, left aligned.
pub fn stack(lines: &[MonoBitmap]) -> MonoBitmap {
    let width = lines.iter().map(MonoBitmap::width).max().unwrap_or(0);
    let height = lines.iter().map(MonoBitmap::height).sum();
    let mut out = MonoBitmap::new(width, height);
    let mut top = 0;
    for line in lines {
        for (y, row) in line.rows().enumerate() {
            for (x, lit) in row.iter().enumerate() {
                if *lit {
                    out.set(x as i32, (top + y) as i32, true);
                }
            }
        }
        top += line.height();
    }
    out
}

/// Write `bitmap` as a white-on-black PNG, upscaled without smoothing.
pub fn save_png(bitmap: &MonoBitmap, scale: u32, path: &Path) -> Result<()> {
    if bitmap.is_empty() {
        bail!("nothing to write: bitmap is {}x{}", bitmap.width(), bitmap.height());
    }
    let scaled = bitmap.scaled(scale as usize);
    let (w, h) = (scaled.width() as u32, scaled.height() as u32);
    let image = GrayImage::from_fn(w, h, |x, y| {
        Luma([if scaled.get(x as i32, y as i32) { 255 } else { 0 }])
    });
    image.save(path)?;
    Ok(())
}
