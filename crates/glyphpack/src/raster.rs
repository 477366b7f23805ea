//! Font engine backends for [`TextRasterizer`].
#[cfg(feature = "fontdue")]
pub use fontdue_backend::FontdueRasterizer;

#[cfg(feature = "fontdue")]
mod fontdue_backend {
    use std::{fs, path::Path};

    use fontdue::{Font, FontSettings};
    use log::trace;

    use crate::{MonoBitmap, PackError, Result, TextRasterizer};

    /// TrueType/OpenType rasterizer backed by `fontdue`.
    pub struct FontdueRasterizer {
        font: Font,
    }

    impl FontdueRasterizer {
        pub fn open(path: &Path) -> Result<Self> {
            let bytes = fs::read(path)?;
            Self::from_bytes(&bytes)
        }

        pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
            let font = Font::from_bytes(bytes, FontSettings::default())
                .map_err(|e| PackError::FontLoad(e.to_string()))?;
            Ok(Self { font })
        }

        fn ascent(&self, px: f32) -> i32 {
            self.font
                .horizontal_line_metrics(px)
                .map(|m| m.ascent.round() as i32)
                .unwrap_or(px.round() as i32)
        }
    }

    impl TextRasterizer for FontdueRasterizer {
        fn advance_width(&self, text: &str, size: u32) -> Result<f32> {
            let px = size as f32;
            let mut width = 0.0;
            let mut prev: Option<char> = None;
            for ch in text.chars() {
                if let Some(left) = prev {
                    width += self.font.horizontal_kern(left, ch, px).unwrap_or(0.0);
                }
                width += self.font.metrics(ch, px).advance_width;
                prev = Some(ch);
            }
            trace!("advance of {text:?} at {size}px: {width}");
            Ok(width)
        }

        fn render(
            &self,
            text: &str,
            size: u32,
            x: i32,
            y: i32,
            canvas: &mut MonoBitmap,
        ) -> Result<()> {
            let px = size as f32;
            let baseline = y + self.ascent(px);
            let mut pen = x as f32;
            let mut prev: Option<char> = None;
            for ch in text.chars() {
                if let Some(left) = prev {
                    pen += self.font.horizontal_kern(left, ch, px).unwrap_or(0.0);
                }
                let (metrics, coverage) = self.font.rasterize(ch, px);
                // ymin is the bottom edge relative to the baseline, y up
                let top = baseline - (metrics.ymin + metrics.height as i32);
                let left = pen.round() as i32 + metrics.xmin;
                canvas.blit_coverage(left, top, metrics.width, &coverage);
                pen += metrics.advance_width;
                prev = Some(ch);
            }
            Ok(())
        }
    }

}
