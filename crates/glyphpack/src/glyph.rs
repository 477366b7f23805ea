//! Glyph encoding into packed monochrome bytes.
//!
//! Pixels are grouped into byte-row groups of 8 vertically stacked rows. A
//! group covering rows `8g..8g+8` of column `x` becomes one byte. Rows past
//! the configured height inside the last group are always unlit.
use std::fmt::Write;

use log::{debug, warn};

use crate::{FontSpec, MonoBitmap, PackError, Result, TextRasterizer};

/// Which bit of a packed byte holds the top pixel of its group.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum BitOrder {
    /// Top row in bit 0, bottom row in bit 7.
    #[default]
    LsbTop,
    /// Top row in bit 7, bottom row in bit 0.
    MsbTop,
}

/// Emission order of the packed bytes.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum ByteLayout {
    /// Group 0 for every column, then group 1 for every column, and so on.
    #[default]
    RowGroups,
    /// All groups of column 0, then all groups of column 1, and so on.
    /// This is the layout device text renderers walk column by column.
    Columns,
}

#[derive(Clone, Debug, Default)]
pub struct EncodeOptions {
    pub bit_order: BitOrder,
    pub layout: ByteLayout,
    /// Fail with [`PackError::MeasurementImprecision`] instead of truncating
    /// a non-integer advance width.
    pub strict_measurement: bool,
}

impl EncodeOptions {
    /// Options producing the layout expected by firmware font tables.
    pub fn device() -> Self {
        Self {
            layout: ByteLayout::Columns,
            ..Self::default()
        }
    }
}

/// An advance width as reported by the font engine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Measurement {
    Exact(u32),
    /// The engine returned a fractional (or out of range) value that was
    /// truncated toward zero.
    Rounded { raw: f32, truncated: u32 },
}

impl Measurement {
    pub fn from_raw(raw: f32) -> Self {
        if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= u32::MAX as f32 {
            Measurement::Exact(raw as u32)
        } else {
            // `as` saturates: NaN and negatives land on 0
            Measurement::Rounded {
                raw,
                truncated: raw as u32,
            }
        }
    }

    pub fn value(&self) -> u32 {
        match *self {
            Measurement::Exact(v) => v,
            Measurement::Rounded { truncated, .. } => truncated,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Measurement::Exact(_))
    }
}

/// The packed form of one character.
#[derive(Clone, Debug)]
pub struct EncodedGlyph {
    pub ch: char,
    /// Columns after trimming trailing advance space.
    pub width: usize,
    /// Configured bitmap height in rows.
    pub height: usize,
    pub measurement: Measurement,
    /// The rendered pixels the bytes were packed from.
    pub bitmap: MonoBitmap,
    pub bytes: Vec<u8>,
}

impl EncodedGlyph {
    pub fn bytes_per_column(&self) -> usize {
        self.height.div_ceil(8)
    }

    /// Lowercase hex, two digits per byte, separated by single spaces.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(self.bytes.len() * 3);
        for (i, b) in self.bytes.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{b:02x}");
        }
        out
    }
}

/// Pack `bitmap` into `ceil(height / 8) * bitmap.width()` bytes.
///
/// `height` is the configured bitmap height; rows at or beyond it read as
/// unlit even if the bitmap itself is taller.
pub fn pack_bitmap(bitmap: &MonoBitmap, height: usize, options: &EncodeOptions) -> Vec<u8> {
    let width = bitmap.width();
    let groups = height.div_ceil(8);
    let mut out = Vec::with_capacity(groups * width);
    match options.layout {
        ByteLayout::RowGroups => {
            for group in 0..groups {
                for x in 0..width {
                    out.push(pack_group(bitmap, height, x, group, options.bit_order));
                }
            }
        }
        ByteLayout::Columns => {
            for x in 0..width {
                for group in 0..groups {
                    out.push(pack_group(bitmap, height, x, group, options.bit_order));
                }
            }
        }
    }
    out
}

fn pack_group(bitmap: &MonoBitmap, height: usize, x: usize, group: usize, order: BitOrder) -> u8 {
    let mut byte = 0u8;
    for row in 0..8 {
        let y = group * 8 + row;
        if y >= height || !bitmap.get(x as i32, y as i32) {
            continue;
        }
        byte |= match order {
            BitOrder::LsbTop => 1 << row,
            BitOrder::MsbTop => 0x80 >> row,
        };
    }
    byte
}

/// Measure, render and pack a single character.
///
/// The glyph width is the measured advance truncated to an integer, minus
/// `spec.trim`, floored at zero. A zero width yields an empty byte sequence.
pub fn encode_glyph<R: TextRasterizer + ?Sized>(
    rasterizer: &R,
    spec: &FontSpec,
    ch: char,
    options: &EncodeOptions,
) -> Result<EncodedGlyph> {
    spec.validate()?;
    let mut buf = [0u8; 4];
    let text: &str = ch.encode_utf8(&mut buf);

    let raw = rasterizer.advance_width(text, spec.size)?;
    let measurement = Measurement::from_raw(raw);
    if !measurement.is_exact() {
        if options.strict_measurement {
            return Err(PackError::MeasurementImprecision { ch, raw });
        }
        warn!("advance width of {ch:?} is not an integer ({raw}), truncating");
    }

    let width = measurement.value().saturating_sub(spec.trim) as usize;
    let height = spec.height as usize;
    let mut bitmap = MonoBitmap::new(width, height);
    if width > 0 {
        rasterizer.render(text, spec.size, 0, spec.offset, &mut bitmap)?;
    }
    let bytes = pack_bitmap(&bitmap, height, options);
    debug!(
        "encoded {ch:?}: {width}x{height}, {} bytes, {} lit",
        bytes.len(),
        bitmap.lit_count()
    );

    Ok(EncodedGlyph {
        ch,
        width,
        height,
        measurement,
        bitmap,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lsb_top_puts_first_row_in_bit_zero() {
        let bitmap = MonoBitmap::from_rows(&["#", ".", ".", ".", ".", ".", ".", "#"]);
        let bytes = pack_bitmap(&bitmap, 8, &EncodeOptions::default());
        assert_eq!(bytes, vec![0x81]);

        let bitmap = MonoBitmap::from_rows(&["#", "#", "."]);
        assert_eq!(pack_bitmap(&bitmap, 3, &EncodeOptions::default()), vec![0x03]);
    }

    #[test]
    fn msb_top_reverses_bits() {
        let bitmap = MonoBitmap::from_rows(&["#", "#", "."]);
        let options = EncodeOptions {
            bit_order: BitOrder::MsbTop,
            ..EncodeOptions::default()
        };
        assert_eq!(pack_bitmap(&bitmap, 3, &options), vec![0xC0]);
    }

    #[test]
    fn rows_past_height_are_unlit() {
        let bitmap = MonoBitmap::from_rows(&["#", "#", "#", "#"]);
        assert_eq!(pack_bitmap(&bitmap, 2, &EncodeOptions::default()), vec![0x03]);
    }

    #[test]
    fn layouts_differ_only_in_order() {
        // 2 columns, 10 rows: col 0 lit at row 0, col 1 lit at row 9
        let mut bitmap = MonoBitmap::new(2, 10);
        bitmap.set(0, 0, true);
        bitmap.set(1, 9, true);
        let groups = pack_bitmap(&bitmap, 10, &EncodeOptions::default());
        assert_eq!(groups, vec![0x01, 0x00, 0x00, 0x02]);
        let columns = pack_bitmap(&bitmap, 10, &EncodeOptions::device());
        assert_eq!(columns, vec![0x01, 0x00, 0x00, 0x02]);

        bitmap.set(0, 8, true);
        assert_eq!(
            pack_bitmap(&bitmap, 10, &EncodeOptions::default()),
            vec![0x01, 0x00, 0x01, 0x02]
        );
        assert_eq!(
            pack_bitmap(&bitmap, 10, &EncodeOptions::device()),
            vec![0x01, 0x01, 0x00, 0x02]
        );
    }

    #[test]
    fn measurement_classification() {
        assert_eq!(Measurement::from_raw(7.0), Measurement::Exact(7));
        assert_eq!(
            Measurement::from_raw(7.6),
            Measurement::Rounded {
                raw: 7.6,
                truncated: 7
            }
        );
        assert_eq!(Measurement::from_raw(-2.0).value(), 0);
        assert_eq!(Measurement::from_raw(f32::NAN).value(), 0);
    }

    #[test]
    fn hex_is_space_separated() {
        let glyph = EncodedGlyph {
            ch: 'x',
            width: 3,
            height: 8,
            measurement: Measurement::Exact(4),
            bitmap: MonoBitmap::new(3, 8),
            bytes: vec![0x00, 0x7f, 0xa5],
        };
        assert_eq!(glyph.to_hex(), "00 7f a5");
        assert_eq!(glyph.bytes_per_column(), 1);
    }
}
