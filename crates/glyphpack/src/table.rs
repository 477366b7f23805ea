//! Device font tables.
//!
//! A table covers a contiguous 8-bit character range. Glyph data is stored
//! column by column ([`ByteLayout::Columns`]), each column taking
//! `ceil(height / 8)` bytes, so a renderer can draw it by walking
//! `index[c]` forward `widths[c]` columns at a time.
use std::fmt::Write;

use log::debug;

use crate::{
    encode_glyph, ByteLayout, EncodeOptions, FontSpec, PackError, Result, TextRasterizer,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontTable {
    pub first_char: u8,
    pub num_chars: u8,
    pub height: u8,
    /// Blank columns inserted after every glyph.
    pub char_spacing: u8,
    /// Byte offset of each glyph in `data`.
    pub index: Vec<u16>,
    pub widths: Vec<u8>,
    pub data: Vec<u8>,
}

impl FontTable {
    /// Encode every character in `first..=last`.
    ///
    /// The layout in `options` is forced to [`ByteLayout::Columns`]; bit
    /// order and strictness are honoured.
    pub fn build<R: TextRasterizer + ?Sized>(
        rasterizer: &R,
        spec: &FontSpec,
        first: char,
        last: char,
        char_spacing: u8,
        options: &EncodeOptions,
    ) -> Result<Self> {
        spec.validate()?;
        if last < first {
            return Err(PackError::InvalidArgument(format!(
                "empty character range {first:?}..={last:?}"
            )));
        }
        let first_char = to_table_byte(first)?;
        let last_char = to_table_byte(last)?;
        let num_chars = u8::try_from(last_char as usize - first_char as usize + 1)
            .map_err(|_| PackError::InvalidArgument("table holds at most 255 characters".into()))?;
        let height = u8::try_from(spec.height).map_err(|_| {
            PackError::InvalidArgument(format!("bitmap height {} exceeds 255", spec.height))
        })?;

        let options = EncodeOptions {
            layout: ByteLayout::Columns,
            ..options.clone()
        };
        let mut table = FontTable {
            first_char,
            num_chars,
            height,
            char_spacing,
            index: Vec::with_capacity(num_chars as usize),
            widths: Vec::with_capacity(num_chars as usize),
            data: Vec::new(),
        };
        for code in first_char..=last_char {
            let glyph = encode_glyph(rasterizer, spec, code as char, &options)?;
            let offset = u16::try_from(table.data.len()).map_err(|_| {
                PackError::InvalidArgument("glyph data exceeds 16-bit offsets".into())
            })?;
            let width = u8::try_from(glyph.width).map_err(|_| {
                PackError::InvalidArgument(format!(
                    "glyph {:?} is {} columns wide",
                    glyph.ch, glyph.width
                ))
            })?;
            table.index.push(offset);
            table.widths.push(width);
            table.data.extend_from_slice(&glyph.bytes);
        }
        debug!(
            "built table {:?}..={:?}: {} glyphs, {} bytes",
            first,
            last,
            table.num_chars,
            table.data.len()
        );
        Ok(table)
    }

    pub fn bytes_per_column(&self) -> usize {
        (self.height as usize).div_ceil(8)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.slot(ch).is_some()
    }

    /// Packed columns for `ch`, or `None` if it is outside the table.
    pub fn glyph_data(&self, ch: char) -> Option<&[u8]> {
        let slot = self.slot(ch)?;
        let start = self.index[slot] as usize;
        let len = self.widths[slot] as usize * self.bytes_per_column();
        self.data.get(start..start + len)
    }

    /// Width of `text` in pixels, counting `char_spacing` after each glyph.
    /// Characters outside the table are skipped.
    pub fn text_width(&self, text: &str) -> usize {
        text.chars()
            .filter_map(|ch| self.slot(ch))
            .map(|slot| self.widths[slot] as usize + self.char_spacing as usize)
            .sum()
    }

    /// Emit the table as C arrays named `<name>_index`, `<name>_widths` and
    /// `<name>_data`, followed by an `nglFont` descriptor called `<name>`.
    pub fn to_c_source(&self, name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "// first_char={}, num_chars={}, height={}, char_spacing={}",
            self.first_char, self.num_chars, self.height, self.char_spacing
        );
        let _ = writeln!(out, "const uint16_t {name}_index[] = {{");
        write_rows(&mut out, self.index.iter().map(|v| format!("{v}")));
        let _ = writeln!(out, "}};\n");
        let _ = writeln!(out, "const uint8_t {name}_widths[] = {{");
        write_rows(&mut out, self.widths.iter().map(|v| format!("{v}")));
        let _ = writeln!(out, "}};\n");
        let _ = writeln!(out, "const uint8_t {name}_data[] = {{");
        write_rows(&mut out, self.data.iter().map(|v| format!("0x{v:02x}")));
        let _ = writeln!(out, "}};\n");
        let _ = writeln!(
            out,
            "nglFont {name} = {{{}, {}, {}, {}, {name}_index, {name}_widths, {name}_data}};",
            self.first_char, self.num_chars, self.height, self.char_spacing
        );
        out
    }

    fn slot(&self, ch: char) -> Option<usize> {
        let code = u32::from(ch);
        let first = u32::from(self.first_char);
        if code < first {
            return None;
        }
        let slot = (code - first) as usize;
        (slot < self.num_chars as usize).then_some(slot)
    }
}

fn to_table_byte(ch: char) -> Result<u8> {
    u8::try_from(u32::from(ch)).map_err(|_| PackError::UnsupportedChar(ch))
}

fn write_rows(out: &mut String, values: impl Iterator<Item = String>) {
    const PER_ROW: usize = 16;
    let values: Vec<String> = values.collect();
    for row in values.chunks(PER_ROW) {
        let _ = writeln!(out, "    {},", row.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::BlockRasterizer;
    use pretty_assertions::assert_eq;

    fn spec() -> FontSpec {
        FontSpec::new("block", 20).with_height(16)
    }

    #[test]
    fn index_follows_widths() {
        let raster = BlockRasterizer::new();
        let table =
            FontTable::build(&raster, &spec(), '|', '|', 1, &EncodeOptions::default()).unwrap();
        assert_eq!(table.num_chars, 1);
        assert_eq!(table.widths, vec![1]);
        assert_eq!(table.data, vec![0xff, 0xff]);
        assert_eq!(table.glyph_data('|'), Some(&[0xff, 0xff][..]));
        assert_eq!(table.glyph_data('a'), None);
        assert!(table.contains('|'));
        assert!(!table.contains('{'));
        assert!(!table.contains('}'));
        assert!(!table.contains('\u{2500}'));
    }

    #[test]
    fn range_with_unknown_chars_gets_zero_widths() {
        let raster = BlockRasterizer::new();
        let table =
            FontTable::build(&raster, &spec(), 'Z', 'a', 1, &EncodeOptions::default()).unwrap();
        // 'Z'..='`' are not in the block font
        assert_eq!(table.num_chars, 8);
        assert_eq!(&table.widths[..7], &[0; 7]);
        assert_eq!(table.widths[7], 8);
        assert!(table.index[..8].iter().all(|&i| i == 0));
        assert_eq!(table.data.len(), 8 * 2);
        assert_eq!(table.text_width("aa?"), 18);
    }

    #[test]
    fn rejects_bad_ranges() {
        let raster = BlockRasterizer::new();
        let opts = EncodeOptions::default();
        assert!(matches!(
            FontTable::build(&raster, &spec(), 'b', 'a', 1, &opts),
            Err(PackError::InvalidArgument(_))
        ));
        assert!(matches!(
            FontTable::build(&raster, &spec(), 'a', 'é', 1, &opts),
            Ok(_)
        ));
        assert!(matches!(
            FontTable::build(&raster, &spec(), 'a', '\u{2500}', 1, &opts),
            Err(PackError::UnsupportedChar('\u{2500}'))
        ));
    }

    #[test]
    fn c_source_lists_all_arrays() {
        let raster = BlockRasterizer::new();
        let table =
            FontTable::build(&raster, &spec(), '|', '|', 1, &EncodeOptions::default()).unwrap();
        let src = table.to_c_source("font_bar");
        assert!(src.contains("first_char=124, num_chars=1, height=16, char_spacing=1"));
        assert!(src.contains("const uint16_t font_bar_index[] = {\n    0,\n};"));
        assert!(src.contains("const uint8_t font_bar_widths[] = {\n    1,\n};"));
        assert!(src.contains("const uint8_t font_bar_data[] = {\n    0xff, 0xff,\n};"));
        assert!(src.ends_with(
            "nglFont font_bar = {124, 1, 16, 1, font_bar_index, font_bar_widths, font_bar_data};\n"
        ));
    }
}
