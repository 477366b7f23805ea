//! Test support utilities for glyphpack.
//!
//! This module provides a deterministic rasterizer that needs no font file,
//! useful for testing the encoder, but it is not part of the public API.

use std::collections::HashMap;

use crate::{MonoBitmap, Result, TextRasterizer};

struct BlockGlyph {
    advance: f32,
    rows: Vec<&'static str>,
}

/// A rasterizer drawing hand-made `#` masks.
///
/// Mask row 0 sits on the line origin passed to `render`. The point size is
/// ignored: masks are drawn at their native size. Unknown characters have
/// zero advance and draw nothing.
pub struct BlockRasterizer {
    glyphs: HashMap<char, BlockGlyph>,
}

/// Lowercase 'a' on a 20 row cell, 8 columns of ink plus 1 column advance.
pub const BLOCK_A: [&str; 20] = [
    "........",
    "........",
    "........",
    "........",
    "........",
    "........",
    "........",
    "..####..",
    ".#....#.",
    "......#.",
    "..#####.",
    ".#....#.",
    ".#....#.",
    ".#...##.",
    "..###.#.",
    "........",
    "........",
    "........",
    "........",
    "........",
];

impl BlockRasterizer {
    /// Empty rasterizer without any glyphs.
    pub fn empty() -> Self {
        Self {
            glyphs: HashMap::new(),
        }
    }

    /// Rasterizer with a small built-in glyph set:
    /// - `'a'`: [`BLOCK_A`], advance 9
    /// - `' '`: no ink, advance 1 (trims to zero width)
    /// - `'|'`: full 16 row bar, advance 2
    /// - `'i'`: fractional advance 3.5
    pub fn new() -> Self {
        let mut r = Self::empty();
        r.add_glyph('a', 9.0, &BLOCK_A);
        r.add_glyph(' ', 1.0, &[]);
        r.add_glyph('|', 2.0, &["#"; 16]);
        r.add_glyph(
            'i',
            3.5,
            &[
                "", "", "", "", "", "", "", ".#", "", ".#", ".#", ".#", ".#", ".#", ".#",
            ],
        );
        r
    }

    pub fn add_glyph(&mut self, ch: char, advance: f32, rows: &[&'static str]) {
        self.glyphs.insert(
            ch,
            BlockGlyph {
                advance,
                rows: rows.to_vec(),
            },
        );
    }
}

impl Default for BlockRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRasterizer for BlockRasterizer {
    fn advance_width(&self, text: &str, _size: u32) -> Result<f32> {
        Ok(text
            .chars()
            .filter_map(|ch| self.glyphs.get(&ch))
            .map(|g| g.advance)
            .sum())
    }

    fn render(
        &self,
        text: &str,
        _size: u32,
        x: i32,
        y: i32,
        canvas: &mut MonoBitmap,
    ) -> Result<()> {
        let mut pen = x as f32;
        for ch in text.chars() {
            let Some(glyph) = self.glyphs.get(&ch) else {
                continue;
            };
            let left = pen as i32;
            for (row, line) in glyph.rows.iter().enumerate() {
                for (col, px) in line.chars().enumerate() {
                    if px == '#' {
                        canvas.set(left + col as i32, y + row as i32, true);
                    }
                }
            }
            pen += glyph.advance;
        }
        Ok(())
    }
}
