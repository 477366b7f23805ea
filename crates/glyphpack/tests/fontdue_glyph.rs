//! Encoding through a real TrueType font (DejaVu Sans Mono, see
//! `fixtures/DejaVuSansMono-LICENSE.txt`).
#![cfg(feature = "fontdue")]

use glyphpack::{
    encode_glyph, raster::FontdueRasterizer, EncodeOptions, FontSpec, MonoBitmap, TextRasterizer,
    COVERAGE_THRESHOLD,
};
use pretty_assertions::assert_eq;

const DEJAVU_MONO: &[u8] = include_bytes!("fixtures/DejaVuSansMono.ttf");

fn rasterizer() -> FontdueRasterizer {
    FontdueRasterizer::from_bytes(DEJAVU_MONO).unwrap()
}

fn first_lit_row(bitmap: &MonoBitmap) -> Option<usize> {
    bitmap.rows().position(|row| row.iter().any(|lit| *lit))
}

#[test]
fn width_is_truncated_advance_minus_one() {
    let raster = rasterizer();
    for size in [8, 12, 16, 20, 32] {
        let spec = FontSpec::new("DejaVuSansMono.ttf", size);
        let advance = raster.advance_width("a", size).unwrap();
        let glyph = encode_glyph(&raster, &spec, 'a', &EncodeOptions::default()).unwrap();
        assert_eq!(glyph.measurement.value(), advance as u32, "size {size}");
        assert_eq!(glyph.width, advance as usize - 1, "size {size}");
        assert_eq!(glyph.bytes.len(), spec.bytes_per_column() * glyph.width);
    }
}

#[test]
fn a_at_20_has_all_ink_inside_the_frame() {
    let raster = rasterizer();
    let spec = FontSpec::new("DejaVuSansMono.ttf", 20);
    let glyph = encode_glyph(&raster, &spec, 'a', &EncodeOptions::default()).unwrap();
    assert_eq!(glyph.bytes.len(), 3 * glyph.width);
    assert!(glyph.bitmap.lit_count() > 0);

    // render again onto a canvas with plenty of room: nothing may fall
    // right of the trimmed width or below the bitmap height
    let mut roomy = MonoBitmap::new(glyph.width + 16, 40);
    raster.render("a", 20, 0, 0, &mut roomy).unwrap();
    for (y, row) in roomy.rows().enumerate() {
        for (x, lit) in row.iter().enumerate() {
            if *lit {
                assert!(x < glyph.width && y < glyph.height, "ink at ({x}, {y})");
            }
        }
    }
    assert_eq!(roomy.lit_count(), glyph.bitmap.lit_count());
}

#[test]
fn lit_pixels_follow_coverage_threshold() {
    let font = fontdue::Font::from_bytes(DEJAVU_MONO, fontdue::FontSettings::default()).unwrap();
    let (_, coverage) = font.rasterize('a', 20.0);
    let expected = coverage
        .iter()
        .filter(|c| **c >= COVERAGE_THRESHOLD)
        .count();

    let spec = FontSpec::new("DejaVuSansMono.ttf", 20);
    let glyph = encode_glyph(&rasterizer(), &spec, 'a', &EncodeOptions::default()).unwrap();
    assert_eq!(glyph.bitmap.lit_count(), expected);
}

#[test]
fn negative_offset_moves_glyph_up() {
    let raster = rasterizer();
    let base = FontSpec::new("DejaVuSansMono.ttf", 20);
    let glyph = encode_glyph(&raster, &base, 'a', &EncodeOptions::default()).unwrap();
    let top = first_lit_row(&glyph.bitmap).unwrap();
    assert!(top >= 3);

    for k in 1..=3 {
        let shifted = encode_glyph(
            &raster,
            &base.clone().with_offset(-k),
            'a',
            &EncodeOptions::default(),
        )
        .unwrap();
        assert_eq!(first_lit_row(&shifted.bitmap), Some(top - k as usize));
    }
}

#[test]
fn glyph_is_anchored_below_the_ascent_line() {
    // 'a' is an x-height glyph: it starts well below the top of the line
    // and ends on the baseline at round(ascent)
    let raster = rasterizer();
    let spec = FontSpec::new("DejaVuSansMono.ttf", 20);
    let glyph = encode_glyph(&raster, &spec, 'a', &EncodeOptions::default()).unwrap();
    let rows: Vec<usize> = glyph
        .bitmap
        .rows()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|lit| *lit))
        .map(|(y, _)| y)
        .collect();
    let (top, bottom) = (rows[0], rows[rows.len() - 1]);
    assert!((6..=9).contains(&top), "top row {top}");
    assert!((17..=19).contains(&bottom), "bottom row {bottom}");
}

#[test]
fn monospace_advance_sums_per_char() {
    let raster = rasterizer();
    let one = raster.advance_width("a", 20).unwrap();
    let three = raster.advance_width("abc", 20).unwrap();
    assert!((three - 3.0 * one).abs() < 1e-3);
}
