//! A 1-bit pixel grid used both as render target and as encoder input.

/// Coverage at or above this value lights a pixel.
pub const COVERAGE_THRESHOLD: u8 = 128;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonoBitmap {
    width: usize,
    height: usize,
    /// Row-major, `width * height` entries
    pixels: Vec<bool>,
}

impl MonoBitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    /// Build a bitmap from text rows where `#` marks a lit pixel.
    ///
    /// Short rows are padded with unlit pixels up to the longest row.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut bitmap = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    bitmap.set(x as i32, y as i32, true);
                }
            }
        }
        bitmap
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel state; anything outside the grid reads as unlit.
    pub fn get(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) => self.pixels[i],
            None => false,
        }
    }

    /// Writes outside the grid are clipped.
    pub fn set(&mut self, x: i32, y: i32, lit: bool) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = lit;
        }
    }

    /// Copy an 8-bit coverage map onto the grid with its top-left corner at
    /// `(x, y)`. Only pixels at or above [`COVERAGE_THRESHOLD`] are lit;
    /// existing lit pixels are never cleared.
    pub fn blit_coverage(&mut self, x: i32, y: i32, width: usize, coverage: &[u8]) {
        if width == 0 {
            return;
        }
        for (row, line) in coverage.chunks(width).enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value >= COVERAGE_THRESHOLD {
                    self.set(x + col as i32, y + row as i32, true);
                }
            }
        }
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks() rejects a zero size
        self.pixels.chunks(self.width.max(1))
    }

    /// Nearest-neighbour upscale by an integer factor.
    pub fn scaled(&self, factor: usize) -> Self {
        let mut out = Self::new(self.width * factor, self.height * factor);
        for y in 0..out.height {
            for x in 0..out.width {
                let lit = self.pixels[(y / factor) * self.width + x / factor];
                out.pixels[y * out.width + x] = lit;
            }
        }
        out
    }

    /// Render as text, one line per row.
    pub fn to_text(&self, on: char, off: char) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..self.width {
                out.push(if self.pixels[y * self.width + x] { on } else { off });
            }
        }
        out
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }
}
