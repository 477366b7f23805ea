use std::path::{Path, PathBuf};

use crate::{PackError, Result};

/// Trailing advance columns removed from every measured glyph.
pub const DEFAULT_TRIM: u32 = 1;

/// Largest accepted font size and bitmap height, in pixels.
pub const MAX_SIZE: u32 = 255;

/// Font parameters for one encoding pass.
///
/// The value is never mutated by the encoder. Front ends build a new spec
/// whenever a control changes and pass it into the next call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontSpec {
    pub path: PathBuf,
    /// Em size in pixels.
    pub size: u32,
    /// Vertical displacement of the text origin, may be negative.
    pub offset: i32,
    /// Rows in the target bitmap.
    pub height: u32,
    /// Columns of trailing advance space stripped from the measured width.
    pub trim: u32,
}

impl FontSpec {
    /// A spec whose bitmap height equals the font size, with no offset.
    pub fn new(path: impl Into<PathBuf>, size: u32) -> Self {
        Self {
            path: path.into(),
            size,
            offset: 0,
            height: size,
            trim: DEFAULT_TRIM,
        }
    }

    pub fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_trim(mut self, trim: u32) -> Self {
        self.trim = trim;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of byte-row groups needed to cover `height` rows.
    pub fn bytes_per_column(&self) -> usize {
        (self.height as usize).div_ceil(8)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(PackError::InvalidFontSpec("font size must be positive".into()));
        }
        if self.height == 0 {
            return Err(PackError::InvalidFontSpec(
                "bitmap height must be positive".into(),
            ));
        }
        if self.size > MAX_SIZE {
            return Err(PackError::InvalidFontSpec(format!(
                "font size {} exceeds {MAX_SIZE}",
                self.size
            )));
        }
        if self.height > MAX_SIZE {
            return Err(PackError::InvalidFontSpec(format!(
                "bitmap height {} exceeds {MAX_SIZE}",
                self.height
            )));
        }
        Ok(())
    }
}
