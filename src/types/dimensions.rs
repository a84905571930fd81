//! Grid and image dimensions.

use std::fmt;

use serde::Serialize;

/// Height and width of an image or cell grid, in pixels (or cells).
///
/// Displayed as `HEIGHTxWIDTH`, matching the row-major order of the pixel
/// array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Dimensions {
    pub height: u32,
    pub width: u32,
}

impl Dimensions {
    pub const fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Number of pixels (or cells) covered.
    pub fn area(self) -> u64 {
        u64::from(self.height) * u64::from(self.width)
    }

    /// True when either axis is zero.
    pub fn is_empty(self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// True when both axes fit within `bounds`.
    pub fn fits_within(self, bounds: Dimensions) -> bool {
        self.height <= bounds.height && self.width <= bounds.width
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}
