//! Image loading.
//!
//! Decodes image files with the `image` crate and provides a built-in test
//! card for runs without an input file.

use std::path::Path;

use crate::error::{CellpixError, Result};
use crate::types::{Dimensions, PixelImage};

/// Size of the built-in test card. Larger than the standard cap so the
/// clamp is exercised.
pub const TEST_CARD_SIZE: Dimensions = Dimensions::new(512, 512);

/// Colour bars across the middle of the test card.
const BARS: [[u8; 3]; 7] = [
    [192, 192, 192],
    [192, 192, 0],
    [0, 192, 192],
    [0, 192, 0],
    [192, 0, 192],
    [192, 0, 0],
    [0, 0, 192],
];

/// Decode the image at `path`.
pub fn load_image(path: &Path) -> Result<PixelImage> {
    let decoded = image::open(path).map_err(|e| CellpixError::Image {
        message: format!("Failed to read {}: {}", path.display(), e),
        help: Some("Check the path and that the file is a supported raster format".to_string()),
    })?;

    PixelImage::from_dynamic(decoded)
}

/// Generate the built-in RGB test card.
///
/// A diagonal gradient with a band of colour bars through the middle third.
pub fn test_card() -> Result<PixelImage> {
    let Dimensions { height, width } = TEST_CARD_SIZE;
    let mut data = Vec::with_capacity(TEST_CARD_SIZE.area() as usize * 3);

    let band = height / 3..height * 2 / 3;
    let bar_width = width.div_ceil(BARS.len() as u32);

    for y in 0..height {
        for x in 0..width {
            let pixel = if band.contains(&y) {
                BARS[(x / bar_width) as usize % BARS.len()]
            } else {
                [
                    (x * 255 / (width - 1)) as u8,
                    (y * 255 / (height - 1)) as u8,
                    ((x + y) * 255 / (width + height - 2)) as u8,
                ]
            };
            data.extend_from_slice(&pixel);
        }
    }

    PixelImage::from_raw(TEST_CARD_SIZE, 3, data)
}
