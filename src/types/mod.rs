//! Core types for cellpix.
//!
//! - `PixelImage` - the decoded RGB/RGBA sample array
//! - `Dimensions` - height and width of images and grids
//! - `Fill` - solid cell fill colour

mod colour;
mod dimensions;
mod pixels;

pub use colour::{AlphaMode, Fill};
pub use dimensions::Dimensions;
pub use pixels::{Channels, PixelImage, ResampleFilter};
