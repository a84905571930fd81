//! cellpix - Spreadsheet pixel art from raster images
//!
//! A library for turning images into workbooks where every pixel is one
//! solid-filled cell, sized and zoomed so the grid reads as a picture.

pub mod cli;
pub mod config;
pub mod constrain;
pub mod error;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod types;

pub use config::{Preset, Settings};
pub use constrain::{scale_factor, scaled_dimensions, ConstrainOutcome, Constrained, Constrainer};
pub use error::{CellpixError, Result};
pub use loader::{load_image, test_card};
pub use pipeline::{convert, prepare, ConversionReport, Prepared, Source};
pub use render::{CellSink, GridLayout, GridRenderer, MemorySheet, XlsxSheet, ZoomCalibration};
pub use types::{AlphaMode, Channels, Dimensions, Fill, PixelImage, ResampleFilter};
