//! The decoded pixel array fed through the conversion pipeline.
//!
//! A [`PixelImage`] is a row-major `height × width × channels` array of
//! 8-bit samples, with three (RGB) or four (RGBA) channels for the whole
//! image.

use clap::ValueEnum;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{CellpixError, Result};

use super::Dimensions;

/// Channel layout of a [`PixelImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channels {
    Rgb,
    Rgba,
}

impl Channels {
    /// Map a raw channel count to a layout, rejecting anything but 3 or 4.
    pub fn from_count(count: usize) -> Result<Self> {
        match count {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            found => Err(CellpixError::Channels { found }),
        }
    }

    /// Samples per pixel.
    pub const fn count(self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }
}

/// Resampling filter used for explicit resizes and max-bound downscaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    /// Bilinear; the kernel widens on downscale, which anti-aliases.
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// An 8-bit RGB or RGBA pixel array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    dimensions: Dimensions,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelImage {
    /// Wrap a raw row-major sample buffer.
    ///
    /// Fails if `channel_count` is not 3 or 4, or if the buffer length does
    /// not match `height * width * channel_count`.
    pub fn from_raw(dimensions: Dimensions, channel_count: usize, data: Vec<u8>) -> Result<Self> {
        let channels = Channels::from_count(channel_count)?;
        let expected = dimensions.area() as usize * channel_count;
        if data.len() != expected {
            return Err(CellpixError::Image {
                message: format!(
                    "Pixel buffer holds {} samples, expected {} for {}x{}",
                    data.len(),
                    expected,
                    dimensions,
                    channel_count
                ),
                help: None,
            });
        }

        Ok(Self {
            dimensions,
            channels,
            data,
        })
    }

    /// Create an image filled with a single pixel value.
    pub fn filled(dimensions: Dimensions, pixel: &[u8]) -> Result<Self> {
        let data = pixel.repeat(dimensions.area() as usize);
        Self::from_raw(dimensions, pixel.len(), data)
    }

    /// Convert a decoded image, normalising bit depth to 8 bits per channel.
    ///
    /// Images with colour keep their alpha channel if they have one; grayscale
    /// images are rejected.
    pub fn from_dynamic(img: DynamicImage) -> Result<Self> {
        let colour = img.color();
        if !colour.has_color() {
            return Err(CellpixError::Channels {
                found: usize::from(colour.channel_count()),
            });
        }

        if colour.has_alpha() {
            let buf = img.into_rgba8();
            let dimensions = Dimensions::new(buf.height(), buf.width());
            Self::from_raw(dimensions, 4, buf.into_raw())
        } else {
            let buf = img.into_rgb8();
            let dimensions = Dimensions::new(buf.height(), buf.width());
            Self::from_raw(dimensions, 3, buf.into_raw())
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Samples of the pixel at (`row`, `col`), 0-indexed.
    #[cfg(test)]
    pub(crate) fn pixel(&self, row: u32, col: u32) -> Option<&[u8]> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        let c = self.channels.count();
        let start = (row as usize * self.width() as usize + col as usize) * c;
        self.data.get(start..start + c)
    }

    /// Iterate over rows; each row is `width * channels` samples.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let stride = self.width() as usize * self.channels.count();
        self.data.chunks_exact(stride.max(1))
    }

    /// Raw sample buffer.
    #[cfg(test)]
    pub(crate) fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Resample to exactly `target`, without preserving aspect ratio.
    ///
    /// Returns `self` untouched when the size already matches.
    pub fn resample(self, target: Dimensions, filter: ResampleFilter) -> Result<Self> {
        if target == self.dimensions {
            return Ok(self);
        }
        if self.dimensions.is_empty() || target.is_empty() {
            return Err(CellpixError::Image {
                message: format!("Cannot resample {} to {}", self.dimensions, target),
                help: Some("Both source and target need at least one pixel".to_string()),
            });
        }

        let Dimensions { height, width } = self.dimensions;
        let filter = FilterType::from(filter);
        let data = match self.channels {
            Channels::Rgb => {
                let buf = RgbImage::from_raw(width, height, self.data).ok_or_else(buffer_error)?;
                imageops::resize(&buf, target.width, target.height, filter).into_raw()
            }
            Channels::Rgba => {
                let buf = RgbaImage::from_raw(width, height, self.data).ok_or_else(buffer_error)?;
                imageops::resize(&buf, target.width, target.height, filter).into_raw()
            }
        };

        Self::from_raw(target, self.channels.count(), data)
    }
}

fn buffer_error() -> CellpixError {
    CellpixError::Image {
        message: "Pixel buffer does not match its dimensions".to_string(),
        help: None,
    }
}
