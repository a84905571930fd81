//! Dimension constrainer.
//!
//! Shrinks an image so it fits a maximum cell grid, scaling both axes by the
//! same factor. Images are never enlarged here. An explicit target size can be
//! applied first; that step ignores aspect ratio.

use serde::Serialize;

use crate::error::{CellpixError, Result};
use crate::types::{Dimensions, PixelImage, ResampleFilter};

/// Result of constraining an image.
#[derive(Debug, Clone)]
pub struct Constrained {
    pub image: PixelImage,
    pub outcome: ConstrainOutcome,
}

/// What the constrainer did, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConstrainOutcome {
    /// Dimensions of the decoded input.
    pub source: Dimensions,
    /// Dimensions after the explicit resize, if one was requested.
    pub resized: Option<Dimensions>,
    /// Uniform scale factor applied by the max-bound clamp (1 when skipped).
    pub scale_factor: f64,
    /// Dimensions read back from the final array.
    pub output: Dimensions,
}

/// Compute the uniform scale factor that makes `dims` fit within `bounds`.
///
/// Each axis gets `max / len` when it overflows and 1 otherwise; the smaller
/// of the two wins so that both axes fit.
pub fn scale_factor(dims: Dimensions, bounds: Dimensions) -> f64 {
    let axis = |len: u32, max: u32| {
        if len > max {
            f64::from(max) / f64::from(len)
        } else {
            1.0
        }
    };

    let sf_h = axis(dims.height, bounds.height);
    let sf_w = axis(dims.width, bounds.width);
    sf_h.min(sf_w)
}

/// Apply a scale factor to both axes, rounding to the nearest pixel.
///
/// Each axis keeps at least one pixel and, when a bound is given, never
/// exceeds it.
pub fn scaled_dimensions(dims: Dimensions, sf: f64, bounds: Dimensions) -> Dimensions {
    let scale = |len: u32, max: u32| {
        let scaled = (f64::from(len) * sf).round().max(1.0) as u32;
        scaled.min(max.max(1))
    };

    Dimensions::new(scale(dims.height, bounds.height), scale(dims.width, bounds.width))
}

/// Fits images into a bounded cell grid.
#[derive(Debug, Clone, Copy)]
pub struct Constrainer {
    bounds: Dimensions,
    filter: ResampleFilter,
    reclamp: bool,
}

impl Constrainer {
    /// Create a constrainer for the given per-axis maximum.
    pub fn new(bounds: Dimensions) -> Result<Self> {
        if bounds.is_empty() {
            return Err(CellpixError::Config {
                message: format!("Maximum grid size must be at least 1x1, got {}", bounds),
                help: None,
            });
        }

        Ok(Self {
            bounds,
            filter: ResampleFilter::default(),
            reclamp: true,
        })
    }

    /// Use a different resampling filter.
    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Whether the max-bound clamp still runs after an explicit resize.
    pub fn with_reclamp(mut self, reclamp: bool) -> Self {
        self.reclamp = reclamp;
        self
    }

    /// Resize to `target` if given, then shrink to fit the bounds.
    pub fn constrain(&self, image: PixelImage, target: Option<Dimensions>) -> Result<Constrained> {
        let source = image.dimensions();

        let (image, resized) = match target {
            Some(target) => {
                if target.is_empty() {
                    return Err(CellpixError::Config {
                        message: format!("Requested size must be at least 1x1, got {}", target),
                        help: Some("Pass --dimensions HEIGHT WIDTH with positive values".to_string()),
                    });
                }
                let image = image.resample(target, self.filter)?;
                let resized = image.dimensions();
                (image, Some(resized))
            }
            None => (image, None),
        };

        if resized.is_some() && !self.reclamp {
            let output = image.dimensions();
            return Ok(Constrained {
                image,
                outcome: ConstrainOutcome {
                    source,
                    resized,
                    scale_factor: 1.0,
                    output,
                },
            });
        }

        let current = image.dimensions();
        // Nothing to resample in a zero-area image
        let sf = if current.is_empty() {
            1.0
        } else {
            scale_factor(current, self.bounds)
        };
        let image = if sf < 1.0 {
            image.resample(scaled_dimensions(current, sf, self.bounds), self.filter)?
        } else {
            image
        };

        let output = image.dimensions();
        Ok(Constrained {
            image,
            outcome: ConstrainOutcome {
                source,
                resized,
                scale_factor: sf,
                output,
            },
        })
    }
}
