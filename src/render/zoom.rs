//! Zoom calculator.
//!
//! Picks a sheet zoom so the rendered grid roughly fills a reference window:
//! at 100% a reference display shows `reference_rows` rows and
//! `reference_columns` columns of `cell_pixels`-sized cells.

use crate::error::{CellpixError, Result};
use crate::types::Dimensions;

/// Calibration constants for the zoom heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomCalibration {
    /// On-screen pixels per cell at 100% zoom.
    pub cell_pixels: u32,
    /// Rows visible at 100% zoom on the reference display.
    pub reference_rows: u32,
    /// Columns visible at 100% zoom on the reference display.
    pub reference_columns: u32,
    /// Smallest zoom the host accepts.
    pub min: u16,
    /// Largest zoom the host accepts.
    pub max: u16,
}

impl Default for ZoomCalibration {
    fn default() -> Self {
        Self {
            cell_pixels: 12,
            reference_rows: 97,
            reference_columns: 220,
            min: 10,
            max: 400,
        }
    }
}

impl ZoomCalibration {
    /// Check that the calibration can produce a zoom at all.
    pub fn validate(&self) -> Result<()> {
        if self.cell_pixels == 0 || self.reference_rows == 0 || self.reference_columns == 0 {
            return Err(CellpixError::Config {
                message: "Zoom calibration values must be positive".to_string(),
                help: Some("Check cell_pixels, reference_rows and reference_columns".to_string()),
            });
        }
        if self.min == 0 || self.min > self.max {
            return Err(CellpixError::Config {
                message: format!("Invalid zoom range {}..={}", self.min, self.max),
                help: Some("Spreadsheet viewers accept 10..=400".to_string()),
            });
        }
        Ok(())
    }

    /// Reference window size in pixels as (height, width).
    pub fn reference_pixels(&self) -> (u64, u64) {
        let cell = u64::from(self.cell_pixels);
        (
            u64::from(self.reference_rows) * cell,
            u64::from(self.reference_columns) * cell,
        )
    }

    /// Zoom percentage for a grid of `dims` cells.
    ///
    /// Each axis gets `floor(reference / (cells * cell_pixels) * 100)`; the
    /// smaller one wins so the whole grid is visible, then the result is
    /// clamped to `min..=max`. An empty axis saturates to `max`.
    pub fn zoom_for(&self, dims: Dimensions) -> u16 {
        let (ref_h, ref_w) = self.reference_pixels();
        let cell = u64::from(self.cell_pixels);

        let axis = |reference: u64, cells: u32| {
            let pixels = u64::from(cells) * cell;
            if pixels == 0 {
                u64::MAX
            } else {
                reference * 100 / pixels
            }
        };

        let zoom = axis(ref_h, dims.height).min(axis(ref_w, dims.width));
        zoom.clamp(u64::from(self.min), u64::from(self.max)) as u16
    }
}
