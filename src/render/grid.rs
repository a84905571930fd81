//! Grid renderer - turns a pixel array into filled spreadsheet cells.
//!
//! Every pixel becomes one solid-filled cell at the same position (1-indexed),
//! rows and columns are sized so cells look roughly square, and one marker
//! cell is written just past the bottom-right corner so viewers that fit the
//! used range to the window include the whole picture.

use serde::Serialize;

use crate::error::Result;
use crate::types::{AlphaMode, Dimensions, Fill, PixelImage};

/// Value written into the marker cell.
pub const MARKER_VALUE: f64 = 1.0;

/// Destination for rendered cells.
///
/// Rows and columns are 1-indexed, as spreadsheets number them.
pub trait CellSink {
    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()>;

    fn set_column_width(&mut self, col: u32, width: f64) -> Result<()>;

    /// Give the cell at (`row`, `col`) a solid fill.
    fn fill_cell(&mut self, row: u32, col: u32, fill: Fill) -> Result<()>;

    /// Write the numeric marker cell.
    fn write_marker(&mut self, row: u32, col: u32, value: f64) -> Result<()>;

    /// Set the sheet's zoom percentage.
    fn set_zoom(&mut self, zoom: u16) -> Result<()>;
}

/// Row height and column width applied to every row and column.
///
/// The defaults (4.5 points, 0.83 characters) give near-square cells at the
/// default spreadsheet font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub row_height: f64,
    pub column_width: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            row_height: 4.5,
            column_width: 0.83,
        }
    }
}

/// Summary of a rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSummary {
    /// Rows and columns of pixel cells.
    pub dimensions: Dimensions,
    /// Number of filled cells written (excluding the marker).
    pub cells: u64,
    /// Marker cell position as (row, col).
    pub marker: (u32, u32),
}

/// Renders pixel arrays into a [`CellSink`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GridRenderer {
    layout: GridLayout,
    alpha: AlphaMode,
}

impl GridRenderer {
    pub fn new(layout: GridLayout, alpha: AlphaMode) -> Self {
        Self { layout, alpha }
    }

    /// Write one filled cell per pixel, the row/column sizing, and the marker.
    pub fn render<S: CellSink>(&self, image: &PixelImage, sink: &mut S) -> Result<GridSummary> {
        let dims = image.dimensions();
        let channels = image.channels().count();

        for col in 1..=dims.width {
            sink.set_column_width(col, self.layout.column_width)?;
        }

        let mut cells = 0u64;
        for (row_idx, row) in (1..=dims.height).zip(image.rows()) {
            sink.set_row_height(row_idx, self.layout.row_height)?;

            for (col_idx, pixel) in (1..).zip(row.chunks_exact(channels)) {
                sink.fill_cell(row_idx, col_idx, Fill::from_pixel(pixel, self.alpha))?;
                cells += 1;
            }
        }

        let marker = (dims.height + 1, dims.width + 1);
        sink.write_marker(marker.0, marker.1, MARKER_VALUE)?;

        Ok(GridSummary {
            dimensions: dims,
            cells,
            marker,
        })
    }
}
