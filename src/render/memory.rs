//! In-memory cell sink.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::types::Fill;

use super::CellSink;

/// A [`CellSink`] that records everything written to it.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    row_heights: BTreeMap<u32, f64>,
    column_widths: BTreeMap<u32, f64>,
    cells: Vec<(u32, u32, Fill)>,
    markers: Vec<(u32, u32, f64)>,
    zoom: Option<u16>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filled cells in write order.
    pub fn cells(&self) -> &[(u32, u32, Fill)] {
        &self.cells
    }

    pub fn markers(&self) -> &[(u32, u32, f64)] {
        &self.markers
    }

    pub fn row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    pub fn column_widths(&self) -> &BTreeMap<u32, f64> {
        &self.column_widths
    }

    pub fn zoom(&self) -> Option<u16> {
        self.zoom
    }

    /// Fill of the cell at (`row`, `col`), if one was written.
    pub fn fill_at(&self, row: u32, col: u32) -> Option<Fill> {
        self.cells
            .iter()
            .find(|(r, c, _)| *r == row && *c == col)
            .map(|(_, _, fill)| *fill)
    }
}

impl CellSink for MemorySheet {
    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        self.row_heights.insert(row, height);
        Ok(())
    }

    fn set_column_width(&mut self, col: u32, width: f64) -> Result<()> {
        self.column_widths.insert(col, width);
        Ok(())
    }

    fn fill_cell(&mut self, row: u32, col: u32, fill: Fill) -> Result<()> {
        self.cells.push((row, col, fill));
        Ok(())
    }

    fn write_marker(&mut self, row: u32, col: u32, value: f64) -> Result<()> {
        self.markers.push((row, col, value));
        Ok(())
    }

    fn set_zoom(&mut self, zoom: u16) -> Result<()> {
        self.zoom = Some(zoom);
        Ok(())
    }
}
