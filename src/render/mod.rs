//! Rendering module for cellpix.
//!
//! This module turns constrained pixel arrays into spreadsheet cells and
//! works out the zoom the sheet is shown at.

mod grid;
mod memory;
mod xlsx;
mod zoom;

pub use grid::{CellSink, GridLayout, GridRenderer, GridSummary, MARKER_VALUE};
pub use memory::MemorySheet;
pub use xlsx::{
    new_workbook, sanitize_sheet_name, save_workbook, XlsxSheet, DEFAULT_SHEET_NAME,
    MAX_SHEET_NAME_LEN,
};
pub use zoom::ZoomCalibration;
