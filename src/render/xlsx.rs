//! XLSX output for rendered grids.
//!
//! Wraps a `umya_spreadsheet` worksheet as a [`CellSink`]. Fills are stored
//! as ARGB: 4-channel fills keep their own alpha byte, 3-channel fills are
//! written fully opaque.

use std::collections::HashMap;
use std::path::Path;

use umya_spreadsheet::{PatternValues, SheetView, Spreadsheet, Style, Worksheet};

use crate::error::{CellpixError, Result};
use crate::types::Fill;

use super::CellSink;

/// Longest sheet name spreadsheet applications accept.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Widest column index a worksheet can address.
const MAX_COLUMNS: u32 = 16_384;

/// Sheet name used when nothing better is available.
pub const DEFAULT_SHEET_NAME: &str = "converted_image";

/// A worksheet being filled with pixel cells.
///
/// Keeps one `Style` per distinct fill so repeated colours are cheap.
pub struct XlsxSheet<'a> {
    worksheet: &'a mut Worksheet,
    styles: HashMap<Fill, Style>,
}

impl<'a> XlsxSheet<'a> {
    pub fn new(worksheet: &'a mut Worksheet) -> Self {
        Self {
            worksheet,
            styles: HashMap::new(),
        }
    }
}

impl CellSink for XlsxSheet<'_> {
    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        self.worksheet
            .get_row_dimension_mut(&row)
            .set_height(height)
            .set_custom_height(true);
        Ok(())
    }

    fn set_column_width(&mut self, col: u32, width: f64) -> Result<()> {
        check_column(col)?;
        self.worksheet
            .get_column_dimension_by_number_mut(&col)
            .set_width(width);
        Ok(())
    }

    fn fill_cell(&mut self, row: u32, col: u32, fill: Fill) -> Result<()> {
        check_column(col)?;
        let style = self
            .styles
            .entry(fill)
            .or_insert_with(|| fill_style(fill))
            .clone();
        self.worksheet.set_style((col, row), style);
        Ok(())
    }

    fn write_marker(&mut self, row: u32, col: u32, value: f64) -> Result<()> {
        check_column(col)?;
        self.worksheet.get_cell_mut((col, row)).set_value_number(value);
        Ok(())
    }

    fn set_zoom(&mut self, zoom: u16) -> Result<()> {
        let views = self.worksheet.get_sheet_views_mut();
        if views.get_sheet_view_list().is_empty() {
            views.add_sheet_view_list_mut(SheetView::default());
        }
        for view in views.get_sheet_view_list_mut().iter_mut() {
            view.set_zoom_scale(u32::from(zoom));
        }
        Ok(())
    }
}

/// The `AARRGGBB` string stored for a fill.
fn argb_hex(fill: Fill) -> String {
    if fill.has_alpha() {
        fill.to_string()
    } else {
        format!("FF{}", fill)
    }
}

/// Solid pattern with the fill colour as foreground.
fn fill_style(fill: Fill) -> Style {
    let mut style = Style::default();
    style
        .get_fill_mut()
        .get_pattern_fill_mut()
        .set_pattern_type(PatternValues::Solid)
        .get_foreground_color_mut()
        .set_argb(argb_hex(fill));
    style
}

fn check_column(col: u32) -> Result<()> {
    if col == 0 || col > MAX_COLUMNS {
        return Err(CellpixError::Workbook {
            message: format!("Column {} is beyond the spreadsheet column limit", col),
            help: Some("Lower the maximum grid width".to_string()),
        });
    }
    Ok(())
}

/// Create a workbook whose single worksheet is named `name`.
pub fn new_workbook(name: &str) -> Spreadsheet {
    let mut book = umya_spreadsheet::new_file();
    book.get_active_sheet_mut().set_name(name);
    book
}

/// Write `book` to `path`.
pub fn save_workbook(book: &Spreadsheet, path: &Path) -> Result<()> {
    umya_spreadsheet::writer::xlsx::write(book, path).map_err(|e| CellpixError::Workbook {
        message: format!("Failed to write {}: {}", path.display(), e),
        help: Some("Check that the output directory exists and is writable".to_string()),
    })
}

/// Turn an arbitrary label into a valid sheet name.
///
/// Characters spreadsheets reject (`[ ] : * ? / \`) become `_`, leading and
/// trailing apostrophes are dropped, and the result is cut to 31 characters.
/// Falls back to [`DEFAULT_SHEET_NAME`] when nothing usable remains.
pub fn sanitize_sheet_name(label: &str) -> String {
    let cleaned: String = label
        .trim()
        .trim_matches('\'')
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME_LEN)
        .collect();

    let cleaned = cleaned.trim_end_matches('\'').trim().to_string();
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("history") {
        DEFAULT_SHEET_NAME.to_string()
    } else {
        cleaned
    }
}
