//! Conversion pipeline.
//!
//! Each stage takes explicit inputs and returns a value: load a
//! [`PixelImage`], constrain it into a [`Prepared`] grid with its zoom, then
//! render that into a workbook and save it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use umya_spreadsheet::Spreadsheet;

use crate::config::Settings;
use crate::constrain::{ConstrainOutcome, Constrainer};
use crate::error::Result;
use crate::loader::{load_image, test_card};
use crate::render::{
    new_workbook, sanitize_sheet_name, save_workbook, CellSink, GridRenderer, XlsxSheet,
    DEFAULT_SHEET_NAME,
};
use crate::types::{Channels, Dimensions, PixelImage};

/// Where the input image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    TestCard,
}

impl Source {
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        path.map_or(Source::TestCard, Source::File)
    }

    /// Decode or generate the image.
    pub fn load(&self) -> Result<PixelImage> {
        match self {
            Source::File(path) => load_image(path),
            Source::TestCard => test_card(),
        }
    }

    /// Sheet name to use when none is configured.
    pub fn default_sheet_name(&self) -> String {
        match self {
            Source::File(path) => path
                .file_stem()
                .map(|stem| sanitize_sheet_name(&stem.to_string_lossy()))
                .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            Source::TestCard => DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

/// Pick the worksheet name for a conversion.
pub fn sheet_name(settings: &Settings, source: &Source) -> String {
    match &settings.sheet_name {
        Some(name) => sanitize_sheet_name(name),
        None => source.default_sheet_name(),
    }
}

/// An image constrained to its final grid, with the zoom it will be shown at.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub image: PixelImage,
    pub outcome: ConstrainOutcome,
    pub zoom: u16,
}

/// Constrain `image` to the configured bounds and compute its zoom.
pub fn prepare(image: PixelImage, settings: &Settings, target: Option<Dimensions>) -> Result<Prepared> {
    settings.validate()?;

    let constrainer = Constrainer::new(settings.effective_bounds())?
        .with_filter(settings.filter)
        .with_reclamp(settings.reclamp);
    let constrained = constrainer.constrain(image, target)?;
    let zoom = settings.zoom().zoom_for(constrained.outcome.output);

    Ok(Prepared {
        image: constrained.image,
        outcome: constrained.outcome,
        zoom,
    })
}

/// What a conversion produced (or would produce).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    pub sheet: String,
    pub channels: Channels,
    pub source: Dimensions,
    pub resized: Option<Dimensions>,
    pub scale_factor: f64,
    pub grid: Dimensions,
    pub cells: u64,
    pub marker: (u32, u32),
    pub zoom: u16,
}

impl ConversionReport {
    /// Report for a prepared grid before any cell is written.
    pub fn planned(prepared: &Prepared, sheet: impl Into<String>) -> Self {
        let grid = prepared.outcome.output;
        Self {
            sheet: sheet.into(),
            channels: prepared.image.channels(),
            source: prepared.outcome.source,
            resized: prepared.outcome.resized,
            scale_factor: prepared.outcome.scale_factor,
            grid,
            cells: grid.area(),
            marker: (grid.height + 1, grid.width + 1),
            zoom: prepared.zoom,
        }
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sheet, self.source)?;
        if let Some(resized) = self.resized {
            write!(f, " -> resized {}", resized)?;
        }
        write!(
            f,
            " -> {} (scale {:.3}), {} cells, marker at ({}, {}), zoom {}%",
            self.grid, self.scale_factor, self.cells, self.marker.0, self.marker.1, self.zoom
        )
    }
}

/// Render a prepared grid into any sink, including the zoom setting.
pub fn render_into<S: CellSink>(prepared: &Prepared, settings: &Settings, sink: &mut S) -> Result<u64> {
    let renderer = GridRenderer::new(settings.layout(), settings.alpha);
    let summary = renderer.render(&prepared.image, sink)?;
    sink.set_zoom(prepared.zoom)?;
    Ok(summary.cells)
}

/// Build a single-sheet workbook for a prepared grid.
pub fn build_workbook(prepared: &Prepared, settings: &Settings, sheet: &str) -> Result<(Spreadsheet, u64)> {
    let mut workbook = new_workbook(sheet);
    let cells = {
        let mut sink = XlsxSheet::new(workbook.get_active_sheet_mut());
        render_into(prepared, settings, &mut sink)?
    };
    Ok((workbook, cells))
}

/// Render a prepared grid and save it to `output`.
pub fn write_workbook(
    prepared: &Prepared,
    settings: &Settings,
    sheet: &str,
    output: &Path,
) -> Result<ConversionReport> {
    let (workbook, cells) = build_workbook(prepared, settings, sheet)?;
    save_workbook(&workbook, output)?;

    let mut report = ConversionReport::planned(prepared, sheet);
    report.cells = cells;
    Ok(report)
}

/// Load, constrain, render and save in one go.
pub fn convert(
    source: &Source,
    settings: &Settings,
    target: Option<Dimensions>,
    output: &Path,
) -> Result<ConversionReport> {
    let image = source.load()?;
    let prepared = prepare(image, settings, target)?;
    write_workbook(&prepared, settings, &sheet_name(settings, source), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemorySheet;
    use crate::types::AlphaMode;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_end_to_end_wide_image() {
        let image = PixelImage::filled(Dimensions::new(500, 1000), &[40, 80, 120]).unwrap();
        let prepared = prepare(image, &Settings::default(), None).unwrap();

        assert_eq!(prepared.outcome.output, Dimensions::new(175, 350));

        let mut sheet = MemorySheet::new();
        let cells = render_into(&prepared, &Settings::default(), &mut sheet).unwrap();

        assert_eq!(cells, 175 * 350);
        assert_eq!(sheet.markers(), &[(176, 351, 1.0)]);
        assert_eq!(sheet.zoom(), Some(55));
    }

    #[test]
    fn test_end_to_end_black_rgba() {
        let image = PixelImage::filled(Dimensions::new(10, 10), &[0, 0, 0, 255]).unwrap();
        let prepared = prepare(image, &Settings::default(), None).unwrap();

        let mut sheet = MemorySheet::new();
        render_into(&prepared, &Settings::default(), &mut sheet).unwrap();

        assert_eq!(sheet.cells().len(), 100);
        assert!(sheet.cells().iter().all(|(_, _, fill)| fill.to_string() == "FF000000"));
        assert_eq!(sheet.zoom(), Some(400));
    }

    #[test]
    fn test_alpha_setting_respected() {
        let settings = Settings {
            alpha: AlphaMode::Ignore,
            ..Default::default()
        };
        let image = PixelImage::filled(Dimensions::new(2, 2), &[1, 2, 3, 4]).unwrap();
        let prepared = prepare(image, &settings, None).unwrap();

        let mut sheet = MemorySheet::new();
        render_into(&prepared, &settings, &mut sheet).unwrap();
        assert_eq!(sheet.fill_at(2, 2).map(|f| f.to_string()), Some("010203".to_string()));
    }

    #[test]
    fn test_compact_preset() {
        let settings = Settings {
            preset: crate::config::Preset::Compact,
            ..Default::default()
        };
        let image = PixelImage::filled(Dimensions::new(500, 1000), &[0, 0, 0]).unwrap();
        let prepared = prepare(image, &settings, None).unwrap();
        assert_eq!(prepared.outcome.output, Dimensions::new(125, 250));
    }

    #[test]
    fn test_report_display() {
        let prepared = prepare(test_card().unwrap(), &Settings::default(), None).unwrap();
        let report = ConversionReport::planned(&prepared, DEFAULT_SHEET_NAME);

        insta::assert_snapshot!(
            report.to_string(),
            @"converted_image: 512x512 -> 350x350 (scale 0.684), 122500 cells, marker at (351, 351), zoom 27%"
        );
    }

    #[test]
    fn test_report_display_with_resize() {
        let image = PixelImage::filled(Dimensions::new(10, 10), &[0, 0, 0]).unwrap();
        let prepared = prepare(image, &Settings::default(), Some(Dimensions::new(20, 40))).unwrap();
        let report = ConversionReport::planned(&prepared, "grid");

        assert_eq!(
            report.to_string(),
            "grid: 10x10 -> resized 20x40 -> 20x40 (scale 1.000), 800 cells, marker at (21, 41), zoom 400%"
        );
    }

    #[test]
    fn test_sheet_name_resolution() {
        let settings = Settings::default();
        assert_eq!(sheet_name(&settings, &Source::TestCard), "converted_image");
        assert_eq!(
            sheet_name(&settings, &Source::File(PathBuf::from("photos/cat[1].png"))),
            "cat_1_"
        );

        let named = Settings {
            sheet_name: Some("art".to_string()),
            ..Default::default()
        };
        assert_eq!(sheet_name(&named, &Source::TestCard), "art");
    }

    #[test]
    fn test_convert_writes_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("card.xlsx");

        let report = convert(&Source::TestCard, &Settings::default(), None, &output).unwrap();

        assert!(output.exists());
        assert_eq!(report.grid, Dimensions::new(350, 350));
        assert_eq!(report.cells, 122_500);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            zoom_min: 500,
            ..Default::default()
        };
        let image = PixelImage::filled(Dimensions::new(1, 1), &[0, 0, 0]).unwrap();
        assert!(prepare(image, &settings, None).is_err());
    }
}
