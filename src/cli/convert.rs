//! Convert command implementation.
//!
//! Loads an image, fits it to the cell grid and writes the workbook.

use std::path::PathBuf;

use clap::Args;

use crate::constrain::ConstrainOutcome;
use crate::error::Result;
use crate::output::{cells, display_path, finished_message, scale_message, Printer};
use crate::pipeline::{prepare, sheet_name, write_workbook, ConversionReport, Source};

use super::InputArgs;

/// Convert an image into a workbook with one coloured cell per pixel
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output workbook (default: ./ExcelImage.xlsx)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<ConversionReport> {
    let cwd = std::env::current_dir()?;
    let settings = args.input.settings.resolve(&cwd)?;
    let target = args.input.target()?;
    let source = args.input.source();
    let output = args.output.unwrap_or_else(|| settings.output.clone());

    match &source {
        Source::File(path) => printer.status("Loading", &printer.cyan(&display_path(path))),
        Source::TestCard => printer.info("Generating", "built-in test card"),
    }
    let image = source.load()?;

    let prepared = prepare(image, &settings, target)?;
    report_outcome(&prepared.outcome, printer);

    let bounds = settings.effective_bounds();
    if !prepared.outcome.output.fits_within(bounds) {
        printer.warning(
            "Warning",
            &format!("grid {} exceeds the {} cap", prepared.outcome.output, bounds),
        );
    }

    printer.status("Rendering", &cells(prepared.outcome.output.area()));
    printer.status("Writing", &printer.cyan(&display_path(&output)));

    let sheet = sheet_name(&settings, &source);
    let report = write_workbook(&prepared, &settings, &sheet, &output)?;

    printer.status(
        "Finished",
        &finished_message(&printer.bold(&report.sheet), report.grid, report.zoom),
    );

    Ok(report)
}

/// Print what the constrainer did to the image.
fn report_outcome(outcome: &ConstrainOutcome, printer: &Printer) {
    let mut current = outcome.source;

    if let Some(resized) = outcome.resized {
        printer.status("Resizing", &format!("{} -> {}", current, resized));
        current = resized;
    }

    if outcome.scale_factor < 1.0 {
        printer.status(
            "Scaling",
            &scale_message(current, outcome.output, outcome.scale_factor),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SettingsArgs;
    use crate::types::Dimensions;
    use image::{ImageBuffer, Rgb, RgbImage};
    use tempfile::tempdir;

    fn args(input: PathBuf, output: PathBuf, dimensions: Option<Vec<i64>>) -> ConvertArgs {
        ConvertArgs {
            input: InputArgs {
                input: Some(input),
                dimensions,
                settings: SettingsArgs::default(),
            },
            output: Some(output),
        }
    }

    #[test]
    fn test_convert_png() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.png");
        let output = dir.path().join("photo.xlsx");
        let img: RgbImage = ImageBuffer::from_pixel(40, 20, Rgb([12, 34, 56]));
        img.save(&input).unwrap();

        let report = run(args(input, output.clone(), None), &Printer::plain()).unwrap();

        assert!(output.exists());
        assert_eq!(report.sheet, "photo");
        assert_eq!(report.grid, Dimensions::new(20, 40));
        assert_eq!(report.cells, 800);
        assert_eq!(report.marker, (21, 41));
    }

    #[test]
    fn test_convert_with_dimensions() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("tiny.png");
        let output = dir.path().join("tiny.xlsx");
        let img: RgbImage = ImageBuffer::from_pixel(4, 4, Rgb([255, 255, 255]));
        img.save(&input).unwrap();

        let report = run(
            args(input, output.clone(), Some(vec![30, 60])),
            &Printer::plain(),
        )
        .unwrap();

        assert_eq!(report.resized, Some(Dimensions::new(30, 60)));
        assert_eq!(report.grid, Dimensions::new(30, 60));
    }

    #[test]
    fn test_convert_missing_input() {
        let dir = tempdir().unwrap();
        let result = run(
            args(dir.path().join("missing.png"), dir.path().join("out.xlsx"), None),
            &Printer::plain(),
        );
        assert!(result.is_err());
    }
}
