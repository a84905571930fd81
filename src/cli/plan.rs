//! Plan command implementation.
//!
//! Runs the sizing and zoom stages without writing a workbook.

use clap::Args;

use crate::error::Result;
use crate::output::Printer;
use crate::pipeline::{prepare, sheet_name, ConversionReport};

use super::InputArgs;

/// Show the grid size and zoom a conversion would produce
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs, printer: &Printer) -> Result<()> {
    let report = plan(&args.input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        printer.info("Planned", &report.to_string());
    }

    Ok(())
}

/// Build the report for `input` without rendering any cells.
pub fn plan(input: &InputArgs) -> Result<ConversionReport> {
    let cwd = std::env::current_dir()?;
    let settings = input.settings.resolve(&cwd)?;
    let target = input.target()?;
    let source = input.source();

    let prepared = prepare(source.load()?, &settings, target)?;
    Ok(ConversionReport::planned(&prepared, sheet_name(&settings, &source)))
}
