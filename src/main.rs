use clap::Parser;
use miette::Result;
use cellpix::cli::{Cli, Commands};
use cellpix::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => {
            cellpix::cli::convert::run(args, &printer)?;
        }
        Commands::Plan(args) => cellpix::cli::plan::run(args, &printer)?,
        Commands::Completions(args) => cellpix::cli::completions::run(args)?,
    }

    Ok(())
}
