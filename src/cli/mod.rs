pub mod completions;
pub mod convert;
pub mod plan;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::{Preset, Settings};
use crate::error::{CellpixError, Result};
use crate::pipeline::Source;
use crate::types::{AlphaMode, Dimensions, ResampleFilter};

/// cellpix - Spreadsheet pixel art from raster images
#[derive(Parser, Debug)]
#[command(name = "cellpix")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an image into a workbook with one coloured cell per pixel
    Convert(convert::ConvertArgs),

    /// Show the grid size and zoom a conversion would produce
    Plan(plan::PlanArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Input selection shared by `convert` and `plan`.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Image to convert (default: built-in test card)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Resize to exactly HEIGHT x WIDTH before the size cap (-1 on either axis means no resize)
    #[arg(
        long,
        short,
        num_args = 2,
        value_names = ["HEIGHT", "WIDTH"],
        allow_negative_numbers = true
    )]
    pub dimensions: Option<Vec<i64>>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

impl InputArgs {
    pub fn source(&self) -> Source {
        Source::from_arg(self.input.clone())
    }

    /// The explicit resize target, if one was requested.
    pub fn target(&self) -> Result<Option<Dimensions>> {
        parse_dimensions(self.dimensions.as_deref())
    }
}

/// Flags that override cellpix.yaml.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Settings file (default: ./cellpix.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Size cap preset: standard (350x350) or compact (250x250)
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Maximum grid height in cells
    #[arg(long)]
    pub max_height: Option<u32>,

    /// Maximum grid width in cells
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Drop the alpha channel of RGBA images
    #[arg(long)]
    pub no_alpha: bool,

    /// Skip the size cap after an explicit --dimensions resize
    #[arg(long)]
    pub no_reclamp: bool,

    /// Resampling filter
    #[arg(long, value_enum)]
    pub filter: Option<ResampleFilter>,

    /// Worksheet name (default: input file name)
    #[arg(long)]
    pub sheet_name: Option<String>,
}

impl SettingsArgs {
    /// Load settings for `dir` and apply the flags on top.
    pub fn resolve(&self, dir: &Path) -> Result<Settings> {
        let mut settings = Settings::discover(self.config.as_deref(), dir)?;

        if let Some(preset) = self.preset {
            settings.preset = preset;
        }
        if self.max_height.is_some() {
            settings.max_height = self.max_height;
        }
        if self.max_width.is_some() {
            settings.max_width = self.max_width;
        }
        if self.no_alpha {
            settings.alpha = AlphaMode::Ignore;
        }
        if self.no_reclamp {
            settings.reclamp = false;
        }
        if let Some(filter) = self.filter {
            settings.filter = filter;
        }
        if let Some(name) = &self.sheet_name {
            settings.sheet_name = Some(name.clone());
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// Interpret a `HEIGHT WIDTH` pair; a `-1` on either axis means no explicit size.
pub fn parse_dimensions(values: Option<&[i64]>) -> Result<Option<Dimensions>> {
    let invalid = |message: String| CellpixError::Config {
        message,
        help: Some("Pass --dimensions HEIGHT WIDTH with positive values".to_string()),
    };

    match values {
        None => Ok(None),
        Some(&[height, width]) if height == -1 || width == -1 => Ok(None),
        Some(&[height, width]) => {
            let axis = |v: i64| {
                u32::try_from(v)
                    .ok()
                    .filter(|v| *v > 0)
                    .ok_or_else(|| invalid(format!("Invalid dimension: {}", v)))
            };
            Ok(Some(Dimensions::new(axis(height)?, axis(width)?)))
        }
        Some(other) => Err(invalid(format!(
            "Expected two dimensions, got {}",
            other.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions(None).unwrap(), None);
        assert_eq!(parse_dimensions(Some(&[-1, -1])).unwrap(), None);
        assert_eq!(
            parse_dimensions(Some(&[120, 80])).unwrap(),
            Some(Dimensions::new(120, 80))
        );
        assert!(parse_dimensions(Some(&[0, 80])).is_err());
        assert_eq!(parse_dimensions(Some(&[-1, 80])).unwrap(), None);
        assert_eq!(parse_dimensions(Some(&[120, -1])).unwrap(), None);
        assert!(parse_dimensions(Some(&[-2, 80])).is_err());
        assert!(parse_dimensions(Some(&[1])).is_err());
    }

    #[test]
    fn test_cli_parses_dimensions() {
        let cli = Cli::try_parse_from(["cellpix", "convert", "-d", "-1", "-1"]).unwrap();
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.input.dimensions, Some(vec![-1, -1]));
                assert_eq!(args.input.target().unwrap(), None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_flags_override_settings_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(crate::config::CONFIG_FILENAME),
            "preset: compact\nreclamp: true\n",
        )
        .unwrap();

        let args = SettingsArgs {
            max_width: Some(100),
            no_alpha: true,
            no_reclamp: true,
            ..Default::default()
        };
        let settings = args.resolve(dir.path()).unwrap();

        assert_eq!(settings.effective_bounds(), Dimensions::new(250, 100));
        assert_eq!(settings.alpha, AlphaMode::Ignore);
        assert!(!settings.reclamp);
    }

    #[test]
    fn test_resolve_rejects_zero_cap() {
        let dir = tempdir().unwrap();
        let args = SettingsArgs {
            max_height: Some(0),
            ..Default::default()
        };
        assert!(args.resolve(dir.path()).is_err());
    }
}
