//! Conversion settings (cellpix.yaml).
//!
//! Every field is optional; missing fields fall back to the defaults used by
//! the standard preset. Command-line flags are applied on top.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{CellpixError, Result};
use crate::render::{GridLayout, ZoomCalibration};
use crate::types::{AlphaMode, Dimensions, ResampleFilter};

/// Settings file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "cellpix.yaml";

/// Grid size caps seen in practice.
///
/// The standard preset allows 350×350 cells, the compact one 250×250.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Standard,
    Compact,
}

impl Preset {
    pub fn bounds(self) -> Dimensions {
        match self {
            Preset::Standard => Dimensions::new(350, 350),
            Preset::Compact => Dimensions::new(250, 250),
        }
    }
}

/// Conversion settings loaded from cellpix.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cap preset used when no explicit maximum is given.
    pub preset: Preset,

    /// Maximum grid height in cells (overrides the preset).
    pub max_height: Option<u32>,

    /// Maximum grid width in cells (overrides the preset).
    pub max_width: Option<u32>,

    /// How 4-channel images are coloured.
    pub alpha: AlphaMode,

    /// Re-apply the size cap after an explicit resize.
    pub reclamp: bool,

    /// Resampling filter.
    pub filter: ResampleFilter,

    /// Row height in points.
    pub row_height: f64,

    /// Column width in character units.
    pub column_width: f64,

    /// On-screen pixels per cell at 100% zoom.
    pub cell_pixels: u32,

    /// Rows visible at 100% zoom on the reference display.
    pub reference_rows: u32,

    /// Columns visible at 100% zoom on the reference display.
    pub reference_columns: u32,

    pub zoom_min: u16,

    pub zoom_max: u16,

    /// Worksheet name; derived from the input file when absent.
    pub sheet_name: Option<String>,

    /// Output workbook path.
    pub output: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from("./ExcelImage.xlsx")
}

impl Default for Settings {
    fn default() -> Self {
        let layout = GridLayout::default();
        let zoom = ZoomCalibration::default();

        Self {
            preset: Preset::default(),
            max_height: None,
            max_width: None,
            alpha: AlphaMode::default(),
            reclamp: true,
            filter: ResampleFilter::default(),
            row_height: layout.row_height,
            column_width: layout.column_width,
            cell_pixels: zoom.cell_pixels,
            reference_rows: zoom.reference_rows,
            reference_columns: zoom.reference_columns,
            zoom_min: zoom.min,
            zoom_max: zoom.max,
            sheet_name: None,
            output: default_output(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CellpixError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read settings: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // serde_yaml reads an empty document as unit, not as an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| CellpixError::Config {
            message: format!("Invalid settings: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load from an explicit path, else `cellpix.yaml` in `dir` if present,
    /// else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Maximum grid size: explicit caps win over the preset, per axis.
    pub fn effective_bounds(&self) -> Dimensions {
        let preset = self.preset.bounds();
        Dimensions::new(
            self.max_height.unwrap_or(preset.height),
            self.max_width.unwrap_or(preset.width),
        )
    }

    pub fn layout(&self) -> GridLayout {
        GridLayout {
            row_height: self.row_height,
            column_width: self.column_width,
        }
    }

    pub fn zoom(&self) -> ZoomCalibration {
        ZoomCalibration {
            cell_pixels: self.cell_pixels,
            reference_rows: self.reference_rows,
            reference_columns: self.reference_columns,
            min: self.zoom_min,
            max: self.zoom_max,
        }
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        let bounds = self.effective_bounds();
        if bounds.is_empty() {
            return Err(CellpixError::Config {
                message: format!("Maximum grid size must be at least 1x1, got {}", bounds),
                help: Some("Set max_height and max_width to positive values".to_string()),
            });
        }

        let sizing_ok = |v: f64| v.is_finite() && v > 0.0;
        if !sizing_ok(self.row_height) || !sizing_ok(self.column_width) {
            return Err(CellpixError::Config {
                message: format!(
                    "Row height and column width must be positive, got {} and {}",
                    self.row_height, self.column_width
                ),
                help: None,
            });
        }

        self.zoom().validate()
    }
}
