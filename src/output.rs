//! Status output for the cellpix CLI.
//!
//! Each conversion step is reported as a Cargo-style line on stderr, the verb
//! right-aligned in a fixed column:
//!
//! ```text
//!   Generating built-in test card
//!      Scaling 512x512 -> 350x350 (0.684)
//!    Rendering 122500 cells
//!      Writing ExcelImage.xlsx
//!     Finished converted_image (350x350 cells, zoom 27%)
//! ```
//!
//! stdout is left to `plan`, which prints the report itself.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::types::Dimensions;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width of the right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Conversion status printer.
///
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// A step of the conversion, green verb.
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Where the pixels come from when no file is given, cyan verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    /// Grid exceeding its cap, yellow verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Sheet names are printed bold.
    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    /// Paths are printed cyan.
    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&self, color: &str, verb: &str, message: &str) -> String {
        if self.color {
            format!("{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}")
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let _ = writeln!(io::stderr().lock(), "{}", self.line(color, verb, message));
    }
}

/// `512x512 -> 350x350 (0.684)` for a downscale step.
pub fn scale_message(from: Dimensions, to: Dimensions, scale_factor: f64) -> String {
    format!("{} -> {} ({:.3})", from, to, scale_factor)
}

/// `converted_image (350x350 cells, zoom 27%)` for the closing line.
pub fn finished_message(sheet: &str, grid: Dimensions, zoom: u16) -> String {
    format!("{} ({} cells, zoom {}%)", sheet, grid, zoom)
}

/// `1 cell` or `122500 cells`.
pub fn cells(n: u64) -> String {
    if n == 1 {
        "1 cell".to_string()
    } else {
        format!("{} cells", n)
    }
}

/// Output path relative to the working directory when it lies inside it.
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(|p| p.display().to_string()))
        .filter(|relative| !relative.is_empty())
        .unwrap_or_else(|| path.display().to_string())
}
