use miette::Diagnostic;
use thiserror::Error;

/// Main error type for cellpix operations
#[derive(Error, Diagnostic, Debug)]
pub enum CellpixError {
    #[error("IO error: {0}")]
    #[diagnostic(code(cellpix::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(cellpix::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Image error: {message}")]
    #[diagnostic(code(cellpix::image))]
    Image {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unsupported channel count: expected 3 (RGB) or 4 (RGBA), found {found}")]
    #[diagnostic(
        code(cellpix::channels),
        help("Convert the image to RGB or RGBA before converting it")
    )]
    Channels { found: usize },

    #[error("Config error: {message}")]
    #[diagnostic(code(cellpix::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Workbook error: {message}")]
    #[diagnostic(code(cellpix::workbook))]
    Workbook {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Report error: {0}")]
    #[diagnostic(code(cellpix::report))]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CellpixError>;
