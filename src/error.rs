use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating, loading or rendering a simulation run
#[derive(Debug, Error)]
pub enum TwoBodyError {
    /// The run directory does not exist
    #[error("data directory does not exist: {0}")]
    RunDirMissing(PathBuf),

    /// The run directory exists but holds no files
    #[error("data directory is empty: {0}")]
    RunDirEmpty(PathBuf),

    /// A simulation with this name already exists
    #[error("simulation '{0}' already exists (use --force to overwrite)")]
    RunExists(String),

    /// Malformed row in the data table
    #[error("parse error in {file} at line {line}: {reason}")]
    Parse {
        file: PathBuf,
        line: usize,
        reason: String,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Plot rendering error (plotters backends are generic, so the error
    /// crosses this seam as a string)
    #[error("render error: {0}")]
    Render(String),
}

/// Type alias for Results using TwoBodyError
pub type Result<T> = std::result::Result<T, TwoBodyError>;
