use std::path::PathBuf;

use thiserror::Error;

use crate::domain::formats::ProblemFormat;

/// Result type for solver adapter operations
pub type Result<T> = std::result::Result<T, SolverError>;

/// Errors that can occur while configuring or running a solver adapter
#[derive(Error, Debug)]
pub enum SolverError {
    /// The requested solver I/O mode is not one of `mps`, `mod` or `os`
    #[error("Unknown IO type: {0}")]
    UnknownIo(String),

    /// No plugin is registered under this alias
    #[error("Unknown solver: {0}")]
    UnknownSolver(String),

    /// The executable could not be located or the solver was disabled
    #[error("Solver ({solver}) is not available: no '{executable}' executable")]
    Unavailable { solver: String, executable: String },

    #[error("Solver ({solver}) cannot accept problem format {format}")]
    UnsupportedFormat { solver: String, format: ProblemFormat },

    /// Construction failed for reasons the host can recover from
    #[error("Application error: {0}")]
    Application(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing mock data file '{}'", .0.display())]
    MissingMockData(PathBuf),

    /// The solver process exited with a non-zero status
    #[error("Solver ({solver}) did not exit normally: return code {return_code}")]
    ExecutionFailed { solver: String, return_code: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
