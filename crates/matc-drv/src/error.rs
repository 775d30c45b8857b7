use std::path::Path;

use matc_util::ExitCode;
use thiserror::Error;

/// Everything that can go wrong in the driver itself, as opposed to the
/// phases it orchestrates. Every variant maps to a fixed process exit code;
/// phase failures (`LineError`) are mapped separately in [`crate::run`] since
/// they already carry their own line-tagged message.
///
/// Paths are stored pre-rendered to `String`: neither `Path` nor `PathBuf`
/// implement `Display`, so a format string can't embed one directly.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{0} couldn't be opened")]
    CannotOpenSource(String),

    #[error("{0} couldn't be opened")]
    CannotOpenPreprocessed(String),

    #[error("couldn't write preprocessed source {0}: {1}")]
    CannotWritePreprocessed(String, #[source] std::io::Error),

    #[error("couldn't write output file {0}: {1}")]
    CannotWriteOutput(String, #[source] std::io::Error),
}

impl DriverError {
    pub fn cannot_open_source(path: &Path) -> Self {
        Self::CannotOpenSource(path.display().to_string())
    }

    pub fn cannot_open_preprocessed(path: &Path) -> Self {
        Self::CannotOpenPreprocessed(path.display().to_string())
    }

    pub fn cannot_write_preprocessed(path: &Path, source: std::io::Error) -> Self {
        Self::CannotWritePreprocessed(path.display().to_string(), source)
    }

    pub fn cannot_write_output(path: &Path, source: std::io::Error) -> Self {
        Self::CannotWriteOutput(path.display().to_string(), source)
    }

    /// Source/preprocessed-file failures happen before code generation
    /// starts and share the `-3` taxonomy slot; output-file failures happen
    /// once code generation has already begun writing, so they're treated
    /// the same as a generator failure (`-7`) for exit-code and cleanup
    /// purposes.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DriverError::CannotOpenSource(_)
            | DriverError::CannotOpenPreprocessed(_)
            | DriverError::CannotWritePreprocessed(_, _) => ExitCode::CannotOpenPreprocessed,
            DriverError::CannotWriteOutput(_, _) => ExitCode::CodeGenError,
        }
    }
}
