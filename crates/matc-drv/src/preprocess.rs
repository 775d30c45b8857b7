//! The comment-stripping preprocessor.
//!
//! `#` begins a line comment that runs to end of line. Comments are stripped
//! by truncating each line at its first `#`, never by deleting the line
//! itself, so line numbers reported by later phases still match the original
//! source file.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::DriverError;

/// Appends `.pp` to `source`'s file name, mirroring the original compiler's
/// convention for naming the preprocessed intermediate.
pub fn preprocessed_path(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_os_string();
    name.push(".pp");
    PathBuf::from(name)
}

/// Reads `source`, strips every line's trailing `#...` comment, and writes
/// the result to `source`'s `.pp` sibling, returning that path.
pub fn strip_comments(source: &Path) -> Result<PathBuf, DriverError> {
    let content =
        fs::read_to_string(source).map_err(|_| DriverError::cannot_open_source(source))?;

    let preprocessed = preprocessed_path(source);
    let mut output = fs::File::create(&preprocessed)
        .map_err(|e| DriverError::cannot_write_preprocessed(&preprocessed, e))?;

    for line in content.lines() {
        let stripped = line.split('#').next().unwrap_or("");
        writeln!(output, "{}", stripped)
            .map_err(|e| DriverError::cannot_write_preprocessed(&preprocessed, e))?;
    }

    Ok(preprocessed)
}
