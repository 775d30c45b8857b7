//! matc-util - shared diagnostics, exit codes and logging bootstrap.
//!
//! Every compilation phase reports failure as `Error (Line N): <message>` on
//! stdout and maps its error kind to a fixed process exit code. This crate
//! owns that shared contract so the phase crates (`matc-lex`, `matc-par`,
//! `matc-sym`, `matc-sem`, `matc-gen`, `matc-drv`) don't each reinvent it.

mod exit_code;
mod line_error;
pub mod logging;

pub use exit_code::ExitCode;
pub use line_error::LineError;
