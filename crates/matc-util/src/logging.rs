//! Logging bootstrap for the `matlangc` driver.
//!
//! Phase crates log with `log::debug!`/`log::info!` at their own boundaries;
//! this just wires up the global logger once, at a level selected by the
//! driver's `-v`/`--verbose` flag.

use log::LevelFilter;

/// Installs the global logger. Safe to call once per process; a second call
/// is a programmer error in this driver and is left to panic like any other
/// `log::set_logger` misuse would.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .expect("logger already initialized");
}
