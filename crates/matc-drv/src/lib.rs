//! matc-drv - the `matlangc` command-line driver.
//!
//! Owns everything outside the four core compiler subsystems: argument
//! parsing, the comment-stripping preprocessor, phase orchestration, and the
//! file-lifecycle guarantees (the preprocessed intermediate is always
//! removed; the output file never survives a failure once it exists).

mod cli;
mod error;
mod preprocess;

pub use cli::Cli;
pub use error::DriverError;

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use matc_gen::CodeGenerator;
use matc_lex::tokenize_line;
use matc_par::{parse_line, AnnotatedStatement};
use matc_sym::SymbolTable;
use matc_util::{ExitCode, LineError};

/// Runs the full pipeline for `cli` and returns the process exit code.
///
/// Every early return funnels through [`finish`] so the preprocessed
/// intermediate is removed on every exit path - including paths the
/// original C++ driver's direct early `return` statements skipped.
pub fn run(cli: &Cli) -> ExitCode {
    matc_util::logging::init(cli.verbose);
    log::info!("compiling {}", cli.source.display());

    let preprocessed = match preprocess::strip_comments(&cli.source) {
        Ok(path) => path,
        Err(err) => {
            println!("{}", err);
            return err.exit_code();
        }
    };

    let result = compile(&preprocessed, cli);
    finish(&preprocessed, result)
}

enum Failure {
    Phase(LineError, ExitCode),
    Driver(DriverError),
}

/// Lexes, parses, semantically checks and generates C for the preprocessed
/// file at `preprocessed`, writing the result to `cli`'s output path.
fn compile(preprocessed: &Path, cli: &Cli) -> Result<(), Failure> {
    let file = fs::File::open(preprocessed)
        .map_err(|_| Failure::Driver(DriverError::cannot_open_preprocessed(preprocessed)))?;
    let reader = BufReader::new(file);

    let mut symbols = SymbolTable::new();
    let mut statements: Vec<AnnotatedStatement> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line_count = line_no + 1;
        let line = line.map_err(|_| {
            Failure::Driver(DriverError::cannot_open_preprocessed(preprocessed))
        })?;

        let tokens = tokenize_line(&line).map_err(|err| {
            Failure::Phase(LineError::new(line_count, err.to_string()), ExitCode::LexOrParseError)
        })?;
        if tokens.is_empty() {
            continue;
        }

        log::debug!("line {}: parsing", line_count);
        let statement = parse_line(tokens, line_count, &mut symbols).map_err(|err| {
            Failure::Phase(LineError::new(line_count, err.to_string()), ExitCode::LexOrParseError)
        })?;
        statements.push(statement);
    }

    log::debug!("semantic analysis over {} statements", statements.len());
    matc_sem::analyze(&statements, &symbols)
        .map_err(|err| Failure::Phase(err, ExitCode::SemanticError))?;

    log::debug!("code generation");
    let mut generator = CodeGenerator::new(&mut symbols);
    let code = generator
        .generate(&statements)
        .map_err(|err| Failure::Phase(err, ExitCode::CodeGenError))?;

    let output = cli.output_path();
    fs::write(&output, code).map_err(|e| {
        let _ = fs::remove_file(&output);
        Failure::Driver(DriverError::cannot_write_output(&output, e))
    })?;
    log::info!("wrote {}", output.display());
    Ok(())
}

/// Removes the preprocessed intermediate unconditionally, reports `result`
/// if it failed, and returns the matching exit code.
fn finish(preprocessed: &Path, result: Result<(), Failure>) -> ExitCode {
    let _ = fs::remove_file(preprocessed);
    match result {
        Ok(()) => ExitCode::Success,
        Err(Failure::Phase(err, code)) => {
            println!("{}", err);
            code
        }
        Err(Failure::Driver(err)) => {
            println!("{}", err);
            err.exit_code()
        }
    }
}
