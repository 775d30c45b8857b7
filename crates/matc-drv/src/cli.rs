use std::path::PathBuf;

use clap::Parser;

/// `matlangc SOURCE` or `matlangc SOURCE -o OUTPUT`.
#[derive(Debug, Parser)]
#[command(name = "matlangc", version, about = "MatLang to C compiler")]
pub struct Cli {
    /// MatLang source file to compile.
    pub source: PathBuf,

    /// Output C file. Defaults to SOURCE with its last extension stripped
    /// and `.c` appended.
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Log each compilation phase as it runs.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// The file `generate` writes to: the explicit `-o` path, or SOURCE with
    /// its last extension replaced by `.c`.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.source.with_extension("c"))
    }
}
