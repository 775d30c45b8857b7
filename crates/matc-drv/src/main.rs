use clap::Parser;
use matc_drv::Cli;
use matc_util::ExitCode;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help / --version: clap has already printed its message and
        // picks its own (successful) exit code for these.
        Err(err) if err.exit_code() == 0 => err.exit(),
        Err(err) => {
            err.print().ok();
            std::process::exit(ExitCode::BadUsage.as_i32());
        }
    };

    std::process::exit(matc_drv::run(&cli).as_i32());
}
