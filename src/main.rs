//! Provides the main entry point to the program.
use facloc::cli::run_cli;
use facloc::log::is_logger_initialised;
use human_panic::setup_panic;
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    setup_panic!();

    match run_cli() {
        Ok(code) => code,
        Err(err) => {
            if is_logger_initialised() {
                error!("{err:?}");
            } else {
                eprintln!("Error: {err:?}");
            }

            ExitCode::FAILURE
        }
    }
}
