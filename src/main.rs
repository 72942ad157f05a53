//! Provides the main entry point to the program.
use human_panic::{metadata, setup_panic};
use mctnk::cli::run_cli;
use mctnk::log::is_logger_initialised;

fn main() {
    setup_panic!(metadata!().support("Open an issue on the project's issue tracker"));

    if let Err(err) = run_cli() {
        if is_logger_initialised() {
            ::log::error!("{err:?}");
        } else {
            eprintln!("Error: {err:?}");
        }

        // Terminate program, signalling an error
        std::process::exit(1);
    }
}
