use adkit_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // File logging keeps stdout clean for command output; fall back to
    // stderr when the state directory is unavailable.
    let _guard = match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(_) => {
            logging::init_logging_stderr();
            None
        }
    };

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("adkit error: {:#}", err);
        std::process::exit(1);
    }
}
