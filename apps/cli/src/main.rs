//! `simcart` - interactive shopping cart shell.
//!
//! See [`simcart_cli`] for startup order and configuration.

use std::process::ExitCode;

use tracing::error;

fn main() -> ExitCode {
    simcart_cli::init_tracing();

    match simcart_cli::run(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "simcart stopped");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
