use std::process::ExitCode;

use clap::Parser;
use cors_gate::app::{self, Settings};
use cors_gate::cli::Cli;
use cors_gate::logging;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match app::run(Settings::from(cli)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "server failed");
            ExitCode::FAILURE
        }
    }
}
