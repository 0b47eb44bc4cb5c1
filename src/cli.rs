use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::constants::{DEFAULT_ADDR, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug, Clone)]
#[command(name = "cors_gate")]
#[command(about = "Serve a single route behind a JSON-configured CORS policy", long_about = None)]
pub struct Cli {
    /// Path to the CORS policy document
    #[arg(short, long, env = "CORS_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Address to listen on
    #[arg(short, long, env = "CORS_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: SocketAddr,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod cli_test;
