mod api;
mod cli;
mod config;
mod frontend;
mod leads;

use clap::Parser;
use colored::*;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = cli::commands::run(cli).await {
        eprintln!("{} {:#}", "Error:".red(), e);
        std::process::exit(1);
    }
}
