use std::process::ExitCode;

use clap::Parser;
use env_logger::{Builder, Target};
use flexfolio_client::app::{self, Cli};
use log::LevelFilter;

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("flexfolio_client", LevelFilter::Info)
        .filter_module("flexfolio_config", LevelFilter::Info)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    match app::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
