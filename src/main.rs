use catalog_matcher::config::Cli;
use catalog_matcher::model::AppError;
use catalog_matcher::pipeline;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match Cli::parse().resolve() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match pipeline::run(&config) {
        Ok(summary) => {
            info!(
                "Matched {} of {} listings into {} products",
                summary.stats.matched, summary.stats.listings, summary.groups
            );
            ExitCode::SUCCESS
        }
        Err(AppError::InputNotFound { path }) => {
            error!("Input file not found: {}", path.display());
            eprintln!("One (or both) of the files was not found");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
