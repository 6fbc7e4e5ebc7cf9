//! hasip-bridge binary — runs a single hub operation and exits.

use clap::Parser;
use hasip_bridge::cli::{self, Cli};
use hasip_bridge::config;
use hasip_hub::HubClient;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let (config_path, config_source) = cli.config_path();

    let config = match config::load_config(Some(config_path.as_str())) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration from {}: {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };

    hasip_bridge::init_tracing(&config.logging);

    tracing::info!(
        source = config_source,
        path = %config_path,
        hub = %config.hub.base_url,
        "resolved startup configuration path"
    );

    let client = HubClient::new(config.hub, &config.tts);
    match cli::run(&client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "hub operation failed");
            ExitCode::FAILURE
        }
    }
}
