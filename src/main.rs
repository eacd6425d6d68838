// src/main.rs — Wellness companion entry point

use std::sync::Arc;

use clap::Parser;

use wellness_companion::api::{self, ApiState};
use wellness_companion::cli::{Cli, Commands};
use wellness_companion::core::turn::{Companion, CompanionSettings};
use wellness_companion::infra::config::Config;
use wellness_companion::infra::logger;
use wellness_companion::provider::huggingface::HuggingFaceProvider;
use wellness_companion::provider::ModelProvider;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Chat keeps the terminal quiet; serve reports startup
    let level = match cli.command {
        Some(Commands::Chat) => "warn",
        _ => "info",
    };
    logger::init_logging(level);

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load config (falls back to defaults if no config.toml)
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    if let Some(model) = cli.model {
        config.gateway.model = model;
    }

    // Nothing works without a gateway token: fail before serving anything
    let token = config.gateway_token()?;

    let provider: Arc<dyn ModelProvider> =
        Arc::new(HuggingFaceProvider::from_config(&config.gateway, token)?);
    let companion = Companion::new(provider, CompanionSettings::from_config(&config)?);

    tracing::info!(
        model = %config.gateway.model,
        gateway = %config.gateway.base_url,
        "Companion ready"
    );

    match cli.command {
        Some(Commands::Chat) => {
            wellness_companion::cli::chat::run_chat(companion, &config.tasks.names).await
        }
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.api.host = host;
            }
            if let Some(port) = port {
                config.api.port = port;
            }
            serve(companion, &config).await
        }
        None => serve(companion, &config).await,
    }
}

async fn serve(companion: Companion, config: &Config) -> anyhow::Result<()> {
    let state = ApiState::new(companion, config.tasks.names.clone());
    api::start_server(&config.api, state).await
}
