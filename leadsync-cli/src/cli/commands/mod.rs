//! Command handlers

pub mod import;
pub mod interactive;
pub mod operations;

use anyhow::{Context, Result};

use super::{Cli, Commands, GlobalArgs};
use crate::api::HubSpotClient;
use crate::config::SyncConfig;

/// Resolve configuration from file, environment and flags
pub fn load_config(global: &GlobalArgs) -> Result<SyncConfig> {
    let mut config =
        SyncConfig::load(global.config.as_deref()).context("Failed to load configuration")?;

    if let Some(base_url) = &global.base_url {
        config.base_url = base_url.clone();
    }
    if global.verify_tls {
        config.verify_tls = true;
    }

    log::debug!("Using {:?}", config);
    Ok(config)
}

/// Build a client, failing before any request when no token is configured
pub fn build_client(config: &SyncConfig) -> Result<HubSpotClient> {
    config.validate()?;
    HubSpotClient::new(config).context("Failed to create HubSpot client")
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.global)?;

    match cli.command {
        Commands::Menu => interactive::handle_menu_command(&config).await,
        Commands::Serve(args) => interactive::handle_serve_command(&config, args).await,
        Commands::Find(args) => operations::handle_find_command(&config, args).await,
        Commands::Upsert(args) => operations::handle_upsert_command(&config, args).await,
        Commands::Enroll(args) => operations::handle_enroll_command(&config, args).await,
        Commands::Deal(args) => operations::handle_deal_command(config, args).await,
        Commands::Import(args) => import::handle_import_command(&config, args).await,
    }
}
