//! Console menu and web form commands

use anyhow::{Context, Result};

use super::build_client;
use crate::cli::ServeArgs;
use crate::config::SyncConfig;
use crate::frontend::{console, web};

pub async fn handle_menu_command(config: &SyncConfig) -> Result<()> {
    let client = build_client(config)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    console::run_menu(&client, &mut stdin.lock(), &mut stdout.lock())
        .await
        .context("Console I/O failed")
}

pub async fn handle_serve_command(config: &SyncConfig, args: ServeArgs) -> Result<()> {
    let client = build_client(config)?;
    let state = web::AppState {
        client,
        token_preview: config.token_preview(),
    };
    web::serve(state, args.bind).await
}
