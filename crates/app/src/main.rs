//! `classroom` - command-line client for the Classroom API.
//!
//! The session is kept in a state file between invocations, so a `login`
//! is reused by later commands until it expires or is logged out.

mod cli;
mod commands;
mod settings;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use classroom_application::{SessionConfig, SessionManager};
use classroom_infrastructure::{
    ClassroomClient, FileKeyValueStore, ReqwestClient, RestAuthApi, SystemClock,
};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut client_settings =
        settings::load_settings(cli.config.as_deref()).context("failed to load settings")?;
    if let Some(base_url) = cli.base_url {
        client_settings.api_base_url = base_url;
    }

    let state_path = settings::state_path(&client_settings);
    tracing::debug!(
        base_url = %client_settings.api_base_url,
        state = %state_path.display(),
        "starting classroom client"
    );

    let transport = ReqwestClient::new(&client_settings)?;
    let store = FileKeyValueStore::open(&state_path)
        .with_context(|| format!("failed to open state file {}", state_path.display()))?;
    let session = SessionManager::new(
        Arc::new(RestAuthApi::new(transport.clone())),
        Arc::new(store),
        Arc::new(SystemClock::new()),
        SessionConfig::from(&client_settings),
    )
    .spawn();

    let client = ClassroomClient::new(transport, session);
    commands::run(cli.command, &client).await
}
