//! Zonegate JSON API Server

use std::process;

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};
use tracing::{error, info, warn};

use zonegate_app::context::AppContext;

use crate::{config::ServerConfig, observability::Observability, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod admin;
mod auth;
mod config;
mod errors;
mod extensions;
mod gateway;
mod healthcheck;
mod observability;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Zonegate JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(source) = Observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, stderr is the only channel left"
        )]
        {
            eprintln!("Observability error: {source}");
        }

        process::exit(1);
    }

    if let Err(message) = run(config).await {
        error!("{message}");

        process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), String> {
    let key = config
        .encryption
        .key()
        .map_err(|source| format!("invalid ENCRYPTION_KEY: {source}"))?;

    let app = AppContext::from_config(
        &config.database.data_path,
        key,
        config.upstream.bunny_config(),
    )
    .await
    .map_err(|source| format!("failed to initialize app context: {source}"))?;

    if let Some(api_key) = config.upstream.bunny_api_key.as_deref() {
        match app.credentials.set_master_credential(api_key).await {
            Ok(()) => info!("stored master credential from BUNNY_API_KEY"),
            Err(source) => warn!("ignoring BUNNY_API_KEY: {source}"),
        }
    }

    let addr = config.socket_addr();

    info!(
        data_path = %config.database.data_path.display(),
        upstream = %config.upstream.bunny_api_url,
        "starting server on {addr}"
    );

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(inject(State::from_app_context(app)))
        .push(router::app_router());

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;

    Ok(())
}
