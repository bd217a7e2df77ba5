//! Bookstore JSON API Server

use std::process;

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};
use tracing::{error, info};

use bookstore_app::{context::AppContext, domain::pricing::Pricing};

use crate::{
    config::ServerConfig,
    observability::{metrics_handler, request_logging},
    state::State,
};

mod auth;
mod books;
mod cart;
mod categories;
mod config;
mod envelope;
mod extensions;
mod healthcheck;
mod home;
mod observability;
mod orders;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Bookstore JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(config_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for config errors"
            )]
            {
                eprintln!("Configuration error: {config_error}");
            }

            process::exit(1);
        }
    };

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "subscriber failed to install, nothing else can report this"
        )]
        {
            eprintln!("Observability error: {init_error}");
        }

        process::exit(1);
    }

    let Some(pricing) = Pricing::from_code(&config.store.currency) else {
        error!(currency = %config.store.currency, "unknown store currency");

        process::exit(1);
    };

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.max_connections,
        config.database.run_migrations,
        pricing,
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!(currency = pricing.currency_code(), "Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(request_logging)
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
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

    info!("server stopped");
}
