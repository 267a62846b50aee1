use std::net::SocketAddr;
use std::sync::Arc;

use astra::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::ai::OpenAiGateway;
use crate::config::Config;
use crate::db::{init_db, Database};
use crate::responses::error_to_response;
use crate::router::handle;

mod ai;
mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod handlers;
mod responses;
mod router;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db, "sql/schema.sql") {
        error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    let gateway = match OpenAiGateway::new(&config.gateway) {
        Ok(g) => Arc::new(g),
        Err(e) => {
            error!("gateway initialization failed: {e}");
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(a) => a,
        Err(e) => {
            error!("invalid bind address {:?}: {e}", config.bind_addr);
            std::process::exit(1);
        }
    };

    info!(%addr, model = %config.gateway.model, "starting server");

    let server = Server::bind(&addr).max_workers(8);
    let result = server.serve(move |req, _info| match handle(req, &db, gateway.as_ref()) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        error!("server ended with error: {e}");
    }

    info!("server shut down cleanly");
}
