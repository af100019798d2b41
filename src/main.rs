//! hifz-server: HTTP front end for the Hifz Engine.
//!
//! Reads the reference data from `HIFZ_CONFIG_DIR` (default `./config/quran`)
//! and listens on `HIFZ_BIND_ADDR` (default `0.0.0.0:3000`).

use std::env;
use std::process;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hifz_engine::api::{AppState, create_router};
use hifz_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/quran";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hifz_engine=info,hifz_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = env::var("HIFZ_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr = env::var("HIFZ_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            error!(config_dir = %config_dir, error = %e, "Failed to load configuration");
            process::exit(1);
        }
    };
    info!(
        config_dir = %config_dir,
        corpus = %config.corpus().code,
        surahs = config.surahs().len(),
        collections = config.collections().len(),
        policy = ?config.downgrade_policy(),
        "Reference data loaded"
    );

    let router = create_router(AppState::new(config));

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(bind_addr = %bind_addr, error = %e, "Failed to bind");
            process::exit(1);
        }
    };
    info!(bind_addr = %bind_addr, "Listening");

    if let Err(e) = axum::serve(listener, router).await {
        error!(error = %e, "Server error");
        process::exit(1);
    }
}
