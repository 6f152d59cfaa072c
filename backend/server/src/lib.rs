//! Backend of a recipe browsing platform.
//!
//!
//!
//! # General Infrastructure
//! - Frontend talks only to this server, never to the recipe providers
//! - Listings come from TheMealDB, detail comes from Spoonacular
//! - The Spoonacular key stays on the server, loaded from the environment or a docker secret
//! - Nothing is cached, every request goes upstream
//!
//!
//!
//! # Endpoints
//!
//! ## `GET /api/recipes`
//! Query params, all optional.
//! - `q`: name search
//! - `category`: category filter, see [`recipes`] for how it combines with `q`
//! - `sort`: `asc` (default) or `desc`
//! - `page`: 1-based, default 1
//! - `limit`: page size, default 20
//!
//! Answers `{ results, page, total, totalPages }`.
//!
//! ## `GET /api/recipeById?id=`
//! Raw Spoonacular recipe information. Upstream error statuses are passed through.
//!
//!
//!
//! # Setup
//!
//! Run locally.
//! ```sh
//! RUST_LOG=info SPOONACULAR_KEY=... cargo run -p backend
//! ```
//!
//! Query it.
//! ```sh
//! curl 'http://localhost:3000/api/recipes?category=Dessert&limit=5'
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

use signal::ctrl_c;
#[cfg(unix)]
use signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod recipes;
pub mod routes;
pub mod state;
pub mod utils;

#[cfg(test)]
mod stub;

use config::Config;
use routes::{detail_handler, recipes_handler};
use state::AppState;

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config)?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/recipes", get(recipes_handler))
        .route("/api/recipeById", get(detail_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
