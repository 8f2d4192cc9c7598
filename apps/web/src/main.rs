mod auth;
mod config;
mod dashboard;
mod db;
mod errors;
mod inference;
mod models;
mod predictions;
mod render;
mod retrain;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema, seed_admin};
use crate::inference::TfidfLogisticModel;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobGuard v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;
    seed_admin(&db, &config.admin_username, &config.admin_password).await?;

    // Load the classifier artifact once; it is immutable for the process lifetime
    let model = TfidfLogisticModel::load(&config.model_path)
        .with_context(|| format!("Failed to load model from MODEL_PATH '{}'", config.model_path))?;

    let cookie_key = match &config.session_secret {
        Some(secret) => Key::try_from(secret.as_bytes()).map_err(|e| {
            anyhow::anyhow!("SESSION_SECRET could not be used as a signing key: {e:?}")
        })?,
        None => {
            warn!("SESSION_SECRET not set; generated a random key, sessions end on restart");
            Key::generate()
        }
    };

    warn!("POST /retrain is simulated: it logs a fabricated accuracy and never updates the model");

    let state = AppState {
        db,
        classifier: Arc::new(model),
        cookie_key,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
