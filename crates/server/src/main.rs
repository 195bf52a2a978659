use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use planogram_lib::fixtures::demo_catalog;
use planogram_lib::session::Session;
use planogram_lib::state::EngineSettings;
use shared::Catalog;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

mod routes;

const DEFAULT_ADDR: &str = "0.0.0.0:3001";

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/command", post(routes::command))
        .route("/api/commands", post(routes::commands))
        .route("/api/scene", get(routes::scene))
        .route("/api/sections/{id}/capacity", get(routes::capacity))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn load_catalog() -> Result<Catalog, String> {
    let Ok(path) = std::env::var("PLANOGRAM_CATALOG") else {
        tracing::info!("PLANOGRAM_CATALOG not set, using demo catalog");
        return Ok(demo_catalog());
    };
    let text = std::fs::read_to_string(&path).map_err(|e| format!("Failed to read {path}: {e}"))?;
    let catalog: Catalog =
        serde_json::from_str(&text).map_err(|e| format!("Failed to parse catalog {path}: {e}"))?;
    tracing::info!(
        "Loaded catalog from {path} ({} fixtures, {} products)",
        catalog.fixtures.len(),
        catalog.products.len()
    );
    Ok(catalog)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,planogram_lib=info".into()),
        )
        .init();

    let session = Session::with_settings(load_catalog()?, EngineSettings::load());
    let state = AppState::new(session);

    let addr = std::env::var("PLANOGRAM_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{addr}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
