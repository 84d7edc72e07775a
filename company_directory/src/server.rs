//! HTTP server exposing company search and update.

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::{
    middleware::{
        create_body_limit_layer, create_cors_layer, create_rate_limiter, rate_limit_middleware,
        request_logging_middleware, AppRateLimiter,
    },
    record::Company,
    settings::Settings,
    store::CompanyStore,
    update::UpdateOutcome,
};

/// Body returned when an update fails for any reason other than a missing company.
pub const UPDATE_FAILED: &str = "Error updating company.";

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CompanyStore>,
    pub rate_limiter: Arc<AppRateLimiter>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(store: Arc<CompanyStore>, settings: Settings) -> Self {
        Self {
            rate_limiter: create_rate_limiter(&settings.server),
            store,
            settings,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    companies: usize,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

#[derive(Debug, Deserialize)]
struct UpdateParams {
    company_name_id: String,
}

/// Create the HTTP router with all endpoints and middleware
pub fn create_router(state: AppState) -> Router {
    let cors_layer = create_cors_layer(&state.settings.server);
    let body_limit_layer = create_body_limit_layer(state.settings.server.max_request_size_mb);

    Router::new()
        .route("/health", get(health_check))
        .route("/company/search", get(search_companies))
        .route("/company/update", post(update_company))
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(cors_layer)
        .layer(body_limit_layer)
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        companies: state.store.len(),
    })
}

/// Search companies by name or description
#[instrument(skip(state))]
async fn search_companies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Company>>, StatusCode> {
    state.store.search(&params.query).map(Json).map_err(|e| {
        error!("Search failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Update a company's fields by identifier
#[instrument(skip(state, changes))]
async fn update_company(
    State(state): State<AppState>,
    Query(params): Query<UpdateParams>,
    Json(changes): Json<Map<String, Value>>,
) -> (StatusCode, &'static str) {
    let store = state.store.clone();
    let id = params.company_name_id;

    // Persisting rewrites the whole document, keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || store.update(&id, changes)).await;

    match result {
        Ok(Ok(outcome @ UpdateOutcome::Updated)) => (StatusCode::OK, outcome.message()),
        Ok(Ok(outcome @ UpdateOutcome::NotFound)) => (StatusCode::NOT_FOUND, outcome.message()),
        Ok(Err(e)) => {
            error!("Update failed: {:#}", anyhow::Error::from(e));
            (StatusCode::INTERNAL_SERVER_ERROR, UPDATE_FAILED)
        }
        Err(e) => {
            error!("Update task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, UPDATE_FAILED)
        }
    }
}

/// Load the company document, bind, and serve until a shutdown signal arrives.
///
/// `addr` overrides `server.host` and `server.port`.
pub async fn serve(settings: &Settings, addr: Option<SocketAddr>) -> Result<()> {
    let path = &settings.data.json_file_path;
    let store = CompanyStore::open(path).context("Company data could not be loaded")?;

    let state = AppState::new(Arc::new(store), settings.clone());
    let app = create_router(state);

    let listener = match addr {
        Some(addr) => TcpListener::bind(addr).await,
        None => TcpListener::bind(settings.server_addr()).await,
    }
    .context("Failed to bind HTTP listener")?;

    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    info!("HTTP server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
