//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    http::{header::X_CONTENT_TYPE_OPTIONS, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{ChromeRenderer, FormPage, PdfConverter, PdfRenderer, ScratchStorage};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub converter: Arc<PdfConverter>,
    pub form_page: Arc<FormPage>,
    pub assets: Arc<AssetLoader>,
}

/// Create application state backed by headless Chrome.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);
    let renderer = Arc::new(ChromeRenderer::new(config.browser_config()));
    create_app_state_with_renderer(asset_loader, &config, renderer)
}

/// Create application state around any rendering capability.
pub fn create_app_state_with_renderer(
    asset_loader: Arc<AssetLoader>,
    config: &AppConfig,
    renderer: Arc<dyn PdfRenderer>,
) -> anyhow::Result<AppState> {
    let storage = Arc::new(
        ScratchStorage::new(config.scratch_dir())
            .map_err(|e| anyhow::anyhow!("Failed to open scratch storage: {e}"))?,
    );
    let converter = Arc::new(PdfConverter::new(
        renderer,
        storage,
        config.max_concurrent_renders,
        config.render_timeout(),
    ));
    let form_page = Arc::new(
        FormPage::new(&asset_loader)
            .map_err(|e| anyhow::anyhow!("Failed to load form page: {e}"))?,
    );

    Ok(AppState {
        converter,
        form_page,
        assets: asset_loader,
    })
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Form page and its assets
        .route("/", get(handle_index))
        .route("/static/*path", get(handle_static))
        // Conversion; documents of any size are accepted
        .route(
            "/generate-pdf",
            post(handle_generate_pdf).layer(DefaultBodyLimit::disable()),
        )
        // Health check
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async { ApiError::NotFound })
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_index(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<axum::response::Html<String>, ApiError> {
    api::handle_index(axum::extract::State(state.form_page)).await
}

async fn handle_static(
    axum::extract::State(state): axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_static(axum::extract::State(state.assets), path).await
}

async fn handle_generate_pdf(
    axum::extract::State(state): axum::extract::State<AppState>,
    payload: Result<axum::Json<api::ConvertRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_generate_pdf(axum::extract::State(state.converter), payload).await
}
