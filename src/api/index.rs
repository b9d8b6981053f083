use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::services::FormPage;

/// Serve the review form
pub async fn handle_index(State(page): State<Arc<FormPage>>) -> Result<Html<String>, ApiError> {
    page.render().map(Html).map_err(|e| {
        tracing::error!(error = %e, "Failed to render form page");
        ApiError::Internal(e.to_string())
    })
}

/// Serve an embedded file from /static
pub async fn handle_static(
    State(assets): State<Arc<AssetLoader>>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let asset = assets.static_asset(&path).ok_or(ApiError::NotFound)?;

    Ok(([(header::CONTENT_TYPE, asset.content_type)], asset.data.into_owned()).into_response())
}
