use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument, warn};

use super::{dto::PortfolioPatch, repo_types::PortfolioItem};
use crate::{
    error::AppError,
    extract::{JsonBody, PathId},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/portfolio/get", get(list_items))
        .route("/portfolio/get/:id", get(get_item))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/portfolio/update/:id", put(update_item))
        .route("/portfolio/delete/:id", delete(delete_item))
}

#[instrument(skip(state))]
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<PortfolioItem>>, AppError> {
    let items = state.portfolio.list().await?;
    Ok(Json(items))
}

/// Absent ids yield `{}` rather than an error.
#[instrument(skip(state))]
pub async fn get_item(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Response, AppError> {
    Ok(match state.portfolio.get(id).await? {
        Some(item) => Json(item).into_response(),
        None => Json(json!({})).into_response(),
    })
}

#[instrument(skip(state, patch))]
pub async fn update_item(
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonBody(patch): JsonBody<PortfolioPatch>,
) -> Result<Json<PortfolioItem>, AppError> {
    match state.portfolio.update(id, &patch).await? {
        Some(item) => {
            info!(%id, title = %item.title, "portfolio item updated");
            Ok(Json(item))
        }
        None => {
            warn!(%id, "update of unknown portfolio item");
            Err(AppError::NotFound(format!("Portfolio item {id} not found")))
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<String>, AppError> {
    let item = state
        .portfolio
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Portfolio item {id} not found")))?;
    info!(%id, title = %item.title, "portfolio item deleted");
    Ok(Json(format!("{} has been deleted!", item.title)))
}
