use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument, warn};

use super::{dto::BlogPatch, repo_types::BlogItem};
use crate::{
    error::AppError,
    extract::{JsonBody, PathId},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/blog/get", get(list_posts))
        .route("/blog/get/:id", get(get_post))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/blog/update/:id", put(update_post))
        .route("/blog/delete/:id", delete(delete_post))
}

#[instrument(skip(state))]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<BlogItem>>, AppError> {
    Ok(Json(state.blog.list().await?))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Response, AppError> {
    let post = state.blog.get(id).await?;
    Ok(match post {
        Some(post) => Json(post).into_response(),
        None => Json(json!({})).into_response(),
    })
}

#[instrument(skip(state, patch))]
pub async fn update_post(
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonBody(patch): JsonBody<BlogPatch>,
) -> Result<Json<BlogItem>, AppError> {
    let Some(post) = state.blog.update(id, &patch).await? else {
        warn!(%id, "update of unknown blog item");
        return Err(AppError::NotFound(format!("Blog item {id} not found")));
    };
    info!(%id, title = %post.title, "blog item updated");
    Ok(Json(post))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<String>, AppError> {
    let post = state
        .blog
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog item {id} not found")))?;
    info!(%id, title = %post.title, "blog item deleted");
    Ok(Json(format!("{} has been deleted!", post.title)))
}
