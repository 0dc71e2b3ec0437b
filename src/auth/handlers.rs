use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::{dto::VerifyRequest, services::verify_administrator},
    error::AppError,
    extract::JsonBody,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth", post(verify))
}

/// One-shot administrator check. Issues no session or token.
#[instrument(skip(state, payload))]
pub async fn verify(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<VerifyRequest>,
) -> Result<Json<String>, AppError> {
    let ok = verify_administrator(
        state.users.as_ref(),
        state.admin.as_ref(),
        &payload.email,
        &payload.password,
    )
    .await?;

    if !ok {
        return Err(AppError::Unauthorized);
    }

    info!("administrator verified");
    Ok(Json("Welcome Administrator".to_string()))
}
