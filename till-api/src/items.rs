use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppError;
use crate::state::AppState;
use till_shared::models::catalog::{Item, ItemSpec};

/// POST /items/
pub async fn create_item(
    State(state): State<AppState>,
    Json(spec): Json<ItemSpec>,
) -> Result<Json<Item>, AppError> {
    let item = state.items.create_item(&spec).await?;
    Ok(Json(item))
}

/// GET /items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Item>, AppError> {
    let item = state.items.get_item(id).await?;
    Ok(Json(item))
}

/// PUT /items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(spec): Json<ItemSpec>,
) -> Result<Json<Item>, AppError> {
    let item = state.items.update_item(id, &spec).await?;
    Ok(Json(item))
}

/// DELETE /items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.items.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
