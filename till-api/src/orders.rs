use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::retry::with_retries;
use crate::state::AppState;
use till_shared::models::catalog::{CustomerSpec, ItemSpec};
use till_shared::models::order::{OrderDraft, OrderView};

/// Wire shape of POST /orders/ and PUT /orders/{id}
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub name: String,
    pub phone: String,
    pub notes: Option<String>,
    pub items: Vec<ItemSpec>,
}

impl OrderRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("customer name must not be empty".to_string()));
        }
        Ok(())
    }

    fn into_draft(self) -> OrderDraft {
        OrderDraft {
            customer: CustomerSpec { name: self.name, phone: self.phone },
            notes: self.notes,
            items: self.items,
        }
    }
}

/// POST /orders/
/// Aggregate a new order: find-or-create the customer and every item, write
/// the header and lines in one transaction, return the committed view
pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<OrderRequest>,
) -> Result<Json<OrderView>, AppError> {
    req.validate()?;
    let draft = req.into_draft();

    let view = with_retries(|| state.orders.create_order(&draft)).await?;
    Ok(Json(view))
}

/// GET /orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderView>, AppError> {
    let view = state.orders.get_order(id).await?;
    Ok(Json(view))
}

/// PUT /orders/{id}
/// Full replacement of customer association, notes, and the item-line set
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<OrderRequest>,
) -> Result<Json<OrderView>, AppError> {
    req.validate()?;
    let draft = req.into_draft();

    let view = with_retries(|| state.orders.replace_order(id, &draft)).await?;
    Ok(Json(view))
}

/// DELETE /orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    with_retries(|| state.orders.delete_order(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
