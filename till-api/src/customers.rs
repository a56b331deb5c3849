use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppError;
use crate::state::AppState;
use till_shared::models::catalog::{Customer, CustomerSpec};

fn validate(spec: &CustomerSpec) -> Result<(), AppError> {
    if spec.name.trim().is_empty() {
        return Err(AppError::Validation("customer name must not be empty".to_string()));
    }
    Ok(())
}

/// POST /customers/
pub async fn create_customer(
    State(state): State<AppState>,
    Json(spec): Json<CustomerSpec>,
) -> Result<Json<Customer>, AppError> {
    validate(&spec)?;
    let customer = state.customers.create_customer(&spec).await?;
    Ok(Json(customer))
}

/// GET /customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Customer>, AppError> {
    let customer = state.customers.get_customer(id).await?;
    Ok(Json(customer))
}

/// PUT /customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(spec): Json<CustomerSpec>,
) -> Result<Json<Customer>, AppError> {
    validate(&spec)?;
    let customer = state.customers.update_customer(id, &spec).await?;
    Ok(Json(customer))
}

/// DELETE /customers/{id}
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.customers.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
