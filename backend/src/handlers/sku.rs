//! SKU HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{CreateSkuInput, Pagination, SkuFilter, UpdateSkuInput};
use uuid::Uuid;

use crate::services::SkuService;
use crate::AppState;

/// List SKUs
pub async fn list_skus(
    State(state): State<AppState>,
    Query(filter): Query<SkuFilter>,
    Query(pagination): Query<Pagination>,
) -> impl IntoResponse {
    let service = SkuService::new(state.db.clone());

    match service.list_skus(&filter, &pagination).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific SKU
pub async fn get_sku(State(state): State<AppState>, Path(sku_id): Path<Uuid>) -> impl IntoResponse {
    let service = SkuService::new(state.db.clone());

    match service.get_sku(sku_id).await {
        Ok(sku) => (StatusCode::OK, Json(sku)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new SKU
pub async fn create_sku(
    State(state): State<AppState>,
    Json(input): Json<CreateSkuInput>,
) -> impl IntoResponse {
    let service = SkuService::new(state.db.clone());

    match service.create_sku(input).await {
        Ok(sku) => (StatusCode::CREATED, Json(sku)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a SKU
pub async fn update_sku(
    State(state): State<AppState>,
    Path(sku_id): Path<Uuid>,
    Json(input): Json<UpdateSkuInput>,
) -> impl IntoResponse {
    let service = SkuService::new(state.db.clone());

    match service.update_sku(sku_id, input).await {
        Ok(sku) => (StatusCode::OK, Json(sku)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a SKU
pub async fn delete_sku(State(state): State<AppState>, Path(sku_id): Path<Uuid>) -> impl IntoResponse {
    let service = SkuService::new(state.db.clone());

    match service.delete_sku(sku_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
