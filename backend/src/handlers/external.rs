//! Read-only price API for external consumers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{Pagination, PriceMappingFilter};
use uuid::Uuid;

use crate::services::PriceMappingService;
use crate::AppState;

/// List prices with the same filters as the admin listing
pub async fn list_external_prices(
    State(state): State<AppState>,
    Query(filter): Query<PriceMappingFilter>,
    Query(pagination): Query<Pagination>,
) -> impl IntoResponse {
    let service = PriceMappingService::new(state.db.clone());

    match service.list_price_mappings(&filter, &pagination).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// All prices for one SKU, cheapest unit price first
pub async fn get_sku_prices(
    State(state): State<AppState>,
    Path(sku_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = PriceMappingService::new(state.db.clone());

    match service.prices_for_sku(sku_id).await {
        Ok(prices) => (StatusCode::OK, Json(serde_json::json!({ "sku_id": sku_id, "prices": prices })))
            .into_response(),
        Err(e) => e.into_response(),
    }
}
