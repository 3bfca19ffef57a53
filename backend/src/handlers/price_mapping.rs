//! Price mapping HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{Pagination, PriceMappingFilter, UpsertAction, UpsertPriceMappingInput, UpsertResponse};
use uuid::Uuid;

use crate::services::{PriceMappingService, PricingService};
use crate::store::PgStore;
use crate::AppState;

/// Create or update the price mapping for a (sku, vendor, location) triple
pub async fn upsert_price_mapping(
    State(state): State<AppState>,
    Json(input): Json<UpsertPriceMappingInput>,
) -> impl IntoResponse {
    let service = PricingService::new(
        PgStore::new(state.db.clone()),
        state.config.pricing.default_currency.clone(),
    );

    match service.upsert(input).await {
        Ok(outcome) => {
            let status = match outcome.action {
                UpsertAction::Created => StatusCode::CREATED,
                UpsertAction::Updated => StatusCode::OK,
            };
            (status, Json(UpsertResponse::from(outcome))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// List price mappings
pub async fn list_price_mappings(
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

/// Get a specific price mapping
pub async fn get_price_mapping(
    State(state): State<AppState>,
    Path(mapping_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = PriceMappingService::new(state.db.clone());

    match service.get_price_mapping(mapping_id).await {
        Ok(mapping) => (StatusCode::OK, Json(mapping)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a price mapping
pub async fn delete_price_mapping(
    State(state): State<AppState>,
    Path(mapping_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = PriceMappingService::new(state.db.clone());

    match service.delete_price_mapping(mapping_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
