//! Location HTTP handlers (price locations and full locations)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{CreateLocationInput, Pagination, PriceLocationInput, UpdateLocationInput};
use uuid::Uuid;

use crate::services::LocationService;
use crate::AppState;

/// List price locations
pub async fn list_price_locations(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> impl IntoResponse {
    let service = LocationService::new(state.db.clone());

    match service.list_price_locations(&pagination).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific price location
pub async fn get_price_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = LocationService::new(state.db.clone());

    match service.get_price_location(location_id).await {
        Ok(location) => (StatusCode::OK, Json(location)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a price location
pub async fn create_price_location(
    State(state): State<AppState>,
    Json(input): Json<PriceLocationInput>,
) -> impl IntoResponse {
    let service = LocationService::new(state.db.clone());

    match service.create_price_location(input).await {
        Ok(location) => (StatusCode::CREATED, Json(location)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Rename a price location
pub async fn update_price_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
    Json(input): Json<PriceLocationInput>,
) -> impl IntoResponse {
    let service = LocationService::new(state.db.clone());

    match service.update_price_location(location_id, input).await {
        Ok(location) => (StatusCode::OK, Json(location)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a price location
pub async fn delete_price_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = LocationService::new(state.db.clone());

    match service.delete_price_location(location_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// List full locations
pub async fn list_locations(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> impl IntoResponse {
    let service = LocationService::new(state.db.clone());

    match service.list_locations(&pagination).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific full location
pub async fn get_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = LocationService::new(state.db.clone());

    match service.get_location(location_id).await {
        Ok(location) => (StatusCode::OK, Json(location)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a full location
pub async fn create_location(
    State(state): State<AppState>,
    Json(input): Json<CreateLocationInput>,
) -> impl IntoResponse {
    let service = LocationService::new(state.db.clone());

    match service.create_location(input).await {
        Ok(location) => (StatusCode::CREATED, Json(location)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a full location
pub async fn update_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
    Json(input): Json<UpdateLocationInput>,
) -> impl IntoResponse {
    let service = LocationService::new(state.db.clone());

    match service.update_location(location_id, input).await {
        Ok(location) => (StatusCode::OK, Json(location)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a full location
pub async fn delete_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = LocationService::new(state.db.clone());

    match service.delete_location(location_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
