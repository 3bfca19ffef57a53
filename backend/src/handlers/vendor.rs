//! Vendor HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{CreateVendorInput, Pagination, UpdateVendorInput};
use uuid::Uuid;

use crate::services::VendorService;
use crate::AppState;

/// List vendors
pub async fn list_vendors(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> impl IntoResponse {
    let service = VendorService::new(state.db.clone());

    match service.list_vendors(&pagination).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific vendor
pub async fn get_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = VendorService::new(state.db.clone());

    match service.get_vendor(vendor_id).await {
        Ok(vendor) => (StatusCode::OK, Json(vendor)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new vendor
pub async fn create_vendor(
    State(state): State<AppState>,
    Json(input): Json<CreateVendorInput>,
) -> impl IntoResponse {
    let service = VendorService::new(state.db.clone());

    match service.create_vendor(input).await {
        Ok(vendor) => (StatusCode::CREATED, Json(vendor)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a vendor
pub async fn update_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
    Json(input): Json<UpdateVendorInput>,
) -> impl IntoResponse {
    let service = VendorService::new(state.db.clone());

    match service.update_vendor(vendor_id, input).await {
        Ok(vendor) => (StatusCode::OK, Json(vendor)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a vendor
pub async fn delete_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = VendorService::new(state.db.clone());

    match service.delete_vendor(vendor_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
