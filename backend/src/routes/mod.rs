//! Route definitions for the Price Tracker API

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create admin API routes, mounted under `/api/v1`
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/price-mappings", price_mapping_routes(max_upload_bytes))
        .nest("/skus", sku_routes())
        .nest("/vendors", vendor_routes())
        .nest("/price-locations", price_location_routes())
        .nest("/locations", location_routes())
        .nest("/categories", category_routes())
}

/// External read-only routes, mounted under `/api/external/v1`
pub fn external_routes() -> Router<AppState> {
    Router::new()
        .route("/prices", get(handlers::list_external_prices))
        .route("/skus/:sku_id/prices", get(handlers::get_sku_prices))
}

/// Price mapping routes
fn price_mapping_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_price_mappings).post(handlers::upsert_price_mapping),
        )
        .route(
            "/import",
            post(handlers::import_price_mappings).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/:mapping_id",
            get(handlers::get_price_mapping).delete(handlers::delete_price_mapping),
        )
}

/// SKU routes
fn sku_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_skus).post(handlers::create_sku))
        .route(
            "/:sku_id",
            get(handlers::get_sku)
                .put(handlers::update_sku)
                .delete(handlers::delete_sku),
        )
}

/// Vendor routes
fn vendor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_vendors).post(handlers::create_vendor))
        .route(
            "/:vendor_id",
            get(handlers::get_vendor)
                .put(handlers::update_vendor)
                .delete(handlers::delete_vendor),
        )
}

/// Price location routes
fn price_location_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_price_locations).post(handlers::create_price_location),
        )
        .route(
            "/:location_id",
            get(handlers::get_price_location)
                .put(handlers::update_price_location)
                .delete(handlers::delete_price_location),
        )
}

/// Full location routes
fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_locations).post(handlers::create_location))
        .route(
            "/:location_id",
            get(handlers::get_location)
                .put(handlers::update_location)
                .delete(handlers::delete_location),
        )
}

/// Category tree routes
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_categories).post(handlers::create_category))
        .route(
            "/:category_id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route("/:category_id/children", get(handlers::get_category_children))
}
