//! Category tree HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{CategoryFilter, CreateCategoryInput, UpdateCategoryInput};
use uuid::Uuid;

use crate::services::CategoryService;
use crate::AppState;

fn category_service(state: &AppState) -> CategoryService {
    CategoryService::new(state.db.clone(), state.config.catalog.max_category_depth)
}

/// List root categories, or the children of `parent_id`
pub async fn list_categories(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> impl IntoResponse {
    match category_service(&state).list_categories(&filter).await {
        Ok(categories) => {
            (StatusCode::OK, Json(serde_json::json!({ "categories": categories }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific category with its counts
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> impl IntoResponse {
    match category_service(&state).get_category(category_id).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Direct children of a category
pub async fn get_category_children(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> impl IntoResponse {
    match category_service(&state).get_children(category_id).await {
        Ok(categories) => {
            (StatusCode::OK, Json(serde_json::json!({ "categories": categories }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Create a category
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryInput>,
) -> impl IntoResponse {
    match category_service(&state).create_category(input).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Rename a category
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(input): Json<UpdateCategoryInput>,
) -> impl IntoResponse {
    match category_service(&state).update_category(category_id, input).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a category
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> impl IntoResponse {
    match category_service(&state).delete_category(category_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
