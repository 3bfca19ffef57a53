//! Bulk price import HTTP handler

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::{AppError, AppResult};
use crate::import::{is_supported_file, TempUpload};
use crate::services::{ImportService, PricingService};
use crate::store::PgStore;
use crate::AppState;

/// Multipart field carrying the spreadsheet
const FILE_FIELD: &str = "file";

/// Import price mappings from an uploaded spreadsheet
pub async fn import_price_mappings(
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    match run_import(&state, multipart).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn run_import(state: &AppState, multipart: Multipart) -> AppResult<shared::ImportReport> {
    // Dropping the upload removes the file, whichever way this returns
    let upload = receive_upload(state, multipart).await?;

    tracing::info!(file = upload.original_name(), "Bulk import started");

    let pricing = PricingService::new(
        PgStore::new(state.db.clone()),
        state.config.pricing.default_currency.clone(),
    );
    let service = ImportService::new(pricing, state.config.import.max_reported_errors);

    service.import_file(upload.path_buf()).await
}

async fn receive_upload(state: &AppState, mut multipart: Multipart) -> AppResult<TempUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Import(format!("Invalid upload: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Import("Uploaded file has no name".to_string()))?;

        if !is_supported_file(&filename) {
            return Err(AppError::Import(format!(
                "Unsupported file type: {}. Upload an Excel, OpenDocument or CSV file",
                filename
            )));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Import(format!("Could not read upload: {}", e)))?;

        if bytes.is_empty() {
            return Err(AppError::Import("Uploaded file is empty".to_string()));
        }

        return TempUpload::write(state.config.import.upload_dir.as_deref(), &filename, &bytes)
            .map_err(|e| AppError::Import(e.to_string()));
    }

    Err(AppError::Import("No file uploaded".to_string()))
}
