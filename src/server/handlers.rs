use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::json;
use tracing::info;

use super::error::ApiError;
use super::AppState;
use crate::models::AnalysisReport;

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Analyze one uploaded screenshot
///
/// # Request Format:
/// - multipart/form-data
/// - Field "image": a single PNG/JPEG/WebP/... file
///
/// # Response:
/// - AnalysisReport JSON
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }

        // A plain form value named `image` is not an upload
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.is_empty() {
            return Err(ApiError::NoImageSelected);
        }

        let data = field.bytes().await?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) = upload.ok_or(ApiError::MissingImage)?;
    if data.is_empty() {
        return Err(ApiError::EmptyImage);
    }

    info!(filename = %filename, bytes = data.len(), "Received analyze request");

    let analyzer = state.analyzer.clone();
    let analysis = tokio::task::spawn_blocking(move || analyzer.analyze_bytes(&data))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(analysis.report(&filename)))
}
