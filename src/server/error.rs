use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::AnalysisError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No image provided (form key must be 'image')")]
    MissingImage,

    #[error("No image selected")]
    NoImageSelected,

    #[error("Uploaded image is empty")]
    EmptyImage,

    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Analysis failed: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingImage | ApiError::NoImageSelected | ApiError::EmptyImage => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Multipart(e) => e.status(),
            ApiError::Analysis(e) => {
                tracing::error!("Error during analysis: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
