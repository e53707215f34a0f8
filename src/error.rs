use thiserror::Error;

/// Failures raised inside the analysis pipeline.
///
/// Only `Decode` ever reaches a caller of [`crate::Analyzer::analyze_bytes`];
/// every other variant is recovered by the stage that produced it.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("OCR models not found. Expected locations:\n  - {detection}\n  - {recognition}")]
    OcrModelsMissing {
        detection: String,
        recognition: String,
    },

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("Score {0} is not a finite number")]
    NonFiniteScore(&'static str),
}
