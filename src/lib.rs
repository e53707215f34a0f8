pub mod analysis;
pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod scoring;
pub mod server;

pub use analysis::Analyzer;
pub use config::{BoostRule, DetectorConfig, PreprocessConfig, ScoreWeights, ScoringConfig, ServerConfig};
pub use detection::ButtonDetector;
pub use detection::ocr::{NoText, OcrsExtractor, StaticText, TextExtractor};
pub use error::AnalysisError;
pub use models::{
    Analysis, AnalysisReport, Button, ButtonKind, CanonicalImage, Issue, IssueReason, IssueType,
    Priority, Recommendations, ScoreSet, Suggestion, TextElement,
};
pub use scoring::UxScorer;
