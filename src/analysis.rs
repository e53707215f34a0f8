use std::time::Instant;

use tracing::{debug, info};

use crate::config::PreprocessConfig;
use crate::detection::ocr::TextExtractor;
use crate::detection::{preprocessing, ButtonDetector};
use crate::error::AnalysisError;
use crate::models::{Analysis, CanonicalImage};
use crate::scoring::UxScorer;

/// Runs preprocessing, text extraction, button detection and scoring in sequence
pub struct Analyzer {
    pub preprocess: PreprocessConfig,
    pub detector: ButtonDetector,
    pub scorer: UxScorer,
    extractor: Box<dyn TextExtractor>,
}

impl Analyzer {
    pub fn new(extractor: Box<dyn TextExtractor>) -> Self {
        Self {
            preprocess: PreprocessConfig::default(),
            detector: ButtonDetector::new(),
            scorer: UxScorer::new(),
            extractor,
        }
    }

    pub fn with_preprocess(mut self, preprocess: PreprocessConfig) -> Self {
        self.preprocess = preprocess;
        self
    }

    pub fn with_detector(mut self, detector: ButtonDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_scorer(mut self, scorer: UxScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn extractor_name(&self) -> &str {
        self.extractor.name()
    }

    /// Decode and normalize raw bytes, then analyze. Only decoding can fail.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<Analysis, AnalysisError> {
        let image = preprocessing::preprocess(bytes, &self.preprocess)?;
        Ok(self.analyze(&image))
    }

    /// Analyze an already-canonical image
    pub fn analyze(&self, image: &CanonicalImage) -> Analysis {
        let start = Instant::now();
        debug!(width = image.width(), height = image.height(), "analyzing screenshot");

        let text_elements = self.extractor.extract(image);
        debug!(count = text_elements.len(), extractor = self.extractor.name(), "extracted text");

        let buttons = self.detector.detect(image, &text_elements);
        debug!(count = buttons.len(), "detected buttons");

        let scores = self.scorer.score(image, &text_elements, &buttons);
        let recommendations = self.scorer.recommend(&scores, &text_elements, &buttons);

        info!(
            overall = scores.overall,
            buttons = buttons.len(),
            text_blocks = text_elements.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "analysis complete"
        );

        Analysis {
            scores,
            buttons,
            text_elements,
            recommendations,
        }
    }
}
