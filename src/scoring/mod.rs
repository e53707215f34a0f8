pub mod metrics;
pub mod recommendations;

use tracing::{debug, warn};

use crate::config::ScoringConfig;
use crate::error::AnalysisError;
use crate::models::{Button, CanonicalImage, Recommendations, ScoreSet, TextElement};
use metrics::SubScores;

/// Turns detected elements into bounded scores and recommendations
#[derive(Debug, Clone, Default)]
pub struct UxScorer {
    pub config: ScoringConfig,
}

impl UxScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a screenshot. Falls back to [`ScoreSet::fallback`] on failure.
    pub fn score(&self, image: &CanonicalImage, text_elements: &[TextElement], buttons: &[Button]) -> ScoreSet {
        match self.try_score(image, text_elements, buttons) {
            Ok(scores) => scores,
            Err(e) => {
                warn!("Error calculating scores: {}", e);
                ScoreSet::fallback()
            }
        }
    }

    pub fn try_score(
        &self,
        image: &CanonicalImage,
        text_elements: &[TextElement],
        buttons: &[Button],
    ) -> Result<ScoreSet, AnalysisError> {
        if image.is_empty() {
            return Err(AnalysisError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }

        let sub = SubScores {
            cta_prominence: metrics::cta_prominence(image.width(), image.height(), buttons),
            visual_hierarchy: metrics::visual_hierarchy(text_elements),
            accessibility: metrics::accessibility(text_elements, buttons, &self.config),
            color_contrast: metrics::color_contrast(image, buttons, &self.config),
        };
        ensure_finite(&sub)?;

        let scores = ScoreSet {
            cta_prominence: sub.cta_prominence,
            visual_hierarchy: sub.visual_hierarchy,
            accessibility: sub.accessibility,
            color_contrast: sub.color_contrast,
            overall: metrics::aggregate(&sub, &self.config),
            image_count: metrics::count_images(image, &self.config),
        };

        debug!(
            cta = scores.cta_prominence,
            hierarchy = scores.visual_hierarchy,
            accessibility = scores.accessibility,
            contrast = scores.color_contrast,
            overall = scores.overall,
            "scored screenshot"
        );
        Ok(scores)
    }

    /// Issues and suggestions for a score set. Empty on failure.
    pub fn recommend(&self, scores: &ScoreSet, text_elements: &[TextElement], buttons: &[Button]) -> Recommendations {
        match self.try_recommend(scores, text_elements, buttons) {
            Ok(recommendations) => recommendations,
            Err(e) => {
                warn!("Recommendation generation error: {}", e);
                Recommendations::default()
            }
        }
    }

    pub fn try_recommend(
        &self,
        scores: &ScoreSet,
        text_elements: &[TextElement],
        buttons: &[Button],
    ) -> Result<Recommendations, AnalysisError> {
        ensure_finite(&SubScores {
            cta_prominence: scores.cta_prominence,
            visual_hierarchy: scores.visual_hierarchy,
            accessibility: scores.accessibility,
            color_contrast: scores.color_contrast,
        })?;

        let recommendations = recommendations::build(scores);
        debug!(
            text_blocks = text_elements.len(),
            buttons = buttons.len(),
            issues = recommendations.issues.len(),
            suggestions = recommendations.suggestions.len(),
            "generated recommendations"
        );
        Ok(recommendations)
    }
}

fn ensure_finite(sub: &SubScores) -> Result<(), AnalysisError> {
    let named = [
        ("cta_prominence", sub.cta_prominence),
        ("visual_hierarchy", sub.visual_hierarchy),
        ("accessibility", sub.accessibility),
        ("color_contrast", sub.color_contrast),
    ];
    match named.iter().find(|(_, v)| !v.is_finite()) {
        Some(&(name, _)) => Err(AnalysisError::NonFiniteScore(name)),
        None => Ok(()),
    }
}
