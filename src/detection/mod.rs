pub mod preprocessing;
pub mod contours;
pub mod buttons;
pub mod ocr;

use tracing::{debug, warn};

use crate::config::DetectorConfig;
use crate::error::AnalysisError;
use crate::models::{Button, CanonicalImage, TextElement};

/// Finds buttons by fusing contour geometry with recognized text
#[derive(Debug, Clone, Default)]
pub struct ButtonDetector {
    pub config: DetectorConfig,
}

impl ButtonDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Detect buttons. Internal failures produce an empty list.
    pub fn detect(&self, image: &CanonicalImage, text_elements: &[TextElement]) -> Vec<Button> {
        match self.try_detect(image, text_elements) {
            Ok(buttons) => buttons,
            Err(e) => {
                warn!("Button detection error: {}", e);
                Vec::new()
            }
        }
    }

    pub fn try_detect(
        &self,
        image: &CanonicalImage,
        text_elements: &[TextElement],
    ) -> Result<Vec<Button>, AnalysisError> {
        if image.is_empty() {
            return Err(AnalysisError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }
        let config = &self.config;

        let gray = preprocessing::to_grayscale(image.rgb());
        let edges = preprocessing::detect_edges(&gray, config.canny_low, config.canny_high);
        let closed = preprocessing::close_gaps(&edges, config.closing_radius);
        let regions = contours::find_external_regions(&closed);

        debug!(contours = regions.len(), "found external contours");

        let mut candidates: Vec<Button> = regions
            .iter()
            .filter(|region| buttons::has_button_geometry(region, config))
            .filter_map(|region| {
                let label = buttons::text_in_region(text_elements, region);
                let button_like = buttons::is_button_like(image.rgb(), region, config);
                if label.is_none() && !button_like {
                    return None;
                }
                let text = label.unwrap_or_default();
                let kind = buttons::classify(&text);
                Button::new(region.x(), region.y(), region.width(), region.height(), text, kind)
            })
            .collect();

        let geometric = candidates.len();
        candidates.extend(buttons::text_buttons(text_elements, config));

        let unique = buttons::remove_duplicates(candidates, config);
        debug!(geometric, kept = unique.len(), "button candidates deduplicated");
        Ok(unique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_empty_image_yields_no_buttons() {
        let detector = ButtonDetector::new();
        let image = CanonicalImage::new(RgbImage::new(0, 0));
        assert!(matches!(
            detector.try_detect(&image, &[]),
            Err(AnalysisError::EmptyImage { .. })
        ));
        assert!(detector.detect(&image, &[]).is_empty());
    }

    #[test]
    fn test_blank_page_without_text_has_no_buttons() {
        let detector = ButtonDetector::new();
        let image = CanonicalImage::new(RgbImage::from_pixel(300, 200, image::Rgb([255, 255, 255])));
        assert!(detector.detect(&image, &[]).is_empty());
    }
}
