use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::{DynamicImage, GrayImage};
use imageproc::contrast::otsu_level;
pub use ocrs::{ImageSource, OcrEngine}; // Re-export for use in other modules
use ocrs::{OcrEngineParams, TextItem};
use rten::Model;
use tracing::{debug, info, warn};

use crate::error::AnalysisError;
use crate::models::{CanonicalImage, TextElement};

/// ocrs does not score individual words, so recognized words get this value
pub const RECOGNIZED_CONFIDENCE: f32 = 90.0;
pub const MIN_CONFIDENCE: f32 = 30.0;

/// Source of text regions for an image
pub trait TextExtractor: Send + Sync {
    /// Never fails; extraction problems yield an empty list
    fn extract(&self, image: &CanonicalImage) -> Vec<TextElement>;

    fn name(&self) -> &str;
}

/// Drop low-confidence and single-character elements
pub fn retain_meaningful(elements: Vec<TextElement>) -> Vec<TextElement> {
    elements
        .into_iter()
        .filter_map(|mut el| {
            el.text = el.text.trim().to_string();
            (el.confidence > MIN_CONFIDENCE && el.text.chars().count() > 1).then_some(el)
        })
        .collect()
}

/// Binarize with Otsu's threshold to improve OCR contrast
pub fn binarize(gray: &GrayImage) -> GrayImage {
    let level = otsu_level(gray);
    let mut binary = gray.clone();
    for pixel in binary.pixels_mut() {
        pixel[0] = if pixel[0] > level { 255 } else { 0 };
    }
    binary
}

/// Default model directory used by ocrs-cli
pub fn default_model_dir() -> Option<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()?;
    Some(Path::new(&home_dir).join(".cache/ocrs"))
}

/// Initialize OCR engine with the detection and recognition models in `model_dir`
pub fn init_ocr_engine(model_dir: &Path) -> Result<OcrEngine, AnalysisError> {
    let detection_model_path = model_dir.join("text-detection.rten");
    let recognition_model_path = model_dir.join("text-recognition.rten");

    if !detection_model_path.exists() || !recognition_model_path.exists() {
        return Err(AnalysisError::OcrModelsMissing {
            detection: detection_model_path.display().to_string(),
            recognition: recognition_model_path.display().to_string(),
        });
    }

    let detection_model =
        Model::load_file(&detection_model_path).map_err(|e| AnalysisError::Ocr(e.to_string()))?;
    let recognition_model =
        Model::load_file(&recognition_model_path).map_err(|e| AnalysisError::Ocr(e.to_string()))?;

    OcrEngine::new(OcrEngineParams {
        detection_model: Some(detection_model),
        recognition_model: Some(recognition_model),
        ..Default::default()
    })
    .map_err(|e| AnalysisError::Ocr(e.to_string()))
}

/// Word-level text extraction backed by ocrs
pub struct OcrsExtractor {
    model_dir: Option<PathBuf>,
    // Loaded once on first use and shared by later calls
    engine: Mutex<Option<Arc<OcrEngine>>>,
}

impl OcrsExtractor {
    pub fn new(model_dir: Option<PathBuf>) -> Self {
        Self {
            model_dir,
            engine: Mutex::new(None),
        }
    }

    fn engine(&self) -> Result<Arc<OcrEngine>, AnalysisError> {
        let mut guard = self
            .engine
            .lock()
            .map_err(|_| AnalysisError::Ocr("OCR engine lock poisoned".to_string()))?;

        if let Some(engine) = guard.as_ref() {
            return Ok(engine.clone());
        }

        let model_dir = self
            .model_dir
            .clone()
            .or_else(default_model_dir)
            .ok_or_else(|| AnalysisError::Ocr("No OCR model directory configured".to_string()))?;

        info!(model_dir = %model_dir.display(), "Initializing OCR engine");
        let engine = Arc::new(init_ocr_engine(&model_dir)?);
        *guard = Some(engine.clone());
        Ok(engine)
    }

    pub fn try_extract(&self, image: &CanonicalImage) -> Result<Vec<TextElement>, AnalysisError> {
        if image.is_empty() {
            return Err(AnalysisError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }

        let engine = self.engine()?;

        let binary = binarize(&image::imageops::grayscale(image.rgb()));
        let rgb = DynamicImage::ImageLuma8(binary).to_rgb8();

        let source = ImageSource::from_bytes(rgb.as_raw(), rgb.dimensions())
            .map_err(|e| AnalysisError::Ocr(e.to_string()))?;
        let input = engine
            .prepare_input(source)
            .map_err(|e| AnalysisError::Ocr(e.to_string()))?;

        let word_rects = engine
            .detect_words(&input)
            .map_err(|e| AnalysisError::Ocr(e.to_string()))?;
        let line_rects = engine.find_text_lines(&input, &word_rects);
        let lines = engine
            .recognize_text(&input, &line_rects)
            .map_err(|e| AnalysisError::Ocr(e.to_string()))?;

        let mut elements = Vec::new();
        for line in lines.iter().flatten() {
            for word in line.words() {
                let rect = word.bounding_rect();
                elements.push(TextElement {
                    text: word.to_string(),
                    x: rect.left(),
                    y: rect.top(),
                    width: rect.width().max(0) as u32,
                    height: rect.height().max(0) as u32,
                    confidence: RECOGNIZED_CONFIDENCE,
                });
            }
        }

        debug!(words = elements.len(), "OCR recognized words");
        Ok(retain_meaningful(elements))
    }
}

impl TextExtractor for OcrsExtractor {
    fn extract(&self, image: &CanonicalImage) -> Vec<TextElement> {
        match self.try_extract(image) {
            Ok(elements) => elements,
            Err(e) => {
                warn!("Text extraction error: {}", e);
                Vec::new()
            }
        }
    }

    fn name(&self) -> &str {
        "ocrs"
    }
}

/// Extractor that never finds text (OCR disabled)
pub struct NoText;

impl TextExtractor for NoText {
    fn extract(&self, _image: &CanonicalImage) -> Vec<TextElement> {
        Vec::new()
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

/// Extractor returning a fixed set of elements, filtered like real OCR output
pub struct StaticText {
    elements: Vec<TextElement>,
}

impl StaticText {
    pub fn new(elements: Vec<TextElement>) -> Self {
        Self {
            elements: retain_meaningful(elements),
        }
    }
}

impl TextExtractor for StaticText {
    fn extract(&self, _image: &CanonicalImage) -> Vec<TextElement> {
        self.elements.clone()
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, RgbImage};

    fn element(text: &str, confidence: f32) -> TextElement {
        TextElement {
            text: text.to_string(),
            x: 0,
            y: 0,
            width: 10,
            height: 10,
            confidence,
        }
    }

    #[test]
    fn test_retain_meaningful_filters() {
        let kept = retain_meaningful(vec![
            element("  Hello ", 90.0),
            element("A", 95.0),
            element("Low", 30.0),
            element("Fine", 31.0),
            element("   ", 99.0),
        ]);
        let texts: Vec<&str> = kept.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello", "Fine"]);
    }

    #[test]
    fn test_binarize_splits_two_levels() {
        let gray = GrayImage::from_fn(10, 10, |x, _| if x < 5 { Luma([40]) } else { Luma([210]) });
        let binary = binarize(&gray);
        assert_eq!(binary.get_pixel(0, 0)[0], 0);
        assert_eq!(binary.get_pixel(9, 0)[0], 255);
    }

    #[test]
    fn test_missing_models_degrade_to_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let extractor = OcrsExtractor::new(Some(dir.path().to_path_buf()));
        let image = CanonicalImage::new(RgbImage::new(20, 20));

        assert!(matches!(
            extractor.try_extract(&image),
            Err(AnalysisError::OcrModelsMissing { .. })
        ));
        assert!(extractor.extract(&image).is_empty());
    }

    #[test]
    fn test_static_text_applies_filters() {
        let extractor = StaticText::new(vec![element("Go", 80.0), element("x", 80.0)]);
        let image = CanonicalImage::new(RgbImage::new(5, 5));
        assert_eq!(extractor.extract(&image).len(), 1);
    }
}
