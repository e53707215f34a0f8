use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Normalized, size-bounded, denoised RGB image shared by every analysis stage.
#[derive(Debug, Clone)]
pub struct CanonicalImage {
    rgb: RgbImage,
}

impl CanonicalImage {
    /// Wrap an already-normalized image without further preprocessing
    pub fn new(rgb: RgbImage) -> Self {
        Self { rgb }
    }

    pub fn rgb(&self) -> &RgbImage {
        &self.rgb
    }

    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    pub fn is_empty(&self) -> bool {
        self.rgb.width() == 0 || self.rgb.height() == 0
    }

    /// Crop a box to the image bounds. Returns None when nothing is left.
    pub fn crop(&self, x: i32, y: i32, width: u32, height: u32) -> Option<RgbImage> {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x as i64 + width as i64).clamp(0, self.width() as i64) as u32;
        let y1 = (y as i64 + height as i64).clamp(0, self.height() as i64) as u32;

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(image::imageops::crop_imm(&self.rgb, x0, y0, x1 - x0, y1 - y0).to_image())
    }
}

/// Axis-aligned bounding box of an external contour (inclusive pixel bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Region {
    /// Bounding box of a point set, None for an empty set
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        points.into_iter().fold(None, |acc, (x, y)| {
            Some(match acc {
                None => Region { min_x: x, min_y: y, max_x: x, max_y: y },
                Some(r) => Region {
                    min_x: r.min_x.min(x),
                    min_y: r.min_y.min(y),
                    max_x: r.max_x.max(x),
                    max_y: r.max_y.max(y),
                },
            })
        })
    }

    pub fn x(&self) -> i32 {
        self.min_x as i32
    }

    pub fn y(&self) -> i32 {
        self.min_y as i32
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width() as f32 / (self.height() as f32 + 1e-6)
    }

    /// True when the point lies strictly inside the box
    pub fn strictly_contains(&self, px: i64, py: i64) -> bool {
        let x = self.min_x as i64;
        let y = self.min_y as i64;
        x < px && px < x + self.width() as i64 && y < py && py < y + self.height() as i64
    }
}

/// A recognized run of text with its pixel-space bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Recognition confidence in [0, 100]
    pub confidence: f32,
}

impl TextElement {
    pub fn center(&self) -> (i64, i64) {
        (
            self.x as i64 + (self.width / 2) as i64,
            self.y as i64 + (self.height / 2) as i64,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    Cta,
    Navigation,
    Unknown,
}

/// A candidate interactive element. Width and height are always non-zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ButtonKind,
    pub area: u64,
}

impl Button {
    pub fn new(
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        text: impl Into<String>,
        kind: ButtonKind,
    ) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            x,
            y,
            width,
            height,
            text: text.into(),
            kind,
            area: width as u64 * height as u64,
        })
    }

    pub fn center(&self) -> (i64, i64) {
        (
            self.x as i64 + (self.width / 2) as i64,
            self.y as i64 + (self.height / 2) as i64,
        )
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }
}

/// Sub-scores in [0, 1] plus the aggregate percentage and image estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSet {
    pub cta_prominence: f64,
    pub visual_hierarchy: f64,
    pub accessibility: f64,
    pub color_contrast: f64,
    pub overall: u32,
    pub image_count: u32,
}

impl ScoreSet {
    /// Substituted whenever scoring cannot complete
    pub fn fallback() -> Self {
        Self {
            cta_prominence: 0.6,
            visual_hierarchy: 0.7,
            accessibility: 0.6,
            color_contrast: 0.65,
            overall: 65,
            image_count: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    CtaProminence,
    Accessibility,
    Contrast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueReason {
    LowCta,
    SmallTextOrButtons,
    LowContrast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueType,
    pub reason: IssueReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_fix: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    pub issues: Vec<Issue>,
    pub suggestions: Vec<Suggestion>,
}

/// Full result of analysing one screenshot
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub scores: ScoreSet,
    pub buttons: Vec<Button>,
    pub text_elements: Vec<TextElement>,
    pub recommendations: Recommendations,
}

impl Analysis {
    /// Map to the response document returned to clients
    pub fn report(&self, filename: &str) -> AnalysisReport {
        AnalysisReport {
            screenshot_id: format!("img_{}", uuid::Uuid::new_v4().simple()),
            filename: filename.replace(' ', "_"),
            overall_score: self.scores.overall,
            detailed_scores: DetailedScores {
                cta_prominence: round2(self.scores.cta_prominence),
                visual_hierarchy: round2(self.scores.visual_hierarchy),
                accessibility: round2(self.scores.accessibility),
                color_contrast: round2(self.scores.color_contrast),
            },
            elements_detected: ElementCounts {
                buttons: self.buttons.len(),
                text_blocks: self.text_elements.len(),
                images: self.scores.image_count,
            },
            issues: self.recommendations.issues.clone(),
            recommendations: self.recommendations.suggestions.clone(),
            buttons: None,
            text_elements: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetailedScores {
    pub cta_prominence: f64,
    pub visual_hierarchy: f64,
    pub accessibility: f64,
    pub color_contrast: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementCounts {
    pub buttons: usize,
    pub text_blocks: usize,
    pub images: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub screenshot_id: String,
    pub filename: String,
    pub overall_score: u32,
    pub detailed_scores: DetailedScores,
    pub elements_detected: ElementCounts,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<Suggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<Button>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_elements: Option<Vec<TextElement>>,
}

impl AnalysisReport {
    /// Attach the detected elements themselves, not just their counts
    pub fn with_details(mut self, analysis: &Analysis) -> Self {
        self.buttons = Some(analysis.buttons.clone());
        self.text_elements = Some(analysis.text_elements.clone());
        self
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_rejects_zero_size() {
        assert!(Button::new(0, 0, 0, 10, "", ButtonKind::Unknown).is_none());
        assert!(Button::new(0, 0, 10, 0, "", ButtonKind::Unknown).is_none());

        let button = Button::new(5, 5, 40, 20, "Go", ButtonKind::Navigation).unwrap();
        assert_eq!(button.area, 800);
    }

    #[test]
    fn test_region_from_points() {
        let region = Region::from_points([(10, 20), (50, 22), (12, 40)]).unwrap();
        assert_eq!(region, Region { min_x: 10, min_y: 20, max_x: 50, max_y: 40 });
        assert_eq!(region.width(), 41);
        assert_eq!(region.height(), 21);
        assert!(Region::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_region_strict_containment() {
        let region = Region { min_x: 10, min_y: 10, max_x: 19, max_y: 19 };
        assert!(region.strictly_contains(15, 15));
        assert!(!region.strictly_contains(10, 15));
        assert!(!region.strictly_contains(20, 15));
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let image = CanonicalImage::new(RgbImage::new(50, 40));
        let crop = image.crop(40, 30, 30, 30).unwrap();
        assert_eq!(crop.dimensions(), (10, 10));
        assert!(image.crop(60, 0, 10, 10).is_none());
        assert!(image.crop(-20, 0, 10, 10).is_none());
    }

    #[test]
    fn test_report_rounds_and_sanitizes() {
        let analysis = Analysis {
            scores: ScoreSet {
                cta_prominence: 0.456,
                visual_hierarchy: 0.5,
                accessibility: 0.7049,
                color_contrast: 1.0,
                overall: 62,
                image_count: 2,
            },
            buttons: vec![],
            text_elements: vec![],
            recommendations: Recommendations::default(),
        };

        let report = analysis.report("my screen shot.png");
        assert_eq!(report.filename, "my_screen_shot.png");
        assert!(report.screenshot_id.starts_with("img_"));
        assert_eq!(report.detailed_scores.cta_prominence, 0.46);
        assert_eq!(report.detailed_scores.accessibility, 0.7);
        assert_eq!(report.elements_detected.images, 2);
        assert!(report.buttons.is_none());
    }
}
