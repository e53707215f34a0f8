//! Sub-score heuristics. Every score is normalized to [0, 1].

use std::collections::BTreeSet;

use crate::config::ScoringConfig;
use crate::detection::{contours, preprocessing};
use crate::models::{Button, ButtonKind, CanonicalImage, TextElement};

pub const NO_BUTTONS_CTA: f64 = 0.4;
pub const NO_CTA_BUTTONS: f64 = 0.5;
pub const FLAT_HIERARCHY: f64 = 0.5;
pub const NO_BUTTONS_CONTRAST: f64 = 0.6;

/// The four weighted inputs of the overall score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub cta_prominence: f64,
    pub visual_hierarchy: f64,
    pub accessibility: f64,
    pub color_contrast: f64,
}

/// How large and how well placed the main call to action is
pub fn cta_prominence(width: u32, height: u32, buttons: &[Button]) -> f64 {
    if buttons.is_empty() {
        return NO_BUTTONS_CTA;
    }

    // Largest CTA wins, first one on ties
    let main_cta = buttons
        .iter()
        .filter(|b| b.kind == ButtonKind::Cta)
        .reduce(|best, b| if b.area > best.area { b } else { best });
    let Some(main_cta) = main_cta else {
        return NO_CTA_BUTTONS;
    };

    let viewport_area = width as f64 * height as f64;
    let size_score = (main_cta.area as f64 / (viewport_area + 1e-9) * 200.0).min(1.0);

    let (w, h) = (width as i64, height as i64);
    let (ideal_x, ideal_y) = (w / 2, h / 3);
    let (cx, cy) = main_cta.center();
    let dist = (((cx - ideal_x).pow(2) + (cy - ideal_y).pow(2)) as f64).sqrt();
    let max_dist = (((w / 2).pow(2) + (h / 2).pow(2)) as f64).sqrt();
    let position_score = (1.0 - dist / (max_dist + 1e-9)).max(0.3);

    (size_score * 0.6 + position_score * 0.4).min(1.0)
}

/// Rewards clearly differentiated text sizes
pub fn visual_hierarchy(text_elements: &[TextElement]) -> f64 {
    if text_elements.len() < 2 {
        return FLAT_HIERARCHY;
    }

    let heights: BTreeSet<u32> = text_elements
        .iter()
        .map(|el| el.height)
        .filter(|&h| h > 5)
        .collect();
    let (Some(&min), Some(&max)) = (heights.first(), heights.last()) else {
        return FLAT_HIERARCHY;
    };

    let variety_score = (heights.len() as f64 / 5.0).min(1.0);
    let range_score = ((max - min) as f64 / 30.0).min(1.0);
    variety_score * 0.6 + range_score * 0.4
}

/// Readable text sizes and touch-friendly buttons
pub fn accessibility(text_elements: &[TextElement], buttons: &[Button], config: &ScoringConfig) -> f64 {
    let mut score = 0.5;

    if !text_elements.is_empty() {
        let small = text_elements
            .iter()
            .filter(|el| el.height < config.small_text_height)
            .count();
        let small_ratio = small as f64 / text_elements.len() as f64;
        if small_ratio < 0.3 {
            score += 0.2;
        } else if small_ratio < 0.6 {
            score += 0.1;
        }
    }

    if !buttons.is_empty() {
        let touchable = buttons
            .iter()
            .filter(|b| b.width >= config.min_touch_width && b.height >= config.min_touch_height)
            .count();
        score += touchable as f64 / buttons.len() as f64 * 0.3;
    }

    score.min(1.0)
}

/// WCAG-style contrast of each button against an assumed black or white label
pub fn color_contrast(image: &CanonicalImage, buttons: &[Button], config: &ScoringConfig) -> f64 {
    if buttons.is_empty() {
        return NO_BUTTONS_CONTRAST;
    }

    let contrasts: Vec<f64> = buttons
        .iter()
        .filter_map(|b| image.crop(b.x, b.y, b.width, b.height))
        .map(|crop| {
            let gray = preprocessing::to_grayscale(&crop);
            let n = gray.width() as f64 * gray.height() as f64;
            let background = gray.pixels().map(|p| p[0] as f64).sum::<f64>() / n;
            contrast_score(background, config.min_contrast_ratio)
        })
        .collect();

    if contrasts.is_empty() {
        return NO_BUTTONS_CONTRAST;
    }
    contrasts.iter().sum::<f64>() / contrasts.len() as f64
}

/// Contrast ratio of a background luminance (0-255) against black or white
/// text, normalized by the minimum acceptable ratio and capped at 1
pub fn contrast_score(background: f64, min_ratio: f64) -> f64 {
    let text = if background > 128.0 { 0.0 } else { 255.0 };
    let lighter = background.max(text) / 255.0;
    let darker = background.min(text) / 255.0;
    let ratio = (lighter + 0.05) / (darker + 0.05);
    (ratio / min_ratio).min(1.0)
}

/// Rough count of embedded images: large contours on a high-threshold edge map
pub fn count_images(image: &CanonicalImage, config: &ScoringConfig) -> u32 {
    let gray = preprocessing::to_grayscale(image.rgb());
    let edges = preprocessing::detect_edges(&gray, config.image_canny_low, config.image_canny_high);
    let count = contours::count_large_regions(&edges, config.min_image_side);
    (count as u32).min(config.max_image_count)
}

/// Weighted percentage clamped to the configured range, then boosted when
/// every sub-score clears its threshold
pub fn aggregate(scores: &SubScores, config: &ScoringConfig) -> u32 {
    let w = &config.weights;
    let weighted = scores.cta_prominence * w.cta_prominence
        + scores.visual_hierarchy * w.visual_hierarchy
        + scores.accessibility * w.accessibility
        + scores.color_contrast * w.color_contrast;

    let percentage = (weighted * 100.0) as i64;
    let mut overall = percentage.clamp(config.overall_min as i64, config.overall_max as i64) as u32;

    let boost = &config.boost;
    if scores.cta_prominence >= boost.cta_prominence
        && scores.visual_hierarchy >= boost.visual_hierarchy
        && scores.accessibility >= boost.accessibility
        && scores.color_contrast >= boost.color_contrast
    {
        overall = overall.max(boost.floor);
    }
    overall
}
