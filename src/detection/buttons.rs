use image::RgbImage;

use crate::config::DetectorConfig;
use crate::models::{Button, ButtonKind, Region, TextElement};

/// Labels containing any of these read as a call to action
pub static CTA_KEYWORDS: &[&str] = &[
    "buy", "purchase", "sign up", "register", "subscribe", "get", "start", "try", "download",
    "join", "order", "shop", "learn", "contact", "book",
];

/// Words that typically label a clickable control
pub static ACTION_WORDS: &[&str] = &[
    "click", "tap", "submit", "send", "next", "back", "continue", "ok", "yes", "no",
];

/// Classify a label by case-insensitive keyword substring match
pub fn classify(text: &str) -> ButtonKind {
    if text.is_empty() {
        return ButtonKind::Unknown;
    }
    let lower = text.to_lowercase();
    if CTA_KEYWORDS.iter().any(|k| lower.contains(k)) {
        ButtonKind::Cta
    } else {
        ButtonKind::Navigation
    }
}

pub fn is_action_text(text: &str) -> bool {
    let lower = text.to_lowercase();
    ACTION_WORDS.iter().any(|w| lower.contains(w))
}

/// Size and aspect filter for typical button proportions
pub fn has_button_geometry(region: &Region, config: &DetectorConfig) -> bool {
    let (w, h) = (region.width(), region.height());
    let aspect = region.aspect_ratio();
    config.min_width < w
        && w < config.max_width
        && config.min_height < h
        && h < config.max_height
        && config.min_aspect < aspect
        && aspect < config.max_aspect
}

/// Space-joined text of every element whose center lies inside the region
pub fn text_in_region(text_elements: &[TextElement], region: &Region) -> Option<String> {
    let found: Vec<&str> = text_elements
        .iter()
        .filter(|el| {
            let (cx, cy) = el.center();
            region.strictly_contains(cx, cy)
        })
        .map(|el| el.text.as_str())
        .collect();

    if found.is_empty() {
        None
    } else {
        Some(found.join(" "))
    }
}

/// Mean of the per-channel population variances
pub fn mean_channel_variance(crop: &RgbImage) -> f64 {
    let n = (crop.width() as u64 * crop.height() as u64) as f64;
    if n == 0.0 {
        return 0.0;
    }

    let mut sum = [0f64; 3];
    let mut sum_sq = [0f64; 3];
    for pixel in crop.pixels() {
        for c in 0..3 {
            let v = pixel[c] as f64;
            sum[c] += v;
            sum_sq[c] += v * v;
        }
    }

    let variances = (0..3).map(|c| {
        let mean = sum[c] / n;
        (sum_sq[c] / n - mean * mean).max(0.0)
    });
    variances.sum::<f64>() / 3.0
}

/// A visually flat region is consistent with a solid-fill button background
pub fn is_button_like(image: &RgbImage, region: &Region, config: &DetectorConfig) -> bool {
    if region.width() < config.min_crop_side || region.height() < config.min_crop_side {
        return false;
    }
    if region.max_x >= image.width() || region.max_y >= image.height() {
        return false;
    }

    let crop = image::imageops::crop_imm(image, region.min_x, region.min_y, region.width(), region.height())
        .to_image();
    mean_channel_variance(&crop) < config.max_color_variance
}

/// Short text elements that look like standalone clickable labels
pub fn text_buttons(text_elements: &[TextElement], config: &DetectorConfig) -> Vec<Button> {
    text_elements
        .iter()
        .filter(|el| {
            let text = el.text.as_str();
            text.chars().count() <= config.text_button_max_chars
                && (is_action_text(text) || text.split_whitespace().count() <= config.text_button_max_words)
        })
        .filter_map(|el| Button::new(el.x, el.y, el.width, el.height, el.text.clone(), classify(&el.text)))
        .collect()
}

/// Horizontal and vertical overlap of two boxes, zero when disjoint
pub fn overlap(a: &Button, b: &Button) -> (i64, i64) {
    let x = (a.right().min(b.right()) - (a.x as i64).max(b.x as i64)).max(0);
    let y = (a.bottom().min(b.bottom()) - (a.y as i64).max(b.y as i64)).max(0);
    (x, y)
}

/// Keep each candidate unless it overlaps an already kept one on both axes
pub fn remove_duplicates(candidates: Vec<Button>, config: &DetectorConfig) -> Vec<Button> {
    let mut unique: Vec<Button> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let duplicate = unique.iter().any(|kept| {
            let (ox, oy) = overlap(&candidate, kept);
            ox > config.dedup_overlap_x && oy > config.dedup_overlap_y
        });
        if !duplicate {
            unique.push(candidate);
        }
    }
    unique
}
