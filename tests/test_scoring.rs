//! Integration tests for scoring and recommendations.

mod common;

use common::*;
use uxlens::scoring::metrics::{aggregate, SubScores};
use uxlens::{ButtonKind, CanonicalImage, IssueType, ScoreSet, ScoringConfig, UxScorer};

#[test]
fn test_empty_page_scores() {
    let image = CanonicalImage::new(blank_page(1000, 1500));
    let scorer = UxScorer::new();

    let scores = scorer.score(&image, &[], &[]);
    assert_eq!(scores.cta_prominence, 0.4);
    assert_eq!(scores.visual_hierarchy, 0.5);
    assert_eq!(scores.accessibility, 0.5);
    assert_eq!(scores.color_contrast, 0.6);
    assert!((45..=95).contains(&scores.overall));
    assert_eq!(scores.image_count, 0);

    let recs = scorer.recommend(&scores, &[], &[]);
    let kinds: Vec<IssueType> = recs.issues.iter().map(|i| i.kind).collect();
    assert!(kinds.contains(&IssueType::CtaProminence));
    assert!(kinds.contains(&IssueType::Contrast));
    assert!(recs.suggestions.iter().any(|s| s.title == "Make CTA Stand Out More"));
    assert!(recs.suggestions.iter().any(|s| s.title == "Improve Color Contrast"));
}

#[test]
fn test_centered_cta_scores_full_prominence() {
    let image = CanonicalImage::new(blank_page(1000, 1500));
    let cta = button(400, 400, 200, 200, "Buy Now", ButtonKind::Cta);
    assert_eq!(cta.area, 40_000);

    let scores = UxScorer::new().score(&image, &[], &[cta]);
    assert!((scores.cta_prominence - 1.0).abs() < 1e-9);
    assert_eq!(scores.color_contrast, 1.0);
    assert!((scores.accessibility - 0.8).abs() < 1e-9);
    // 0.3 + 0.125 + 0.2 + 0.2
    assert!((81..=83).contains(&scores.overall));
}

#[test]
fn test_boost_floor_when_every_bar_is_cleared() {
    let config = ScoringConfig::default();
    let sub = SubScores {
        cta_prominence: 0.6,
        visual_hierarchy: 0.6,
        accessibility: 0.7,
        color_contrast: 0.65,
    };
    assert_eq!(aggregate(&sub, &config), 80);
}

#[test]
fn test_boost_floor_is_configurable() {
    let mut config = ScoringConfig::default();
    config.boost.floor = 85;
    let sub = SubScores {
        cta_prominence: 0.7,
        visual_hierarchy: 0.7,
        accessibility: 0.8,
        color_contrast: 0.7,
    };
    assert_eq!(aggregate(&sub, &config), 85);
}

#[test]
fn test_scores_stay_in_bounds() {
    let scorer = UxScorer::new();
    let pages = [
        (blank_page(300, 200), vec![]),
        (
            page_with_button(500, 400, 50, 50, 300, 60),
            vec![button(50, 50, 300, 60, "Download", ButtonKind::Cta)],
        ),
        (
            blank_page(640, 480),
            vec![
                button(0, 0, 20, 10, "", ButtonKind::Unknown),
                button(600, 470, 100, 100, "Order", ButtonKind::Cta),
            ],
        ),
    ];
    let labels = vec![text("Heading", 10, 10, 200, 40), text("body", 10, 60, 40, 9)];

    for (page, buttons) in pages {
        let image = CanonicalImage::new(page);
        let scores = scorer.score(&image, &labels, &buttons);
        for sub in [
            scores.cta_prominence,
            scores.visual_hierarchy,
            scores.accessibility,
            scores.color_contrast,
        ] {
            assert!((0.0..=1.0).contains(&sub), "sub-score out of range: {}", sub);
        }
        assert!((45..=95).contains(&scores.overall));
        assert!(scores.image_count <= 5);
    }
}

#[test]
fn test_large_panels_count_as_images() {
    let mut page = blank_page(800, 600);
    for x in [20, 300, 560] {
        imageproc::drawing::draw_filled_rect_mut(
            &mut page,
            imageproc::rect::Rect::at(x, 100).of_size(200, 180),
            image::Rgb([20, 20, 20]),
        );
    }
    let scores = UxScorer::new().score(&CanonicalImage::new(page), &[], &[]);
    assert_eq!(scores.image_count, 3);
}

#[test]
fn test_fallback_recommendations() {
    let recs = UxScorer::new().recommend(&ScoreSet::fallback(), &[], &[]);
    assert_eq!(recs.issues.len(), 1);
    assert_eq!(recs.issues[0].kind, IssueType::Accessibility);
}
