use crate::models::{Issue, IssueReason, IssueType, Priority, Recommendations, ScoreSet, Suggestion};

pub const CTA_THRESHOLD: f64 = 0.6;
pub const HIERARCHY_THRESHOLD: f64 = 0.6;
pub const ACCESSIBILITY_THRESHOLD: f64 = 0.7;
pub const CONTRAST_THRESHOLD: f64 = 0.65;
pub const PRAISE_THRESHOLD: u32 = 80;

const CRITICAL_CTA: Suggestion = Suggestion {
    title: "Critical: Add a Strong CTA",
    description: "Your landing page is missing a clear call-to-action or it’s nearly invisible. \
                  Add a bold, noticeable CTA button at the top section (‘above the fold’). \
                  Use a bright color like green, blue, or orange with strong text such as ‘Get Started’ or ‘Book Now’.",
    css_fix: Some(
        "button.cta { font-size:20px; padding:16px 32px; background:#28a745; color:#fff; border-radius:10px; font-weight:bold; }",
    ),
    priority: Some(Priority::Critical),
};

const WEAK_CTA: Suggestion = Suggestion {
    title: "Improve CTA Visibility",
    description: "Your call-to-action exists but is too weak. Increase its size, add more padding, \
                  and ensure it has enough visual weight. Place it higher on the page to draw attention.",
    css_fix: Some("button.cta { font-size:18px; padding:14px 28px; background:#ff5722; color:#fff; border-radius:8px; }"),
    priority: Some(Priority::High),
};

const SUBTLE_CTA: Suggestion = Suggestion {
    title: "Make CTA Stand Out More",
    description: "Your CTA is visible but not prominent enough. Try using a more contrasting color, \
                  increasing its size slightly, or giving it more spacing from surrounding elements.",
    css_fix: Some("button.cta { background:#007BFF; font-size:16px; padding:12px 24px; border-radius:6px; }"),
    priority: Some(Priority::Medium),
};

const TEXT_HIERARCHY: Suggestion = Suggestion {
    title: "Improve Text Hierarchy",
    description: "Use larger headings (h1, h2) for important text and smaller sizes for body content. \
                  This helps guide users’ attention.",
    css_fix: Some("h1{font-size:2rem;font-weight:700} p{font-size:1rem;color:#444}"),
    priority: Some(Priority::Medium),
};

const ACCESSIBILITY: Suggestion = Suggestion {
    title: "Enhance Accessibility",
    description: "Some text or buttons are too small. Increase font size to at least 14px \
                  and make buttons at least 44x44px for touch devices.",
    css_fix: Some("button{min-height:44px; min-width:44px; font-size:14px}"),
    priority: Some(Priority::Medium),
};

const CONTRAST: Suggestion = Suggestion {
    title: "Improve Color Contrast",
    description: "Text and background colors have low contrast. \
                  Ensure the contrast ratio meets WCAG 2.1 standards (4.5:1 for normal text).",
    css_fix: Some("body{color:#222;background:#fff}"),
    priority: Some(Priority::High),
};

const PRAISE: Suggestion = Suggestion {
    title: "Nice Work!",
    description: "Your design has good fundamentals. Keep refining by testing with real users.",
    css_fix: None,
    priority: None,
};

/// CTA suggestion tier for a score below the CTA threshold
pub fn cta_suggestion(score: f64) -> Suggestion {
    if score < 0.2 {
        CRITICAL_CTA
    } else if score < 0.4 {
        WEAK_CTA
    } else {
        SUBTLE_CTA
    }
}

/// Issues and suggestions in fixed order: CTA, hierarchy, accessibility,
/// contrast, then praise
pub fn build(scores: &ScoreSet) -> Recommendations {
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    if scores.cta_prominence < CTA_THRESHOLD {
        issues.push(Issue {
            kind: IssueType::CtaProminence,
            reason: IssueReason::LowCta,
        });
        suggestions.push(cta_suggestion(scores.cta_prominence));
    }

    if scores.visual_hierarchy < HIERARCHY_THRESHOLD {
        suggestions.push(TEXT_HIERARCHY);
    }

    if scores.accessibility < ACCESSIBILITY_THRESHOLD {
        issues.push(Issue {
            kind: IssueType::Accessibility,
            reason: IssueReason::SmallTextOrButtons,
        });
        suggestions.push(ACCESSIBILITY);
    }

    if scores.color_contrast < CONTRAST_THRESHOLD {
        issues.push(Issue {
            kind: IssueType::Contrast,
            reason: IssueReason::LowContrast,
        });
        suggestions.push(CONTRAST);
    }

    if scores.overall >= PRAISE_THRESHOLD {
        suggestions.push(PRAISE);
    }

    Recommendations { issues, suggestions }
}
