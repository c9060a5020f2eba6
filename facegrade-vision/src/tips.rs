//! Rule-based improvement tips.
//!
//! Rules fire in a fixed order; a ratio fires at most one of its high/low branches. The
//! disclaimer is appended as the last candidate and the list is then cut to [`MAX_TIPS`], so
//! it is dropped whenever six or more rules fire.

use serde::Serialize;

use crate::metrics::RatioSet;
use crate::score::SubScores;

pub const MAX_TIPS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tip {
    pub title: &'static str,
    pub body: &'static str,
}

impl Tip {
    const fn new(title: &'static str, body: &'static str) -> Self {
        Self { title, body }
    }
}

pub const LONGER_FACE: Tip = Tip::new(
    "Balance a longer face",
    "More volume at the sides, slight fringe; avoid extra height on top. Bold-frame glasses can shorten the look.",
);
pub const SHORTER_FACE: Tip = Tip::new(
    "Elongate a shorter face",
    "Add a bit of height with hair, keep sides tighter, use vertical lines in styling.",
);
pub const CLOSE_SET_EYES: Tip = Tip::new(
    "Broaden close-set eyes",
    "Lighten inner corners, keep brows slightly wider apart, pick a part that opens the center.",
);
pub const WIDE_SET_EYES: Tip = Tip::new(
    "Bring wide-set together",
    "Darker inner-corner definition and slightly closer brow shape can narrow spacing.",
);
pub const WIDER_NOSE: Tip = Tip::new(
    "Balance a wider nose",
    "Light stubble and a slightly wider hairstyle distribute width. Frames with a bold bridge draw focus centrally.",
);
pub const LIP_PRESENCE: Tip = Tip::new(
    "Enhance lip presence",
    "Hydration, gentle tint, and smiling slightly in photos help balance proportions.",
);
pub const PHOTO_POSTURE: Tip = Tip::new(
    "Photo posture for symmetry",
    "Camera at eye level, face straight to lens, chin slightly down; even lighting reduces shadow asymmetry.",
);
pub const EVEN_SKIN: Tip = Tip::new(
    "Even out skin appearance",
    "Simple routine: gentle cleanse, moisturizer, daily SPF 30+, consider niacinamide (2–5%). Patch-test new products.",
);
pub const DEFINITION: Tip = Tip::new(
    "Sharpen jaw & cheek definition",
    "Good posture, light facial hair to outline jaw, relaxed tongue posture for better photos.",
);
pub const MINDSET: Tip = Tip::new(
    "Mindset",
    "This score is a rough heuristic. Confidence, kindness, grooming and fitness habits matter far more than millimeters.",
);

/// Thresholds for the tip rules.
pub mod thresholds {
    pub const FACE_RATIO_LONG: f64 = 1.15;
    pub const FACE_RATIO_SHORT: f64 = 0.85;
    pub const EYE_SPACING_CLOSE: f64 = 0.38;
    pub const EYE_SPACING_WIDE: f64 = 0.54;
    pub const NOSE_RATIO_WIDE: f64 = 0.30;
    pub const MOUTH_RATIO_NARROW: f64 = 0.26;
    pub const SYMMETRY_LOW: u8 = 70;
    pub const SKIN_LOW: u8 = 75;
    pub const FEATURE_LOW: u8 = 70;
}

/// Every tip that fires, in rule order, followed by the disclaimer. Not yet capped.
pub fn candidates(scores: &SubScores, ratios: &RatioSet) -> Vec<Tip> {
    use self::thresholds::*;

    let mut tips = Vec::new();

    if ratios.face_ratio > FACE_RATIO_LONG {
        tips.push(LONGER_FACE);
    } else if ratios.face_ratio < FACE_RATIO_SHORT {
        tips.push(SHORTER_FACE);
    }
    if ratios.eye_spacing < EYE_SPACING_CLOSE {
        tips.push(CLOSE_SET_EYES);
    } else if ratios.eye_spacing > EYE_SPACING_WIDE {
        tips.push(WIDE_SET_EYES);
    }
    if ratios.nose_ratio > NOSE_RATIO_WIDE {
        tips.push(WIDER_NOSE);
    }
    if ratios.mouth_ratio < MOUTH_RATIO_NARROW {
        tips.push(LIP_PRESENCE);
    }
    if scores.symmetry < SYMMETRY_LOW {
        tips.push(PHOTO_POSTURE);
    }
    if scores.skin < SKIN_LOW {
        tips.push(EVEN_SKIN);
    }
    if scores.feature < FEATURE_LOW {
        tips.push(DEFINITION);
    }
    tips.push(MINDSET);

    tips
}

/// The first [`MAX_TIPS`] candidates.
pub fn select_tips(scores: &SubScores, ratios: &RatioSet) -> Vec<Tip> {
    let mut tips = candidates(scores, ratios);
    tips.truncate(MAX_TIPS);
    tips
}
