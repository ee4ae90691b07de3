//! Pair compatibility scoring.
//!
//! Resolution order: same sign, then the curated pair table, then the
//! element heuristic. Every path is deterministic, including the same-sign
//! band, so repeated calls for the same pair always agree.

use serde::Serialize;

use super::pairs;
use super::signs::{Element, ZodiacSign};

/// Qualitative band derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompatibilityLevel {
    Perfect,
    High,
    Medium,
    Low,
    Incompatible,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    pub score: u8,
    pub level: CompatibilityLevel,
    pub description: String,
}

/// Same-sign scores stay inside [70, 84]: compatible by convention, but
/// never a perfect match with your own mirror.
const SAME_SIGN_FLOOR: u8 = 70;
const SAME_SIGN_SPAN: u8 = 15;

const BASE_SCORE: i16 = 50;

/// Score a pair of signs.
pub fn score(a: ZodiacSign, b: ZodiacSign) -> CompatibilityResult {
    let value = if a == b {
        same_sign_score(a)
    } else if let Some(curated) = pairs::lookup(a, b) {
        curated
    } else {
        element_fallback(a.element(), b.element())
    };

    result_for_score(value, a.element() == b.element())
}

/// Score a pair when either sign may be unknown. An unknown sign means
/// "compatibility unavailable", never a default sign or a zero score.
pub fn score_between(
    a: Option<ZodiacSign>,
    b: Option<ZodiacSign>,
) -> Option<CompatibilityResult> {
    match (a, b) {
        (Some(a), Some(b)) => Some(score(a, b)),
        _ => None,
    }
}

/// Build a result from an already-known score, e.g. one the server
/// precomputed. `same_element` only refines the perfect-match narrative.
pub fn result_for_score(score: u8, same_element: bool) -> CompatibilityResult {
    let score = score.min(100);
    let level = level_for_score(score);
    CompatibilityResult {
        score,
        level,
        description: description_for(level, same_element).to_string(),
    }
}

fn same_sign_score(sign: ZodiacSign) -> u8 {
    SAME_SIGN_FLOOR + (sign.wheel_index() * 7) % SAME_SIGN_SPAN
}

fn element_fallback(a: Element, b: Element) -> u8 {
    let adjusted = BASE_SCORE + element_adjustment(a, b);
    adjusted.clamp(0, 100) as u8
}

fn element_adjustment(a: Element, b: Element) -> i16 {
    use Element::*;

    if a == b {
        return 20;
    }
    match (a, b) {
        (Fire, Air) | (Air, Fire) | (Earth, Water) | (Water, Earth) => 15,
        (Fire, Earth) | (Earth, Fire) | (Air, Water) | (Water, Air) => -10,
        (Fire, Water) | (Water, Fire) => -15,
        (Earth, Air) | (Air, Earth) => -5,
        _ => unreachable!("same-element pairs are handled above"),
    }
}

fn level_for_score(score: u8) -> CompatibilityLevel {
    match score {
        s if s >= 85 => CompatibilityLevel::Perfect,
        s if s >= 70 => CompatibilityLevel::High,
        s if s >= 50 => CompatibilityLevel::Medium,
        s if s >= 30 => CompatibilityLevel::Low,
        _ => CompatibilityLevel::Incompatible,
    }
}

fn description_for(level: CompatibilityLevel, same_element: bool) -> &'static str {
    match (level, same_element) {
        (CompatibilityLevel::Perfect, true) => {
            "A rare alignment: you share an element and the stars agree on almost everything."
        }
        (CompatibilityLevel::Perfect, false) => {
            "Written in the stars: your differences fit together almost perfectly."
        }
        (CompatibilityLevel::High, _) => {
            "A strong connection with plenty of common ground to build on."
        }
        (CompatibilityLevel::Medium, _) => {
            "A workable match with some friction and real potential."
        }
        (CompatibilityLevel::Low, _) => {
            "An uphill pairing: your instincts often pull in different directions."
        }
        (CompatibilityLevel::Incompatible, _) => {
            "The stars advise caution: this pairing rarely finds an easy rhythm."
        }
    }
}
