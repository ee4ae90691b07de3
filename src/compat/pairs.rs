//! Curated pair scores.
//!
//! Pairs not listed here fall back to the element heuristic in `scoring`.
//! Lookup is symmetric: `(a, b)` and `(b, a)` resolve identically.

use super::signs::ZodiacSign::{self, *};

const PAIR_SCORES: &[(ZodiacSign, ZodiacSign, u8)] = &[
    // Same-element trines
    (Aries, Leo, 90),
    (Aries, Sagittarius, 88),
    (Leo, Sagittarius, 89),
    (Taurus, Virgo, 88),
    (Taurus, Capricorn, 89),
    (Virgo, Capricorn, 90),
    (Gemini, Libra, 89),
    (Gemini, Aquarius, 88),
    (Libra, Aquarius, 87),
    (Cancer, Scorpio, 91),
    (Cancer, Pisces, 90),
    (Scorpio, Pisces, 92),
    // Opposites attract, with caveats
    (Aries, Libra, 78),
    (Taurus, Scorpio, 80),
    (Gemini, Sagittarius, 79),
    (Cancer, Capricorn, 77),
    (Leo, Aquarius, 76),
    (Virgo, Pisces, 81),
    // Notable cross-element matches
    (Aries, Gemini, 83),
    (Aries, Aquarius, 85),
    (Leo, Libra, 86),
    (Sagittarius, Aquarius, 85),
    (Taurus, Cancer, 87),
    (Virgo, Scorpio, 85),
    (Capricorn, Pisces, 83),
    // Famously hard squares
    (Aries, Cancer, 42),
    (Taurus, Leo, 48),
    (Taurus, Aquarius, 44),
    (Gemini, Virgo, 47),
    (Gemini, Pisces, 44),
    (Cancer, Libra, 46),
    (Cancer, Aquarius, 38),
    (Leo, Scorpio, 45),
    (Virgo, Sagittarius, 46),
    (Libra, Capricorn, 47),
    (Scorpio, Aquarius, 43),
    (Sagittarius, Pisces, 49),
];

pub(super) fn lookup(a: ZodiacSign, b: ZodiacSign) -> Option<u8> {
    PAIR_SCORES
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, score)| *score)
}
