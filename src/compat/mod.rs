//! Zodiac compatibility model.
//!
//! Pure functions only; no state, nothing persisted. Used when a match
//! needs a descriptive score the server did not supply.

mod pairs;
pub mod scoring;
pub mod signs;

pub use scoring::{result_for_score, score, score_between, CompatibilityLevel, CompatibilityResult};
pub use signs::{Element, UnknownSign, ZodiacSign};
