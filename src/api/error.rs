//! Typed errors for the discovery gateway.
//!
//! Swipe outcome classification is structural: the duplicate-swipe and
//! limit-reached cases are distinct variants mapped from status codes and
//! response body codes, never from message substrings.

use thiserror::Error;

use super::models::SwipeLimitInfo;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS, or timeout failure before a response arrived.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A non-success HTTP status that maps to no more specific variant.
    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response arrived but its body could not be decoded.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// The server already has a decision recorded for this pair.
    #[error("swipe already recorded for this pair")]
    DuplicateSwipe,

    /// The server rejected the swipe because the daily limit is spent.
    #[error("swipe limit reached")]
    LimitReached(SwipeLimitInfo),
}
