//! Swipe-limit status reported by the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeLimitInfo {
    pub is_premium: bool,
    pub remaining_swipes: u32,
    pub total_swipes: u32,
    #[serde(default)]
    pub next_reset_time: Option<DateTime<Utc>>,
}

impl SwipeLimitInfo {
    /// Premium accounts bypass enforcement regardless of the counter.
    pub fn can_swipe(&self) -> bool {
        self.is_premium || self.remaining_swipes > 0
    }

    /// The zeroed status used when a limit rejection arrives without a body.
    pub fn exhausted() -> Self {
        Self {
            is_premium: false,
            remaining_swipes: 0,
            total_swipes: 0,
            next_reset_time: None,
        }
    }
}
