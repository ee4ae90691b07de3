//! Discovery page and swipe request/receipt wire types.

use serde::{Deserialize, Serialize};

use super::{Candidate, SwipeLimitInfo};

/// A user decision applied to the current candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwipeAction {
    Like,
    Dislike,
    SuperLike,
}

impl SwipeAction {
    /// Wire value submitted to the server. The backend does not distinguish
    /// super-likes, so they are submitted as plain likes.
    pub fn wire_value(&self) -> &'static str {
        match self {
            SwipeAction::Like | SwipeAction::SuperLike => "like",
            SwipeAction::Dislike => "dislike",
        }
    }
}

/// One page of candidates returned by a discovery fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryPage {
    #[serde(default)]
    pub users: Vec<Candidate>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub swipe_limit_info: Option<SwipeLimitInfo>,
}

impl DiscoveryPage {
    pub fn empty() -> Self {
        Self {
            users: Vec::new(),
            has_more: false,
            swipe_limit_info: None,
        }
    }
}

/// A swipe decision submitted to the server.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    pub target_id: u64,
    pub action: SwipeAction,
}

/// The server's interpretation of one submitted swipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeReceipt {
    #[serde(default)]
    pub is_match: bool,
    #[serde(default)]
    pub match_id: Option<u64>,
    #[serde(default)]
    pub remaining_swipes: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SwipeReceipt {
    pub fn no_match() -> Self {
        Self {
            is_match: false,
            match_id: None,
            remaining_swipes: None,
            message: None,
        }
    }
}
