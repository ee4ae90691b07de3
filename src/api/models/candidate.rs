//! Discovery-stream candidate models.

use serde::{Deserialize, Deserializer, Serialize};

use crate::compat::ZodiacSign;

/// One photo attached to a candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePhoto {
    pub url: String,
    #[serde(default)]
    pub display_order: u32,
    #[serde(default)]
    pub is_profile_photo: bool,
}

/// A profile offered to the current user during discovery.
///
/// `sign` is absent when the server sends a value outside the twelve known
/// signs; callers treat that as "compatibility unavailable" rather than
/// defaulting to some sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_sign")]
    pub sign: Option<ZodiacSign>,
    #[serde(default)]
    pub compatibility_score: Option<u8>,
    #[serde(default)]
    pub photos: Vec<CandidatePhoto>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_new_user: bool,
}

impl Candidate {
    /// The photo to lead with: the flagged profile photo if any, otherwise
    /// the lowest display order. A candidate with zero photos is still
    /// valid; the fallback image is the rendering layer's concern.
    pub fn profile_photo(&self) -> Option<&CandidatePhoto> {
        self.photos
            .iter()
            .find(|photo| photo.is_profile_photo)
            .or_else(|| self.photos.iter().min_by_key(|photo| photo.display_order))
    }
}

/// Unknown sign strings deserialize to `None` instead of failing the whole
/// page or silently mapping to a default sign.
fn lenient_sign<'de, D>(deserializer: D) -> Result<Option<ZodiacSign>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}
