//! Starmatch discovery and swipe session engine.
//!
//! The client-side core of the matching flow: it pulls paginated candidate
//! batches from the discovery API, deduplicates and preloads ahead of
//! consumption, executes swipe decisions against the server, and falls back
//! to the zodiac compatibility model when a match needs a score the server
//! did not supply.
//!
//! Rendering, gestures, navigation, and auth persistence are the embedding
//! application's concern; this crate only exposes [`session::SwipeEngine`]
//! plus the data and events it produces.

pub mod api;
pub mod compat;
pub mod config;
pub mod events;
pub mod session;

pub use api::models::{
    Candidate, CandidatePhoto, DiscoveryPage, SwipeAction, SwipeLimitInfo, SwipeReceipt,
    SwipeRequest,
};
pub use api::{ApiError, DiscoveryApi, HttpDiscoveryApi};
pub use compat::{CompatibilityLevel, CompatibilityResult, Element, ZodiacSign};
pub use config::EngineConfig;
pub use events::{EngineEvent, EventBus};
pub use session::{SessionSnapshot, SwipeEngine, SwipeError, SwipeOutcome};
