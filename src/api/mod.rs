//! Remote discovery gateway.
//!
//! The engine depends only on the [`DiscoveryApi`] contract; the HTTP
//! implementation lives in [`http`] and everything above it is transport
//! agnostic.

pub mod error;
pub mod http;
pub mod models;

pub use error::ApiError;
pub use http::HttpDiscoveryApi;

use async_trait::async_trait;

use models::{DiscoveryPage, SwipeLimitInfo, SwipeReceipt, SwipeRequest};

/// The three server operations the engine consumes.
#[async_trait]
pub trait DiscoveryApi: Send + Sync {
    /// Fetch one page of discovery candidates.
    async fn fetch_discovery(
        &self,
        page: u32,
        page_size: u32,
        refresh: bool,
    ) -> Result<DiscoveryPage, ApiError>;

    /// Fetch the authoritative swipe-limit status.
    async fn fetch_swipe_limit(&self) -> Result<SwipeLimitInfo, ApiError>;

    /// Submit one swipe decision.
    async fn submit_swipe(&self, request: SwipeRequest) -> Result<SwipeReceipt, ApiError>;
}
