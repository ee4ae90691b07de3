//! HTTP implementation of the discovery gateway.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

use super::error::ApiError;
use super::models::{DiscoveryPage, SwipeLimitInfo, SwipeReceipt, SwipeRequest};
use super::DiscoveryApi;

/// Gateway handle over the remote discovery service. Cheap to clone; the
/// underlying `reqwest::Client` pools connections internally.
#[derive(Clone)]
pub struct HttpDiscoveryApi {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

/// Structured error payload the server attaches to non-success responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    swipe_limit_info: Option<SwipeLimitInfo>,
}

/// Body shape for swipe submission. Super-likes collapse to plain likes
/// here; the backend does not distinguish them.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireSwipe<'a> {
    target_id: u64,
    action: &'a str,
}

impl HttpDiscoveryApi {
    pub fn new(config: &EngineConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|err| ApiError::Decode(err.to_string()));
        }

        let body = response.json::<ErrorBody>().await.ok();
        Err(classify_error(status.as_u16(), body))
    }
}

#[async_trait]
impl DiscoveryApi for HttpDiscoveryApi {
    async fn fetch_discovery(
        &self,
        page: u32,
        page_size: u32,
        refresh: bool,
    ) -> Result<DiscoveryPage, ApiError> {
        debug!("GET /discovery page={page} pageSize={page_size} refresh={refresh}");
        let request = self
            .client
            .get(format!("{}/discovery", self.base_url))
            .query(&[
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
                ("refresh", refresh.to_string()),
            ]);
        let response = self.authorize(request).send().await?;
        self.decode(response).await
    }

    async fn fetch_swipe_limit(&self) -> Result<SwipeLimitInfo, ApiError> {
        let request = self.client.get(format!("{}/swipes/limit", self.base_url));
        let response = self.authorize(request).send().await?;
        self.decode(response).await
    }

    async fn submit_swipe(&self, request: SwipeRequest) -> Result<SwipeReceipt, ApiError> {
        debug!(
            "POST /swipes target={} action={}",
            request.target_id,
            request.action.wire_value()
        );
        let builder = self
            .client
            .post(format!("{}/swipes", self.base_url))
            .json(&WireSwipe {
                target_id: request.target_id,
                action: request.action.wire_value(),
            });
        let response = self.authorize(builder).send().await?;
        self.decode(response).await
    }
}

/// Map a non-success response to the typed taxonomy. Body codes win over
/// raw status codes so a proxied status cannot misclassify a swipe outcome.
fn classify_error(status: u16, body: Option<ErrorBody>) -> ApiError {
    match body.as_ref().and_then(|b| b.code.as_deref()) {
        Some("duplicate_swipe") => return ApiError::DuplicateSwipe,
        Some("swipe_limit_reached") => {
            let info = body
                .and_then(|b| b.swipe_limit_info)
                .unwrap_or_else(SwipeLimitInfo::exhausted);
            return ApiError::LimitReached(info);
        }
        _ => {}
    }

    match status {
        409 => ApiError::DuplicateSwipe,
        429 => {
            let info = body
                .and_then(|b| b.swipe_limit_info)
                .unwrap_or_else(SwipeLimitInfo::exhausted);
            ApiError::LimitReached(info)
        }
        _ => ApiError::Status {
            status,
            message: body.and_then(|b| b.message).unwrap_or_default(),
        },
    }
}
