//! Scripted in-memory gateway and builders shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use starmatch::{
    ApiError, Candidate, DiscoveryApi, DiscoveryPage, EngineConfig, SwipeAction, SwipeEngine,
    SwipeLimitInfo, SwipeReceipt, SwipeRequest,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn candidate(id: u64) -> Candidate {
    Candidate {
        id,
        username: format!("user{id}"),
        name: None,
        age: None,
        bio: None,
        gender: None,
        location: None,
        sign: None,
        compatibility_score: None,
        photos: Vec::new(),
        is_verified: false,
        is_active: true,
        is_new_user: false,
    }
}

pub fn page(ids: &[u64], has_more: bool) -> DiscoveryPage {
    DiscoveryPage {
        users: ids.iter().copied().map(candidate).collect(),
        has_more,
        swipe_limit_info: None,
    }
}

pub fn page_of(users: Vec<Candidate>, has_more: bool) -> DiscoveryPage {
    DiscoveryPage {
        users,
        has_more,
        swipe_limit_info: None,
    }
}

pub fn limit(is_premium: bool, remaining: u32) -> SwipeLimitInfo {
    SwipeLimitInfo {
        is_premium,
        remaining_swipes: remaining,
        total_swipes: 25,
        next_reset_time: None,
    }
}

pub fn match_receipt() -> SwipeReceipt {
    SwipeReceipt {
        is_match: true,
        match_id: Some(1001),
        remaining_swipes: None,
        message: None,
    }
}

/// Gateway double that replays scripted responses and counts calls.
/// Defaults: discovery returns an empty final page, the limit allows
/// swiping, and every swipe is a no-match.
pub struct ScriptedApi {
    pages: Mutex<VecDeque<Result<DiscoveryPage, ApiError>>>,
    swipes: Mutex<VecDeque<Result<SwipeReceipt, ApiError>>>,
    limit: Mutex<SwipeLimitInfo>,
    limit_errors: Mutex<VecDeque<ApiError>>,
    delay: Mutex<Option<Duration>>,
    discovery_calls: AtomicUsize,
    limit_calls: AtomicUsize,
    swipe_calls: AtomicUsize,
    swiped: Mutex<Vec<(u64, SwipeAction)>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(VecDeque::new()),
            swipes: Mutex::new(VecDeque::new()),
            limit: Mutex::new(limit(false, 25)),
            limit_errors: Mutex::new(VecDeque::new()),
            delay: Mutex::new(None),
            discovery_calls: AtomicUsize::new(0),
            limit_calls: AtomicUsize::new(0),
            swipe_calls: AtomicUsize::new(0),
            swiped: Mutex::new(Vec::new()),
        }
    }

    pub fn push_page(&self, page: DiscoveryPage) {
        self.pages.lock().unwrap().push_back(Ok(page));
    }

    pub fn push_page_err(&self, err: ApiError) {
        self.pages.lock().unwrap().push_back(Err(err));
    }

    pub fn push_swipe(&self, receipt: SwipeReceipt) {
        self.swipes.lock().unwrap().push_back(Ok(receipt));
    }

    pub fn push_swipe_err(&self, err: ApiError) {
        self.swipes.lock().unwrap().push_back(Err(err));
    }

    pub fn set_limit(&self, info: SwipeLimitInfo) {
        *self.limit.lock().unwrap() = info;
    }

    pub fn push_limit_err(&self, err: ApiError) {
        self.limit_errors.lock().unwrap().push_back(err);
    }

    /// Make every gateway call take this long, to hold requests in flight.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn discovery_calls(&self) -> usize {
        self.discovery_calls.load(Ordering::SeqCst)
    }

    pub fn limit_calls(&self) -> usize {
        self.limit_calls.load(Ordering::SeqCst)
    }

    pub fn swipe_calls(&self) -> usize {
        self.swipe_calls.load(Ordering::SeqCst)
    }

    pub fn swiped(&self) -> Vec<(u64, SwipeAction)> {
        self.swiped.lock().unwrap().clone()
    }

    async fn pause(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl DiscoveryApi for ScriptedApi {
    async fn fetch_discovery(
        &self,
        _page: u32,
        _page_size: u32,
        _refresh: bool,
    ) -> Result<DiscoveryPage, ApiError> {
        self.discovery_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(DiscoveryPage::empty()))
    }

    async fn fetch_swipe_limit(&self) -> Result<SwipeLimitInfo, ApiError> {
        self.limit_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if let Some(err) = self.limit_errors.lock().unwrap().pop_front() {
            return Err(err);
        }
        Ok(self.limit.lock().unwrap().clone())
    }

    async fn submit_swipe(&self, request: SwipeRequest) -> Result<SwipeReceipt, ApiError> {
        self.swipe_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.swiped
            .lock()
            .unwrap()
            .push((request.target_id, request.action));
        self.swipes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SwipeReceipt::no_match()))
    }
}

pub fn test_config() -> EngineConfig {
    EngineConfig {
        page_size: 5,
        preload_threshold: 3,
        ..EngineConfig::default()
    }
}

pub fn engine_over(api: Arc<ScriptedApi>) -> SwipeEngine {
    SwipeEngine::new(api, test_config())
}

/// Poll until the condition holds; background work has no completion handle
/// the tests could await directly.
pub async fn wait_until<F>(what: &str, condition: F)
where
    F: Fn() -> bool,
{
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for: {what}");
}

pub async fn wait_for_current(engine: &SwipeEngine) -> Candidate {
    for _ in 0..200 {
        if let Some(candidate) = engine.current().await {
            return candidate;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for a current candidate");
}

/// Wait for a background append to land in the batch.
pub async fn wait_for_remaining(engine: &SwipeEngine, at_least: usize) {
    for _ in 0..200 {
        if engine.snapshot().await.remaining_in_batch >= at_least {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for {at_least} candidates in the batch");
}
