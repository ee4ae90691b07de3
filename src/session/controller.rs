use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;
use tokio::{sync::Mutex, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    api::{
        models::{Candidate, DiscoveryPage, SwipeAction, SwipeLimitInfo, SwipeRequest},
        ApiError, DiscoveryApi, HttpDiscoveryApi,
    },
    compat::{self, CompatibilityResult},
    config::EngineConfig,
    events::{EngineEvent, EventBus},
};

use super::state::{AdvanceOutcome, SessionState};

/// Owned view of the session for the UI layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub current: Option<Candidate>,
    pub remaining_in_batch: usize,
    pub has_more: bool,
    pub exhausted: bool,
    pub limit: Option<SwipeLimitInfo>,
    pub batches_fetched: u64,
    pub swipes_submitted: u64,
    pub matches_found: u64,
}

/// Result of one accepted swipe.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeOutcome {
    pub is_match: bool,
    pub matched_candidate: Option<Candidate>,
    /// Narrative for the match screen; absent when no match, or when
    /// neither the server nor the signs can supply a score.
    pub compatibility: Option<CompatibilityResult>,
}

impl SwipeOutcome {
    fn no_match() -> Self {
        Self {
            is_match: false,
            matched_candidate: None,
            compatibility: None,
        }
    }

    fn matched(candidate: Candidate, compatibility: Option<CompatibilityResult>) -> Self {
        Self {
            is_match: true,
            matched_candidate: Some(candidate),
            compatibility,
        }
    }
}

/// The only swipe failures a caller must handle. Everything transient is
/// absorbed: the session advances and a notice event is emitted instead.
#[derive(Debug, Error)]
pub enum SwipeError {
    /// Daily limit spent and the account is not premium. The current
    /// candidate stays unconsumed so the swipe can be retried after the
    /// limit resets.
    #[error("swipe limit reached")]
    LimitExceeded(SwipeLimitInfo),

    /// Nothing to swipe on right now (batch empty or still loading).
    #[error("no candidate available to swipe")]
    NoCandidate,

    /// A swipe is already in flight; this one was rejected, not queued.
    #[error("another swipe is still in flight")]
    SwipeInFlight,
}

/// Discovery session engine: fetches and paginates candidates, preloads
/// ahead of consumption, and executes swipe decisions.
///
/// Cheap to clone; clones share the same session. All state mutation goes
/// through the internal lock, one fetch / one preload / one swipe at a
/// time.
#[derive(Clone)]
pub struct SwipeEngine {
    state: Arc<Mutex<SessionState>>,
    api: Arc<dyn DiscoveryApi>,
    config: Arc<EngineConfig>,
    events: EventBus,
    preload_task: Arc<Mutex<Option<JoinHandle<()>>>>,
    shutdown: CancellationToken,
}

impl SwipeEngine {
    pub fn new(api: Arc<dyn DiscoveryApi>, config: EngineConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new())),
            api,
            config: Arc::new(config),
            events: EventBus::default(),
            preload_task: Arc::new(Mutex::new(None)),
            shutdown: CancellationToken::new(),
        }
    }

    /// Convenience constructor over the HTTP gateway.
    pub fn over_http(config: EngineConfig) -> Result<Self, ApiError> {
        let api = HttpDiscoveryApi::new(&config)?;
        Ok(Self::new(Arc::new(api), config))
    }

    /// Begin the session: a speculative limit read for display, then the
    /// first discovery fetch. Fails only if that first fetch fails.
    pub async fn start(&self) -> Result<(), ApiError> {
        self.refresh_limit().await;
        self.load_batch(false).await
    }

    /// Subscribe to engine transitions.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    pub async fn current(&self) -> Option<Candidate> {
        self.state.lock().await.current().cloned()
    }

    pub async fn limit_status(&self) -> Option<SwipeLimitInfo> {
        self.state.lock().await.limit.clone()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            session_id: state.session_id,
            current: state.current().cloned(),
            remaining_in_batch: state.remaining(),
            has_more: state.has_more,
            exhausted: state.is_exhausted(),
            limit: state.limit.clone(),
            batches_fetched: state.batches_fetched,
            swipes_submitted: state.swipes_submitted,
            matches_found: state.matches_found,
        }
    }

    /// Speculative limit read, for display only. Failures are absorbed;
    /// enforcement happens on the authoritative pre-swipe read.
    pub async fn refresh_limit(&self) -> Option<SwipeLimitInfo> {
        let epoch = self.state.lock().await.epoch;
        match self.api.fetch_swipe_limit().await {
            Ok(info) => {
                let mut state = self.state.lock().await;
                if state.epoch != epoch {
                    debug!("discarding limit status from a previous session");
                    return None;
                }
                state.set_limit(info.clone());
                self.events.emit(EngineEvent::LimitUpdated(info.clone()));
                Some(info)
            }
            Err(err) => {
                warn!("speculative limit read failed: {err}");
                None
            }
        }
    }

    /// Fetch one discovery page into the session. No-op while a fetch is
    /// already in flight, and (unless refreshing) once the server reported
    /// exhaustion. `refresh` starts a deliberate new session: the seen set
    /// is cleared and pagination starts over before the fetch goes out.
    pub async fn load_batch(&self, refresh: bool) -> Result<(), ApiError> {
        let (page, epoch) = {
            let mut state = self.state.lock().await;
            if state.is_fetching {
                debug!("discovery fetch already in flight, ignoring");
                return Ok(());
            }
            if !refresh && !state.has_more {
                debug!("server reported exhaustion, not fetching");
                return Ok(());
            }
            if refresh {
                state.start_refresh();
            }
            state.is_fetching = true;
            (state.next_page, state.epoch)
        };

        let result = tokio::select! {
            _ = self.shutdown.cancelled() => {
                self.state.lock().await.is_fetching = false;
                return Ok(());
            }
            result = self.api.fetch_discovery(page, self.config.page_size, refresh) => result,
        };

        let mut state = self.state.lock().await;
        state.is_fetching = false;
        if state.epoch != epoch {
            debug!("discarding discovery page fetched for a previous session");
            return Ok(());
        }

        match result {
            Ok(response) => {
                self.apply_page(&mut state, response, false);
                Ok(())
            }
            Err(err) => {
                warn!("discovery fetch failed: {err}");
                Err(err)
            }
        }
    }

    /// Move to the next candidate. Triggers a background preload when the
    /// batch runs low, or a background fetch when it ran out while the
    /// server still has more.
    pub async fn advance(&self) {
        let outcome = self.state.lock().await.advance();

        match outcome {
            AdvanceOutcome::InBatch { remaining } => self.maybe_preload(remaining).await,
            AdvanceOutcome::NeedsFetch => {
                let engine = self.clone();
                tokio::spawn(async move {
                    if let Err(err) = engine.load_batch(false).await {
                        engine.events.emit(EngineEvent::Notice {
                            message: "Couldn't load more profiles right now.".into(),
                        });
                        warn!("background discovery fetch failed: {err}");
                    }
                });
            }
            AdvanceOutcome::Exhausted => {
                info!("discovery session exhausted");
                self.events.emit(EngineEvent::SessionExhausted);
            }
        }
    }

    /// Execute one swipe decision on the current candidate.
    ///
    /// Only `SwipeError::LimitExceeded` is an outcome the UI must present;
    /// duplicate swipes are silently no-matches and transient failures
    /// advance the session with a notice event.
    pub async fn swipe(&self, action: SwipeAction) -> Result<SwipeOutcome, SwipeError> {
        let (candidate, epoch) = {
            let mut state = self.state.lock().await;
            if state.is_swiping {
                return Err(SwipeError::SwipeInFlight);
            }
            let Some(candidate) = state.current().cloned() else {
                return Err(SwipeError::NoCandidate);
            };
            state.is_swiping = true;
            (candidate, state.epoch)
        };

        let result = self.swipe_inner(&candidate, action, epoch).await;
        self.state.lock().await.is_swiping = false;
        result
    }

    /// Discard the session and immediately start a fresh one.
    pub async fn reset(&self) {
        self.abort_preload().await;
        {
            let mut state = self.state.lock().await;
            state.begin_reset();
            info!("session reset, new session {}", state.session_id);
        }
        self.events.emit(EngineEvent::SessionReset);

        if let Err(err) = self.load_batch(true).await {
            warn!("initial fetch after reset failed: {err}");
            self.events.emit(EngineEvent::Notice {
                message: "Couldn't start a new discovery session.".into(),
            });
        }
    }

    /// Teardown on logout: stop background work and clear all session
    /// state so nothing leaks into a later session for another user.
    /// In-flight requests are left to resolve into a discarded epoch.
    pub async fn close(&self) {
        self.shutdown.cancel();
        self.abort_preload().await;
        let mut state = self.state.lock().await;
        state.begin_reset();
        info!("engine closed, session state cleared");
    }

    async fn abort_preload(&self) {
        if let Some(handle) = self.preload_task.lock().await.take() {
            handle.abort();
        }
    }

    /// Preload policy: once the unconsumed tail shrinks to the threshold,
    /// fetch the next page in the background and append it. One preload at
    /// a time; consumption never blocks on it.
    async fn maybe_preload(&self, remaining: usize) {
        {
            let mut state = self.state.lock().await;
            if remaining > self.config.preload_threshold
                || !state.has_more
                || state.is_preloading
            {
                return;
            }
            state.is_preloading = true;
        }

        let engine = self.clone();
        let handle = tokio::spawn(async move { engine.run_preload().await });
        *self.preload_task.lock().await = Some(handle);
    }

    async fn run_preload(&self) {
        let (page, epoch) = {
            let state = self.state.lock().await;
            (state.next_page, state.epoch)
        };
        debug!("preloading discovery page {page}");

        let result = tokio::select! {
            _ = self.shutdown.cancelled() => {
                self.state.lock().await.is_preloading = false;
                return;
            }
            result = self.api.fetch_discovery(page, self.config.page_size, false) => result,
        };

        let mut state = self.state.lock().await;
        state.is_preloading = false;
        if state.epoch != epoch {
            debug!("discarding preloaded page from a previous session");
            return;
        }

        match result {
            Ok(response) => self.apply_page(&mut state, response, true),
            // Absorbed: the next advance under the threshold retries.
            Err(err) => warn!("preload failed: {err}"),
        }
    }

    /// Commit a fetched page under the lock: limit update, dedup, append or
    /// replace, events. Shared by foreground loads and preloads.
    fn apply_page(&self, state: &mut SessionState, response: DiscoveryPage, append: bool) {
        let DiscoveryPage {
            users,
            has_more,
            swipe_limit_info,
        } = response;

        if let Some(info) = swipe_limit_info {
            state.set_limit(info.clone());
            self.events.emit(EngineEvent::LimitUpdated(info));
        }

        let accepted = state.accept_page(users, has_more, append);
        info!(
            "session {}: accepted {accepted} candidates (append={append}, has_more={has_more})",
            state.session_id
        );
        self.events.emit(EngineEvent::BatchLoaded {
            count: accepted,
            has_more,
        });

        if state.is_exhausted() {
            self.events.emit(EngineEvent::SessionExhausted);
        }
    }

    async fn swipe_inner(
        &self,
        candidate: &Candidate,
        action: SwipeAction,
        epoch: u64,
    ) -> Result<SwipeOutcome, SwipeError> {
        // Authoritative limit read; the cached value may be stale across
        // devices or a server-side reset. If the read itself fails we fall
        // back to the cache and let the server enforce on submit.
        let limit = match self.api.fetch_swipe_limit().await {
            Ok(info) => {
                let mut state = self.state.lock().await;
                if state.epoch == epoch {
                    state.set_limit(info.clone());
                    self.events.emit(EngineEvent::LimitUpdated(info.clone()));
                }
                Some(info)
            }
            Err(err) => {
                warn!("pre-swipe limit read failed, using cached status: {err}");
                self.state.lock().await.limit.clone()
            }
        };

        if let Some(info) = limit {
            if !info.can_swipe() {
                info!(
                    "swipe blocked by limit ({} of {} left)",
                    info.remaining_swipes, info.total_swipes
                );
                return Err(SwipeError::LimitExceeded(info));
            }
        }

        let request = SwipeRequest {
            target_id: candidate.id,
            action,
        };

        match self.api.submit_swipe(request).await {
            Ok(receipt) => {
                {
                    let mut state = self.state.lock().await;
                    if state.epoch != epoch {
                        debug!("discarding swipe result from a previous session");
                        return Ok(SwipeOutcome::no_match());
                    }
                    state.mark_seen(candidate.id);
                    state.record_swipe(receipt.is_match);
                    if let Some(remaining) = receipt.remaining_swipes {
                        if let Some(info) = state.limit.as_mut() {
                            info.remaining_swipes = remaining;
                        }
                    }
                }

                if receipt.is_match {
                    info!("matched with candidate {}", candidate.id);
                    self.events.emit(EngineEvent::Matched {
                        candidate_id: candidate.id,
                    });
                    // The caller advances once the match screen is dismissed.
                    Ok(SwipeOutcome::matched(
                        candidate.clone(),
                        self.match_narrative(candidate),
                    ))
                } else {
                    self.advance().await;
                    Ok(SwipeOutcome::no_match())
                }
            }
            Err(ApiError::DuplicateSwipe) => {
                // Already recorded server-side; behave like a plain no-match.
                debug!("duplicate swipe for candidate {}", candidate.id);
                {
                    let mut state = self.state.lock().await;
                    if state.epoch != epoch {
                        return Ok(SwipeOutcome::no_match());
                    }
                    state.mark_seen(candidate.id);
                    state.record_swipe(false);
                }
                self.advance().await;
                Ok(SwipeOutcome::no_match())
            }
            Err(ApiError::LimitReached(info)) => {
                // Server-side enforcement beat the pre-check; candidate
                // stays unconsumed, same as the local gate.
                let mut state = self.state.lock().await;
                if state.epoch != epoch {
                    return Ok(SwipeOutcome::no_match());
                }
                state.set_limit(info.clone());
                self.events.emit(EngineEvent::LimitUpdated(info.clone()));
                Err(SwipeError::LimitExceeded(info))
            }
            Err(err) => {
                warn!("swipe submit failed for candidate {}: {err}", candidate.id);
                {
                    let mut state = self.state.lock().await;
                    if state.epoch != epoch {
                        return Ok(SwipeOutcome::no_match());
                    }
                    state.mark_seen(candidate.id);
                    state.record_swipe(false);
                }
                self.events.emit(EngineEvent::Notice {
                    message: "That one didn't go through. Keep going!".into(),
                });
                self.advance().await;
                Ok(SwipeOutcome::no_match())
            }
        }
    }

    /// Narrative for the match screen. The server's precomputed score wins;
    /// otherwise the signs decide, and without both signs there is nothing
    /// to say.
    fn match_narrative(&self, candidate: &Candidate) -> Option<CompatibilityResult> {
        let viewer = self.config.viewer_sign;
        if let Some(server_score) = candidate.compatibility_score {
            let same_element = match (viewer, candidate.sign) {
                (Some(a), Some(b)) => a.element() == b.element(),
                _ => false,
            };
            Some(compat::result_for_score(server_score, same_element))
        } else {
            compat::score_between(viewer, candidate.sign)
        }
    }
}
