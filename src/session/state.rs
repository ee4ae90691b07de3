//! Pure session state for one discovery run.
//!
//! Owned exclusively by the engine controller; every mutation goes through
//! the methods here so the dedup and guard invariants hold in one place.

use std::collections::HashSet;

use uuid::Uuid;

use crate::api::models::{Candidate, SwipeLimitInfo};

/// Where an `advance` left the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AdvanceOutcome {
    /// Still inside the loaded batch, with this many unconsumed candidates.
    InBatch { remaining: usize },
    /// Ran off the end but the server has more; a fetch should start.
    NeedsFetch,
    /// Ran off the end and the server is out of candidates.
    Exhausted,
}

#[derive(Debug)]
pub(crate) struct SessionState {
    pub(crate) session_id: Uuid,
    pub(crate) batch: Vec<Candidate>,
    /// Index of the candidate currently shown; `>= batch.len()` means none.
    pub(crate) pointer: usize,
    /// Every id ever accepted into a batch this session. Ids enter here
    /// atomically with the batch mutation, which keeps overlapping fetches
    /// from double-serving a candidate.
    pub(crate) seen: HashSet<u64>,
    pub(crate) has_more: bool,
    pub(crate) next_page: u32,
    pub(crate) is_fetching: bool,
    pub(crate) is_preloading: bool,
    pub(crate) is_swiping: bool,
    pub(crate) limit: Option<SwipeLimitInfo>,
    /// Bumped on reset/teardown; results of requests started under an older
    /// epoch are discarded instead of leaking into the new session.
    pub(crate) epoch: u64,
    pub(crate) batches_fetched: u64,
    pub(crate) swipes_submitted: u64,
    pub(crate) matches_found: u64,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            batch: Vec::new(),
            pointer: 0,
            seen: HashSet::new(),
            has_more: true,
            next_page: 1,
            is_fetching: false,
            is_preloading: false,
            is_swiping: false,
            limit: None,
            epoch: 0,
            batches_fetched: 0,
            swipes_submitted: 0,
            matches_found: 0,
        }
    }

    pub(crate) fn current(&self) -> Option<&Candidate> {
        self.batch.get(self.pointer)
    }

    pub(crate) fn remaining(&self) -> usize {
        self.batch.len().saturating_sub(self.pointer)
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.current().is_none() && !self.has_more
    }

    /// Prepare for a deliberate new session: forget what was served and
    /// start pagination over. Called before the refresh fetch goes out.
    pub(crate) fn start_refresh(&mut self) {
        self.batch.clear();
        self.pointer = 0;
        self.seen.clear();
        self.has_more = true;
        self.next_page = 1;
    }

    /// Discard everything and start a new epoch. In-flight requests from
    /// the old epoch will find their results ignored.
    pub(crate) fn begin_reset(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self::new();
        self.epoch = epoch;
    }

    /// Accept one fetched page, deduplicated against `seen`. Replaces the
    /// batch (foreground load) or appends to it (preload). Returns how many
    /// candidates survived the filter.
    ///
    /// An empty filtered page does not touch `has_more` beyond what the
    /// server reported; the server is the source of truth for exhaustion.
    pub(crate) fn accept_page(
        &mut self,
        users: Vec<Candidate>,
        has_more: bool,
        append: bool,
    ) -> usize {
        let mut accepted = Vec::with_capacity(users.len());
        for candidate in users {
            if self.seen.insert(candidate.id) {
                accepted.push(candidate);
            }
        }
        let count = accepted.len();

        if append {
            self.batch.extend(accepted);
        } else {
            self.batch = accepted;
            self.pointer = 0;
        }
        self.has_more = has_more;
        self.next_page = self.next_page.saturating_add(1);
        self.batches_fetched += 1;

        count
    }

    pub(crate) fn advance(&mut self) -> AdvanceOutcome {
        self.pointer = self.pointer.saturating_add(1).min(self.batch.len());

        if self.pointer < self.batch.len() {
            AdvanceOutcome::InBatch {
                remaining: self.remaining(),
            }
        } else if self.has_more {
            AdvanceOutcome::NeedsFetch
        } else {
            AdvanceOutcome::Exhausted
        }
    }

    pub(crate) fn mark_seen(&mut self, id: u64) {
        self.seen.insert(id);
    }

    pub(crate) fn record_swipe(&mut self, matched: bool) {
        self.swipes_submitted += 1;
        if matched {
            self.matches_found += 1;
        }
    }

    pub(crate) fn set_limit(&mut self, info: SwipeLimitInfo) {
        self.limit = Some(info);
    }
}
