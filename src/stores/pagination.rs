//! Posts pagination state, keyed by username
//!
//! This is the single writer of pagination counters. Everything else reads a
//! [`PaginationState`] snapshot and asks for changes by dispatching fetches;
//! the fetch dispatcher turns request lifecycle into [`PaginationEvent`]s and
//! feeds them through [`PaginationBook::apply`].
//!
//! Every request carries an id. A completion whose id does not match the
//! subject's in-flight request is stale (superseded by a newer request, or
//! the subject was reloaded from page 1) and is discarded.

use dioxus::prelude::*;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Pagination counters as reported by `GET /users/{username}/posts`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub next_page: Option<u32>,
}

/// Identifies the request a subject is currently waiting on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InFlight {
    pub request_id: u64,
    pub page: u32,
}

/// Read-only view of one subject's pagination
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Last page loaded (None until the first page lands)
    pub current_page: Option<u32>,
    pub total_pages: Option<u32>,
    pub next_page: Option<u32>,
    pub is_fetching: bool,
    /// Bumped on every applied event; lets readers tell "no update yet" apart
    /// from "updated, and idle again"
    pub revision: u64,
    pub in_flight: Option<InFlight>,
}

impl PaginationState {
    /// Page the next posts request should ask for
    pub fn next_page_to_request(&self) -> u32 {
        self.next_page
            .or_else(|| self.current_page.map(|page| page + 1))
            .unwrap_or(1)
    }

    /// True when the server reported more pages after the current one
    pub fn has_more(&self) -> bool {
        match (self.current_page, self.total_pages) {
            (None, _) => true,
            (Some(current), Some(total)) => current < total,
            (Some(_), None) => false,
        }
    }
}

/// Request lifecycle events
#[derive(Clone, Debug, PartialEq)]
pub enum PaginationEvent {
    FetchStarted { subject: String, request_id: u64, page: u32 },
    FetchSucceeded { subject: String, request_id: u64, page: PageInfo },
    FetchFailed { subject: String, request_id: u64, error: String },
}

impl PaginationEvent {
    pub fn subject(&self) -> &str {
        match self {
            PaginationEvent::FetchStarted { subject, .. }
            | PaginationEvent::FetchSucceeded { subject, .. }
            | PaginationEvent::FetchFailed { subject, .. } => subject,
        }
    }
}

/// Transition function for one subject's state.
///
/// Returns `None` when the event is stale and must be ignored.
pub fn reduce(state: &PaginationState, event: &PaginationEvent) -> Option<PaginationState> {
    let mut next = state.clone();
    match event {
        PaginationEvent::FetchStarted { request_id, page, .. } => {
            if *page <= 1 {
                // Fresh load: forget counters from a previous visit
                next.current_page = None;
                next.total_pages = None;
                next.next_page = None;
            }
            next.is_fetching = true;
            next.in_flight = Some(InFlight { request_id: *request_id, page: *page });
        }
        PaginationEvent::FetchSucceeded { request_id, page, .. } => {
            if !is_current(state, *request_id) {
                return None;
            }
            next.current_page = Some(page.current_page);
            next.total_pages = Some(page.total_pages);
            next.next_page = page.next_page;
            next.is_fetching = false;
            next.in_flight = None;
        }
        PaginationEvent::FetchFailed { request_id, .. } => {
            if !is_current(state, *request_id) {
                return None;
            }
            next.is_fetching = false;
            next.in_flight = None;
        }
    }
    next.revision = state.revision + 1;
    Some(next)
}

fn is_current(state: &PaginationState, request_id: u64) -> bool {
    state
        .in_flight
        .map(|in_flight| in_flight.request_id == request_id)
        .unwrap_or(false)
}

/// Subjects whose pagination is remembered; older entries are evicted
pub const PAGINATION_CAPACITY: usize = 64;

/// Pagination state for recently viewed subjects
///
/// An evicted subject reads as the default state, so a completion still in
/// flight for it no longer matches and is discarded.
#[derive(Clone, Debug)]
pub struct PaginationBook {
    entries: LruCache<String, PaginationState>,
    last_request_id: u64,
}

impl Default for PaginationBook {
    fn default() -> Self {
        Self::with_capacity(PAGINATION_CAPACITY)
    }
}

impl PaginationBook {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            last_request_id: 0,
        }
    }

    /// Snapshot for a subject (default state if never fetched)
    pub fn get(&self, subject: &str) -> PaginationState {
        self.entries.peek(subject).cloned().unwrap_or_default()
    }

    pub fn subject_count(&self) -> usize {
        self.entries.len()
    }

    /// Allocate a request id and record the fetch as started
    pub fn begin_fetch(&mut self, subject: &str, page: u32) -> u64 {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.apply(PaginationEvent::FetchStarted {
            subject: subject.to_string(),
            request_id,
            page,
        });
        request_id
    }

    /// Apply an event; returns false when it was stale and discarded
    pub fn apply(&mut self, event: PaginationEvent) -> bool {
        let subject = event.subject().to_string();
        let current = self.get(&subject);
        match reduce(&current, &event) {
            Some(next) => {
                self.entries.put(subject, next);
                true
            }
            None => {
                log::debug!("Discarding stale pagination event for {}: {:?}", subject, event);
                false
            }
        }
    }
}

/// Global pagination book
pub static PAGINATION: GlobalSignal<PaginationBook> = Signal::global(PaginationBook::default);

/// Current pagination snapshot for a subject
pub fn get_pagination(subject: &str) -> PaginationState {
    PAGINATION.read().get(subject)
}
