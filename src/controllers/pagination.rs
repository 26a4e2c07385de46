//! Load-more / endless-scroll controller for a profile's posts
//!
//! A profile first shows a preview of its posts with a "Load more" button.
//! Clicking it fetches the next page and switches the subject into endless
//! mode: from then on, scrolling near the bottom of the page fetches further
//! pages until the server runs out.
//!
//! The controller never writes pagination counters. It reads a
//! [`PaginationState`] snapshot on every decision and requests fetches through
//! a [`FetchDispatcher`].

use std::collections::HashMap;

use crate::stores::pagination::PaginationState;

/// Fire-and-forget fetch requests. Results land in the stores, not here.
pub trait FetchDispatcher {
    fn fetch_profile(&self, subject: &str);
    fn fetch_posts(&self, subject: &str, page: u32);
}

/// Window scroll position at the time of a scroll event
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub inner_height: f64,
}

impl ScrollMetrics {
    /// Distance from the top of the viewport to the end of the document
    pub fn remaining(&self) -> f64 {
        self.scroll_height - self.scroll_top
    }
}

/// How close to the bottom counts as "near the bottom"
///
/// The page is near the bottom when the remaining scrollable distance is at
/// most `inner_height * (base_viewports + extra_viewports)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollThreshold {
    pub base_viewports: f64,
    pub extra_viewports: f64,
}

impl ScrollThreshold {
    pub const DEFAULT_BASE_VIEWPORTS: f64 = 1.0;
    pub const DEFAULT_EXTRA_VIEWPORTS: f64 = 0.8;

    pub fn is_near_bottom(&self, metrics: &ScrollMetrics) -> bool {
        let limit = metrics.inner_height * (self.base_viewports + self.extra_viewports);
        metrics.remaining() <= limit
    }
}

impl Default for ScrollThreshold {
    fn default() -> Self {
        Self {
            base_viewports: Self::DEFAULT_BASE_VIEWPORTS,
            extra_viewports: Self::DEFAULT_EXTRA_VIEWPORTS,
        }
    }
}

/// Per-subject pagination mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollMode {
    pub endless_scroll: bool,
}

/// Last page this controller asked for, and the state revision it saw then
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TriggerMark {
    page: u32,
    revision: u64,
}

#[derive(Clone, Copy, Debug, Default)]
struct SubjectSession {
    mode: ScrollMode,
    last_trigger: Option<TriggerMark>,
}

pub struct PaginationController<D> {
    dispatcher: D,
    threshold: ScrollThreshold,
    subject: Option<String>,
    sessions: HashMap<String, SubjectSession>,
}

impl<D: FetchDispatcher> PaginationController<D> {
    pub fn new(dispatcher: D, threshold: ScrollThreshold) -> Self {
        Self {
            dispatcher,
            threshold,
            subject: None,
            sessions: HashMap::new(),
        }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn mode(&self, subject: &str) -> ScrollMode {
        self.sessions.get(subject).map(|s| s.mode).unwrap_or_default()
    }

    pub fn is_endless(&self, subject: &str) -> bool {
        self.mode(subject).endless_scroll
    }

    /// Whether the view should offer the "Load more" button
    pub fn shows_load_more(&self, subject: &str, state: &PaginationState) -> bool {
        state.next_page.is_some() && !self.is_endless(subject)
    }

    /// Endless mode is on, nothing is in flight, and pages remain
    pub fn should_fetch_next(&self, subject: &str, state: &PaginationState) -> bool {
        self.is_endless(subject) && !state.is_fetching && state.has_more()
    }

    /// "Load more" click: fetch the next page and switch to endless mode.
    ///
    /// Returns the page requested, or None when a fetch for the subject is
    /// already in flight (endless mode is still switched on, so the next
    /// scroll event picks up where that fetch leaves off).
    pub fn on_load_more_requested(&mut self, subject: &str, state: &PaginationState) -> Option<u32> {
        self.sessions.entry(subject.to_string()).or_default().mode.endless_scroll = true;
        log::debug!("Endless scroll enabled for {}", subject);

        if state.is_fetching {
            log::debug!("Load more for {} while a fetch is in flight, not dispatching", subject);
            return None;
        }
        Some(self.trigger(subject, state))
    }

    /// Page a scroll event with these metrics would request, without
    /// requesting it. Lets callers skip taking a write lock on most events.
    pub fn scroll_target(&self, metrics: &ScrollMetrics, state: &PaginationState) -> Option<u32> {
        let subject = self.subject.as_deref()?;

        if !self.threshold.is_near_bottom(metrics) || !self.should_fetch_next(subject, state) {
            return None;
        }

        let page = state.next_page_to_request();
        if self.is_repeat_trigger(subject, page, state) {
            return None;
        }
        Some(page)
    }

    /// Scroll event for the current subject
    pub fn on_scroll(&mut self, metrics: &ScrollMetrics, state: &PaginationState) -> Option<u32> {
        self.scroll_target(metrics, state)?;
        let subject = self.subject.clone()?;
        Some(self.trigger(&subject, state))
    }

    /// Switch to a new subject: forget the previous one, reset the new one's
    /// mode and marker, then request its profile and first page
    pub fn on_subject_changed(&mut self, new_subject: &str) {
        if let Some(previous) = self.subject.replace(new_subject.to_string()) {
            self.sessions.remove(&previous);
        }
        self.sessions.insert(new_subject.to_string(), SubjectSession::default());
        log::debug!("Pagination subject is now {}", new_subject);

        self.dispatcher.fetch_profile(new_subject);
        self.dispatcher.fetch_posts(new_subject, 1);
    }

    /// Drop the current subject (view torn down)
    pub fn clear_subject(&mut self) {
        if let Some(subject) = self.subject.take() {
            self.sessions.remove(&subject);
        }
    }

    fn is_repeat_trigger(&self, subject: &str, page: u32, state: &PaginationState) -> bool {
        self.sessions
            .get(subject)
            .and_then(|session| session.last_trigger)
            .map(|mark| mark.page == page && mark.revision == state.revision)
            .unwrap_or(false)
    }

    fn trigger(&mut self, subject: &str, state: &PaginationState) -> u32 {
        let page = state.next_page_to_request();
        self.dispatcher.fetch_posts(subject, page);
        self.sessions.entry(subject.to_string()).or_default().last_trigger = Some(TriggerMark {
            page,
            revision: state.revision,
        });
        log::debug!("Requested page {} for {}", page, subject);
        page
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub(crate) enum Request {
        Profile(String),
        Posts(String, u32),
    }

    #[derive(Clone, Default)]
    pub(crate) struct RecordingDispatcher(pub(crate) Rc<RefCell<Vec<Request>>>);

    impl RecordingDispatcher {
        pub(crate) fn take(&self) -> Vec<Request> {
            std::mem::take(&mut *self.0.borrow_mut())
        }
    }

    impl FetchDispatcher for RecordingDispatcher {
        fn fetch_profile(&self, subject: &str) {
            self.0.borrow_mut().push(Request::Profile(subject.to_string()));
        }

        fn fetch_posts(&self, subject: &str, page: u32) {
            self.0.borrow_mut().push(Request::Posts(subject.to_string(), page));
        }
    }

    fn loaded(current: u32, total: u32, revision: u64) -> PaginationState {
        PaginationState {
            current_page: Some(current),
            total_pages: Some(total),
            next_page: if current < total { Some(current + 1) } else { None },
            is_fetching: false,
            revision,
            in_flight: None,
        }
    }

    fn near_bottom() -> ScrollMetrics {
        ScrollMetrics { scroll_top: 1000.0, scroll_height: 2000.0, inner_height: 800.0 }
    }

    fn controller_on(subject: &str) -> (PaginationController<RecordingDispatcher>, RecordingDispatcher) {
        let dispatcher = RecordingDispatcher::default();
        let mut controller = PaginationController::new(dispatcher.clone(), ScrollThreshold::default());
        controller.on_subject_changed(subject);
        dispatcher.take();
        (controller, dispatcher)
    }

    #[test]
    fn test_near_bottom_threshold() {
        let threshold = ScrollThreshold::default();
        // remaining 1000 <= 800 * 1.8 = 1440
        assert!(threshold.is_near_bottom(&near_bottom()));
        assert!(threshold.is_near_bottom(&ScrollMetrics {
            scroll_top: 560.0,
            scroll_height: 2000.0,
            inner_height: 800.0,
        }));
        assert!(!threshold.is_near_bottom(&ScrollMetrics {
            scroll_top: 0.0,
            scroll_height: 2000.0,
            inner_height: 800.0,
        }));

        let eager = ScrollThreshold { base_viewports: 1.0, extra_viewports: 2.0 };
        assert!(eager.is_near_bottom(&ScrollMetrics {
            scroll_top: 0.0,
            scroll_height: 2000.0,
            inner_height: 800.0,
        }));
    }

    #[test]
    fn test_should_fetch_next_is_false_while_fetching() {
        let (mut controller, _) = controller_on("alice");
        controller.on_load_more_requested("alice", &loaded(1, 3, 2));

        let states = [
            PaginationState { is_fetching: true, ..PaginationState::default() },
            PaginationState { is_fetching: true, ..loaded(1, 9, 0) },
            PaginationState { is_fetching: true, ..loaded(9, 9, 0) },
            PaginationState { is_fetching: true, total_pages: None, ..loaded(1, 1, 0) },
        ];
        for state in states.iter() {
            assert!(!controller.should_fetch_next("alice", state));
        }
    }

    #[test]
    fn test_should_fetch_next_requires_endless_and_remaining_pages() {
        let (mut controller, _) = controller_on("alice");
        assert!(!controller.should_fetch_next("alice", &loaded(1, 3, 2)));

        controller.on_load_more_requested("alice", &loaded(1, 3, 2));
        assert!(controller.should_fetch_next("alice", &loaded(2, 3, 4)));
        assert!(controller.should_fetch_next("alice", &PaginationState::default()));
        assert!(!controller.should_fetch_next("alice", &loaded(3, 3, 6)));
    }

    #[test]
    fn test_load_more_fetches_next_page_and_withdraws_button() {
        let (mut controller, dispatcher) = controller_on("alice");
        let state = loaded(2, 5, 4);
        assert!(controller.shows_load_more("alice", &state));

        assert_eq!(controller.on_load_more_requested("alice", &state), Some(3));

        assert_eq!(dispatcher.take(), vec![Request::Posts("alice".to_string(), 3)]);
        assert!(controller.is_endless("alice"));
        assert!(!controller.shows_load_more("alice", &state));
        assert!(!controller.shows_load_more("alice", &loaded(3, 5, 6)));
    }

    #[test]
    fn test_load_more_while_fetching_only_switches_mode() {
        let (mut controller, dispatcher) = controller_on("alice");
        let state = PaginationState { is_fetching: true, ..loaded(1, 5, 1) };

        assert_eq!(controller.on_load_more_requested("alice", &state), None);
        assert!(dispatcher.take().is_empty());
        assert!(controller.is_endless("alice"));
    }

    #[test]
    fn test_scroll_triggers_once_until_state_updates() {
        let (mut controller, dispatcher) = controller_on("alice");
        controller.on_load_more_requested("alice", &loaded(1, 5, 2));
        dispatcher.take();

        let idle = loaded(2, 5, 4);
        assert_eq!(controller.scroll_target(&near_bottom(), &idle), Some(3));
        assert!(dispatcher.take().is_empty(), "checking the target dispatches nothing");
        assert_eq!(controller.on_scroll(&near_bottom(), &idle), Some(3));

        // Same event again while the fetch is in flight
        let fetching = PaginationState { is_fetching: true, revision: 5, ..idle.clone() };
        assert_eq!(controller.on_scroll(&near_bottom(), &fetching), None);

        // Same event again before the reducer has seen the request at all
        assert_eq!(controller.scroll_target(&near_bottom(), &idle), None);
        assert_eq!(controller.on_scroll(&near_bottom(), &idle), None);

        assert_eq!(dispatcher.take(), vec![Request::Posts("alice".to_string(), 3)]);

        // Page 3 landed
        assert_eq!(controller.on_scroll(&near_bottom(), &loaded(3, 5, 6)), Some(4));
    }

    #[test]
    fn test_failed_fetch_can_be_retried_after_update() {
        let (mut controller, dispatcher) = controller_on("alice");
        controller.on_load_more_requested("alice", &loaded(1, 5, 2));
        dispatcher.take();

        assert_eq!(controller.on_scroll(&near_bottom(), &loaded(2, 5, 4)), Some(3));
        // Started then failed: counters unchanged but two revisions later
        assert_eq!(controller.on_scroll(&near_bottom(), &loaded(2, 5, 6)), Some(3));
        assert_eq!(dispatcher.take().len(), 2);
    }

    #[test]
    fn test_scroll_without_endless_mode_does_nothing() {
        let (mut controller, dispatcher) = controller_on("alice");
        assert_eq!(controller.on_scroll(&near_bottom(), &loaded(1, 5, 2)), None);
        assert!(dispatcher.take().is_empty());
    }

    #[test]
    fn test_scroll_far_from_bottom_does_nothing() {
        let (mut controller, dispatcher) = controller_on("alice");
        controller.on_load_more_requested("alice", &loaded(1, 5, 2));
        dispatcher.take();

        let top = ScrollMetrics { scroll_top: 0.0, scroll_height: 5000.0, inner_height: 800.0 };
        assert_eq!(controller.on_scroll(&top, &loaded(2, 5, 4)), None);
        assert!(dispatcher.take().is_empty());
    }

    #[test]
    fn test_subject_change_resets_mode_and_fetches_first_page() {
        let (mut controller, dispatcher) = controller_on("alice");
        controller.on_load_more_requested("alice", &loaded(1, 5, 2));
        controller.on_scroll(&near_bottom(), &loaded(2, 5, 4));
        dispatcher.take();

        controller.on_subject_changed("bob");

        assert_eq!(
            dispatcher.take(),
            vec![
                Request::Profile("bob".to_string()),
                Request::Posts("bob".to_string(), 1),
            ]
        );
        assert_eq!(controller.subject(), Some("bob"));
        assert!(!controller.is_endless("bob"));

        // Alice-style scroll now applies to bob, who is not in endless mode
        assert_eq!(controller.on_scroll(&near_bottom(), &loaded(1, 5, 2)), None);
        assert!(dispatcher.take().is_empty());
    }

    #[test]
    fn test_subject_change_is_an_idempotent_reset() {
        let (mut controller, dispatcher) = controller_on("alice");

        controller.on_load_more_requested("alice", &loaded(1, 5, 2));
        controller.on_subject_changed("alice");
        assert!(!controller.is_endless("alice"));

        controller.on_load_more_requested("alice", &loaded(1, 5, 4));
        controller.on_subject_changed("alice");
        assert!(!controller.is_endless("alice"));

        let requests = dispatcher.take();
        assert_eq!(
            requests.iter().filter(|r| **r == Request::Posts("alice".to_string(), 1)).count(),
            2
        );
    }

    #[test]
    fn test_scroll_retries_first_page_after_failure() {
        let dispatcher = RecordingDispatcher::default();
        let mut controller = PaginationController::new(dispatcher.clone(), ScrollThreshold::default());
        controller.on_subject_changed("alice");
        controller.on_load_more_requested("alice", &PaginationState {
            is_fetching: true,
            revision: 1,
            ..PaginationState::default()
        });
        dispatcher.take();

        // First page failed before any page loaded; scroll may retry it
        let failed = PaginationState { revision: 2, ..PaginationState::default() };
        assert_eq!(controller.on_scroll(&near_bottom(), &failed), Some(1));
    }

    #[test]
    fn test_sessions_do_not_outlive_their_subject() {
        let (mut controller, _) = controller_on("user0");
        for i in 1..1000 {
            controller.on_subject_changed(&format!("user{}", i));
        }
        assert_eq!(controller.sessions.len(), 1);

        controller.on_load_more_requested("user999", &loaded(1, 5, 2));
        controller.clear_subject();
        assert!(controller.sessions.is_empty());
        assert!(!controller.is_endless("user999"));
        assert_eq!(controller.subject(), None);
    }
}
