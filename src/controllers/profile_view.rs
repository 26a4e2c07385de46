//! Profile screen coordinator
//!
//! Owns everything about the profile screen that is transient and tied to the
//! username in view: which modal is open, whether endless scrolling is on,
//! and whether the window scroll listener is attached. When the username
//! changes, all of that is thrown away before the new profile is fetched.

use std::collections::{HashMap, HashSet};

use crate::controllers::pagination::{FetchDispatcher, PaginationController, ScrollMetrics, ScrollThreshold};
use crate::stores::pagination::PaginationState;
use crate::stores::profiles::PublicProfile;

/// Attaches and detaches the window scroll listener
pub trait ScrollBinding {
    fn subscribe(&mut self);
    fn unsubscribe(&mut self);
}

/// Which relationship list the users modal shows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UsersListKind {
    Followers,
    Following,
}

impl UsersListKind {
    /// Path segment used by the API
    pub fn as_path(self) -> &'static str {
        match self {
            UsersListKind::Followers => "followers",
            UsersListKind::Following => "following",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            UsersListKind::Followers => "Followers",
            UsersListKind::Following => "Following",
        }
    }
}

/// Modal state for one subject
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProfileUiState {
    pub logout_modal_open: bool,
    pub users_modal: Option<UsersListKind>,
}

/// What the action button next to the username does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileAction {
    /// Viewing your own profile
    EditProfile,
    Follow,
    Unfollow,
    /// Anonymous visitor; no action offered
    None,
}

/// Values the profile view renders, derived from store data
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileProjection {
    pub is_own_profile: bool,
    pub is_following: bool,
    pub action: ProfileAction,
    pub post_count: u64,
    pub follower_count: u64,
    pub following_count: u64,
}

impl ProfileProjection {
    /// Project a fetched profile against the signed-in viewer
    ///
    /// `viewer_username` is None for anonymous visitors; `following_ids` holds
    /// the ids of the accounts the viewer follows.
    pub fn project(
        subject: &str,
        profile: &PublicProfile,
        viewer_username: Option<&str>,
        following_ids: &HashSet<String>,
    ) -> Self {
        let is_own_profile = viewer_username.map(|viewer| viewer == subject).unwrap_or(false);
        let is_following = following_ids.contains(&profile.id);
        let action = match viewer_username {
            _ if is_own_profile => ProfileAction::EditProfile,
            None => ProfileAction::None,
            Some(_) if is_following => ProfileAction::Unfollow,
            Some(_) => ProfileAction::Follow,
        };

        Self {
            is_own_profile,
            is_following,
            action,
            post_count: profile.posts_count,
            follower_count: profile.followers_count,
            following_count: profile.following_count,
        }
    }
}

pub struct ProfileViewCoordinator<D, B> {
    pagination: PaginationController<D>,
    scroll: B,
    subscribed: bool,
    active: Option<String>,
    ui: HashMap<String, ProfileUiState>,
    preview_post_count: usize,
}

impl<D, B> ProfileViewCoordinator<D, B>
where
    D: FetchDispatcher,
    B: ScrollBinding,
{
    pub fn new(dispatcher: D, scroll: B, threshold: ScrollThreshold, preview_post_count: usize) -> Self {
        Self {
            pagination: PaginationController::new(dispatcher, threshold),
            scroll,
            subscribed: false,
            active: None,
            ui: HashMap::new(),
            preview_post_count,
        }
    }

    pub fn active_subject(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn pagination(&self) -> &PaginationController<D> {
        &self.pagination
    }

    /// Mount with a subject: fetch it and start listening to scroll events
    pub fn activate(&mut self, subject: &str) {
        self.switch_to(subject);
        if !self.subscribed {
            self.scroll.subscribe();
            self.subscribed = true;
        }
    }

    /// Route parameter changed. Only a different subject resets anything.
    pub fn on_subject_changed(&mut self, subject: &str) {
        match self.active.as_deref() {
            None => self.activate(subject),
            Some(current) if current == subject => {}
            Some(_) => self.switch_to(subject),
        }
    }

    /// Unmount. Safe to call repeatedly, or without a prior activation.
    pub fn deactivate(&mut self) {
        if self.subscribed {
            self.scroll.unsubscribe();
            self.subscribed = false;
        }
        if let Some(subject) = self.active.take() {
            log::debug!("Profile view for {} deactivated", subject);
            self.ui.remove(&subject);
        }
        self.pagination.clear_subject();
    }

    fn switch_to(&mut self, subject: &str) {
        if let Some(previous) = self.active.replace(subject.to_string()) {
            self.ui.remove(&previous);
        }
        // Reset before fetching so nothing from the old subject survives
        self.ui.insert(subject.to_string(), ProfileUiState::default());
        self.pagination.on_subject_changed(subject);
        log::info!("Viewing profile {}", subject);
    }

    pub fn ui(&self) -> ProfileUiState {
        self.active
            .as_ref()
            .and_then(|subject| self.ui.get(subject))
            .copied()
            .unwrap_or_default()
    }

    fn ui_mut(&mut self) -> Option<&mut ProfileUiState> {
        let subject = self.active.as_ref()?;
        Some(self.ui.entry(subject.clone()).or_default())
    }

    pub fn open_logout_modal(&mut self) {
        if let Some(ui) = self.ui_mut() {
            ui.logout_modal_open = true;
        }
    }

    pub fn close_logout_modal(&mut self) {
        if let Some(ui) = self.ui_mut() {
            ui.logout_modal_open = false;
        }
    }

    pub fn open_users_modal(&mut self, kind: UsersListKind) {
        if let Some(ui) = self.ui_mut() {
            ui.users_modal = Some(kind);
        }
    }

    pub fn close_users_modal(&mut self) {
        if let Some(ui) = self.ui_mut() {
            ui.users_modal = None;
        }
    }

    pub fn is_endless(&self) -> bool {
        self.active
            .as_deref()
            .map(|subject| self.pagination.is_endless(subject))
            .unwrap_or(false)
    }

    pub fn shows_load_more(&self, state: &PaginationState) -> bool {
        self.active
            .as_deref()
            .map(|subject| self.pagination.shows_load_more(subject, state))
            .unwrap_or(false)
    }

    /// Cap on rendered posts; None once endless scrolling is on
    pub fn visible_post_limit(&self) -> Option<usize> {
        if self.is_endless() {
            None
        } else {
            Some(self.preview_post_count)
        }
    }

    pub fn load_more(&mut self, state: &PaginationState) -> Option<u32> {
        let subject = self.active.clone()?;
        self.pagination.on_load_more_requested(&subject, state)
    }

    /// Whether a scroll event would dispatch a fetch for the active subject
    pub fn wants_scroll_fetch(&self, metrics: &ScrollMetrics, state: &PaginationState) -> bool {
        self.active.is_some() && self.pagination.scroll_target(metrics, state).is_some()
    }

    pub fn on_scroll(&mut self, metrics: &ScrollMetrics, state: &PaginationState) -> Option<u32> {
        if self.active.is_none() {
            return None;
        }
        self.pagination.on_scroll(metrics, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::pagination::tests::{RecordingDispatcher, Request};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct CountingBinding {
        subscribes: Rc<RefCell<u32>>,
        unsubscribes: Rc<RefCell<u32>>,
    }

    impl ScrollBinding for CountingBinding {
        fn subscribe(&mut self) {
            *self.subscribes.borrow_mut() += 1;
        }

        fn unsubscribe(&mut self) {
            *self.unsubscribes.borrow_mut() += 1;
        }
    }

    type TestCoordinator = ProfileViewCoordinator<RecordingDispatcher, CountingBinding>;

    fn coordinator() -> (TestCoordinator, RecordingDispatcher, CountingBinding) {
        let dispatcher = RecordingDispatcher::default();
        let binding = CountingBinding::default();
        let coordinator = ProfileViewCoordinator::new(
            dispatcher.clone(),
            binding.clone(),
            ScrollThreshold::default(),
            9,
        );
        (coordinator, dispatcher, binding)
    }

    fn loaded(current: u32, total: u32, revision: u64) -> PaginationState {
        PaginationState {
            current_page: Some(current),
            total_pages: Some(total),
            next_page: if current < total { Some(current + 1) } else { None },
            revision,
            ..PaginationState::default()
        }
    }

    fn profile(id: &str, username: &str) -> PublicProfile {
        PublicProfile {
            id: id.to_string(),
            username: username.to_string(),
            avatar_url: None,
            posts_count: 12,
            followers_count: 3,
            following_count: 4,
        }
    }

    #[test]
    fn test_activation_fetches_and_subscribes() {
        let (mut view, dispatcher, binding) = coordinator();
        view.activate("alice");

        assert_eq!(
            dispatcher.take(),
            vec![Request::Profile("alice".to_string()), Request::Posts("alice".to_string(), 1)]
        );
        assert_eq!(*binding.subscribes.borrow(), 1);
        assert!(view.is_subscribed());
        assert_eq!(view.visible_post_limit(), Some(9));
    }

    #[test]
    fn test_subject_change_resets_ui_and_refetches() {
        let (mut view, dispatcher, binding) = coordinator();
        view.activate("alice");
        view.open_logout_modal();
        view.open_users_modal(UsersListKind::Followers);
        view.load_more(&loaded(1, 4, 2));
        assert!(view.is_endless());
        assert_eq!(view.visible_post_limit(), None);
        dispatcher.take();

        view.on_subject_changed("bob");

        assert_eq!(view.ui(), ProfileUiState::default());
        assert!(!view.is_endless());
        assert_eq!(view.visible_post_limit(), Some(9));
        assert_eq!(
            dispatcher.take(),
            vec![Request::Profile("bob".to_string()), Request::Posts("bob".to_string(), 1)]
        );
        // Still the one listener from activation
        assert_eq!(*binding.subscribes.borrow(), 1);

        // Scrolling for bob with alice's pagination progress fetches nothing
        let metrics = ScrollMetrics { scroll_top: 1000.0, scroll_height: 2000.0, inner_height: 800.0 };
        assert_eq!(view.on_scroll(&metrics, &loaded(2, 4, 4)), None);
        assert!(dispatcher.take().is_empty());
    }

    #[test]
    fn test_same_subject_is_not_refetched() {
        let (mut view, dispatcher, _) = coordinator();
        view.on_subject_changed("alice");
        view.open_logout_modal();
        dispatcher.take();

        view.on_subject_changed("alice");

        assert!(dispatcher.take().is_empty());
        assert!(view.ui().logout_modal_open);
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let (mut view, _, binding) = coordinator();
        view.deactivate();
        assert_eq!(*binding.unsubscribes.borrow(), 0);

        view.activate("alice");
        view.deactivate();
        view.deactivate();
        assert_eq!(*binding.unsubscribes.borrow(), 1);
        assert!(!view.is_subscribed());
        assert_eq!(view.active_subject(), None);
    }

    #[test]
    fn test_scroll_after_deactivate_is_ignored() {
        let (mut view, dispatcher, _) = coordinator();
        view.activate("alice");
        view.load_more(&loaded(1, 4, 2));
        view.deactivate();
        dispatcher.take();

        let metrics = ScrollMetrics { scroll_top: 1000.0, scroll_height: 2000.0, inner_height: 800.0 };
        assert!(!view.wants_scroll_fetch(&metrics, &loaded(2, 4, 4)));
        assert_eq!(view.on_scroll(&metrics, &loaded(2, 4, 4)), None);
        assert!(dispatcher.take().is_empty());
    }

    #[test]
    fn test_scroll_fetch_check_agrees_with_dispatch() {
        let (mut view, dispatcher, _) = coordinator();
        view.activate("alice");
        view.load_more(&loaded(1, 4, 2));
        dispatcher.take();

        let near = ScrollMetrics { scroll_top: 1000.0, scroll_height: 2000.0, inner_height: 800.0 };
        let far = ScrollMetrics { scroll_top: 0.0, scroll_height: 9000.0, inner_height: 800.0 };
        let idle = loaded(2, 4, 4);

        assert!(!view.wants_scroll_fetch(&far, &idle));
        assert!(view.wants_scroll_fetch(&near, &idle));
        assert!(dispatcher.take().is_empty());

        assert_eq!(view.on_scroll(&near, &idle), Some(3));
        // Already requested at this revision
        assert!(!view.wants_scroll_fetch(&near, &idle));
        assert!(view.wants_scroll_fetch(&near, &loaded(3, 4, 6)));
    }

    #[test]
    fn test_modal_toggles() {
        let (mut view, _, _) = coordinator();
        view.open_logout_modal();
        assert!(!view.ui().logout_modal_open, "no subject, nothing to open");

        view.activate("alice");
        view.open_users_modal(UsersListKind::Following);
        assert_eq!(view.ui().users_modal, Some(UsersListKind::Following));
        view.close_users_modal();
        view.open_logout_modal();
        assert_eq!(view.ui(), ProfileUiState { logout_modal_open: true, users_modal: None });
        view.close_logout_modal();
        assert_eq!(view.ui(), ProfileUiState::default());
    }

    #[test]
    fn test_projection_for_own_profile() {
        let projection = ProfileProjection::project("alice", &profile("1", "alice"), Some("alice"), &HashSet::new());
        assert!(projection.is_own_profile);
        assert_eq!(projection.action, ProfileAction::EditProfile);
        assert_eq!(projection.post_count, 12);
        assert_eq!(projection.follower_count, 3);
        assert_eq!(projection.following_count, 4);
    }

    #[test]
    fn test_projection_follow_relationship() {
        let following: HashSet<String> = ["2".to_string()].into_iter().collect();

        let followed = ProfileProjection::project("bob", &profile("2", "bob"), Some("alice"), &following);
        assert!(followed.is_following);
        assert_eq!(followed.action, ProfileAction::Unfollow);

        let stranger = ProfileProjection::project("carol", &profile("3", "carol"), Some("alice"), &following);
        assert!(!stranger.is_following);
        assert_eq!(stranger.action, ProfileAction::Follow);

        let anonymous = ProfileProjection::project("bob", &profile("2", "bob"), None, &HashSet::new());
        assert!(!anonymous.is_own_profile);
        assert_eq!(anonymous.action, ProfileAction::None);
    }
}
