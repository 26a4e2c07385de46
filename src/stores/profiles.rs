use dioxus::prelude::*;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::stores::notices::{self, NoticeKind};
use crate::utils::DataState;

/// Public profile as served by `GET /users/{username}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub posts_count: u64,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
}

/// Profiles kept per session; older entries are evicted
const PROFILE_CACHE_CAPACITY: usize = 200;

/// Load state of every profile viewed recently (username -> state)
pub static PROFILES: GlobalSignal<LruCache<String, DataState<PublicProfile>>> = Signal::global(|| {
    LruCache::new(NonZeroUsize::new(PROFILE_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN))
});

/// Current load state for a username
pub fn get_profile_state(username: &str) -> DataState<PublicProfile> {
    PROFILES.read().peek(username).cloned().unwrap_or_default()
}

/// Mark a username as loading. A cached profile stays visible while it
/// is refreshed.
pub fn mark_loading(username: &str) {
    let mut cache = PROFILES.write();
    let has_data = cache.peek(username).map(|state| state.is_loaded()).unwrap_or(false);
    if !has_data {
        cache.put(username.to_string(), DataState::Loading);
    }
}

/// Store the outcome of a profile fetch
pub fn store_profile_result(username: &str, result: Result<PublicProfile, String>) {
    let mut cache = PROFILES.write();
    if let Err(e) = &result {
        log::error!("Failed to fetch profile {}: {}", username, e);
        // The page only shows the error when nothing is cached
        if cache.peek(username).map(|state| state.is_loaded()).unwrap_or(false) {
            notices::report(NoticeKind::Fetch, format!("Could not refresh {}: {}", username, e));
        }
    }
    let next = resolve_fetch(cache.peek(username), result);
    cache.put(username.to_string(), next);
}

/// State after a fetch completes. A failed refresh keeps a loaded profile.
fn resolve_fetch(
    previous: Option<&DataState<PublicProfile>>,
    result: Result<PublicProfile, String>,
) -> DataState<PublicProfile> {
    match (previous, result) {
        (Some(DataState::Loaded(cached)), Err(_)) => DataState::Loaded(cached.clone()),
        (_, result) => DataState::from(result),
    }
}

/// Apply a follower count change after a follow/unfollow succeeds
pub fn adjust_followers(username: &str, delta: i64) {
    let mut cache = PROFILES.write();
    if let Some(DataState::Loaded(profile)) = cache.get_mut(username) {
        profile.followers_count = profile.followers_count.saturating_add_signed(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_parses_with_missing_counts() {
        let profile: PublicProfile = serde_json::from_str(r#"{"id": "1", "username": "alice"}"#).unwrap();
        assert_eq!(profile.posts_count, 0);
        assert_eq!(profile.avatar_url, None);

        let profile: PublicProfile = serde_json::from_str(
            r#"{"id": "1", "username": "alice", "avatarUrl": "a.jpg", "postsCount": 4, "followersCount": 10, "followingCount": 2}"#,
        )
        .unwrap();
        assert_eq!(profile.followers_count, 10);
        assert_eq!(profile.avatar_url.as_deref(), Some("a.jpg"));
    }

    fn alice(followers: u64) -> PublicProfile {
        PublicProfile {
            id: "1".to_string(),
            username: "alice".to_string(),
            avatar_url: None,
            posts_count: 0,
            followers_count: followers,
            following_count: 0,
        }
    }

    #[test]
    fn test_failed_refresh_keeps_cached_profile() {
        let cached = DataState::Loaded(alice(10));
        let next = resolve_fetch(Some(&cached), Err("503".to_string()));
        assert_eq!(next.data(), Some(&alice(10)));

        let refreshed = resolve_fetch(Some(&cached), Ok(alice(11)));
        assert_eq!(refreshed.data(), Some(&alice(11)));
    }

    #[test]
    fn test_failed_first_load_is_an_error() {
        assert!(resolve_fetch(None, Err("404".to_string())).error().is_some());
        assert!(resolve_fetch(Some(&DataState::Loading), Err("404".to_string())).error().is_some());
    }
}
