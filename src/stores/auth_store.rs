use dioxus::prelude::*;
use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::controllers::handshake::{SessionCandidate, SessionSink};
use crate::services::api::{self, SessionUser};
use crate::stores::notices::{self, NoticeKind};
use crate::stores::profiles;

/// Authentication state
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    #[serde(skip)]
    pub is_establishing: bool,
}

/// Global authentication state
pub static AUTH_STATE: GlobalSignal<AuthState> = Signal::global(AuthState::default);

/// Ids of the accounts the signed-in user follows
pub static FOLLOWING_IDS: GlobalSignal<HashSet<String>> = Signal::global(HashSet::new);

const STORAGE_KEY_TOKEN: &str = "photogram_token";
const STORAGE_KEY_USER: &str = "photogram_user";

/// Restore a previous session from LocalStorage
pub fn init_auth() {
    log::info!("Initializing authentication...");

    let token = LocalStorage::get::<String>(STORAGE_KEY_TOKEN).ok();
    let user = LocalStorage::get::<SessionUser>(STORAGE_KEY_USER).ok();

    match (token, user) {
        (Some(token), Some(user)) => {
            log::info!("Restored session for {}", user.username);
            apply_session(token, user);
        }
        _ => log::debug!("No stored session"),
    }
}

fn apply_session(token: String, user: SessionUser) {
    *FOLLOWING_IDS.write() = user.following_ids.iter().cloned().collect();
    *AUTH_STATE.write() = AuthState {
        user: Some(user),
        token: Some(token),
        is_authenticated: true,
        is_establishing: false,
    };
}

/// Exchange a login candidate for a photogram session and persist it
pub async fn establish_session(candidate: SessionCandidate) -> Result<(), String> {
    log::info!("Establishing session for Facebook user {}", candidate.external_id);
    AUTH_STATE.write().is_establishing = true;

    let response = match api::login_with_facebook(&candidate).await {
        Ok(response) => response,
        Err(e) => {
            AUTH_STATE.write().is_establishing = false;
            return Err(format!("Sign-in failed: {}", e));
        }
    };

    LocalStorage::set(STORAGE_KEY_TOKEN, &response.token).ok();
    LocalStorage::set(STORAGE_KEY_USER, &response.user).ok();

    log::info!("Signed in as {}", response.user.username);
    apply_session(response.token, response.user);
    Ok(())
}

/// Session sink that hands candidates to [`establish_session`]
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthSessionSink;

impl SessionSink for AuthSessionSink {
    fn establish(&self, candidate: SessionCandidate) {
        spawn(async move {
            if let Err(e) = establish_session(candidate).await {
                notices::report(NoticeKind::Login, e);
            }
        });
    }
}

/// Sign out and clear stored credentials
pub fn sign_out() {
    log::info!("Signing out...");
    *AUTH_STATE.write() = AuthState::default();
    FOLLOWING_IDS.write().clear();
    LocalStorage::delete(STORAGE_KEY_TOKEN);
    LocalStorage::delete(STORAGE_KEY_USER);
}

/// Username of the signed-in user
pub fn get_username() -> Option<String> {
    AUTH_STATE.read().user.as_ref().map(|user| user.username.clone())
}

pub fn is_authenticated() -> bool {
    AUTH_STATE.read().is_authenticated
}

/// Follow or unfollow a user, then update the local relationship state
pub async fn set_following(user_id: String, username: String, follow: bool) -> Result<(), String> {
    let token = AUTH_STATE.read().token.clone().ok_or("Not logged in")?;

    api::set_following(&token, &user_id, follow)
        .await
        .map_err(|e| format!("Failed to {} {}: {}", if follow { "follow" } else { "unfollow" }, username, e))?;

    let changed = if follow {
        FOLLOWING_IDS.write().insert(user_id)
    } else {
        FOLLOWING_IDS.write().remove(&user_id)
    };
    if changed {
        profiles::adjust_followers(&username, if follow { 1 } else { -1 });
    }
    Ok(())
}
