//! Identity-provider login handshake
//!
//! Drives the two round trips of a Facebook login: ask the SDK for the current
//! login status, and when the status policy says the visitor is signed in,
//! read their basic profile fields and hand a [`SessionCandidate`] to the
//! session store.

use std::cell::Cell;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Graph API path requested on a successful status check
pub const PROFILE_FIELDS_PATH: &str = "/me?fields=id,name,email,permissions";

/// Normalized identity produced by a successful external login
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCandidate {
    pub external_id: String,
    pub display_name: String,
    pub email: Option<String>,
}

/// Access token details attached to a `connected` status
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(rename = "userID", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Response of `FB.getLoginStatus`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatusResponse {
    pub status: String,
    #[serde(default)]
    pub auth_response: Option<AuthResponse>,
}

/// Error object the Graph API returns in place of data
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphApiError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
}

/// Response of `FB.api('/me?fields=...')`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub permissions: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<GraphApiError>,
}

/// Ways a login attempt can end without producing a session
#[derive(Debug, Clone, PartialEq)]
pub enum HandshakeError {
    /// The SDK global is not (or no longer) present
    NotReady,
    /// A previous attempt has not finished yet
    AlreadyInProgress,
    /// The status policy rejected this status
    NotAuthenticated(String),
    /// The SDK call itself failed
    Sdk(String),
    /// The SDK answered with something we could not decode
    MalformedResponse(String),
    /// The profile response lacked a required field
    IncompleteProfile(&'static str),
}

impl fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HandshakeError::NotReady => write!(f, "Facebook SDK is not loaded yet"),
            HandshakeError::AlreadyInProgress => write!(f, "A login attempt is already in progress"),
            HandshakeError::NotAuthenticated(status) => {
                write!(f, "Not logged in to Facebook (status: {})", status)
            }
            HandshakeError::Sdk(e) => write!(f, "Facebook SDK error: {}", e),
            HandshakeError::MalformedResponse(e) => write!(f, "Unexpected Facebook response: {}", e),
            HandshakeError::IncompleteProfile(field) => {
                write!(f, "Facebook profile is missing the '{}' field", field)
            }
        }
    }
}

impl std::error::Error for HandshakeError {}

/// Surface of the identity SDK the handshake needs
#[async_trait(?Send)]
pub trait IdentitySdk {
    /// Readiness probe
    fn is_loaded(&self) -> bool;

    /// Current login status (one round trip)
    async fn get_login_status(&self) -> Result<LoginStatusResponse, HandshakeError>;

    /// Graph API read
    async fn api(&self, path: &str) -> Result<serde_json::Value, HandshakeError>;
}

/// Decides which login statuses count as an authenticated session
pub trait StatusPolicy {
    fn is_authenticated(&self, status: &LoginStatusResponse) -> bool;
}

/// Facebook's convention: only `connected` means signed in and authorized
#[derive(Clone, Copy, Debug, Default)]
pub struct ConnectedStatusPolicy;

impl StatusPolicy for ConnectedStatusPolicy {
    fn is_authenticated(&self, status: &LoginStatusResponse) -> bool {
        status.status == "connected"
    }
}

/// Receives candidates and establishes the process-wide session
pub trait SessionSink {
    fn establish(&self, candidate: SessionCandidate);
}

/// Login flow over an identity SDK
pub struct HandshakeController<S, P, K> {
    sdk: S,
    policy: P,
    sink: K,
    in_progress: Cell<bool>,
}

impl<S, P, K> HandshakeController<S, P, K>
where
    S: IdentitySdk,
    P: StatusPolicy,
    K: SessionSink,
{
    pub fn new(sdk: S, policy: P, sink: K) -> Self {
        Self {
            sdk,
            policy,
            sink,
            in_progress: Cell::new(false),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.get()
    }

    /// Run the status check and, if authenticated, the profile read.
    ///
    /// On success the candidate has already been dispatched to the session
    /// sink; it is returned as well so callers can log or display it.
    pub async fn attempt_login(&self) -> Result<SessionCandidate, HandshakeError> {
        if !self.sdk.is_loaded() {
            return Err(HandshakeError::NotReady);
        }
        if self.in_progress.replace(true) {
            return Err(HandshakeError::AlreadyInProgress);
        }

        let result = {
            let _guard = InProgressGuard(&self.in_progress);
            self.run_handshake().await
        };

        match &result {
            Ok(candidate) => log::info!("Facebook login succeeded for {}", candidate.display_name),
            Err(e) => log::warn!("Facebook login did not complete: {}", e),
        }
        result
    }

    async fn run_handshake(&self) -> Result<SessionCandidate, HandshakeError> {
        let status = self.sdk.get_login_status().await?;
        log::debug!("Facebook login status: {}", status.status);

        if !self.policy.is_authenticated(&status) {
            return Err(HandshakeError::NotAuthenticated(status.status));
        }

        let response = self.sdk.api(PROFILE_FIELDS_PATH).await?;
        let raw: RawProfile = serde_json::from_value(response)
            .map_err(|e| HandshakeError::MalformedResponse(e.to_string()))?;

        self.on_external_login_success(raw)
    }

    /// Map the Graph API profile into a candidate and dispatch it
    pub fn on_external_login_success(&self, raw: RawProfile) -> Result<SessionCandidate, HandshakeError> {
        let candidate = candidate_from_profile(raw)?;
        self.sink.establish(candidate.clone());
        Ok(candidate)
    }
}

/// Clears the in-progress flag even if the attempt future is dropped
struct InProgressGuard<'a>(&'a Cell<bool>);

impl Drop for InProgressGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Pure mapping from the Graph API profile to a [`SessionCandidate`]
pub fn candidate_from_profile(raw: RawProfile) -> Result<SessionCandidate, HandshakeError> {
    if let Some(error) = raw.error {
        return Err(HandshakeError::Sdk(error.message));
    }

    let external_id = raw
        .id
        .filter(|id| !id.is_empty())
        .ok_or(HandshakeError::IncompleteProfile("id"))?;
    let display_name = raw
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or(HandshakeError::IncompleteProfile("name"))?;
    let email = raw.email.filter(|email| !email.is_empty());

    Ok(SessionCandidate {
        external_id,
        display_name,
        email,
    })
}
