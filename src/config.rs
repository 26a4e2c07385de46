//! Application configuration
//!
//! Defaults are compiled in; a JSON object stored under
//! [`STORAGE_KEY_CONFIG`] in LocalStorage overrides individual fields, which
//! makes it possible to point a deployed build at a staging API from the
//! browser console.

use dioxus::prelude::*;
use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

use crate::controllers::pagination::ScrollThreshold;
use crate::controllers::readiness::PollConfig;

const STORAGE_KEY_CONFIG: &str = "photogram_config";

const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Runtime configuration for the client
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the photogram REST API (no trailing slash)
    pub api_base_url: String,
    /// Facebook application id used when injecting the SDK
    pub facebook_app_id: String,
    /// Graph API version passed to the SDK loader
    pub facebook_api_version: String,
    /// Delay between SDK readiness probes
    pub sdk_poll_interval_ms: u32,
    /// Give up waiting for the SDK after this many probes (None = forever)
    pub sdk_max_poll_attempts: Option<u32>,
    /// Viewports of remaining scroll that always count as "near the bottom"
    pub near_bottom_base_viewports: f64,
    /// Extra viewports of look-ahead on top of the base
    pub near_bottom_extra_viewports: f64,
    /// Posts shown on a profile before endless scrolling is switched on
    pub preview_post_count: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("PHOTOGRAM_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            facebook_app_id: option_env!("PHOTOGRAM_FACEBOOK_APP_ID")
                .unwrap_or("")
                .to_string(),
            facebook_api_version: "v2.8".to_string(),
            sdk_poll_interval_ms: PollConfig::DEFAULT_INTERVAL_MS,
            sdk_max_poll_attempts: Some(PollConfig::DEFAULT_MAX_ATTEMPTS),
            near_bottom_base_viewports: ScrollThreshold::DEFAULT_BASE_VIEWPORTS,
            near_bottom_extra_viewports: ScrollThreshold::DEFAULT_EXTRA_VIEWPORTS,
            preview_post_count: 9,
        }
    }
}

impl AppConfig {
    /// Poller settings derived from this config
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval_ms: self.sdk_poll_interval_ms,
            max_attempts: self.sdk_max_poll_attempts,
        }
    }

    /// Near-bottom detection settings derived from this config
    pub fn scroll_threshold(&self) -> ScrollThreshold {
        ScrollThreshold {
            base_viewports: self.near_bottom_base_viewports,
            extra_viewports: self.near_bottom_extra_viewports,
        }
    }

    /// Reject settings the client cannot work with
    pub fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.api_base_url)
            .map_err(|e| format!("Invalid API URL '{}': {}", self.api_base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("API URL must be http(s), got '{}'", url.scheme()));
        }
        if self.sdk_poll_interval_ms == 0 && self.sdk_max_poll_attempts.is_none() {
            return Err("Polling with no interval needs a max attempt count".to_string());
        }
        Ok(())
    }

    /// Join a path onto the API base URL
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Global configuration, loaded once on first read
pub static CONFIG: GlobalSignal<AppConfig> = Signal::global(load);

/// Load the configuration, applying any LocalStorage override
pub fn load() -> AppConfig {
    match LocalStorage::get::<AppConfig>(STORAGE_KEY_CONFIG) {
        Ok(config) => match config.validate() {
            Ok(()) => {
                log::info!("Using configuration override from LocalStorage");
                config
            }
            Err(e) => {
                log::warn!("Ignoring configuration override: {}", e);
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

/// Snapshot of the current configuration
pub fn current() -> AppConfig {
    CONFIG.read().clone()
}
