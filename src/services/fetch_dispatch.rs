//! Fetch dispatcher backed by the global stores
//!
//! Requests are fire-and-forget: the dispatcher records the start of a posts
//! request in the pagination book synchronously, spawns the HTTP call, and
//! feeds the outcome back through the reducer. A completion the reducer
//! rejects as stale never reaches the posts store.

use dioxus::prelude::*;

use crate::controllers::pagination::FetchDispatcher;
use crate::services::api;
use crate::stores::notices::{self, NoticeKind};
use crate::stores::pagination::{PaginationEvent, PAGINATION};
use crate::stores::posts::POSTS;
use crate::stores::profiles;

#[derive(Clone, Copy, Debug, Default)]
pub struct StoreFetchDispatcher;

impl FetchDispatcher for StoreFetchDispatcher {
    fn fetch_profile(&self, subject: &str) {
        let username = subject.to_string();
        profiles::mark_loading(&username);

        spawn(async move {
            let result = api::fetch_public_profile(&username)
                .await
                .map_err(|e| e.to_string());
            profiles::store_profile_result(&username, result);
        });
    }

    fn fetch_posts(&self, subject: &str, page: u32) {
        let username = subject.to_string();
        let request_id = PAGINATION.write().begin_fetch(&username, page);
        log::debug!("Fetching posts page {} for {} (request {})", page, username, request_id);

        spawn(async move {
            match api::fetch_posts(&username, page).await {
                Ok(response) => {
                    let applied = PAGINATION.write().apply(PaginationEvent::FetchSucceeded {
                        subject: username.clone(),
                        request_id,
                        page: response.pagination,
                    });
                    if applied {
                        POSTS.write().merge_page(&username, page, response.posts);
                    }
                }
                Err(e) => {
                    let applied = PAGINATION.write().apply(PaginationEvent::FetchFailed {
                        subject: username.clone(),
                        request_id,
                        error: e.to_string(),
                    });
                    if applied {
                        notices::report(
                            NoticeKind::Fetch,
                            format!("Could not load posts for {}: {}", username, e),
                        );
                    }
                }
            }
        });
    }
}
