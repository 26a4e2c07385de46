use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// A photo post
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Subjects whose posts are kept; matches the pagination book
const POSTS_CAPACITY: usize = crate::stores::pagination::PAGINATION_CAPACITY;

/// Posts loaded so far for recently viewed usernames, in server order
#[derive(Clone, Debug)]
pub struct PostsBook {
    by_subject: LruCache<String, Vec<Post>>,
}

impl Default for PostsBook {
    fn default() -> Self {
        Self::with_capacity(POSTS_CAPACITY)
    }
}

impl PostsBook {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_subject: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    pub fn get(&self, subject: &str) -> &[Post] {
        self.by_subject.peek(subject).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Merge a fetched page. Page 1 replaces the list; later pages append,
    /// skipping posts already present.
    pub fn merge_page(&mut self, subject: &str, page: u32, posts: Vec<Post>) {
        if page <= 1 {
            self.by_subject.put(subject.to_string(), posts);
            return;
        }

        let list = self.by_subject.get_or_insert_mut(subject.to_string(), Vec::new);

        let known: HashSet<String> = list.iter().map(|post| post.id.clone()).collect();
        list.extend(posts.into_iter().filter(|post| !known.contains(&post.id)));
    }
}

pub static POSTS: GlobalSignal<PostsBook> = Signal::global(PostsBook::default);

/// Posts for a username, truncated to `limit` when given
pub fn get_posts(subject: &str, limit: Option<usize>) -> Vec<Post> {
    let book = POSTS.read();
    let posts = book.get(subject);
    match limit {
        Some(limit) => posts.iter().take(limit).cloned().collect(),
        None => posts.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            image_url: format!("https://img.example/{}.jpg", id),
            caption: None,
            likes_count: 0,
            comments_count: 0,
            created_at: None,
        }
    }

    #[test]
    fn test_first_page_replaces() {
        let mut book = PostsBook::default();
        book.merge_page("alice", 1, vec![post("a"), post("b")]);
        book.merge_page("alice", 1, vec![post("c")]);
        assert_eq!(book.get("alice"), &[post("c")]);
    }

    #[test]
    fn test_later_pages_append_without_duplicates() {
        let mut book = PostsBook::default();
        book.merge_page("alice", 1, vec![post("a"), post("b")]);
        book.merge_page("alice", 2, vec![post("b"), post("c")]);
        let ids: Vec<&str> = book.get("alice").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(book.get("bob").is_empty());
    }

    #[test]
    fn test_least_recent_subject_is_evicted() {
        let mut book = PostsBook::with_capacity(2);
        book.merge_page("alice", 1, vec![post("a")]);
        book.merge_page("bob", 1, vec![post("b")]);
        book.merge_page("alice", 2, vec![post("c")]);
        book.merge_page("carol", 1, vec![post("d")]);

        assert!(book.get("bob").is_empty());
        assert_eq!(book.get("alice").len(), 2);
        assert_eq!(book.get("carol"), &[post("d")]);
    }
}
