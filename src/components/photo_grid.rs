use chrono::Utc;
use dioxus::prelude::*;

use crate::components::icons::{HeartIcon, MessageCircleIcon};
use crate::stores::posts::Post;
use crate::utils::{format_count_compact, format_relative_time};

/// Three-column grid of post thumbnails
#[component]
pub fn PhotoGrid(posts: Vec<Post>) -> Element {
    if posts.is_empty() {
        return rsx! {
            div {
                class: "py-16 text-center text-muted-foreground",
                "No posts yet"
            }
        };
    }

    let now = Utc::now();

    rsx! {
        div {
            class: "grid grid-cols-3 gap-1 md:gap-6",
            for post in posts {
                PhotoTile {
                    key: "{post.id}",
                    posted: post.created_at.map(|at| format_relative_time(at, now)),
                    post: post.clone(),
                }
            }
        }
    }
}

#[component]
fn PhotoTile(post: Post, posted: Option<String>) -> Element {
    let alt = post.caption.clone().unwrap_or_default();
    let likes = format_count_compact(post.likes_count);
    let comments = format_count_compact(post.comments_count);

    rsx! {
        div {
            class: "relative aspect-square group overflow-hidden bg-muted",
            title: posted.unwrap_or_default(),
            img {
                src: "{post.image_url}",
                alt: "{alt}",
                class: "w-full h-full object-cover",
                loading: "lazy",
            }
            // Hover overlay
            div {
                class: "absolute inset-0 bg-black/40 opacity-0 group-hover:opacity-100 transition flex items-center justify-center gap-6 text-white font-semibold",
                span {
                    class: "flex items-center gap-1",
                    HeartIcon { class: "w-5 h-5", filled: true }
                    "{likes}"
                }
                span {
                    class: "flex items-center gap-1",
                    MessageCircleIcon { class: "w-5 h-5", filled: true }
                    "{comments}"
                }
            }
        }
    }
}
