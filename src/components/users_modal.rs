use dioxus::prelude::*;

use crate::components::icons::XIcon;
use crate::components::Avatar;
use crate::controllers::profile_view::UsersListKind;
use crate::routes::Route;
use crate::services::api;
use crate::stores::notices::{self, NoticeKind};

/// Followers / following list for a profile
#[component]
pub fn UsersModal(username: String, kind: UsersListKind, on_close: EventHandler<()>) -> Element {
    let users = use_resource(move || {
        let username = username.clone();
        async move {
            let result = api::fetch_users(&username, kind).await;
            if let Err(e) = &result {
                notices::report(
                    NoticeKind::Fetch,
                    format!("Could not load {} for {}: {}", kind.as_path(), username, e),
                );
            }
            result
        }
    });

    let title = kind.title();

    rsx! {
        // Overlay - clicking outside closes
        div {
            class: "fixed inset-0 bg-black/50 z-50 flex items-center justify-center p-4",
            onclick: move |_| on_close.call(()),

            div {
                class: "bg-card border border-border rounded-xl max-w-sm w-full max-h-[70vh] flex flex-col shadow-xl",
                role: "dialog",
                aria_modal: "true",
                aria_labelledby: "users-modal-title",
                onclick: move |e| e.stop_propagation(),

                div {
                    class: "flex items-center justify-between px-4 py-3 border-b border-border",
                    h2 {
                        class: "font-bold",
                        id: "users-modal-title",
                        "{title}"
                    }
                    button {
                        class: "p-1 rounded-full hover:bg-accent transition",
                        aria_label: "Close",
                        onclick: move |_| on_close.call(()),
                        XIcon { class: "w-5 h-5" }
                    }
                }

                div {
                    class: "overflow-y-auto",
                    match users.read_unchecked().as_ref() {
                        None => rsx! {
                            div {
                                class: "p-4 space-y-3 animate-pulse",
                                for _ in 0..4 {
                                    div {
                                        class: "flex items-center gap-3",
                                        div { class: "w-10 h-10 rounded-full bg-muted" }
                                        div { class: "h-4 w-32 bg-muted rounded" }
                                    }
                                }
                            }
                        },
                        Some(Err(e)) => rsx! {
                            p {
                                class: "p-4 text-sm text-red-500",
                                "Unable to load {title}: {e}"
                            }
                        },
                        Some(Ok(list)) if list.is_empty() => rsx! {
                            p {
                                class: "p-4 text-sm text-muted-foreground",
                                "Nobody here yet"
                            }
                        },
                        Some(Ok(list)) => rsx! {
                            ul {
                                for user in list.iter().cloned() {
                                    li {
                                        key: "{user.id}",
                                        Link {
                                            to: Route::Profile { username: user.username.clone() },
                                            class: "flex items-center gap-3 px-4 py-2 hover:bg-accent transition",
                                            onclick: move |_| on_close.call(()),
                                            Avatar { url: user.avatar_url.clone(), size: "w-10 h-10" }
                                            span { class: "font-semibold", "{user.username}" }
                                        }
                                    }
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}
