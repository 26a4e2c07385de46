use dioxus::prelude::*;

use crate::stores::auth_store;
use crate::stores::notices::{self, NoticeKind};

#[component]
pub fn FollowButton(user_id: String, username: String, is_following: bool) -> Element {
    let mut pending = use_signal(|| false);

    let (label, class) = if is_following {
        ("Following", "bg-muted text-foreground hover:bg-muted/80")
    } else {
        ("Follow", "bg-blue-500 text-white hover:bg-blue-600")
    };

    rsx! {
        button {
            class: "px-4 py-1.5 rounded-lg text-sm font-semibold transition disabled:opacity-50 {class}",
            disabled: pending(),
            onclick: move |_| {
                let user_id = user_id.clone();
                let username = username.clone();
                spawn(async move {
                    pending.set(true);
                    if let Err(e) = auth_store::set_following(user_id, username, !is_following).await {
                        notices::report(NoticeKind::Action, e);
                    }
                    pending.set(false);
                });
            },
            "{label}"
        }
    }
}
