use dioxus::prelude::*;

use crate::components::icons::{AlertTriangleIcon, XIcon};
use crate::stores::notices::{self, NOTICES};

/// Stack of dismissible failure notices, pinned to the bottom of the screen
#[component]
pub fn NoticeBanner() -> Element {
    let active = NOTICES.read().notices().to_vec();

    if active.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "fixed bottom-4 left-1/2 -translate-x-1/2 z-[60] flex flex-col gap-2 w-full max-w-md px-4",
            role: "alert",
            aria_live: "assertive",
            for notice in active {
                div {
                    key: "{notice.id}",
                    class: "flex items-start gap-3 p-3 rounded-lg border border-red-500/30 bg-card shadow-lg text-sm",
                    AlertTriangleIcon { class: "w-5 h-5 text-red-500 flex-shrink-0" }
                    span { class: "flex-1", "{notice.message}" }
                    button {
                        class: "p-0.5 rounded hover:bg-accent transition",
                        aria_label: "Dismiss",
                        onclick: move |_| notices::dismiss(notice.id),
                        XIcon { class: "w-4 h-4" }
                    }
                }
            }
        }
    }
}
