use dioxus::prelude::*;

/// Placeholder shown while a profile is loading
/// Mirrors the header and grid layout so the page doesn't jump
#[component]
pub fn ProfileSkeleton() -> Element {
    rsx! {
        div {
            class: "animate-pulse",
            role: "status",
            aria_live: "polite",
            aria_busy: "true",

            span {
                class: "sr-only",
                "Loading..."
            }

            // Header: avatar + name and stats
            div {
                class: "flex items-center gap-8 md:gap-16 px-4 py-8",
                div { class: "w-20 h-20 md:w-36 md:h-36 rounded-full bg-muted flex-shrink-0" }
                div {
                    class: "flex-1 space-y-4",
                    div { class: "h-6 w-40 bg-muted rounded" }
                    div {
                        class: "flex gap-6",
                        for _ in 0..3 {
                            div { class: "h-4 w-16 bg-muted rounded" }
                        }
                    }
                }
            }

            // Grid
            div {
                class: "grid grid-cols-3 gap-1 md:gap-6",
                for _ in 0..9 {
                    div { class: "aspect-square bg-muted" }
                }
            }
        }
    }
}
