use dioxus::prelude::*;

use crate::components::icons::UserIcon;

/// Round profile picture with a placeholder when the user has none
#[component]
pub fn Avatar(url: Option<String>, #[props(default = "w-10 h-10".to_string())] size: String) -> Element {
    match url.filter(|url| !url.is_empty()) {
        Some(url) => rsx! {
            img {
                src: "{url}",
                alt: "Profile picture",
                class: "{size} rounded-full object-cover bg-muted flex-shrink-0",
                loading: "lazy",
            }
        },
        None => rsx! {
            div {
                class: "{size} rounded-full bg-muted text-muted-foreground flex items-center justify-center flex-shrink-0",
                UserIcon { class: "w-1/2 h-1/2" }
            }
        },
    }
}
