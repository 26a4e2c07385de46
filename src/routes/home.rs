use dioxus::prelude::*;

use crate::components::icons::CameraIcon;
use crate::components::{Avatar, FacebookLoginButton};
use crate::routes::Route;
use crate::stores::auth_store;

#[component]
pub fn Home() -> Element {
    let auth = auth_store::AUTH_STATE.read();

    rsx! {
        div {
            class: "flex justify-center px-4 py-16",
            div {
                class: "w-full max-w-sm bg-card border border-border rounded-xl p-8 flex flex-col items-center gap-6",

                div {
                    class: "flex items-center gap-2 text-3xl font-bold",
                    CameraIcon { class: "w-8 h-8" }
                    span { "photogram" }
                }

                match auth.user.as_ref() {
                    Some(user) if auth.is_authenticated => rsx! {
                        div {
                            class: "flex flex-col items-center gap-3",
                            Avatar { url: user.avatar_url.clone(), size: "w-16 h-16" }
                            p { class: "text-muted-foreground", "Signed in as {user.username}" }
                            Link {
                                to: Route::Profile { username: user.username.clone() },
                                class: "px-4 py-2 bg-blue-500 hover:bg-blue-600 text-white font-semibold rounded-lg transition",
                                "Go to your profile"
                            }
                        }
                    },
                    _ => rsx! {
                        p {
                            class: "text-center text-muted-foreground",
                            "Sign in to see photos from the people you follow."
                        }
                        FacebookLoginButton {}
                    },
                }
            }
        }
    }
}
