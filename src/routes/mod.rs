use dioxus::prelude::*;

pub mod home;
pub mod profile;

use home::Home;
use profile::Profile;

use crate::components::icons::{CameraIcon, HomeIcon, UserIcon};
use crate::components::NoticeBanner;
use crate::stores::auth_store;

/// App routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/")]
        Home {},

        #[route("/:username")]
        Profile { username: String },
}

#[component]
fn Layout() -> Element {
    let viewer = auth_store::get_username();

    rsx! {
        div {
            class: "min-h-screen bg-background text-foreground transition-colors",

            // Top bar
            header {
                class: "sticky top-0 z-40 bg-background/95 backdrop-blur border-b border-border",
                div {
                    class: "max-w-4xl mx-auto flex items-center justify-between px-4 h-14",
                    Link {
                        to: Route::Home {},
                        class: "flex items-center gap-2 font-bold text-xl hover:opacity-80 transition",
                        CameraIcon { class: "w-6 h-6" }
                        span { "photogram" }
                    }
                    nav {
                        class: "flex items-center gap-4",
                        Link {
                            to: Route::Home {},
                            class: "p-1 rounded-full hover:bg-accent transition",
                            aria_label: "Home",
                            HomeIcon { class: "w-6 h-6" }
                        }
                        if let Some(username) = viewer {
                            Link {
                                to: Route::Profile { username },
                                class: "p-1 rounded-full hover:bg-accent transition",
                                aria_label: "Your profile",
                                UserIcon { class: "w-6 h-6" }
                            }
                        }
                    }
                }
            }

            main {
                class: "max-w-4xl mx-auto",
                Outlet::<Route> {}
            }

            NoticeBanner {}
        }
    }
}
