use dioxus::prelude::*;

use crate::components::icons::SettingsIcon;
use crate::components::{Avatar, FollowButton, LogoutModal, PhotoGrid, ProfileSkeleton, UsersModal};
use crate::config::CONFIG;
use crate::controllers::pagination::ScrollMetrics;
use crate::controllers::profile_view::{ProfileAction, ProfileProjection, ProfileViewCoordinator, UsersListKind};
use crate::routes::Route;
use crate::services::{StoreFetchDispatcher, WindowScrollBinding};
use crate::stores::auth_store::{self, FOLLOWING_IDS};
use crate::stores::pagination::{get_pagination, PAGINATION};
use crate::stores::posts::get_posts;
use crate::stores::profiles::{self, PublicProfile};
use crate::utils::pluralize;

type Coordinator = ProfileViewCoordinator<StoreFetchDispatcher, WindowScrollBinding>;

#[component]
pub fn Profile(username: String) -> Element {
    let scroll_metrics = use_signal(|| None::<ScrollMetrics>);
    let mut coordinator = use_signal(|| -> Coordinator {
        let config = CONFIG.peek();
        ProfileViewCoordinator::new(
            StoreFetchDispatcher,
            WindowScrollBinding::new(scroll_metrics),
            config.scroll_threshold(),
            config.preview_post_count,
        )
    });

    // Mount, and every change of the route parameter
    use_effect(use_reactive(&username, move |username| {
        coordinator.write().on_subject_changed(&username);
    }));

    // Only scroll events re-run this; store reads are untracked. Writing the
    // coordinator re-renders the view, so only write when a fetch goes out.
    use_effect(move || {
        let Some(metrics) = scroll_metrics() else {
            return;
        };
        let state = {
            let view = coordinator.peek();
            let Some(subject) = view.active_subject() else {
                return;
            };
            let state = PAGINATION.peek().get(subject);
            if !view.wants_scroll_fetch(&metrics, &state) {
                return;
            }
            state
        };
        coordinator.write().on_scroll(&metrics, &state);
    });

    use_drop(move || {
        coordinator.write().deactivate();
    });

    let profile_state = profiles::get_profile_state(&username);
    let pagination = get_pagination(&username);
    let (ui, limit, shows_load_more) = {
        let view = coordinator.read();
        (view.ui(), view.visible_post_limit(), view.shows_load_more(&pagination))
    };

    if let Some(error) = profile_state.error() {
        return rsx! {
            ProfileUnavailable { username: username.clone(), error: error.to_string() }
        };
    }
    let Some(profile) = profile_state.data().cloned() else {
        return rsx! { ProfileSkeleton {} };
    };

    let projection = {
        let viewer = auth_store::get_username();
        ProfileProjection::project(&username, &profile, viewer.as_deref(), &FOLLOWING_IDS.read())
    };
    let posts = get_posts(&username, limit);
    let is_fetching = pagination.is_fetching;

    rsx! {
        div {
            class: "px-4 pb-16",

            ProfileHeader {
                profile: profile.clone(),
                projection: projection.clone(),
                on_open_menu: move |_| coordinator.write().open_logout_modal(),
                on_open_users: move |kind| coordinator.write().open_users_modal(kind),
            }

            div {
                class: "border-t border-border pt-4",
                PhotoGrid { posts }
            }

            if shows_load_more {
                div {
                    class: "flex justify-center py-6",
                    button {
                        class: "px-6 py-2 border border-border rounded-lg font-semibold hover:bg-accent transition disabled:opacity-50",
                        disabled: is_fetching,
                        onclick: move |_| {
                            let Some(subject) = coordinator.peek().active_subject().map(str::to_string) else {
                                return;
                            };
                            let state = PAGINATION.peek().get(&subject);
                            coordinator.write().load_more(&state);
                        },
                        "Load more"
                    }
                }
            }

            if is_fetching {
                div {
                    class: "flex justify-center py-6",
                    role: "status",
                    div { class: "w-6 h-6 border-2 border-muted border-t-foreground rounded-full animate-spin" }
                }
            }

            if ui.logout_modal_open {
                LogoutModal {
                    on_logout: move |_| {
                        coordinator.write().close_logout_modal();
                        auth_store::sign_out();
                        navigator().push(Route::Home {});
                    },
                    on_cancel: move |_| coordinator.write().close_logout_modal(),
                }
            }

            if let Some(kind) = ui.users_modal {
                UsersModal {
                    username: username.clone(),
                    kind,
                    on_close: move |_| coordinator.write().close_users_modal(),
                }
            }
        }
    }
}

#[component]
fn ProfileHeader(
    profile: PublicProfile,
    projection: ProfileProjection,
    on_open_menu: EventHandler<()>,
    on_open_users: EventHandler<UsersListKind>,
) -> Element {
    let posts_label = pluralize(projection.post_count, "post", "posts");
    let followers_label = pluralize(projection.follower_count, "follower", "followers");
    let following_label = pluralize(projection.following_count, "following", "following");

    rsx! {
        header {
            class: "flex items-center gap-8 md:gap-16 py-8",

            Avatar {
                url: profile.avatar_url.clone(),
                size: "w-20 h-20 md:w-36 md:h-36",
            }

            div {
                class: "flex-1 min-w-0 space-y-4",

                div {
                    class: "flex flex-wrap items-center gap-3",
                    h1 { class: "text-xl font-light truncate", "{profile.username}" }

                    match projection.action {
                        ProfileAction::EditProfile => rsx! {
                            button {
                                class: "px-3 py-1 border border-border rounded-lg text-sm font-semibold opacity-60 cursor-not-allowed",
                                disabled: true,
                                title: "Profile editing is not available yet",
                                "Edit Profile"
                            }
                            button {
                                class: "p-1 rounded-full hover:bg-accent transition",
                                aria_label: "Account menu",
                                onclick: move |_| on_open_menu.call(()),
                                SettingsIcon { class: "w-6 h-6" }
                            }
                        },
                        ProfileAction::Follow | ProfileAction::Unfollow => rsx! {
                            FollowButton {
                                user_id: profile.id.clone(),
                                username: profile.username.clone(),
                                is_following: projection.is_following,
                            }
                        },
                        ProfileAction::None => rsx! {},
                    }
                }

                ul {
                    class: "flex gap-6 text-sm",
                    li { span { class: "font-semibold", "{posts_label}" } }
                    li {
                        button {
                            class: "hover:underline",
                            onclick: move |_| on_open_users.call(UsersListKind::Followers),
                            "{followers_label}"
                        }
                    }
                    li {
                        button {
                            class: "hover:underline",
                            onclick: move |_| on_open_users.call(UsersListKind::Following),
                            "{following_label}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProfileUnavailable(username: String, error: String) -> Element {
    rsx! {
        div {
            class: "py-16 text-center space-y-2",
            h2 { class: "text-xl font-semibold", "Sorry, this page isn't available." }
            p { class: "text-muted-foreground", "We couldn't load {username}: {error}" }
            Link {
                to: Route::Home {},
                class: "text-blue-500 hover:underline",
                "Go back home"
            }
        }
    }
}
