use dioxus::prelude::*;
use std::rc::Rc;

use crate::controllers::handshake::{ConnectedStatusPolicy, HandshakeController, HandshakeError};
use crate::hooks::use_sdk_ready;
use crate::services::facebook_sdk::{self, FacebookSdk};
use crate::stores::auth_store::{AuthSessionSink, AUTH_STATE};
use crate::stores::notices::{self, NoticeKind};

type FacebookHandshake = HandshakeController<FacebookSdk, ConnectedStatusPolicy, AuthSessionSink>;

/// "Log in with Facebook" button
///
/// Renders nothing until the Facebook SDK has loaded.
#[component]
pub fn FacebookLoginButton() -> Element {
    let sdk_state = use_sdk_ready(facebook_sdk::is_sdk_loaded);
    let handshake: Rc<FacebookHandshake> = use_hook(|| {
        Rc::new(HandshakeController::new(FacebookSdk, ConnectedStatusPolicy, AuthSessionSink))
    });
    let mut attempting = use_signal(|| false);

    if !sdk_state().is_ready() {
        return rsx! {};
    }

    let establishing = AUTH_STATE.read().is_establishing;
    let busy = attempting() || establishing;
    let label = if busy { "Logging in..." } else { "Log in with Facebook" };

    rsx! {
        button {
            class: "w-full py-2 px-4 bg-[#1877f2] hover:bg-[#166fe5] text-white font-semibold rounded-lg transition disabled:opacity-50",
            disabled: busy,
            onclick: move |_| {
                let handshake = handshake.clone();
                spawn(async move {
                    attempting.set(true);
                    if let Err(e) = handshake.attempt_login().await {
                        let message = match e {
                            HandshakeError::NotAuthenticated(_) => {
                                "Log in to Facebook and authorize photogram, then try again.".to_string()
                            }
                            other => format!("Facebook login failed: {}", other),
                        };
                        notices::report(NoticeKind::Login, message);
                    }
                    attempting.set(false);
                });
            },
            "{label}"
        }
    }
}
