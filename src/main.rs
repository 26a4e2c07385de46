#![allow(non_snake_case)]

use dioxus::prelude::*;
use stores::auth_store;

// Modules
mod components;
mod config;
mod controllers;
mod hooks;
mod routes;
mod services;
mod stores;
mod utils;

fn main() {
    // Initialize panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }

    log::info!("Starting photogram client");

    // Launch the Dioxus web app
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Initialize stores and the identity SDK on mount
    use_effect(move || {
        auth_store::init_auth();

        let config = config::CONFIG.peek().clone();
        if let Err(e) = services::facebook_sdk::inject_sdk(&config.facebook_app_id, &config.facebook_api_version) {
            log::error!("Failed to load Facebook SDK: {}", e);
        }
    });

    rsx! {
        Router::<routes::Route> {}
    }
}
