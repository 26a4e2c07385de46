use dioxus::prelude::*;

/// Account menu shown from the gear button on your own profile
#[component]
pub fn LogoutModal(on_logout: EventHandler<()>, on_cancel: EventHandler<()>) -> Element {
    rsx! {
        // Modal overlay - clicking outside cancels
        div {
            class: "fixed inset-0 bg-black/50 z-50 flex items-center justify-center p-4",
            onclick: move |_| on_cancel.call(()),

            div {
                class: "bg-card border border-border rounded-xl max-w-xs w-full overflow-hidden shadow-xl",
                role: "dialog",
                aria_modal: "true",
                aria_label: "Account menu",
                onclick: move |e| e.stop_propagation(),

                div {
                    class: "flex flex-col divide-y divide-border text-center",
                    button {
                        class: "py-3 font-semibold text-red-500 hover:bg-accent transition",
                        onclick: move |_| on_logout.call(()),
                        "Log Out"
                    }
                    button {
                        class: "py-3 hover:bg-accent transition",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
