//! Window scroll listener for the profile view
//!
//! The listener only measures; it writes the current [`ScrollMetrics`] into a
//! signal and the profile route decides what to do with them.

use dioxus::prelude::*;

use crate::controllers::pagination::ScrollMetrics;
use crate::controllers::profile_view::ScrollBinding;

#[cfg(target_family = "wasm")]
use wasm_bindgen::{closure::Closure, JsCast};

pub struct WindowScrollBinding {
    sink: Signal<Option<ScrollMetrics>>,
    #[cfg(target_family = "wasm")]
    callback: Option<Closure<dyn FnMut()>>,
}

impl WindowScrollBinding {
    pub fn new(sink: Signal<Option<ScrollMetrics>>) -> Self {
        Self {
            sink,
            #[cfg(target_family = "wasm")]
            callback: None,
        }
    }
}

/// Current window scroll position and document height
#[cfg(target_family = "wasm")]
fn read_window_metrics() -> Option<ScrollMetrics> {
    let window = web_sys::window()?;
    let scroll_top = window.scroll_y().ok()?;
    let inner_height = window.inner_height().ok()?.as_f64()?;
    let scroll_height = window.document()?.body()?.scroll_height() as f64;
    Some(ScrollMetrics {
        scroll_top,
        scroll_height,
        inner_height,
    })
}

impl ScrollBinding for WindowScrollBinding {
    fn subscribe(&mut self) {
        #[cfg(target_family = "wasm")]
        {
            if self.callback.is_some() {
                return;
            }
            let Some(window) = web_sys::window() else {
                log::warn!("No window; scroll listener not attached");
                return;
            };

            let mut sink = self.sink;
            let callback = Closure::wrap(Box::new(move || {
                if let Some(metrics) = read_window_metrics() {
                    sink.set(Some(metrics));
                }
            }) as Box<dyn FnMut()>);

            if let Err(e) = window.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref()) {
                log::error!("Failed to attach scroll listener: {:?}", e);
                return;
            }
            self.callback = Some(callback);
            log::debug!("Scroll listener attached");
        }
        #[cfg(not(target_family = "wasm"))]
        {
            let _ = self.sink;
        }
    }

    fn unsubscribe(&mut self) {
        #[cfg(target_family = "wasm")]
        {
            let Some(callback) = self.callback.take() else {
                return;
            };
            if let Some(window) = web_sys::window() {
                window
                    .remove_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
                    .ok();
            }
            log::debug!("Scroll listener detached");
        }
    }
}
