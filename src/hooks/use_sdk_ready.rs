use dioxus::prelude::*;
use dioxus::core::Task;

use crate::config::CONFIG;
use crate::controllers::readiness::{ReadinessPoller, ReadinessState};
use crate::stores::notices::{self, NoticeKind};

/// Wait for a page-level dependency (such as the Facebook SDK) to appear.
///
/// Probes immediately on mount, then on the configured interval, until
/// `probe` returns true or the attempt cap is reached. The returned signal
/// follows the poller's settled state and moves from `Pending` to `Ready` or
/// `TimedOut` exactly once. Unmounting the component cancels polling.
///
/// # Example
/// ```
/// let sdk_state = use_sdk_ready(is_sdk_loaded);
///
/// if sdk_state().is_ready() {
///     rsx! { button { "Log in with Facebook" } }
/// }
/// ```
pub fn use_sdk_ready(probe: fn() -> bool) -> Signal<ReadinessState> {
    let mut state = use_signal(|| ReadinessState::Pending);
    let poller = use_hook(|| ReadinessPoller::new(CONFIG.peek().poll_config()));
    let mut tasks = use_signal(Vec::<Task>::new);

    let poller_for_tasks = poller.clone();
    use_hook(move || {
        let driver = poller_for_tasks.clone();
        let poll = spawn(async move {
            driver
                .run(
                    probe,
                    || log::info!("Facebook SDK is ready"),
                    |ms| gloo_timers::future::TimeoutFuture::new(ms),
                )
                .await;
        });

        let watcher = poller_for_tasks;
        let mirror = spawn(async move {
            let outcome = watcher.settled().await;
            if !outcome.is_settled() {
                // Cancelled on unmount
                return;
            }
            if outcome == ReadinessState::TimedOut {
                notices::report(
                    NoticeKind::Login,
                    "Facebook sign-in is unavailable right now. Try reloading the page.",
                );
            }
            state.set(outcome);
        });

        tasks.set(vec![poll, mirror]);
    });

    // Stop polling on unmount
    use_drop(move || {
        poller.cancel();
        for task in tasks.peek().iter() {
            task.cancel();
        }
    });

    state
}
