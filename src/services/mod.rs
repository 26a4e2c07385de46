// External services
// REST API client, Facebook SDK bindings and browser glue

pub mod api;
pub mod facebook_sdk;
pub mod fetch_dispatch;
pub mod window_scroll;

pub use fetch_dispatch::StoreFetchDispatcher;
pub use window_scroll::WindowScrollBinding;
