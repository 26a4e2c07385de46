// Controllers
// UI-independent state machines driven by the routes and components

pub mod handshake;
pub mod pagination;
pub mod profile_view;
pub mod readiness;
