// Global state management
// Stores provide shared state across the application

pub mod auth_store;
pub mod notices;
pub mod pagination;
pub mod posts;
pub mod profiles;
