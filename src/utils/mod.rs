// Utility functions
// Helper functions for common operations

pub mod data_state;
pub mod format;
pub mod time;

pub use data_state::DataState;
pub use format::{format_count_compact, pluralize};
pub use time::format_relative_time;
