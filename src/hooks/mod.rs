pub mod use_sdk_ready;

pub use use_sdk_ready::use_sdk_ready;
