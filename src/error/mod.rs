//! Error handling
//!
//! Defines error types and their user-visible rendering.

pub mod handlers;
pub mod types;

pub use handlers::error_to_response;
pub use types::*;
