//! Client session management
//!
//! Per-connection state, input framing, and command processing.

pub mod framing;
pub mod handler;
pub mod session;

pub use handler::handle_input;
pub use session::{DrainOutcome, Session};
