//! Remote file browser
//!
//! A line-oriented text protocol (`ls`, `cat`, `cd`, `mkdir`, `touch`,
//! `help`) over TCP, confined to a single sandbox root directory and served
//! from one single-threaded event loop.

pub mod client;
pub mod error;
pub mod navigate;
pub mod protocol;
pub mod server;
pub mod storage;

pub use error::ServerError;
pub use server::{Server, ServerConfig};
