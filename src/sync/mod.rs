//! Sync messages
//!
//! A [`ClientSync`] is what an endpoint sends in one request; a
//! [`ServerSync`] is the server's answer. Both are a request id plus one
//! optional payload per extension.

mod client;
mod server;
mod types;

pub use client::*;
pub use server::*;
pub use types::*;
