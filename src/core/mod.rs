//! Core constants, errors, configuration and traits.
//!
//! This module has no dependencies on the rest of the crate beyond the types
//! the traits are expressed in.

mod config;
mod constants;
mod error;
mod traits;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use traits::*;
