//! Message framing: header, extension frames and their option flags.

mod extension;
mod flags;
mod header;

pub use extension::*;
pub use flags::*;
pub use header::*;
