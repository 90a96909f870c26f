//! Byte-level primitives: bounded reader, back-patching writer and padding.

mod buffer;
mod cursor;
mod padding;

pub use buffer::{LenWidth, Patch, Patchable, WriteBuffer, fit_str};
pub use cursor::Cursor;
pub use padding::{padded_len, padding_for};
