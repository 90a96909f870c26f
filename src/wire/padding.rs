//! 4-byte alignment of variable-length content.
//!
//! The pad length is never transmitted; both sides derive it from the
//! content length.

use crate::core::PADDING_SIZE;

/// Number of zero bytes that follow `len` bytes of content.
pub const fn padding_for(len: usize) -> usize {
    (PADDING_SIZE - len % PADDING_SIZE) % PADDING_SIZE
}

/// Length of `len` bytes of content plus its padding.
pub const fn padded_len(len: usize) -> usize {
    len + padding_for(len)
}
