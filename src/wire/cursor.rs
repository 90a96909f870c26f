//! Bounds-checked big-endian reader.

use super::padding::{padded_len, padding_for};
use crate::core::DecodeError;

/// Sequential big-endian reader over an immutable byte slice.
///
/// Every read either succeeds or fails with [`DecodeError::Truncated`]
/// without moving the position; nothing is ever read past the slice end.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check if everything has been read.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining();
        if len > available {
            return Err(DecodeError::Truncated {
                needed: len,
                available,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Read a fixed-size byte array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Skip `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.read_bytes(len).map(|_| ())
    }

    /// Split off the next `len` bytes as an independent cursor and advance
    /// past them.
    pub fn sub_cursor(&mut self, len: usize) -> Result<Cursor<'a>, DecodeError> {
        self.read_bytes(len).map(Cursor::new)
    }

    /// Read a u8.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a big-endian u16 (always unsigned, 0..=65535).
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Read a big-endian u32.
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Read a big-endian u64.
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        self.read_array().map(u64::from_be_bytes)
    }

    /// Read a big-endian i32.
    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        self.read_array().map(i32::from_be_bytes)
    }

    /// Read a big-endian i64.
    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        self.read_array().map(i64::from_be_bytes)
    }

    /// Read an `i32` length prefix, rejecting negative values.
    pub fn read_length(&mut self) -> Result<usize, DecodeError> {
        let len = self.read_i32()?;
        usize::try_from(len).map_err(|_| DecodeError::NegativeLength(len))
    }

    /// Skip the padding that follows `len` bytes of content.
    pub fn skip_padding(&mut self, len: usize) -> Result<(), DecodeError> {
        self.skip(padding_for(len))
    }

    /// Read `len` bytes of content followed by their padding.
    pub fn read_padded(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let bytes = self.read_bytes(padded_len(len))?;
        Ok(&bytes[..len])
    }

    /// Read a padded UTF-8 string of `len` bytes.
    pub fn read_padded_utf8(&mut self, len: usize) -> Result<String, DecodeError> {
        let bytes = self.read_padded(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8)
    }

    /// Read a padded UTF-8 string preceded by a u16 length.
    pub fn read_short_utf8(&mut self) -> Result<String, DecodeError> {
        let len = self.read_u16()? as usize;
        self.read_padded_utf8(len)
    }
}
