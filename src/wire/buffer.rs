//! Growable big-endian writer with back-patching.

use std::marker::PhantomData;

use tracing::warn;

use super::padding::padding_for;
use crate::core::NOTHING;

/// Handle to a fixed-width field reserved in a [`WriteBuffer`], to be
/// overwritten once its value is known.
#[derive(Debug)]
#[must_use = "a reserved field must be patched"]
pub struct Patch<T> {
    offset: usize,
    _width: PhantomData<T>,
}

impl<T> Patch<T> {
    /// Offset of the reserved field.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Integer types that can be back-patched.
pub trait Patchable: Copy {
    /// Big-endian bytes of the value.
    fn write_be(self, dst: &mut [u8]);
    /// Width in bytes.
    const WIDTH: usize;
}

impl Patchable for u16 {
    const WIDTH: usize = 2;
    fn write_be(self, dst: &mut [u8]) {
        dst.copy_from_slice(&self.to_be_bytes());
    }
}

impl Patchable for u32 {
    const WIDTH: usize = 4;
    fn write_be(self, dst: &mut [u8]) {
        dst.copy_from_slice(&self.to_be_bytes());
    }
}

/// Wire width of a length or count prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LenWidth {
    /// One unsigned byte.
    U8,
    /// Big-endian u16.
    U16,
    /// Big-endian i32, non-negative.
    I32,
}

impl LenWidth {
    /// Largest length the prefix can carry.
    pub const fn max(self) -> usize {
        match self {
            Self::U8 => u8::MAX as usize,
            Self::U16 => u16::MAX as usize,
            Self::I32 => i32::MAX as usize,
        }
    }
}

fn fit_len(len: usize, width: LenWidth, field: &'static str) -> usize {
    let max = width.max();
    if len > max {
        warn!(field, len, max, "value does not fit its length prefix, truncating");
        return max;
    }
    len
}

/// Longest prefix of `s` that is at most `max` bytes and ends on a
/// character boundary.
pub fn fit_str(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Sequential big-endian writer over a growable byte vector.
#[derive(Debug, Clone, Default)]
pub struct WriteBuffer {
    buf: Vec<u8>,
}

impl WriteBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Current write offset (bytes written so far).
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the buffer, returning the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Write a u8.
    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Write a big-endian u16.
    pub fn put_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Write a big-endian u32.
    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Write a big-endian u64.
    pub fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Write a big-endian i32.
    pub fn put_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Write a big-endian i64.
    pub fn put_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Write raw bytes, unpadded.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write `count` zero bytes.
    pub fn put_zeros(&mut self, count: usize) {
        self.buf.resize(self.buf.len() + count, NOTHING);
    }

    /// Write bytes followed by zero padding up to the next 4-byte boundary.
    pub fn put_padded(&mut self, bytes: &[u8]) {
        self.put_bytes(bytes);
        self.put_zeros(padding_for(bytes.len()));
    }

    /// Write exactly `width` bytes: `bytes` truncated or zero-filled.
    pub fn put_fixed(&mut self, bytes: &[u8], width: usize) {
        let len = bytes.len().min(width);
        self.put_bytes(&bytes[..len]);
        self.put_zeros(width - len);
    }

    /// Write the length prefix of `items` and return the part of `items`
    /// the prefix covers.
    ///
    /// Anything past `width.max()` is dropped with a warning, so the prefix
    /// always matches what the caller writes next.
    pub fn put_len<'a, T>(
        &mut self,
        width: LenWidth,
        items: &'a [T],
        field: &'static str,
    ) -> &'a [T] {
        let len = fit_len(items.len(), width, field);
        self.put_width(width, len);
        &items[..len]
    }

    /// Write the byte length prefix of `s` and return the part of `s` the
    /// prefix covers, cut on a character boundary.
    pub fn put_str_len<'a>(
        &mut self,
        width: LenWidth,
        s: &'a str,
        field: &'static str,
    ) -> &'a str {
        let s = fit_str(s, fit_len(s.len(), width, field));
        self.put_width(width, s.len());
        s
    }

    fn put_width(&mut self, width: LenWidth, len: usize) {
        match width {
            LenWidth::U8 => self.put_u8(len as u8),
            LenWidth::U16 => self.put_u16(len as u16),
            LenWidth::I32 => self.put_i32(len as i32),
        }
    }

    /// Reserve a u16 field to be patched later.
    pub fn reserve_u16(&mut self) -> Patch<u16> {
        self.reserve()
    }

    /// Reserve a u32 field to be patched later.
    pub fn reserve_u32(&mut self) -> Patch<u32> {
        self.reserve()
    }

    fn reserve<T: Patchable>(&mut self) -> Patch<T> {
        let offset = self.position();
        self.put_zeros(T::WIDTH);
        Patch {
            offset,
            _width: PhantomData,
        }
    }

    /// Overwrite a reserved field without disturbing anything written after it.
    pub fn patch<T: Patchable>(&mut self, patch: Patch<T>, value: T) {
        value.write_be(&mut self.buf[patch.offset..patch.offset + T::WIDTH]);
    }
}
