//! Message header: the envelope every sync message starts with.
//!
//! Wire format (8 bytes):
//! ```text
//! +--------------------+-----------------+------------------+
//! | Protocol ID        | Version         | Extension Count  |
//! | 4 bytes (BE32)     | 2 bytes (BE16)  | 2 bytes (BE16)   |
//! +--------------------+-----------------+------------------+
//! ```

use crate::core::{
    DecodeError, HEADER_PROTOCOL_ID, MAX_SUPPORTED_VERSION, MESSAGE_HEADER_SIZE,
    MIN_SUPPORTED_VERSION, PROTOCOL_VERSION,
};
use crate::wire::{Cursor, Patch, WriteBuffer};

/// Decoded message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Protocol identifier.
    pub protocol_id: u32,
    /// Protocol version.
    pub version: u16,
    /// Number of extensions that follow.
    pub extension_count: u16,
}

impl MessageHeader {
    /// Check if `version` is within the supported range.
    pub fn is_supported_version(version: u16) -> bool {
        (MIN_SUPPORTED_VERSION..=MAX_SUPPORTED_VERSION).contains(&version)
    }

    /// Parse and validate a header.
    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        if cursor.remaining() < MESSAGE_HEADER_SIZE {
            return Err(DecodeError::HeaderTooSmall {
                actual: cursor.remaining(),
            });
        }

        let protocol_id = cursor.read_u32()?;
        if protocol_id != HEADER_PROTOCOL_ID {
            return Err(DecodeError::UnknownProtocolId(protocol_id));
        }

        let version = cursor.read_u16()?;
        if !Self::is_supported_version(version) {
            return Err(DecodeError::UnsupportedVersion(version));
        }

        let extension_count = cursor.read_u16()?;

        Ok(Self {
            protocol_id,
            version,
            extension_count,
        })
    }

    /// Write a header for the current version, leaving the extension count
    /// to be patched once all extensions are written.
    pub fn begin(buf: &mut WriteBuffer) -> Patch<u16> {
        buf.put_u32(HEADER_PROTOCOL_ID);
        buf.put_u16(PROTOCOL_VERSION);
        buf.reserve_u16()
    }
}
