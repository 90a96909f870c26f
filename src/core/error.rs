//! Error types for the binary platform protocol.

use thiserror::Error;

use crate::frame::ExtensionType;

/// Errors that can occur when decoding a client sync message.
///
/// Every variant is fatal to the message being decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes than a message header.
    #[error("message header too small: {actual} bytes")]
    HeaderTooSmall {
        /// Bytes available.
        actual: usize,
    },

    /// Header carries a protocol id other than the platform one.
    #[error("unknown protocol id 0x{0:08x}")]
    UnknownProtocolId(u32),

    /// Header version is outside the supported range.
    #[error("unsupported protocol version {0}")]
    UnsupportedVersion(u16),

    /// Fewer bytes than an extension header.
    #[error("extension header too small: {available} bytes available at offset {position}")]
    ExtensionHeaderTooSmall {
        /// Bytes available.
        available: usize,
        /// Offset of the extension header.
        position: usize,
    },

    /// Declared extension payload runs past the end of the message.
    #[error(
        "extension payload too small: {available} bytes available, {expected} declared at offset {position}"
    )]
    ExtensionPayloadTooSmall {
        /// Bytes available.
        available: usize,
        /// Declared payload length.
        expected: usize,
        /// Offset of the payload.
        position: usize,
    },

    /// Unknown field tag inside a length-bounded extension payload.
    #[error("malformed {extension} extension: unknown field id {field_id}")]
    MalformedField {
        /// Extension being decoded.
        extension: ExtensionType,
        /// Offending tag.
        field_id: u8,
    },

    /// No metadata extension in the message.
    #[error("client sync has no metadata extension")]
    MissingMetadata,

    /// A field needs more bytes than remain.
    #[error("truncated: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes needed.
        needed: usize,
        /// Bytes available.
        available: usize,
    },

    /// A signed length prefix is negative.
    #[error("negative length {0}")]
    NegativeLength(i32),

    /// A string field is not valid UTF-8.
    #[error("invalid utf-8 in string field")]
    InvalidUtf8,
}

impl DecodeError {
    /// Check if the error was raised while reading the message envelope
    /// (header or extension framing) rather than an extension payload.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            DecodeError::HeaderTooSmall { .. }
                | DecodeError::UnknownProtocolId(_)
                | DecodeError::UnsupportedVersion(_)
                | DecodeError::ExtensionHeaderTooSmall { .. }
                | DecodeError::ExtensionPayloadTooSmall { .. }
        )
    }
}

/// Result alias for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;
