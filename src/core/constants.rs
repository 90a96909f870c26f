//! Protocol constants for the binary platform protocol.
//!
//! These values are fixed by the wire format and MUST NOT be changed.

// =============================================================================
// PROTOCOL IDENTIFICATION
// =============================================================================

/// Protocol id written into (and expected in) every message header.
///
/// Deployed peers carry the Avro platform identifier in the binary header,
/// so this is what goes on the wire.
pub const HEADER_PROTOCOL_ID: u32 = 0xf291_f2d4;

/// Identifier of the binary codec among the platform protocols.
///
/// Returned by [`PlatformCodec::protocol_id`](super::PlatformCodec::protocol_id)
/// so a dispatcher can select this codec.
pub const BINARY_PROTOCOL_ID: u32 = 0x3553_c66f;

/// Protocol version written by the encoder.
pub const PROTOCOL_VERSION: u16 = 1;

/// Lowest protocol version accepted by the decoder.
pub const MIN_SUPPORTED_VERSION: u16 = 1;

/// Highest protocol version accepted by the decoder.
pub const MAX_SUPPORTED_VERSION: u16 = 1;

// =============================================================================
// FRAME SIZES
// =============================================================================

/// Message header size (protocol id + version + extension count).
pub const MESSAGE_HEADER_SIZE: usize = 8;

/// Byte offset of the extension count inside the message header.
pub const EXTENSION_COUNT_OFFSET: usize = 6;

/// Extension header size (type + options + payload length).
pub const EXTENSION_HEADER_SIZE: usize = 8;

/// Alignment of variable-length content on the wire.
pub const PADDING_SIZE: usize = 4;

/// Initial capacity of the encode buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 128;

// =============================================================================
// FIXED-SIZE FIELDS
// =============================================================================

/// Endpoint public key hash size (SHA-1).
pub const KEY_HASH_SIZE: usize = 20;

/// Profile hash size.
pub const PROFILE_HASH_SIZE: usize = 20;

/// Configuration hash size.
pub const CONFIGURATION_HASH_SIZE: usize = 20;

/// Topic list hash size, trailing every notification client sync.
pub const TOPIC_LIST_HASH_SIZE: usize = 20;

/// Application token length in bytes.
pub const APP_TOKEN_SIZE: usize = 20;

// =============================================================================
// SHARED OPTION VALUES
// =============================================================================

/// Zero byte used for reserved fields.
pub const NOTHING: u8 = 0x00;

/// Wire value of a successful result.
pub const SUCCESS: u8 = 0x00;

/// Wire value of a failed result.
pub const FAILURE: u8 = 0x01;
