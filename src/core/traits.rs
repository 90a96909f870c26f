//! Core traits for the binary platform protocol.
//!
//! Extension payload types implement [`ClientExtension`] (endpoint → server,
//! decoded by the server) or [`ServerExtension`] (server → endpoint, encoded
//! by the server). The framing around the payload (type id, options, length)
//! is handled once in [`crate::frame`].

use super::config::CodecConfig;
use super::error::DecodeError;
use crate::frame::ExtensionType;
use crate::sync::{ClientSync, ServerSync};
use crate::wire::{Cursor, WriteBuffer};

/// Payload codec of an extension sent by endpoints.
///
/// # Requirements
///
/// - `decode_payload` MUST NOT read past the cursor it is given; the cursor
///   is bounded to the declared payload length.
/// - `encode_payload` MUST produce bytes `decode_payload` accepts, with
///   `options()` written into the extension header.
pub trait ClientExtension: Sized {
    /// Extension type this payload travels under.
    const EXTENSION: ExtensionType;

    /// Decode the payload given the low option byte of the extension header.
    fn decode_payload(payload: &mut Cursor<'_>, options: u8) -> Result<Self, DecodeError>;

    /// Option byte describing this payload.
    fn options(&self) -> u8 {
        0
    }

    /// Write the payload (without the extension header).
    fn encode_payload(&self, buf: &mut WriteBuffer);
}

/// Payload encoder of an extension sent by servers.
pub trait ServerExtension {
    /// Extension type this payload logically belongs to.
    const EXTENSION: ExtensionType;

    /// Type id written into the extension header.
    ///
    /// Defaults to the id of [`Self::EXTENSION`]; legacy quirks override it.
    fn extension_id(&self, config: &CodecConfig) -> u8 {
        let _ = config;
        Self::EXTENSION.id()
    }

    /// Option byte written into the extension header.
    fn options(&self, config: &CodecConfig) -> u8 {
        let _ = config;
        0
    }

    /// Write the payload (without the extension header).
    fn encode_payload(&self, buf: &mut WriteBuffer);
}

/// A platform protocol implementation, selected by an outer dispatcher
/// through its protocol id.
pub trait PlatformCodec: Send + Sync {
    /// Identifier of this protocol among the platform protocols.
    fn protocol_id(&self) -> u32;

    /// Decode one complete client sync message.
    fn decode(&self, data: &[u8]) -> Result<ClientSync, DecodeError>;

    /// Encode one complete server sync message.
    fn encode(&self, sync: &ServerSync) -> Vec<u8>;
}
