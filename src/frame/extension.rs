//! Extension frames: typed, length-delimited records inside a message.
//!
//! Wire format:
//! ```text
//! +--------+---------------------------+--------------------+------------------+
//! | Type   | Options                   | Payload Length     | Payload          |
//! | 1 byte | 3 bytes (reserved, flags) | 4 bytes (BE32)     | variable         |
//! +--------+---------------------------+--------------------+------------------+
//! ```

use std::fmt;

use tracing::debug;

use crate::core::{
    ClientExtension, CodecConfig, DecodeError, EXTENSION_HEADER_SIZE, NOTHING, ServerExtension,
};
use crate::wire::{Cursor, Patch, WriteBuffer};

/// Extension type identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExtensionType {
    /// Request id and client metadata.
    MetaData = 1,
    /// Endpoint profile.
    Profile = 2,
    /// User and endpoint attach/detach.
    User = 3,
    /// Log upload.
    Logging = 4,
    /// Configuration.
    Configuration = 5,
    /// Notifications and topic subscriptions.
    Notification = 6,
    /// Events and event listeners.
    Event = 7,
    /// Redirect to another server (server → endpoint only).
    Redirect = 8,
}

impl ExtensionType {
    /// Parse an extension type from its id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::MetaData),
            2 => Some(Self::Profile),
            3 => Some(Self::User),
            4 => Some(Self::Logging),
            5 => Some(Self::Configuration),
            6 => Some(Self::Notification),
            7 => Some(Self::Event),
            8 => Some(Self::Redirect),
            _ => None,
        }
    }

    /// Wire id of this extension type.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Lowercase name for logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::MetaData => "metadata",
            Self::Profile => "profile",
            Self::User => "user",
            Self::Logging => "logging",
            Self::Configuration => "configuration",
            Self::Notification => "notification",
            Self::Event => "event",
            Self::Redirect => "redirect",
        }
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One extension as read off the wire, payload not yet decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionFrame<'a> {
    /// Raw type id.
    pub type_id: u8,
    /// 24-bit option field.
    pub options: u32,
    /// Payload, exactly as long as declared.
    pub payload: &'a [u8],
    /// Offset of the extension header in the message.
    pub offset: usize,
}

impl<'a> ExtensionFrame<'a> {
    /// Read the next extension frame, advancing past its whole payload.
    pub fn read(cursor: &mut Cursor<'a>) -> Result<Self, DecodeError> {
        let offset = cursor.position();
        if cursor.remaining() < EXTENSION_HEADER_SIZE {
            return Err(DecodeError::ExtensionHeaderTooSmall {
                available: cursor.remaining(),
                position: offset,
            });
        }

        let word = cursor.read_u32()?;
        let type_id = (word >> 24) as u8;
        let options = word & 0x00FF_FFFF;
        let payload_length = cursor.read_u32()? as usize;

        if cursor.remaining() < payload_length {
            return Err(DecodeError::ExtensionPayloadTooSmall {
                available: cursor.remaining(),
                expected: payload_length,
                position: cursor.position(),
            });
        }
        let payload = cursor.read_bytes(payload_length)?;

        Ok(Self {
            type_id,
            options,
            payload,
            offset,
        })
    }

    /// Known extension type, if any.
    pub fn extension_type(&self) -> Option<ExtensionType> {
        ExtensionType::from_id(self.type_id)
    }

    /// Low option byte: the only one carrying flags in version 1.
    pub fn option_byte(&self) -> u8 {
        (self.options & 0xFF) as u8
    }

    /// The two reserved option bytes; zero from conforming peers.
    pub fn reserved_options(&self) -> u16 {
        (self.options >> 8) as u16
    }

    /// Cursor bounded to the payload.
    pub fn payload_cursor(&self) -> Cursor<'a> {
        Cursor::new(self.payload)
    }

    /// Decode the payload as a client extension.
    pub fn decode<E: ClientExtension>(&self) -> Result<E, DecodeError> {
        if self.reserved_options() != 0 {
            debug!(
                extension = %E::EXTENSION,
                reserved = self.reserved_options(),
                "ignoring non-zero reserved option bytes"
            );
        }
        E::decode_payload(&mut self.payload_cursor(), self.option_byte())
    }
}

/// An extension whose header is written and whose payload length is
/// patched once the payload is complete.
#[derive(Debug)]
#[must_use = "an open extension must be finished"]
pub struct OpenExtension {
    length: Patch<u32>,
    payload_start: usize,
}

impl OpenExtension {
    /// Write an extension header with a placeholder payload length.
    pub fn begin(buf: &mut WriteBuffer, type_id: u8, options: u8) -> Self {
        buf.put_u8(type_id);
        buf.put_u8(NOTHING);
        buf.put_u8(NOTHING);
        buf.put_u8(options);
        let length = buf.reserve_u32();
        Self {
            length,
            payload_start: buf.position(),
        }
    }

    /// Patch the payload length with everything written since `begin`.
    pub fn finish(self, buf: &mut WriteBuffer) {
        let length = buf.position() - self.payload_start;
        buf.patch(self.length, length as u32);
    }
}

/// Write a server extension: header, payload, back-patched length.
pub fn write_server_extension<E: ServerExtension>(
    buf: &mut WriteBuffer,
    extension: &E,
    config: &CodecConfig,
) {
    let open = OpenExtension::begin(
        buf,
        extension.extension_id(config),
        extension.options(config),
    );
    extension.encode_payload(buf);
    open.finish(buf);
}

/// Write a client extension: header, payload, back-patched length.
pub fn write_client_extension<E: ClientExtension>(buf: &mut WriteBuffer, extension: &E) {
    let open = OpenExtension::begin(buf, E::EXTENSION.id(), extension.options());
    extension.encode_payload(buf);
    open.finish(buf);
}
