//! Logging extension (id 4)
//!
//! Client wire format:
//! ```text
//! +0  Request ID (2 bytes BE16)
//! +2  Entry count (2 bytes BE16)
//! +4  Count × {Length (4 bytes BE32) | Data (padded)}
//! ```
//!
//! Server wire format:
//! ```text
//! +0  Request ID (2 bytes BE16)
//! +2  Result (1 byte)
//! +3  Reserved (1 byte)
//! ```
//!
//! Legacy servers write the response under the user extension id; see
//! [`WireCompat`](crate::core::WireCompat).

use crate::core::{ClientExtension, CodecConfig, DecodeError, NOTHING, ServerExtension};
use crate::frame::ExtensionType;
use crate::sync::SyncStatus;
use crate::wire::{Cursor, LenWidth, WriteBuffer};

/// One schema-encoded log record, opaque to the codec.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogEntry(pub Vec<u8>);

impl LogEntry {
    /// Record bytes.
    pub fn data(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for LogEntry {
    fn from(data: Vec<u8>) -> Self {
        Self(data)
    }
}

/// Logging extension as sent by endpoints: a batch of log records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogClientSync {
    /// Batch id, echoed in the response.
    pub request_id: u16,
    /// Records in upload order.
    pub log_entries: Vec<LogEntry>,
}

impl ClientExtension for LogClientSync {
    const EXTENSION: ExtensionType = ExtensionType::Logging;

    fn decode_payload(payload: &mut Cursor<'_>, _options: u8) -> Result<Self, DecodeError> {
        let request_id = payload.read_u16()?;
        let count = payload.read_u16()?;
        let mut log_entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let len = payload.read_length()?;
            log_entries.push(LogEntry(payload.read_padded(len)?.to_vec()));
        }
        Ok(Self {
            request_id,
            log_entries,
        })
    }

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        buf.put_u16(self.request_id);
        for entry in buf.put_len(LenWidth::U16, &self.log_entries, "log entries") {
            let data = buf.put_len(LenWidth::I32, &entry.0, "log entry");
            buf.put_padded(data);
        }
    }
}

/// Logging extension as sent by servers: the batch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogServerSync {
    /// Batch id from the matching [`LogClientSync`].
    pub request_id: u16,
    /// Whether the batch was stored.
    pub result: SyncStatus,
}

impl ServerExtension for LogServerSync {
    const EXTENSION: ExtensionType = ExtensionType::Logging;

    fn extension_id(&self, config: &CodecConfig) -> u8 {
        if config.is_legacy() {
            ExtensionType::User.id()
        } else {
            Self::EXTENSION.id()
        }
    }

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        buf.put_u16(self.request_id);
        buf.put_u8(self.result.as_byte());
        buf.put_u8(NOTHING);
    }
}
