//! Redirect extension (server → endpoint only)
//!
//! Wire format:
//! ```text
//! +0  DNS name hash (4 bytes BE32)
//! ```
//!
//! Only a 32-bit hash of the target name travels; endpoints resolve it
//! against their bootstrap server list. The hash is the classic
//! `s[0]*31^(n-1) + ... + s[n-1]` over UTF-16 code units with wrapping
//! arithmetic, so endpoints on every platform compute the same value.
//!
//! Legacy servers write the extension under the event id (7).

use crate::core::{CodecConfig, ServerExtension};
use crate::frame::ExtensionType;
use crate::wire::WriteBuffer;

/// 32-bit polynomial hash of `s` over its UTF-16 code units.
pub fn dns_name_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Tells the endpoint to reconnect to another server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RedirectServerSync {
    /// DNS name of the server to reconnect to.
    pub dns_name: String,
}

impl RedirectServerSync {
    /// Redirect to `dns_name`.
    pub fn new(dns_name: impl Into<String>) -> Self {
        Self {
            dns_name: dns_name.into(),
        }
    }
}

impl ServerExtension for RedirectServerSync {
    const EXTENSION: ExtensionType = ExtensionType::Redirect;

    fn extension_id(&self, config: &CodecConfig) -> u8 {
        if config.is_legacy() {
            ExtensionType::Event.id()
        } else {
            Self::EXTENSION.id()
        }
    }

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        buf.put_i32(dns_name_hash(&self.dns_name));
    }
}
