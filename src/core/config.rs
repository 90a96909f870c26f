//! Codec configuration.
//!
//! The only behavior that varies between deployments is how the encoder
//! treats a handful of historical wire quirks. Decoding never depends on it.

use super::constants::DEFAULT_BUFFER_CAPACITY;

/// How the encoder treats known inconsistencies of the deployed wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WireCompat {
    /// Byte-for-byte what deployed servers emit:
    /// - logging responses carry the user extension id (3)
    /// - configuration option bits are always zero
    /// - redirects carry the event extension id (7)
    #[default]
    Legacy,
    /// Each extension carries its own id and configuration body presence is
    /// signalled in the option byte.
    Corrected,
}

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Wire compatibility mode for encoding.
    pub wire_compat: WireCompat,
    /// Initial capacity of the encode buffer.
    pub initial_capacity: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            wire_compat: WireCompat::Legacy,
            initial_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl CodecConfig {
    /// Config that reproduces the deployed wire format exactly.
    pub fn legacy() -> Self {
        Self::default()
    }

    /// Config with the known quirks corrected.
    pub fn corrected() -> Self {
        Self {
            wire_compat: WireCompat::Corrected,
            ..Self::default()
        }
    }

    /// Set the initial encode buffer capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Check if legacy quirks are reproduced.
    pub fn is_legacy(&self) -> bool {
        self.wire_compat == WireCompat::Legacy
    }
}
