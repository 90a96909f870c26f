//! Configuration extension (id 5)
//!
//! Client wire format (options: [`ConfigurationClientOptions`]):
//! ```text
//! +0  App state sequence number (4 bytes BE32)
//! +4  [HASH] Configuration hash (20 bytes)
//! ```
//!
//! Server wire format (options: [`ConfigurationServerOptions`]):
//! ```text
//! +0  App state sequence number (4 bytes BE32)
//! +4  [schema] Schema body length (4 bytes BE32)
//! +N  [delta]  Delta body length (4 bytes BE32)
//! +M  Schema body, then delta body (raw, not padded)
//! ```

use crate::core::{
    CONFIGURATION_HASH_SIZE, ClientExtension, CodecConfig, DecodeError, ServerExtension,
};
use crate::frame::{ConfigurationClientOptions, ConfigurationServerOptions, ExtensionType};
use crate::wire::{Cursor, LenWidth, WriteBuffer};

/// Configuration extension as sent by endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigurationClientSync {
    /// Application state sequence number the endpoint last saw.
    pub app_state_seq_number: i32,
    /// Hash of the configuration the endpoint holds.
    pub configuration_hash: Option<[u8; CONFIGURATION_HASH_SIZE]>,
}

impl ClientExtension for ConfigurationClientSync {
    const EXTENSION: ExtensionType = ExtensionType::Configuration;

    fn decode_payload(payload: &mut Cursor<'_>, options: u8) -> Result<Self, DecodeError> {
        let options = ConfigurationClientOptions::from_bits_retain(options);
        let app_state_seq_number = payload.read_i32()?;
        let configuration_hash = if options.contains(ConfigurationClientOptions::HASH) {
            Some(payload.read_array()?)
        } else {
            None
        };
        Ok(Self {
            app_state_seq_number,
            configuration_hash,
        })
    }

    fn options(&self) -> u8 {
        let mut options = ConfigurationClientOptions::empty();
        options.set(
            ConfigurationClientOptions::HASH,
            self.configuration_hash.is_some(),
        );
        options.bits()
    }

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        buf.put_i32(self.app_state_seq_number);
        if let Some(ref hash) = self.configuration_hash {
            buf.put_bytes(hash);
        }
    }
}

/// Configuration extension as sent by servers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigurationServerSync {
    /// Current application state sequence number.
    pub app_state_seq_number: i32,
    /// Configuration schema, when it changed.
    pub conf_schema_body: Option<Vec<u8>>,
    /// Configuration delta, when there is one.
    pub conf_delta_body: Option<Vec<u8>>,
}

impl ConfigurationServerSync {
    /// Which bodies are present.
    pub fn presence_options(&self) -> ConfigurationServerOptions {
        let mut options = ConfigurationServerOptions::empty();
        options.set(
            ConfigurationServerOptions::SCHEMA_BODY,
            self.conf_schema_body.is_some(),
        );
        options.set(
            ConfigurationServerOptions::DELTA_BODY,
            self.conf_delta_body.is_some(),
        );
        options
    }
}

impl ServerExtension for ConfigurationServerSync {
    const EXTENSION: ExtensionType = ExtensionType::Configuration;

    fn options(&self, config: &CodecConfig) -> u8 {
        if config.is_legacy() {
            0
        } else {
            self.presence_options().bits()
        }
    }

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        buf.put_i32(self.app_state_seq_number);
        let schema = self
            .conf_schema_body
            .as_deref()
            .map(|body| buf.put_len(LenWidth::I32, body, "configuration schema body"));
        let delta = self
            .conf_delta_body
            .as_deref()
            .map(|body| buf.put_len(LenWidth::I32, body, "configuration delta body"));
        for body in [schema, delta].into_iter().flatten() {
            buf.put_bytes(body);
        }
    }
}
