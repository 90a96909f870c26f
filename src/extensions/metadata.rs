//! Metadata extension (id 1)
//!
//! Every client sync carries exactly one metadata extension; it holds the
//! request id the server echoes back.
//!
//! Client wire format (options: [`MetaDataOptions`]):
//! ```text
//! +0  Request ID (4 bytes BE32)
//! +4  [TIMEOUT]       Timeout (4 bytes BE32)
//! +N  [KEY_HASH]      Endpoint public key hash (20 bytes)
//! +M  [PROFILE_HASH]  Profile hash (20 bytes)
//! +K  [APP_TOKEN]     Application token (20 bytes UTF-8, NUL-filled)
//! ```
//!
//! Shorter tokens are NUL-filled on encode and the fill is stripped on
//! decode. Longer tokens are cut to 20 bytes on a character boundary.
//!
//! Server wire format: request id only, no options.

use std::time::Duration;

use tracing::warn;

use crate::core::{
    APP_TOKEN_SIZE, ClientExtension, DecodeError, PROFILE_HASH_SIZE, ServerExtension,
};
use crate::frame::{ExtensionType, MetaDataOptions};
use crate::sync::EndpointKeyHash;
use crate::wire::{Cursor, WriteBuffer, fit_str};

/// Optional client metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientSyncMetaData {
    /// Request timeout in milliseconds.
    pub timeout: Option<i64>,
    /// Hash of the endpoint public key.
    pub endpoint_public_key_hash: Option<EndpointKeyHash>,
    /// Hash of the endpoint's current profile.
    pub profile_hash: Option<[u8; PROFILE_HASH_SIZE]>,
    /// Application token.
    pub application_token: Option<String>,
}

impl ClientSyncMetaData {
    /// Timeout as a duration, if present and non-negative.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
            .and_then(|millis| u64::try_from(millis).ok())
            .map(Duration::from_millis)
    }

    /// Presence flags for the fields that are set.
    pub fn presence_options(&self) -> MetaDataOptions {
        let mut options = MetaDataOptions::empty();
        options.set(MetaDataOptions::TIMEOUT, self.timeout.is_some());
        options.set(
            MetaDataOptions::KEY_HASH,
            self.endpoint_public_key_hash.is_some(),
        );
        options.set(MetaDataOptions::PROFILE_HASH, self.profile_hash.is_some());
        options.set(MetaDataOptions::APP_TOKEN, self.application_token.is_some());
        options
    }
}

/// Metadata extension as sent by endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetaDataClientSync {
    /// Request id, echoed in the response.
    pub request_id: i32,
    /// Optional metadata fields.
    pub meta_data: ClientSyncMetaData,
}

impl ClientExtension for MetaDataClientSync {
    const EXTENSION: ExtensionType = ExtensionType::MetaData;

    fn decode_payload(payload: &mut Cursor<'_>, options: u8) -> Result<Self, DecodeError> {
        let options = MetaDataOptions::from_bits_retain(options);
        let request_id = payload.read_i32()?;
        let mut meta_data = ClientSyncMetaData::default();

        if options.contains(MetaDataOptions::TIMEOUT) {
            meta_data.timeout = Some(i64::from(payload.read_i32()?));
        }
        if options.contains(MetaDataOptions::KEY_HASH) {
            meta_data.endpoint_public_key_hash = Some(EndpointKeyHash::read(payload)?);
        }
        if options.contains(MetaDataOptions::PROFILE_HASH) {
            meta_data.profile_hash = Some(payload.read_array()?);
        }
        if options.contains(MetaDataOptions::APP_TOKEN) {
            let mut token = payload.read_padded_utf8(APP_TOKEN_SIZE)?;
            token.truncate(token.trim_end_matches('\0').len());
            meta_data.application_token = Some(token);
        }

        Ok(Self {
            request_id,
            meta_data,
        })
    }

    fn options(&self) -> u8 {
        self.meta_data.presence_options().bits()
    }

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        buf.put_i32(self.request_id);
        let meta = &self.meta_data;
        if let Some(timeout) = meta.timeout {
            let clamped = timeout.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
            if clamped != timeout {
                warn!(timeout, "timeout does not fit in i32, clamping");
            }
            buf.put_i32(clamped as i32);
        }
        if let Some(ref hash) = meta.endpoint_public_key_hash {
            hash.write(buf);
        }
        if let Some(ref hash) = meta.profile_hash {
            buf.put_bytes(hash);
        }
        if let Some(ref token) = meta.application_token {
            let fitted = fit_str(token, APP_TOKEN_SIZE);
            if fitted.len() < token.len() {
                warn!(len = token.len(), "application token longer than 20 bytes, truncating");
            }
            buf.put_fixed(fitted.as_bytes(), APP_TOKEN_SIZE);
        }
    }
}

/// Metadata extension as sent by servers: the echoed request id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetaDataServerSync {
    /// Request id of the client sync being answered.
    pub request_id: i32,
}

impl ServerExtension for MetaDataServerSync {
    const EXTENSION: ExtensionType = ExtensionType::MetaData;

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        buf.put_i32(self.request_id);
    }
}
