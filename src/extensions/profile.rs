//! Profile extension (id 2)
//!
//! Client wire format:
//! ```text
//! +0  Profile body length (4 bytes BE32)
//! +4  Profile body (padded)
//! +N  Fields until end of payload, each:
//!     Field ID (1) | Reserved (1) | field data
//! ```
//!
//! | ID | Field                       | Data                                        |
//! |----|-----------------------------|---------------------------------------------|
//! | 0  | configuration schema version| u16                                         |
//! | 1  | profile schema version      | u16                                         |
//! | 2  | system notification version | u16                                         |
//! | 3  | user notification version   | u16                                         |
//! | 4  | log schema version          | u16                                         |
//! | 5  | event family versions       | count u16, count × {version u16, name str16}|
//! | 6  | endpoint public key         | length u16, bytes (padded)                  |
//! | 7  | endpoint access token       | str16                                       |
//!
//! `str16` is a u16 byte length followed by padded UTF-8.
//!
//! Server wire format: no payload; option bit `RESYNC` asks the endpoint to
//! resend its profile.

use crate::core::{ClientExtension, CodecConfig, DecodeError, NOTHING, ServerExtension};
use crate::frame::{ExtensionType, ProfileServerOptions};
use crate::sync::SyncResponseStatus;
use crate::wire::{Cursor, LenWidth, WriteBuffer};

/// Profile client sync field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum ProfileField {
    ConfSchemaVersion = 0,
    ProfileSchemaVersion = 1,
    SystemNfSchemaVersion = 2,
    UserNfSchemaVersion = 3,
    LogSchemaVersion = 4,
    EventFamilyVersions = 5,
    PublicKey = 6,
    AccessToken = 7,
}

impl ProfileField {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::ConfSchemaVersion),
            1 => Some(Self::ProfileSchemaVersion),
            2 => Some(Self::SystemNfSchemaVersion),
            3 => Some(Self::UserNfSchemaVersion),
            4 => Some(Self::LogSchemaVersion),
            5 => Some(Self::EventFamilyVersions),
            6 => Some(Self::PublicKey),
            7 => Some(Self::AccessToken),
            _ => None,
        }
    }

    fn write_tag(self, buf: &mut WriteBuffer) {
        buf.put_u8(self as u8);
        buf.put_u8(NOTHING);
    }
}

/// Version of an event class family supported by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventClassFamilyVersionInfo {
    /// Event class family name.
    pub name: String,
    /// Family version.
    pub version: u16,
}

/// Schema versions the endpoint was built against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EndpointVersionInfo {
    /// Configuration schema version.
    pub config_version: Option<u16>,
    /// Profile schema version.
    pub profile_version: Option<u16>,
    /// System notification schema version.
    pub system_nf_version: Option<u16>,
    /// User notification schema version.
    pub user_nf_version: Option<u16>,
    /// Log schema version.
    pub log_schema_version: Option<u16>,
    /// Supported event class family versions.
    pub event_family_versions: Option<Vec<EventClassFamilyVersionInfo>>,
}

/// Profile extension as sent by endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileClientSync {
    /// Schema-encoded profile, opaque to the codec.
    pub profile_body: Vec<u8>,
    /// Schema versions.
    pub version_info: EndpointVersionInfo,
    /// Endpoint public key (sent on registration).
    pub endpoint_public_key: Option<Vec<u8>>,
    /// Endpoint access token.
    pub endpoint_access_token: Option<String>,
}

fn decode_event_family_versions(
    payload: &mut Cursor<'_>,
) -> Result<Vec<EventClassFamilyVersionInfo>, DecodeError> {
    let count = payload.read_u16()?;
    let mut versions = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let version = payload.read_u16()?;
        let name = payload.read_short_utf8()?;
        versions.push(EventClassFamilyVersionInfo { name, version });
    }
    Ok(versions)
}

impl ClientExtension for ProfileClientSync {
    const EXTENSION: ExtensionType = ExtensionType::Profile;

    fn decode_payload(payload: &mut Cursor<'_>, _options: u8) -> Result<Self, DecodeError> {
        let body_length = payload.read_length()?;
        let mut sync = Self {
            profile_body: payload.read_padded(body_length)?.to_vec(),
            ..Self::default()
        };

        while !payload.is_empty() {
            let field_id = payload.read_u8()?;
            let _reserved = payload.read_u8()?;
            let field = ProfileField::from_byte(field_id).ok_or(DecodeError::MalformedField {
                extension: Self::EXTENSION,
                field_id,
            })?;
            let info = &mut sync.version_info;
            match field {
                ProfileField::ConfSchemaVersion => info.config_version = Some(payload.read_u16()?),
                ProfileField::ProfileSchemaVersion => {
                    info.profile_version = Some(payload.read_u16()?)
                }
                ProfileField::SystemNfSchemaVersion => {
                    info.system_nf_version = Some(payload.read_u16()?)
                }
                ProfileField::UserNfSchemaVersion => info.user_nf_version = Some(payload.read_u16()?),
                ProfileField::LogSchemaVersion => {
                    info.log_schema_version = Some(payload.read_u16()?)
                }
                ProfileField::EventFamilyVersions => {
                    info.event_family_versions = Some(decode_event_family_versions(payload)?)
                }
                ProfileField::PublicKey => {
                    let len = payload.read_u16()? as usize;
                    sync.endpoint_public_key = Some(payload.read_padded(len)?.to_vec());
                }
                ProfileField::AccessToken => {
                    sync.endpoint_access_token = Some(payload.read_short_utf8()?)
                }
            }
        }

        Ok(sync)
    }

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        let body = buf.put_len(LenWidth::I32, &self.profile_body, "profile body");
        buf.put_padded(body);

        let info = &self.version_info;
        let versions = [
            (ProfileField::ConfSchemaVersion, info.config_version),
            (ProfileField::ProfileSchemaVersion, info.profile_version),
            (ProfileField::SystemNfSchemaVersion, info.system_nf_version),
            (ProfileField::UserNfSchemaVersion, info.user_nf_version),
            (ProfileField::LogSchemaVersion, info.log_schema_version),
        ];
        for (field, version) in versions {
            if let Some(version) = version {
                field.write_tag(buf);
                buf.put_u16(version);
            }
        }

        if let Some(ref families) = info.event_family_versions {
            ProfileField::EventFamilyVersions.write_tag(buf);
            for family in buf.put_len(LenWidth::U16, families, "event family versions") {
                buf.put_u16(family.version);
                let name = buf.put_str_len(LenWidth::U16, &family.name, "event family name");
                buf.put_padded(name.as_bytes());
            }
        }

        if let Some(ref key) = self.endpoint_public_key {
            ProfileField::PublicKey.write_tag(buf);
            let key = buf.put_len(LenWidth::U16, key, "endpoint public key");
            buf.put_padded(key);
        }

        if let Some(ref token) = self.endpoint_access_token {
            ProfileField::AccessToken.write_tag(buf);
            let token = buf.put_str_len(LenWidth::U16, token, "endpoint access token");
            buf.put_padded(token.as_bytes());
        }
    }
}

/// Profile extension as sent by servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileServerSync {
    /// Whether the endpoint must resend its profile.
    pub response_status: SyncResponseStatus,
}

impl ServerExtension for ProfileServerSync {
    const EXTENSION: ExtensionType = ExtensionType::Profile;

    fn options(&self, _config: &CodecConfig) -> u8 {
        let mut options = ProfileServerOptions::empty();
        options.set(
            ProfileServerOptions::RESYNC,
            self.response_status == SyncResponseStatus::Resync,
        );
        options.bits()
    }

    fn encode_payload(&self, _buf: &mut WriteBuffer) {}
}
