//! User extension (id 3)
//!
//! Attaches endpoints to users and to each other. Client and server payloads
//! are both a sequence of tagged fields running to the end of the payload.
//!
//! Client fields:
//! ```text
//! 0  User attach:       ExtID len (1) | Token len (2) | ExtID (padded) | Token (padded)
//! 1  Endpoint attach:   Reserved (1) | Count (2) | Count × {Request ID (2) | Token str16}
//! 2  Endpoint detach:   Reserved (1) | Count (2) | Count × {Request ID (2) | Reserved (2) | Key hash (20)}
//! ```
//!
//! Server fields, written in this order when present:
//! ```text
//! 0  Attach response:     Reserved (1) | Result (1) | Reserved (1)
//! 1  Attach notification: ExtID len (1) | Token len (2) | ExtID (padded) | Token (padded)
//! 2  Detach notification: Reserved (1) | Token len (2) | Token (padded)
//! 3  Endpoint attach:     Reserved (1) | Count (2) | Count × {Result (1) | Flags (1) | Request ID (2) | [Key hash (padded)]}
//! 4  Endpoint detach:     Reserved (1) | Count (2) | Count × {Result (1) | Reserved (1) | Request ID (2)}
//! ```

use crate::core::{ClientExtension, DecodeError, NOTHING, ServerExtension};
use crate::frame::{AttachResponseOptions, ExtensionType};
use crate::sync::{EndpointKeyHash, SyncStatus};
use crate::wire::{Cursor, LenWidth, WriteBuffer};

/// User client sync field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum UserClientField {
    UserAttach = 0,
    EndpointAttach = 1,
    EndpointDetach = 2,
}

impl UserClientField {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::UserAttach),
            1 => Some(Self::EndpointAttach),
            2 => Some(Self::EndpointDetach),
            _ => None,
        }
    }
}

/// User server sync field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum UserServerField {
    AttachResponse = 0,
    AttachNotification = 1,
    DetachNotification = 2,
    EndpointAttachResponses = 3,
    EndpointDetachResponses = 4,
}

/// Request to attach the endpoint to a user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserAttachRequest {
    /// User id in the external identity system.
    pub user_external_id: String,
    /// Token proving the user's identity.
    pub user_access_token: String,
}

/// Request to attach another endpoint to the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointAttachRequest {
    /// Request id, echoed in the response.
    pub request_id: u16,
    /// Access token of the endpoint to attach.
    pub endpoint_access_token: String,
}

/// Request to detach an endpoint from the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDetachRequest {
    /// Request id, echoed in the response.
    pub request_id: u16,
    /// Key hash of the endpoint to detach.
    pub endpoint_key_hash: EndpointKeyHash,
}

/// User extension as sent by endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserClientSync {
    /// User attach request.
    pub user_attach_request: Option<UserAttachRequest>,
    /// Endpoint attach requests.
    pub endpoint_attach_requests: Option<Vec<EndpointAttachRequest>>,
    /// Endpoint detach requests.
    pub endpoint_detach_requests: Option<Vec<EndpointDetachRequest>>,
}

fn decode_user_attach(payload: &mut Cursor<'_>) -> Result<UserAttachRequest, DecodeError> {
    let ext_id_len = payload.read_u8()? as usize;
    let token_len = payload.read_u16()? as usize;
    Ok(UserAttachRequest {
        user_external_id: payload.read_padded_utf8(ext_id_len)?,
        user_access_token: payload.read_padded_utf8(token_len)?,
    })
}

fn decode_attach_requests(
    payload: &mut Cursor<'_>,
) -> Result<Vec<EndpointAttachRequest>, DecodeError> {
    let _reserved = payload.read_u8()?;
    let count = payload.read_u16()?;
    let mut requests = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let request_id = payload.read_u16()?;
        let endpoint_access_token = payload.read_short_utf8()?;
        requests.push(EndpointAttachRequest {
            request_id,
            endpoint_access_token,
        });
    }
    Ok(requests)
}

fn decode_detach_requests(
    payload: &mut Cursor<'_>,
) -> Result<Vec<EndpointDetachRequest>, DecodeError> {
    let _reserved = payload.read_u8()?;
    let count = payload.read_u16()?;
    let mut requests = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let request_id = payload.read_u16()?;
        let _reserved = payload.read_u16()?;
        let endpoint_key_hash = EndpointKeyHash::read(payload)?;
        requests.push(EndpointDetachRequest {
            request_id,
            endpoint_key_hash,
        });
    }
    Ok(requests)
}

impl ClientExtension for UserClientSync {
    const EXTENSION: ExtensionType = ExtensionType::User;

    fn decode_payload(payload: &mut Cursor<'_>, _options: u8) -> Result<Self, DecodeError> {
        let mut sync = Self::default();
        while !payload.is_empty() {
            let field_id = payload.read_u8()?;
            let field = UserClientField::from_byte(field_id).ok_or(DecodeError::MalformedField {
                extension: Self::EXTENSION,
                field_id,
            })?;
            match field {
                UserClientField::UserAttach => {
                    sync.user_attach_request = Some(decode_user_attach(payload)?)
                }
                UserClientField::EndpointAttach => {
                    sync.endpoint_attach_requests = Some(decode_attach_requests(payload)?)
                }
                UserClientField::EndpointDetach => {
                    sync.endpoint_detach_requests = Some(decode_detach_requests(payload)?)
                }
            }
        }
        Ok(sync)
    }

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        if let Some(ref request) = self.user_attach_request {
            buf.put_u8(UserClientField::UserAttach as u8);
            let ext_id =
                buf.put_str_len(LenWidth::U8, &request.user_external_id, "user external id");
            let token =
                buf.put_str_len(LenWidth::U16, &request.user_access_token, "user access token");
            buf.put_padded(ext_id.as_bytes());
            buf.put_padded(token.as_bytes());
        }

        if let Some(ref requests) = self.endpoint_attach_requests {
            buf.put_u8(UserClientField::EndpointAttach as u8);
            buf.put_u8(NOTHING);
            for request in buf.put_len(LenWidth::U16, requests, "endpoint attach requests") {
                buf.put_u16(request.request_id);
                let token = buf.put_str_len(
                    LenWidth::U16,
                    &request.endpoint_access_token,
                    "endpoint access token",
                );
                buf.put_padded(token.as_bytes());
            }
        }

        if let Some(ref requests) = self.endpoint_detach_requests {
            buf.put_u8(UserClientField::EndpointDetach as u8);
            buf.put_u8(NOTHING);
            for request in buf.put_len(LenWidth::U16, requests, "endpoint detach requests") {
                buf.put_u16(request.request_id);
                buf.put_u16(0);
                request.endpoint_key_hash.write(buf);
            }
        }
    }
}

/// Result of a user attach request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserAttachResponse {
    /// Outcome.
    pub result: SyncStatus,
}

/// Tells the endpoint it was attached to a user by another endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserAttachNotification {
    /// User the endpoint is now attached to.
    pub user_external_id: String,
    /// Access token of the endpoint that requested the attach.
    pub endpoint_access_token: String,
}

/// Tells the endpoint it was detached from its user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDetachNotification {
    /// Access token of the endpoint that requested the detach.
    pub endpoint_access_token: String,
}

/// Result of an endpoint attach request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointAttachResponse {
    /// Request id from the matching [`EndpointAttachRequest`].
    pub request_id: u16,
    /// Outcome.
    pub result: SyncStatus,
    /// Encoded key hash of the attached endpoint, on success.
    pub endpoint_key_hash: Option<String>,
}

/// Result of an endpoint detach request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDetachResponse {
    /// Request id from the matching [`EndpointDetachRequest`].
    pub request_id: u16,
    /// Outcome.
    pub result: SyncStatus,
}

/// User extension as sent by servers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserServerSync {
    /// Answer to the user attach request.
    pub user_attach_response: Option<UserAttachResponse>,
    /// Attach performed on behalf of this endpoint.
    pub user_attach_notification: Option<UserAttachNotification>,
    /// Detach performed on behalf of this endpoint.
    pub user_detach_notification: Option<UserDetachNotification>,
    /// Answers to endpoint attach requests.
    pub endpoint_attach_responses: Option<Vec<EndpointAttachResponse>>,
    /// Answers to endpoint detach requests.
    pub endpoint_detach_responses: Option<Vec<EndpointDetachResponse>>,
}

impl ServerExtension for UserServerSync {
    const EXTENSION: ExtensionType = ExtensionType::User;

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        if let Some(response) = self.user_attach_response {
            buf.put_u8(UserServerField::AttachResponse as u8);
            buf.put_u8(NOTHING);
            buf.put_u8(response.result.as_byte());
            buf.put_u8(NOTHING);
        }

        if let Some(ref nf) = self.user_attach_notification {
            buf.put_u8(UserServerField::AttachNotification as u8);
            let ext_id = buf.put_str_len(LenWidth::U8, &nf.user_external_id, "user external id");
            let token =
                buf.put_str_len(LenWidth::U16, &nf.endpoint_access_token, "endpoint access token");
            buf.put_padded(ext_id.as_bytes());
            buf.put_padded(token.as_bytes());
        }

        if let Some(ref nf) = self.user_detach_notification {
            buf.put_u8(UserServerField::DetachNotification as u8);
            buf.put_u8(NOTHING);
            let token =
                buf.put_str_len(LenWidth::U16, &nf.endpoint_access_token, "endpoint access token");
            buf.put_padded(token.as_bytes());
        }

        if let Some(ref responses) = self.endpoint_attach_responses {
            buf.put_u8(UserServerField::EndpointAttachResponses as u8);
            buf.put_u8(NOTHING);
            for response in buf.put_len(LenWidth::U16, responses, "endpoint attach responses") {
                let mut flags = AttachResponseOptions::empty();
                flags.set(
                    AttachResponseOptions::HAS_KEY_HASH,
                    response.endpoint_key_hash.is_some(),
                );
                buf.put_u8(response.result.as_byte());
                buf.put_u8(flags.bits());
                buf.put_u16(response.request_id);
                if let Some(ref key_hash) = response.endpoint_key_hash {
                    buf.put_padded(key_hash.as_bytes());
                }
            }
        }

        if let Some(ref responses) = self.endpoint_detach_responses {
            buf.put_u8(UserServerField::EndpointDetachResponses as u8);
            buf.put_u8(NOTHING);
            for response in buf.put_len(LenWidth::U16, responses, "endpoint detach responses") {
                buf.put_u8(response.result.as_byte());
                buf.put_u8(NOTHING);
                buf.put_u16(response.request_id);
            }
        }
    }
}
