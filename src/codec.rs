//! Top-level binary codec.
//!
//! Message layout:
//! ```text
//! +0  Header (8 bytes, see [`MessageHeader`])
//! +8  Extension count × extension frame (see [`ExtensionFrame`])
//! ```
//!
//! Encoding writes the metadata extension first, then each populated
//! extension in a fixed order, and back-patches the header's extension
//! count. Decoding dispatches each frame by type id; unknown ids are skipped
//! by their declared length.

use tracing::{debug, trace};

use crate::core::{
    BINARY_PROTOCOL_ID, ClientExtension, CodecConfig, DecodeError, PlatformCodec, ServerExtension,
};
use crate::frame::{
    ExtensionFrame, ExtensionType, MessageHeader, write_client_extension, write_server_extension,
};
use crate::sync::{ClientSync, ClientSyncBuilder, ServerSync};
use crate::wire::{Cursor, WriteBuffer};

/// Binary platform protocol codec.
///
/// Immutable after construction; one instance can serve any number of
/// threads.
#[derive(Debug, Clone, Default)]
pub struct BinaryCodec {
    config: CodecConfig,
}

fn write_server_optional<E: ServerExtension>(
    buf: &mut WriteBuffer,
    extension: Option<&E>,
    config: &CodecConfig,
) -> u16 {
    extension.map_or(0, |extension| {
        write_server_extension(buf, extension, config);
        1
    })
}

fn write_client_optional<E: ClientExtension>(buf: &mut WriteBuffer, extension: Option<&E>) -> u16 {
    extension.map_or(0, |extension| {
        write_client_extension(buf, extension);
        1
    })
}

impl BinaryCodec {
    /// Create a codec with the default (legacy wire compatible) config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with a custom config.
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get the codec config.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Identifier of this codec among the platform protocols.
    pub fn protocol_id(&self) -> u32 {
        BINARY_PROTOCOL_ID
    }

    /// Decode a client sync message.
    ///
    /// Fails on the first malformed header, frame or field; no partial
    /// result is returned. Bytes after the last declared extension are
    /// ignored.
    pub fn decode(&self, data: &[u8]) -> Result<ClientSync, DecodeError> {
        let mut cursor = Cursor::new(data);
        let header = MessageHeader::decode(&mut cursor)?;
        trace!(
            len = data.len(),
            version = header.version,
            extensions = header.extension_count,
            "decoding client sync"
        );

        let mut builder = ClientSyncBuilder::new();
        for _ in 0..header.extension_count {
            let frame = ExtensionFrame::read(&mut cursor)?;
            match frame.extension_type() {
                Some(ExtensionType::MetaData) => {
                    builder.meta_data(frame.decode()?);
                }
                Some(ExtensionType::Profile) => {
                    builder.profile(frame.decode()?);
                }
                Some(ExtensionType::User) => {
                    builder.user(frame.decode()?);
                }
                Some(ExtensionType::Logging) => {
                    builder.logging(frame.decode()?);
                }
                Some(ExtensionType::Configuration) => {
                    builder.configuration(frame.decode()?);
                }
                Some(ExtensionType::Notification) => {
                    builder.notification(frame.decode()?);
                }
                Some(ExtensionType::Event) => {
                    builder.event(frame.decode()?);
                }
                Some(ExtensionType::Redirect) | None => {
                    debug!(
                        type_id = frame.type_id,
                        offset = frame.offset,
                        length = frame.payload.len(),
                        "skipping unknown extension"
                    );
                }
            }
        }

        if !cursor.is_empty() {
            trace!(trailing = cursor.remaining(), "ignoring bytes after last extension");
        }

        let sync = builder.build()?;
        trace!(request_id = sync.request_id, "decoded client sync");
        Ok(sync)
    }

    /// Encode a server sync message.
    ///
    /// Lengths and counts too large for their wire field are truncated with
    /// a warning; encoding never fails.
    pub fn encode(&self, sync: &ServerSync) -> Vec<u8> {
        let config = &self.config;
        let mut buf = WriteBuffer::with_capacity(config.initial_capacity);
        let count_patch = MessageHeader::begin(&mut buf);

        write_server_extension(&mut buf, &sync.meta_data_sync(), config);
        let count = 1
            + write_server_optional(&mut buf, sync.profile_sync.as_ref(), config)
            + write_server_optional(&mut buf, sync.user_sync.as_ref(), config)
            + write_server_optional(&mut buf, sync.log_sync.as_ref(), config)
            + write_server_optional(&mut buf, sync.configuration_sync.as_ref(), config)
            + write_server_optional(&mut buf, sync.notification_sync.as_ref(), config)
            + write_server_optional(&mut buf, sync.event_sync.as_ref(), config)
            + write_server_optional(&mut buf, sync.redirect_sync.as_ref(), config);
        buf.patch(count_patch, count);

        trace!(
            request_id = sync.request_id,
            extensions = count,
            len = buf.position(),
            "encoded server sync"
        );
        buf.into_bytes()
    }

    /// Encode a client sync message in the layout [`decode`](Self::decode)
    /// reads.
    pub fn encode_client_sync(&self, sync: &ClientSync) -> Vec<u8> {
        let mut buf = WriteBuffer::with_capacity(self.config.initial_capacity);
        let count_patch = MessageHeader::begin(&mut buf);

        write_client_extension(&mut buf, &sync.meta_data_sync());
        let count = 1
            + write_client_optional(&mut buf, sync.profile_sync.as_ref())
            + write_client_optional(&mut buf, sync.user_sync.as_ref())
            + write_client_optional(&mut buf, sync.log_sync.as_ref())
            + write_client_optional(&mut buf, sync.configuration_sync.as_ref())
            + write_client_optional(&mut buf, sync.notification_sync.as_ref())
            + write_client_optional(&mut buf, sync.event_sync.as_ref());
        buf.patch(count_patch, count);

        trace!(
            request_id = sync.request_id,
            extensions = count,
            len = buf.position(),
            "encoded client sync"
        );
        buf.into_bytes()
    }
}

impl PlatformCodec for BinaryCodec {
    fn protocol_id(&self) -> u32 {
        BinaryCodec::protocol_id(self)
    }

    fn decode(&self, data: &[u8]) -> Result<ClientSync, DecodeError> {
        BinaryCodec::decode(self, data)
    }

    fn encode(&self, sync: &ServerSync) -> Vec<u8> {
        BinaryCodec::encode(self, sync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{APP_TOKEN_SIZE, EXTENSION_COUNT_OFFSET, HEADER_PROTOCOL_ID};
    use crate::extensions::*;
    use crate::sync::{
        EndpointKeyHash, NotificationType, SubscriptionCommandType, SubscriptionType,
        SyncResponseStatus, SyncStatus,
    };
    use crate::wire::{LenWidth, fit_str};
    use proptest::prelude::*;

    const METADATA_7: &str = "f291f2d4 0001 0001 01000000 00000004 00000007";

    fn bytes(s: &str) -> Vec<u8> {
        hex::decode(s.replace(' ', "")).unwrap()
    }

    fn message(extensions: &[&str]) -> Vec<u8> {
        let mut data = HEADER_PROTOCOL_ID.to_be_bytes().to_vec();
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&(extensions.len() as u16).to_be_bytes());
        for extension in extensions {
            data.extend(bytes(extension));
        }
        data
    }

    fn full_client_sync() -> ClientSync {
        ClientSync {
            request_id: 77,
            meta_data: ClientSyncMetaData {
                timeout: Some(60_000),
                endpoint_public_key_hash: Some(EndpointKeyHash::from_bytes([1; 20])),
                profile_hash: Some([2; 20]),
                application_token: Some("12345678901234567890".to_string()),
            },
            profile_sync: Some(ProfileClientSync {
                profile_body: b"profile".to_vec(),
                version_info: EndpointVersionInfo {
                    config_version: Some(1),
                    profile_version: Some(2),
                    system_nf_version: None,
                    user_nf_version: Some(4),
                    log_schema_version: None,
                    event_family_versions: Some(vec![EventClassFamilyVersionInfo {
                        name: "family".to_string(),
                        version: 3,
                    }]),
                },
                endpoint_public_key: Some(vec![0x30; 9]),
                endpoint_access_token: Some("access".to_string()),
            }),
            user_sync: Some(UserClientSync {
                user_attach_request: Some(UserAttachRequest {
                    user_external_id: "ext".to_string(),
                    user_access_token: "tok".to_string(),
                }),
                endpoint_attach_requests: None,
                endpoint_detach_requests: Some(vec![EndpointDetachRequest {
                    request_id: 4,
                    endpoint_key_hash: EndpointKeyHash::from_bytes([4; 20]),
                }]),
            }),
            log_sync: Some(LogClientSync {
                request_id: 2,
                log_entries: vec![LogEntry(vec![1, 2, 3])],
            }),
            configuration_sync: Some(ConfigurationClientSync {
                app_state_seq_number: 10,
                configuration_hash: Some([5; 20]),
            }),
            notification_sync: Some(NotificationClientSync {
                app_state_seq_number: 10,
                topic_list_hash: [6; 20],
                topic_states: Some(vec![TopicState {
                    topic_id: 99,
                    seq_number: 1,
                }]),
                accepted_unicast_notifications: None,
                subscription_commands: Some(vec![SubscriptionCommand {
                    topic_id: 3,
                    command: SubscriptionCommandType::Remove,
                }]),
            }),
            event_sync: Some(EventClientSync {
                seq_number_request: true,
                event_listeners_requests: None,
                events: Some(vec![Event {
                    seq_num: 1,
                    event_class_fqn: "org.example.Event".to_string(),
                    data: vec![0xEE; 6],
                    source: None,
                    target: None,
                }]),
            }),
        }
    }

    #[test]
    fn test_decode_metadata_only() {
        let sync = BinaryCodec::new().decode(&bytes(METADATA_7)).unwrap();
        assert_eq!(sync.request_id, 7);
        assert_eq!(sync.meta_data, ClientSyncMetaData::default());
        assert!(sync.profile_sync.is_none());
    }

    #[test]
    fn test_decode_header_too_small() {
        assert_eq!(
            BinaryCodec::new().decode(&[0xf2, 0x91, 0xf2, 0xd4, 0, 1]),
            Err(DecodeError::HeaderTooSmall { actual: 6 })
        );
    }

    #[test]
    fn test_decode_unknown_protocol_id() {
        assert_eq!(
            BinaryCodec::new().decode(&bytes("deadbeef00010000")),
            Err(DecodeError::UnknownProtocolId(0xdead_beef))
        );
    }

    #[test]
    fn test_decode_unsupported_version() {
        assert_eq!(
            BinaryCodec::new().decode(&bytes("f291f2d400020000")),
            Err(DecodeError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn test_decode_missing_metadata() {
        let data = message(&["05000000 00000004 00000003"]);
        assert_eq!(
            BinaryCodec::new().decode(&data),
            Err(DecodeError::MissingMetadata)
        );
    }

    #[test]
    fn test_decode_profile_unknown_field() {
        let data = message(&[
            "01000000 00000004 00000001",
            "02000000 00000008 00000000 0900 0000",
        ]);
        assert_eq!(
            BinaryCodec::new().decode(&data),
            Err(DecodeError::MalformedField {
                extension: ExtensionType::Profile,
                field_id: 9,
            })
        );
    }

    #[test]
    fn test_decode_skips_unknown_extensions() {
        let data = message(&[
            "2a000000 00000006 010203040506",
            "01000000 00000004 00000009",
            "08000000 00000004 12345678",
            "05000000 00000004 00000003",
        ]);
        let sync = BinaryCodec::new().decode(&data).unwrap();
        assert_eq!(sync.request_id, 9);
        assert_eq!(sync.configuration_sync.unwrap().app_state_seq_number, 3);
    }

    #[test]
    fn test_decode_count_exceeds_frames() {
        let mut data = bytes(METADATA_7);
        data[EXTENSION_COUNT_OFFSET + 1] = 2;
        assert_eq!(
            BinaryCodec::new().decode(&data),
            Err(DecodeError::ExtensionHeaderTooSmall {
                available: 0,
                position: 20,
            })
        );
    }

    #[test]
    fn test_decode_payload_beyond_message() {
        let data = message(&["01000000 00000010 00000007"]);
        assert_eq!(
            BinaryCodec::new().decode(&data),
            Err(DecodeError::ExtensionPayloadTooSmall {
                available: 4,
                expected: 16,
                position: 16,
            })
        );
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut data = bytes(METADATA_7);
        data.extend_from_slice(&[0xFF; 3]);
        assert_eq!(BinaryCodec::new().decode(&data).unwrap().request_id, 7);
    }

    #[test]
    fn test_decode_field_cannot_overrun_payload() {
        // Configuration claims a hash but its declared payload ends first;
        // the metadata frame after it must not be consumed as hash bytes.
        let data = message(&[
            "05000002 00000004 00000003",
            "01000000 00000004 00000001",
            "00000000 00000000 00000000 00000000",
        ]);
        assert_eq!(
            BinaryCodec::new().decode(&data),
            Err(DecodeError::Truncated {
                needed: 20,
                available: 0,
            })
        );
    }

    #[test]
    fn test_encode_metadata_only() {
        let encoded = BinaryCodec::new().encode(&ServerSync::new(5));
        assert_eq!(encoded.len(), 20);
        assert_eq!(
            encoded,
            bytes("f291f2d4 0001 0001 01000000 00000004 00000005")
        );
        assert_eq!(
            u16::from_be_bytes([encoded[EXTENSION_COUNT_OFFSET], encoded[EXTENSION_COUNT_OFFSET + 1]]),
            1
        );
    }

    #[test]
    fn test_encode_extension_order_and_count() {
        let sync = ServerSync {
            request_id: 1,
            profile_sync: Some(ProfileServerSync {
                response_status: SyncResponseStatus::Resync,
            }),
            user_sync: Some(UserServerSync {
                user_attach_response: Some(UserAttachResponse {
                    result: SyncStatus::Success,
                }),
                ..Default::default()
            }),
            log_sync: Some(LogServerSync {
                request_id: 1,
                result: SyncStatus::Success,
            }),
            configuration_sync: Some(ConfigurationServerSync {
                app_state_seq_number: 2,
                ..Default::default()
            }),
            notification_sync: Some(NotificationServerSync {
                app_state_seq_number: 2,
                notifications: Some(vec![Notification {
                    seq_number: 1,
                    notification_type: NotificationType::Custom,
                    uid: Some("id".to_string()),
                    body: vec![1],
                    topic_id: None,
                }]),
                available_topics: Some(vec![Topic {
                    id: 1,
                    name: "t".to_string(),
                    subscription_type: SubscriptionType::Mandatory,
                }]),
            }),
            event_sync: Some(EventServerSync {
                event_sequence_number_response: Some(8),
                ..Default::default()
            }),
            redirect_sync: Some(RedirectServerSync::new("host")),
        };
        let encoded = BinaryCodec::with_config(CodecConfig::corrected()).encode(&sync);
        let mut cursor = Cursor::new(&encoded);
        let header = MessageHeader::decode(&mut cursor).unwrap();
        assert_eq!(header.extension_count, 8);
        assert_eq!(header.extension_count as usize, sync.extension_count());

        let mut ids = Vec::new();
        while !cursor.is_empty() {
            ids.push(ExtensionFrame::read(&mut cursor).unwrap().type_id);
        }
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_encode_legacy_ids() {
        let sync = ServerSync {
            log_sync: Some(LogServerSync::default()),
            redirect_sync: Some(RedirectServerSync::new("host")),
            ..ServerSync::new(3)
        };
        let encoded = BinaryCodec::new().encode(&sync);
        let mut cursor = Cursor::new(&encoded);
        MessageHeader::decode(&mut cursor).unwrap();
        let ids: Vec<u8> = (0..3)
            .map(|_| ExtensionFrame::read(&mut cursor).unwrap().type_id)
            .collect();
        assert_eq!(ids, vec![1, 3, 7]);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_client_sync_roundtrip() {
        let codec = BinaryCodec::new();
        let sync = full_client_sync();
        let encoded = codec.encode_client_sync(&sync);
        assert_eq!(u16::from_be_bytes([encoded[6], encoded[7]]), 7);
        assert_eq!(codec.decode(&encoded).unwrap(), sync);
    }

    #[test]
    fn test_platform_codec_dispatch() {
        let codecs: Vec<Box<dyn PlatformCodec>> = vec![Box::new(BinaryCodec::new())];
        let codec = codecs
            .iter()
            .find(|c| c.protocol_id() == BINARY_PROTOCOL_ID)
            .unwrap();
        assert_eq!(codec.decode(&bytes(METADATA_7)).unwrap().request_id, 7);
        assert_eq!(codec.encode(&ServerSync::new(7)).len(), 20);
    }

    #[test]
    fn test_codec_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BinaryCodec>();
    }

    fn key_hash() -> impl Strategy<Value = EndpointKeyHash> {
        any::<[u8; 20]>().prop_map(EndpointKeyHash::from_bytes)
    }

    fn meta_data() -> impl Strategy<Value = ClientSyncMetaData> {
        (
            prop::option::of(any::<i32>()),
            prop::option::of(key_hash()),
            prop::option::of(any::<[u8; 20]>()),
            prop::option::of("[a-z0-9é€]{0,24}"),
        )
            .prop_map(|(timeout, key_hash, profile_hash, token)| ClientSyncMetaData {
                timeout: timeout.map(i64::from),
                endpoint_public_key_hash: key_hash,
                profile_hash,
                application_token: token,
            })
    }

    fn profile() -> impl Strategy<Value = ProfileClientSync> {
        let family = ("\\PC{0,12}", any::<u16>())
            .prop_map(|(name, version)| EventClassFamilyVersionInfo { name, version });
        (
            prop::collection::vec(any::<u8>(), 0..24),
            prop::collection::vec(prop::option::of(any::<u16>()), 5),
            prop::option::of(prop::collection::vec(family, 0..3)),
            prop::option::of(prop::collection::vec(any::<u8>(), 0..24)),
            prop::option::of("\\PC{0,16}"),
        )
            .prop_map(|(profile_body, versions, families, public_key, token)| {
                ProfileClientSync {
                    profile_body,
                    version_info: EndpointVersionInfo {
                        config_version: versions[0],
                        profile_version: versions[1],
                        system_nf_version: versions[2],
                        user_nf_version: versions[3],
                        log_schema_version: versions[4],
                        event_family_versions: families,
                    },
                    endpoint_public_key: public_key,
                    endpoint_access_token: token,
                }
            })
    }

    fn user() -> impl Strategy<Value = UserClientSync> {
        // External ids run past their one-byte length.
        let attach = ("\\PC{0,100}", "\\PC{0,16}").prop_map(|(external_id, token)| {
            UserAttachRequest {
                user_external_id: external_id,
                user_access_token: token,
            }
        });
        let endpoint_attach = (any::<u16>(), "\\PC{0,16}").prop_map(|(request_id, token)| {
            EndpointAttachRequest {
                request_id,
                endpoint_access_token: token,
            }
        });
        let endpoint_detach = (any::<u16>(), key_hash()).prop_map(|(request_id, key_hash)| {
            EndpointDetachRequest {
                request_id,
                endpoint_key_hash: key_hash,
            }
        });
        (
            prop::option::of(attach),
            prop::option::of(prop::collection::vec(endpoint_attach, 0..3)),
            prop::option::of(prop::collection::vec(endpoint_detach, 0..3)),
        )
            .prop_map(|(attach, endpoint_attach, endpoint_detach)| UserClientSync {
                user_attach_request: attach,
                endpoint_attach_requests: endpoint_attach,
                endpoint_detach_requests: endpoint_detach,
            })
    }

    fn logging() -> impl Strategy<Value = LogClientSync> {
        let entry = prop::collection::vec(any::<u8>(), 0..12).prop_map(LogEntry);
        (any::<u16>(), prop::collection::vec(entry, 0..4)).prop_map(|(request_id, log_entries)| {
            LogClientSync {
                request_id,
                log_entries,
            }
        })
    }

    fn configuration() -> impl Strategy<Value = ConfigurationClientSync> {
        (any::<i32>(), prop::option::of(any::<[u8; 20]>())).prop_map(|(seq, hash)| {
            ConfigurationClientSync {
                app_state_seq_number: seq,
                configuration_hash: hash,
            }
        })
    }

    fn notification() -> impl Strategy<Value = NotificationClientSync> {
        let state = (any::<i64>(), any::<i32>()).prop_map(|(topic_id, seq_number)| TopicState {
            topic_id,
            seq_number,
        });
        let command = (any::<i64>(), any::<bool>()).prop_map(|(topic_id, add)| SubscriptionCommand {
            topic_id,
            command: if add {
                SubscriptionCommandType::Add
            } else {
                SubscriptionCommandType::Remove
            },
        });
        (
            any::<i32>(),
            any::<[u8; 20]>(),
            prop::option::of(prop::collection::vec(state, 0..3)),
            prop::option::of(prop::collection::vec("\\PC{0,12}", 0..3)),
            prop::option::of(prop::collection::vec(command, 0..6)),
        )
            .prop_map(|(seq, hash, states, uids, commands)| NotificationClientSync {
                app_state_seq_number: seq,
                topic_list_hash: hash,
                topic_states: states,
                accepted_unicast_notifications: uids,
                subscription_commands: commands,
            })
    }

    fn event() -> impl Strategy<Value = EventClientSync> {
        let request = (any::<u16>(), prop::collection::vec("[a-z.]{0,20}", 0..3)).prop_map(
            |(request_id, event_class_fqns)| EventListenersRequest {
                request_id,
                event_class_fqns,
            },
        );
        let event = (
            any::<i32>(),
            "[a-zA-Z.]{0,24}",
            prop::collection::vec(any::<u8>(), 0..12),
            prop::option::of(key_hash()),
        )
            .prop_map(|(seq_num, event_class_fqn, data, target)| Event {
                seq_num,
                event_class_fqn,
                data,
                source: None,
                target,
            });
        (
            any::<bool>(),
            prop::option::of(prop::collection::vec(request, 0..3)),
            prop::option::of(prop::collection::vec(event, 0..3)),
        )
            .prop_map(|(seq_number_request, requests, events)| EventClientSync {
                seq_number_request,
                event_listeners_requests: requests,
                events,
            })
    }

    fn client_sync() -> impl Strategy<Value = ClientSync> {
        (
            any::<i32>(),
            meta_data(),
            prop::option::of(profile()),
            prop::option::of(user()),
            prop::option::of(logging()),
            prop::option::of(configuration()),
            prop::option::of(notification()),
            prop::option::of(event()),
        )
            .prop_map(
                |(request_id, meta_data, profile, user, log, configuration, notification, event)| {
                    ClientSync {
                        request_id,
                        meta_data,
                        profile_sync: profile,
                        user_sync: user,
                        log_sync: log,
                        configuration_sync: configuration,
                        notification_sync: notification,
                        event_sync: event,
                    }
                },
            )
    }

    /// What `sync` decodes to after a mirror encode: values longer than
    /// their wire field are cut to it.
    fn fitted(mut sync: ClientSync) -> ClientSync {
        if let Some(token) = sync.meta_data.application_token.as_mut() {
            let cut = fit_str(token, APP_TOKEN_SIZE).to_string();
            *token = cut;
        }
        let attach = sync
            .user_sync
            .as_mut()
            .and_then(|user| user.user_attach_request.as_mut());
        if let Some(request) = attach {
            let cut = fit_str(&request.user_external_id, LenWidth::U8.max()).to_string();
            request.user_external_id = cut;
        }
        sync
    }

    #[test]
    fn test_fitted_cuts_over_long_values() {
        let mut sync = ClientSync::new(
            1,
            ClientSyncMetaData {
                application_token: Some("€".repeat(8)),
                ..Default::default()
            },
        );
        sync.user_sync = Some(UserClientSync {
            user_attach_request: Some(UserAttachRequest {
                user_external_id: "x".repeat(300),
                user_access_token: String::new(),
            }),
            ..Default::default()
        });
        let codec = BinaryCodec::new();
        let decoded = codec.decode(&codec.encode_client_sync(&sync)).unwrap();
        assert_eq!(decoded, fitted(sync));
        assert_eq!(decoded.meta_data.application_token, Some("€".repeat(6)));
    }

    proptest! {
        #[test]
        fn client_sync_mirror_roundtrip(sync in client_sync()) {
            let codec = BinaryCodec::new();
            let encoded = codec.encode_client_sync(&sync);
            prop_assert_eq!(encoded.len() % 4, 0);
            prop_assert_eq!(codec.decode(&encoded).unwrap(), fitted(sync));
        }

        #[test]
        fn decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = BinaryCodec::new().decode(&data);
        }

        #[test]
        fn decode_with_valid_header_never_panics(
            count in 0u16..8,
            body in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let mut data = HEADER_PROTOCOL_ID.to_be_bytes().to_vec();
            data.extend_from_slice(&1u16.to_be_bytes());
            data.extend_from_slice(&count.to_be_bytes());
            data.extend(body);
            let _ = BinaryCodec::new().decode(&data);
        }

        #[test]
        fn metadata_roundtrip(request_id in any::<i32>(), timeout in proptest::option::of(any::<i32>())) {
            let codec = BinaryCodec::new();
            let sync = ClientSync::new(
                request_id,
                ClientSyncMetaData {
                    timeout: timeout.map(i64::from),
                    ..Default::default()
                },
            );
            let encoded = codec.encode_client_sync(&sync);
            prop_assert_eq!(encoded.len() % 4, 0);
            prop_assert_eq!(codec.decode(&encoded).unwrap(), sync);
        }
    }
}
