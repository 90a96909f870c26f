//! Notification extension (id 6)
//!
//! Client wire format:
//! ```text
//! +0    App state sequence number (4 bytes BE32)
//! +4    Fields, each: Field ID (1) | Reserved (1) | Count (2) | entries
//! +N-20 Topic list hash (20 bytes)
//! ```
//!
//! | ID | Field                | Entry                                   |
//! |----|----------------------|-----------------------------------------|
//! | 0  | topic states         | topic id (8) | sequence number (4)      |
//! | 1  | accepted unicast ids | length (4) | UTF-8 (padded)             |
//! | 2  | subscribe            | topic id (8)                            |
//! | 3  | unsubscribe          | topic id (8)                            |
//!
//! Server wire format:
//! ```text
//! +0  App state sequence number (4 bytes BE32)
//! +4  [0] Notifications: 0 | 0 | Count (2) | Count × notification
//! +N  [1] Topics:        1 | 0 | Count (2) | Count × topic
//!
//! notification: Seq (4) | Type (1) | 0 | UID len (2) | Body len (4) | Topic ID (8) | UID (padded) | Body (padded)
//! topic:        Topic ID (8) | Subscription type (2) | 0 | Name len (1) | Name (padded)
//! ```

use crate::core::{ClientExtension, DecodeError, NOTHING, ServerExtension, TOPIC_LIST_HASH_SIZE};
use crate::frame::ExtensionType;
use crate::sync::{NotificationType, SubscriptionCommandType, SubscriptionType};
use crate::wire::{Cursor, LenWidth, WriteBuffer};

/// Notification client sync field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum NotificationClientField {
    TopicStates = 0,
    UnicastList = 1,
    SubscriptionAdd = 2,
    SubscriptionRemove = 3,
}

impl NotificationClientField {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::TopicStates),
            1 => Some(Self::UnicastList),
            2 => Some(Self::SubscriptionAdd),
            3 => Some(Self::SubscriptionRemove),
            _ => None,
        }
    }

    fn write_header<'a, T>(self, buf: &mut WriteBuffer, entries: &'a [T]) -> &'a [T] {
        buf.put_u8(self as u8);
        buf.put_u8(NOTHING);
        buf.put_len(LenWidth::U16, entries, "notification field entries")
    }

    fn for_command(command: SubscriptionCommandType) -> Self {
        match command {
            SubscriptionCommandType::Add => Self::SubscriptionAdd,
            SubscriptionCommandType::Remove => Self::SubscriptionRemove,
        }
    }
}

/// Notification server sync field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum NotificationServerField {
    Notifications = 0,
    Topics = 1,
}

/// Last notification sequence number seen on a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TopicState {
    /// Topic id.
    pub topic_id: i64,
    /// Sequence number.
    pub seq_number: i32,
}

/// Subscribe to or unsubscribe from an optional topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionCommand {
    /// Topic id.
    pub topic_id: i64,
    /// Subscribe or unsubscribe.
    pub command: SubscriptionCommandType,
}

/// Notification extension as sent by endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationClientSync {
    /// Application state sequence number the endpoint last saw.
    pub app_state_seq_number: i32,
    /// Hash of the topic list the endpoint holds.
    pub topic_list_hash: [u8; TOPIC_LIST_HASH_SIZE],
    /// Per-topic sequence numbers.
    pub topic_states: Option<Vec<TopicState>>,
    /// Unicast notification ids the endpoint has received.
    pub accepted_unicast_notifications: Option<Vec<String>>,
    /// Subscription changes, in the order their blocks appear on the wire.
    pub subscription_commands: Option<Vec<SubscriptionCommand>>,
}

fn decode_topic_states(body: &mut Cursor<'_>) -> Result<Vec<TopicState>, DecodeError> {
    let count = body.read_u16()?;
    let mut states = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let topic_id = body.read_i64()?;
        let seq_number = body.read_i32()?;
        states.push(TopicState {
            topic_id,
            seq_number,
        });
    }
    Ok(states)
}

fn decode_unicast_ids(body: &mut Cursor<'_>) -> Result<Vec<String>, DecodeError> {
    let count = body.read_u16()?;
    let mut uids = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let len = body.read_length()?;
        uids.push(body.read_padded_utf8(len)?);
    }
    Ok(uids)
}

fn decode_subscription_commands(
    body: &mut Cursor<'_>,
    command: SubscriptionCommandType,
    commands: &mut Vec<SubscriptionCommand>,
) -> Result<(), DecodeError> {
    let count = body.read_u16()?;
    commands.reserve(count as usize);
    for _ in 0..count {
        commands.push(SubscriptionCommand {
            topic_id: body.read_i64()?,
            command,
        });
    }
    Ok(())
}

impl ClientExtension for NotificationClientSync {
    const EXTENSION: ExtensionType = ExtensionType::Notification;

    fn decode_payload(payload: &mut Cursor<'_>, _options: u8) -> Result<Self, DecodeError> {
        let available = payload.remaining();
        if available < TOPIC_LIST_HASH_SIZE {
            return Err(DecodeError::Truncated {
                needed: TOPIC_LIST_HASH_SIZE,
                available,
            });
        }
        let mut body = payload.sub_cursor(available - TOPIC_LIST_HASH_SIZE)?;

        let mut sync = Self {
            app_state_seq_number: body.read_i32()?,
            ..Self::default()
        };
        while !body.is_empty() {
            let field_id = body.read_u8()?;
            let _reserved = body.read_u8()?;
            let field = NotificationClientField::from_byte(field_id).ok_or(
                DecodeError::MalformedField {
                    extension: Self::EXTENSION,
                    field_id,
                },
            )?;
            match field {
                NotificationClientField::TopicStates => {
                    sync.topic_states = Some(decode_topic_states(&mut body)?)
                }
                NotificationClientField::UnicastList => {
                    sync.accepted_unicast_notifications = Some(decode_unicast_ids(&mut body)?)
                }
                NotificationClientField::SubscriptionAdd => decode_subscription_commands(
                    &mut body,
                    SubscriptionCommandType::Add,
                    sync.subscription_commands.get_or_insert_with(Vec::new),
                )?,
                NotificationClientField::SubscriptionRemove => decode_subscription_commands(
                    &mut body,
                    SubscriptionCommandType::Remove,
                    sync.subscription_commands.get_or_insert_with(Vec::new),
                )?,
            }
        }

        sync.topic_list_hash = payload.read_array()?;
        Ok(sync)
    }

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        buf.put_i32(self.app_state_seq_number);

        if let Some(ref states) = self.topic_states {
            for state in NotificationClientField::TopicStates.write_header(buf, states) {
                buf.put_i64(state.topic_id);
                buf.put_i32(state.seq_number);
            }
        }

        if let Some(ref uids) = self.accepted_unicast_notifications {
            for uid in NotificationClientField::UnicastList.write_header(buf, uids) {
                let uid = buf.put_str_len(LenWidth::I32, uid, "unicast notification id");
                buf.put_padded(uid.as_bytes());
            }
        }

        if let Some(ref commands) = self.subscription_commands {
            // One block per run of the same command; an empty add block
            // keeps an empty list present.
            if commands.is_empty() {
                NotificationClientField::SubscriptionAdd.write_header(buf, commands);
            }
            let blocks = commands
                .chunk_by(|a, b| a.command == b.command)
                .flat_map(|run| run.chunks(LenWidth::U16.max()));
            for block in blocks {
                let field = NotificationClientField::for_command(block[0].command);
                for command in field.write_header(buf, block) {
                    buf.put_i64(command.topic_id);
                }
            }
        }

        buf.put_bytes(&self.topic_list_hash);
    }
}

/// A notification delivered to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notification {
    /// Sequence number within the topic.
    pub seq_number: i32,
    /// Category.
    pub notification_type: NotificationType,
    /// Unique id, set for unicast notifications.
    pub uid: Option<String>,
    /// Schema-encoded body.
    pub body: Vec<u8>,
    /// Topic, absent for unicast notifications.
    pub topic_id: Option<i64>,
}

/// A topic available to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Topic {
    /// Topic id.
    pub id: i64,
    /// Topic name.
    pub name: String,
    /// Subscription type.
    pub subscription_type: SubscriptionType,
}

/// Notification extension as sent by servers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationServerSync {
    /// Current application state sequence number.
    pub app_state_seq_number: i32,
    /// Notifications to deliver.
    pub notifications: Option<Vec<Notification>>,
    /// Full list of available topics, when it changed.
    pub available_topics: Option<Vec<Topic>>,
}

impl ServerExtension for NotificationServerSync {
    const EXTENSION: ExtensionType = ExtensionType::Notification;

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        buf.put_i32(self.app_state_seq_number);

        if let Some(ref notifications) = self.notifications {
            buf.put_u8(NotificationServerField::Notifications as u8);
            buf.put_u8(NOTHING);
            for nf in buf.put_len(LenWidth::U16, notifications, "notifications") {
                buf.put_i32(nf.seq_number);
                buf.put_u8(nf.notification_type.as_byte());
                buf.put_u8(NOTHING);
                let uid = nf.uid.as_deref().unwrap_or_default();
                let uid = buf.put_str_len(LenWidth::U16, uid, "notification uid");
                let body = buf.put_len(LenWidth::I32, &nf.body, "notification body");
                buf.put_i64(nf.topic_id.unwrap_or(0));
                buf.put_padded(uid.as_bytes());
                buf.put_padded(body);
            }
        }

        if let Some(ref topics) = self.available_topics {
            buf.put_u8(NotificationServerField::Topics as u8);
            buf.put_u8(NOTHING);
            for topic in buf.put_len(LenWidth::U16, topics, "topics") {
                buf.put_i64(topic.id);
                buf.put_u16(topic.subscription_type.as_u16());
                buf.put_u8(NOTHING);
                let name = buf.put_str_len(LenWidth::U8, &topic.name, "topic name");
                buf.put_padded(name.as_bytes());
            }
        }
    }
}
