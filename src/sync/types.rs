//! Value types shared by several extensions.

use crate::core::{DecodeError, FAILURE, KEY_HASH_SIZE, SUCCESS};
use crate::wire::{Cursor, WriteBuffer};

/// SHA-1 hash of an endpoint public key; identifies an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EndpointKeyHash([u8; KEY_HASH_SIZE]);

impl EndpointKeyHash {
    /// Create a key hash from bytes.
    pub fn from_bytes(bytes: [u8; KEY_HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the key hash as bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_HASH_SIZE] {
        &self.0
    }

    pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        cursor.read_array().map(Self)
    }

    pub(crate) fn write(&self, buf: &mut WriteBuffer) {
        buf.put_bytes(&self.0);
    }
}

impl From<[u8; KEY_HASH_SIZE]> for EndpointKeyHash {
    fn from(bytes: [u8; KEY_HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for EndpointKeyHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Outcome of a request, as reported back to the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SyncStatus {
    /// Request succeeded.
    #[default]
    Success,
    /// Request failed.
    Failure,
}

impl SyncStatus {
    /// Wire byte.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Success => SUCCESS,
            Self::Failure => FAILURE,
        }
    }
}

/// Server verdict on an endpoint's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SyncResponseStatus {
    /// Endpoint is up to date.
    #[default]
    NoDelta,
    /// Response carries changes.
    Delta,
    /// Endpoint must resend its full state.
    Resync,
}

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationType {
    /// Platform notification.
    #[default]
    System,
    /// Application notification.
    Custom,
}

impl NotificationType {
    /// Wire byte.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::System => 0x00,
            Self::Custom => 0x01,
        }
    }
}

/// How an endpoint is subscribed to a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubscriptionType {
    /// Every endpoint receives the topic.
    #[default]
    Mandatory,
    /// Endpoints opt in.
    Optional,
}

impl SubscriptionType {
    /// Wire value.
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Mandatory => 0x00,
            Self::Optional => 0x01,
        }
    }
}

/// Direction of a subscription change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionCommandType {
    /// Subscribe to the topic.
    Add,
    /// Unsubscribe from the topic.
    Remove,
}
