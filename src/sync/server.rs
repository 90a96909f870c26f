//! Server sync message.

use crate::extensions::{
    ConfigurationServerSync, EventServerSync, LogServerSync, MetaDataServerSync,
    NotificationServerSync, ProfileServerSync, RedirectServerSync, UserServerSync,
};

/// One response to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerSync {
    /// Request id of the client sync being answered.
    pub request_id: i32,
    /// Profile verdict.
    pub profile_sync: Option<ProfileServerSync>,
    /// User and endpoint attach/detach results.
    pub user_sync: Option<UserServerSync>,
    /// Log upload result.
    pub log_sync: Option<LogServerSync>,
    /// Configuration update.
    pub configuration_sync: Option<ConfigurationServerSync>,
    /// Notifications and topics.
    pub notification_sync: Option<NotificationServerSync>,
    /// Events and listeners.
    pub event_sync: Option<EventServerSync>,
    /// Redirect to another server.
    pub redirect_sync: Option<RedirectServerSync>,
}

impl ServerSync {
    /// Create a server sync answering `request_id` with no payloads.
    pub fn new(request_id: i32) -> Self {
        Self {
            request_id,
            ..Self::default()
        }
    }

    /// Metadata extension for this sync.
    pub fn meta_data_sync(&self) -> MetaDataServerSync {
        MetaDataServerSync {
            request_id: self.request_id,
        }
    }

    /// Number of extensions this sync encodes to.
    pub fn extension_count(&self) -> usize {
        1 + [
            self.profile_sync.is_some(),
            self.user_sync.is_some(),
            self.log_sync.is_some(),
            self.configuration_sync.is_some(),
            self.notification_sync.is_some(),
            self.event_sync.is_some(),
            self.redirect_sync.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}
