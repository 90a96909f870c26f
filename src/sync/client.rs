//! Client sync message and its decode-time builder.

use tracing::debug;

use crate::core::DecodeError;
use crate::extensions::{
    ClientSyncMetaData, ConfigurationClientSync, EventClientSync, LogClientSync,
    MetaDataClientSync, NotificationClientSync, ProfileClientSync, UserClientSync,
};
use crate::frame::ExtensionType;

/// One request from an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientSync {
    /// Request id, echoed by the server.
    pub request_id: i32,
    /// Client metadata; every request carries it.
    pub meta_data: ClientSyncMetaData,
    /// Profile update.
    pub profile_sync: Option<ProfileClientSync>,
    /// User and endpoint attach/detach.
    pub user_sync: Option<UserClientSync>,
    /// Log upload.
    pub log_sync: Option<LogClientSync>,
    /// Configuration state.
    pub configuration_sync: Option<ConfigurationClientSync>,
    /// Notification state.
    pub notification_sync: Option<NotificationClientSync>,
    /// Events.
    pub event_sync: Option<EventClientSync>,
}

impl ClientSync {
    /// Create a client sync carrying only metadata.
    pub fn new(request_id: i32, meta_data: ClientSyncMetaData) -> Self {
        Self {
            request_id,
            meta_data,
            ..Self::default()
        }
    }

    /// Metadata extension for this sync.
    pub fn meta_data_sync(&self) -> MetaDataClientSync {
        MetaDataClientSync {
            request_id: self.request_id,
            meta_data: self.meta_data.clone(),
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
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

/// Collects decoded extensions into a [`ClientSync`].
///
/// A later extension of the same type replaces an earlier one.
#[derive(Debug, Default)]
pub struct ClientSyncBuilder {
    meta_data: Option<MetaDataClientSync>,
    profile_sync: Option<ProfileClientSync>,
    user_sync: Option<UserClientSync>,
    log_sync: Option<LogClientSync>,
    configuration_sync: Option<ConfigurationClientSync>,
    notification_sync: Option<NotificationClientSync>,
    event_sync: Option<EventClientSync>,
}

fn replace<T>(slot: &mut Option<T>, value: T, extension: ExtensionType) {
    if slot.replace(value).is_some() {
        debug!(%extension, "duplicate extension, keeping the later one");
    }
}

impl ClientSyncBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metadata extension.
    pub fn meta_data(&mut self, sync: MetaDataClientSync) -> &mut Self {
        replace(&mut self.meta_data, sync, ExtensionType::MetaData);
        self
    }

    /// Set the profile extension.
    pub fn profile(&mut self, sync: ProfileClientSync) -> &mut Self {
        replace(&mut self.profile_sync, sync, ExtensionType::Profile);
        self
    }

    /// Set the user extension.
    pub fn user(&mut self, sync: UserClientSync) -> &mut Self {
        replace(&mut self.user_sync, sync, ExtensionType::User);
        self
    }

    /// Set the logging extension.
    pub fn logging(&mut self, sync: LogClientSync) -> &mut Self {
        replace(&mut self.log_sync, sync, ExtensionType::Logging);
        self
    }

    /// Set the configuration extension.
    pub fn configuration(&mut self, sync: ConfigurationClientSync) -> &mut Self {
        replace(&mut self.configuration_sync, sync, ExtensionType::Configuration);
        self
    }

    /// Set the notification extension.
    pub fn notification(&mut self, sync: NotificationClientSync) -> &mut Self {
        replace(&mut self.notification_sync, sync, ExtensionType::Notification);
        self
    }

    /// Set the event extension.
    pub fn event(&mut self, sync: EventClientSync) -> &mut Self {
        replace(&mut self.event_sync, sync, ExtensionType::Event);
        self
    }

    /// Finish the sync, failing if no metadata extension was seen.
    pub fn build(self) -> Result<ClientSync, DecodeError> {
        let meta = self.meta_data.ok_or(DecodeError::MissingMetadata)?;
        Ok(ClientSync {
            request_id: meta.request_id,
            meta_data: meta.meta_data,
            profile_sync: self.profile_sync,
            user_sync: self.user_sync,
            log_sync: self.log_sync,
            configuration_sync: self.configuration_sync,
            notification_sync: self.notification_sync,
            event_sync: self.event_sync,
        })
    }
}
