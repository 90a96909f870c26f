//! Option flags carried in extension headers and nested entries.
//!
//! Only the low byte of the 24-bit extension option field is defined in
//! protocol version 1. Flags are parsed with `from_bits_retain`, so unknown
//! bits are preserved but never acted on.

use bitflags::bitflags;

bitflags! {
    /// Presence of optional client metadata fields, in wire order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MetaDataOptions: u8 {
        /// Timeout (i32) present.
        const TIMEOUT = 0x01;
        /// Endpoint public key hash present.
        const KEY_HASH = 0x02;
        /// Profile hash present.
        const PROFILE_HASH = 0x04;
        /// Application token present.
        const APP_TOKEN = 0x08;
    }

    /// Profile response options.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ProfileServerOptions: u8 {
        /// Endpoint must resend its full profile.
        const RESYNC = 0x01;
    }

    /// Configuration request options.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConfigurationClientOptions: u8 {
        /// Configuration hash present.
        const HASH = 0x02;
    }

    /// Configuration response options.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConfigurationServerOptions: u8 {
        /// Schema body present.
        const SCHEMA_BODY = 0x01;
        /// Delta body present.
        const DELTA_BODY = 0x02;
    }

    /// Event request options.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventClientOptions: u8 {
        /// Endpoint asks for its event sequence number.
        const SEQ_NUMBER_REQUEST = 0x02;
    }

    /// Event response options.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventServerOptions: u8 {
        /// Sequence number response present.
        const SEQ_NUMBER_RESPONSE = 0x01;
    }

    /// Per-event options (16 bits) inside an events block.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventEntryOptions: u16 {
        /// 20-byte target endpoint hash present.
        const HAS_TARGET = 0x01;
        /// Event data present.
        const HAS_DATA = 0x02;
    }

    /// Per-response options inside an endpoint attach responses block.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttachResponseOptions: u8 {
        /// Attached endpoint key hash follows.
        const HAS_KEY_HASH = 0x01;
    }
}
