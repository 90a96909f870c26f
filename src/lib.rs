//! # Kaa Binary Protocol
//!
//! Codec for the binary platform protocol spoken between IoT endpoints and
//! operations servers.
//!
//! An endpoint sends a [`ClientSync`]; the server answers with a
//! [`ServerSync`]. On the wire each is an 8-byte header followed by a list
//! of typed extensions:
//!
//! - **Compact**: bit-packed option flags gate optional fields
//! - **Extensible**: unknown extension ids are skipped by declared length
//! - **Aligned**: variable-length content is zero-padded to 4 bytes
//! - **Strict**: every read is bounds-checked against its own extension
//!
//! ## Modules
//!
//! - [`core`]: Constants, errors, configuration and traits
//! - [`wire`]: Big-endian reader, back-patching writer, padding
//! - [`frame`]: Message header, extension frames, option flags
//! - [`extensions`]: Per-extension payload codecs
//! - [`sync`]: Client and server sync messages
//! - [`codec`]: The top-level [`BinaryCodec`]
//!
//! ## Example Usage
//!
//! ```rust
//! use kaa_binary_protocol::prelude::*;
//!
//! let codec = BinaryCodec::new();
//!
//! // What an endpoint would send.
//! let mut request = ClientSync::new(7, ClientSyncMetaData::default());
//! request.configuration_sync = Some(ConfigurationClientSync {
//!     app_state_seq_number: 3,
//!     configuration_hash: None,
//! });
//! let bytes = codec.encode_client_sync(&request);
//!
//! // Server side.
//! let decoded = codec.decode(&bytes)?;
//! assert_eq!(decoded, request);
//!
//! let response = ServerSync {
//!     configuration_sync: Some(ConfigurationServerSync {
//!         app_state_seq_number: 4,
//!         conf_delta_body: Some(vec![1, 2, 3]),
//!         ..Default::default()
//!     }),
//!     ..ServerSync::new(decoded.request_id)
//! };
//! let encoded = codec.encode(&response);
//! assert_eq!(&encoded[..4], &HEADER_PROTOCOL_ID.to_be_bytes());
//! # Ok::<(), DecodeError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
pub mod core;
pub mod extensions;
pub mod frame;
pub mod sync;
pub mod wire;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::codec::BinaryCodec;
    pub use crate::core::*;
    pub use crate::extensions::*;
    pub use crate::sync::*;
}

// Re-export commonly used items at crate root
pub use crate::codec::BinaryCodec;
pub use crate::core::{CodecConfig, DecodeError, PlatformCodec, WireCompat};
pub use crate::sync::{ClientSync, ServerSync};
