//! Extension payload codecs.
//!
//! Every client sync and server sync is a list of extensions, each carrying
//! one concern of the endpoint/server exchange.
//!
//! | ID | Module          | Client → server                         | Server → client                       |
//! |----|-----------------|-----------------------------------------|---------------------------------------|
//! | 1  | `metadata`      | request id, timeout, hashes, app token  | echoed request id                     |
//! | 2  | `profile`       | profile body, schema versions, key      | resync flag                           |
//! | 3  | `user`          | user/endpoint attach and detach         | attach results and notifications      |
//! | 4  | `logging`       | log record batch                        | batch result                          |
//! | 5  | `configuration` | state sequence number, config hash      | schema and delta bodies               |
//! | 6  | `notification`  | topic states, unicast ids, subscriptions| notifications, topic list             |
//! | 7  | `event`         | listener lookups, outgoing events       | listeners, incoming events            |
//! | 8  | `redirect`      | n/a                                     | DNS name hash                         |
//!
//! Extension ids a decoder does not know are skipped. Field ids inside a
//! known extension are strict: an unknown one fails the decode.

mod configuration;
mod event;
mod logging;
mod metadata;
mod notification;
mod profile;
mod redirect;
mod user;

pub use configuration::*;
pub use event::*;
pub use logging::*;
pub use metadata::*;
pub use notification::*;
pub use profile::*;
pub use redirect::*;
pub use user::*;
