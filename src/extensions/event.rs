//! Event extension (id 7)
//!
//! Client wire format (options: [`EventClientOptions`]):
//! ```text
//! Fields until end of payload, each: Field ID (1) | Reserved (1) | data
//!
//! 0  Listener requests: Count (2) | Count × request
//!    request: Request ID (2) | FQN count (2) | FQN count × {Len (2) | Reserved (2) | FQN (padded)}
//! 1  Events: Count (2) | Count × event
//!    event: Seq (4) | Options (2) | FQN len (2) | [HAS_DATA] Data len (4)
//!           | [HAS_TARGET] Target (20) | FQN (padded) | [Data (padded)]
//! ```
//!
//! Server wire format (options: [`EventServerOptions`]):
//! ```text
//! +0  [SEQ_NUMBER_RESPONSE] Sequence number (4 bytes BE32)
//! +N  [0] Listener responses: 0 | 0 | Count (2) | Count × response
//!     response: Request ID (2) | Result (2) | Listener count (4) | Listener count × key hash (20)
//! +M  [1] Events: 1 | 0 | Count (2) | Count × event
//!     event: Options (2) | FQN len (2) | [HAS_DATA] Data len (4) | Source (20) | FQN (padded) | [Data (padded)]
//! ```

use crate::core::{ClientExtension, CodecConfig, DecodeError, NOTHING, ServerExtension};
use crate::frame::{EventClientOptions, EventEntryOptions, EventServerOptions, ExtensionType};
use crate::sync::{EndpointKeyHash, SyncStatus};
use crate::wire::{Cursor, LenWidth, WriteBuffer};

/// Event field identifiers, shared by both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum EventField {
    Listeners = 0,
    Events = 1,
}

impl EventField {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Listeners),
            1 => Some(Self::Events),
            _ => None,
        }
    }

    fn write_header<'a, T>(
        self,
        buf: &mut WriteBuffer,
        entries: &'a [T],
        field: &'static str,
    ) -> &'a [T] {
        buf.put_u8(self as u8);
        buf.put_u8(NOTHING);
        buf.put_len(LenWidth::U16, entries, field)
    }
}

/// An application event routed between endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Event {
    /// Sender sequence number.
    pub seq_num: i32,
    /// Fully qualified event class name.
    pub event_class_fqn: String,
    /// Schema-encoded event data; empty when the event has none.
    pub data: Vec<u8>,
    /// Sending endpoint. Only carried server → endpoint.
    pub source: Option<EndpointKeyHash>,
    /// Receiving endpoint. Only carried endpoint → server; `None` broadcasts.
    pub target: Option<EndpointKeyHash>,
}

/// Request for the endpoints listening to a set of event classes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventListenersRequest {
    /// Request id, echoed in the response.
    pub request_id: u16,
    /// Event class names the listeners must support.
    pub event_class_fqns: Vec<String>,
}

/// Event extension as sent by endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventClientSync {
    /// Endpoint asks for its current event sequence number.
    pub seq_number_request: bool,
    /// Listener lookups.
    pub event_listeners_requests: Option<Vec<EventListenersRequest>>,
    /// Outgoing events.
    pub events: Option<Vec<Event>>,
}

fn decode_listener_requests(
    payload: &mut Cursor<'_>,
) -> Result<Vec<EventListenersRequest>, DecodeError> {
    let count = payload.read_u16()?;
    let mut requests = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let request_id = payload.read_u16()?;
        let fqn_count = payload.read_u16()?;
        let mut event_class_fqns = Vec::with_capacity(fqn_count as usize);
        for _ in 0..fqn_count {
            let len = payload.read_u16()? as usize;
            let _reserved = payload.read_u16()?;
            event_class_fqns.push(payload.read_padded_utf8(len)?);
        }
        requests.push(EventListenersRequest {
            request_id,
            event_class_fqns,
        });
    }
    Ok(requests)
}

fn decode_events(payload: &mut Cursor<'_>) -> Result<Vec<Event>, DecodeError> {
    let count = payload.read_u16()?;
    let mut events = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let seq_num = payload.read_i32()?;
        let options = EventEntryOptions::from_bits_retain(payload.read_u16()?);
        let fqn_len = payload.read_u16()? as usize;
        let data_len = if options.contains(EventEntryOptions::HAS_DATA) {
            payload.read_length()?
        } else {
            0
        };
        let target = if options.contains(EventEntryOptions::HAS_TARGET) {
            Some(EndpointKeyHash::read(payload)?)
        } else {
            None
        };
        let event_class_fqn = payload.read_padded_utf8(fqn_len)?;
        let data = payload.read_padded(data_len)?.to_vec();
        events.push(Event {
            seq_num,
            event_class_fqn,
            data,
            source: None,
            target,
        });
    }
    Ok(events)
}

/// Write the class name length and, when there is data, the data length.
fn write_event_lengths<'a>(buf: &mut WriteBuffer, event: &'a Event) -> (&'a str, &'a [u8]) {
    let fqn = buf.put_str_len(LenWidth::U16, &event.event_class_fqn, "event class name");
    let data = if event.data.is_empty() {
        &[][..]
    } else {
        buf.put_len(LenWidth::I32, &event.data, "event data")
    };
    (fqn, data)
}

impl ClientExtension for EventClientSync {
    const EXTENSION: ExtensionType = ExtensionType::Event;

    fn decode_payload(payload: &mut Cursor<'_>, options: u8) -> Result<Self, DecodeError> {
        let options = EventClientOptions::from_bits_retain(options);
        let mut sync = Self {
            seq_number_request: options.contains(EventClientOptions::SEQ_NUMBER_REQUEST),
            ..Self::default()
        };

        while !payload.is_empty() {
            let field_id = payload.read_u8()?;
            let _reserved = payload.read_u8()?;
            match EventField::from_byte(field_id) {
                Some(EventField::Listeners) => {
                    sync.event_listeners_requests = Some(decode_listener_requests(payload)?)
                }
                Some(EventField::Events) => sync.events = Some(decode_events(payload)?),
                None => {
                    return Err(DecodeError::MalformedField {
                        extension: Self::EXTENSION,
                        field_id,
                    });
                }
            }
        }

        Ok(sync)
    }

    fn options(&self) -> u8 {
        let mut options = EventClientOptions::empty();
        options.set(
            EventClientOptions::SEQ_NUMBER_REQUEST,
            self.seq_number_request,
        );
        options.bits()
    }

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        if let Some(ref requests) = self.event_listeners_requests {
            let requests =
                EventField::Listeners.write_header(buf, requests, "event listener requests");
            for request in requests {
                buf.put_u16(request.request_id);
                let fqns =
                    buf.put_len(LenWidth::U16, &request.event_class_fqns, "event class names");
                for fqn in fqns {
                    let fqn = buf.put_str_len(LenWidth::U16, fqn, "event class name");
                    buf.put_u16(0);
                    buf.put_padded(fqn.as_bytes());
                }
            }
        }

        if let Some(ref events) = self.events {
            for event in EventField::Events.write_header(buf, events, "events") {
                let mut options = EventEntryOptions::empty();
                options.set(EventEntryOptions::HAS_TARGET, event.target.is_some());
                options.set(EventEntryOptions::HAS_DATA, !event.data.is_empty());

                buf.put_i32(event.seq_num);
                buf.put_u16(options.bits());
                let (fqn, data) = write_event_lengths(buf, event);
                if let Some(ref target) = event.target {
                    target.write(buf);
                }
                buf.put_padded(fqn.as_bytes());
                buf.put_padded(data);
            }
        }
    }
}

/// Endpoints listening to the requested event classes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventListenersResponse {
    /// Request id from the matching [`EventListenersRequest`].
    pub request_id: u16,
    /// Outcome.
    pub result: SyncStatus,
    /// Key hashes of the listening endpoints.
    pub listeners: Vec<EndpointKeyHash>,
}

/// Event extension as sent by servers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventServerSync {
    /// Current event sequence number, when requested.
    pub event_sequence_number_response: Option<i32>,
    /// Answers to listener lookups.
    pub event_listeners_responses: Option<Vec<EventListenersResponse>>,
    /// Incoming events.
    pub events: Option<Vec<Event>>,
}

impl ServerExtension for EventServerSync {
    const EXTENSION: ExtensionType = ExtensionType::Event;

    fn options(&self, _config: &CodecConfig) -> u8 {
        let mut options = EventServerOptions::empty();
        options.set(
            EventServerOptions::SEQ_NUMBER_RESPONSE,
            self.event_sequence_number_response.is_some(),
        );
        options.bits()
    }

    fn encode_payload(&self, buf: &mut WriteBuffer) {
        if let Some(seq_num) = self.event_sequence_number_response {
            buf.put_i32(seq_num);
        }

        if let Some(ref responses) = self.event_listeners_responses {
            let responses =
                EventField::Listeners.write_header(buf, responses, "event listener responses");
            for response in responses {
                buf.put_u16(response.request_id);
                buf.put_u16(u16::from(response.result.as_byte()));
                for listener in buf.put_len(LenWidth::I32, &response.listeners, "event listeners") {
                    listener.write(buf);
                }
            }
        }

        if let Some(ref events) = self.events {
            for event in EventField::Events.write_header(buf, events, "events") {
                let mut options = EventEntryOptions::empty();
                options.set(EventEntryOptions::HAS_DATA, !event.data.is_empty());

                buf.put_u16(options.bits());
                let (fqn, data) = write_event_lengths(buf, event);
                event.source.unwrap_or_default().write(buf);
                buf.put_padded(fqn.as_bytes());
                buf.put_padded(data);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{ExtensionFrame, write_client_extension, write_server_extension};

    fn decode(options: u8, payload: &[u8]) -> Result<EventClientSync, DecodeError> {
        EventClientSync::decode_payload(&mut Cursor::new(payload), options)
    }

    fn server_frame(sync: &EventServerSync) -> (u8, String) {
        let mut buf = WriteBuffer::new();
        write_server_extension(&mut buf, sync, &CodecConfig::default());
        let bytes = buf.into_bytes();
        let frame = ExtensionFrame::read(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(frame.type_id, 7);
        (frame.option_byte(), hex::encode(frame.payload))
    }

    #[test]
    fn test_seq_number_request_only() {
        let decoded = decode(EventClientOptions::SEQ_NUMBER_REQUEST.bits(), &[]).unwrap();
        assert!(decoded.seq_number_request);
        assert!(decoded.events.is_none());
        assert!(!decode(0, &[]).unwrap().seq_number_request);
    }

    #[test]
    fn test_listener_requests() {
        let payload = hex::decode(concat!(
            "0000", "0001",
            "0003", "0002",
            "0005", "0000", "612e622e43000000",
            "0001", "0000", "78000000",
        ))
        .unwrap();
        let decoded = decode(0, &payload).unwrap();
        assert_eq!(
            decoded.event_listeners_requests,
            Some(vec![EventListenersRequest {
                request_id: 3,
                event_class_fqns: vec!["a.b.C".to_string(), "x".to_string()],
            }])
        );
    }

    #[test]
    fn test_events_with_target_and_data() {
        let mut payload = hex::decode(concat!(
            "0100", "0002",
            "00000001", "0003", "0001", "00000002",
        ))
        .unwrap();
        payload.extend_from_slice(&[0x77; 20]);
        payload.extend(hex::decode(concat!(
            "45000000", "abcd0000",
            "00000002", "0000", "0002", "4242", "0000",
        ))
        .unwrap());

        let decoded = decode(0, &payload).unwrap();
        let events = decoded.events.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].seq_num, 1);
        assert_eq!(events[0].event_class_fqn, "E");
        assert_eq!(events[0].data, vec![0xab, 0xcd]);
        assert_eq!(events[0].target, Some(EndpointKeyHash::from_bytes([0x77; 20])));
        assert_eq!(events[1].event_class_fqn, "BB");
        assert!(events[1].data.is_empty());
        assert!(events[1].target.is_none());
    }

    #[test]
    fn test_unknown_field_is_malformed() {
        assert_eq!(
            decode(0, &[2, 0, 0, 0]),
            Err(DecodeError::MalformedField {
                extension: ExtensionType::Event,
                field_id: 2,
            })
        );
    }

    #[test]
    fn test_truncated_event() {
        let payload = hex::decode("0100000100000001000200080000").unwrap();
        assert!(matches!(
            decode(0, &payload),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn test_client_mirror_encoding() {
        let sync = EventClientSync {
            seq_number_request: true,
            event_listeners_requests: Some(vec![EventListenersRequest {
                request_id: 12,
                event_class_fqns: vec!["org.example.Ping".to_string()],
            }]),
            events: Some(vec![
                Event {
                    seq_num: 5,
                    event_class_fqn: "org.example.Ping".to_string(),
                    data: vec![1, 2, 3, 4, 5],
                    source: None,
                    target: Some(EndpointKeyHash::from_bytes([9; 20])),
                },
                Event {
                    seq_num: 6,
                    event_class_fqn: "org.example.Pong".to_string(),
                    ..Default::default()
                },
            ]),
        };
        let mut buf = WriteBuffer::new();
        write_client_extension(&mut buf, &sync);
        let bytes = buf.into_bytes();
        assert_eq!(bytes[3], 0x02);
        let frame = ExtensionFrame::read(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(frame.decode::<EventClientSync>().unwrap(), sync);
    }

    #[test]
    fn test_server_seq_number_and_listeners() {
        let sync = EventServerSync {
            event_sequence_number_response: Some(42),
            event_listeners_responses: Some(vec![EventListenersResponse {
                request_id: 3,
                result: SyncStatus::Success,
                listeners: vec![EndpointKeyHash::from_bytes([0x11; 20])],
            }]),
            events: None,
        };
        let (options, payload) = server_frame(&sync);
        assert_eq!(options, EventServerOptions::SEQ_NUMBER_RESPONSE.bits());
        assert_eq!(
            payload,
            format!(
                "{}{}",
                concat!("0000002a", "00000001", "0003", "0000", "00000001"),
                "11".repeat(20)
            )
        );
    }

    #[test]
    fn test_server_events() {
        let sync = EventServerSync {
            events: Some(vec![
                Event {
                    seq_num: 0,
                    event_class_fqn: "E".to_string(),
                    data: vec![0xAA],
                    source: Some(EndpointKeyHash::from_bytes([0x22; 20])),
                    target: None,
                },
                Event {
                    event_class_fqn: "Ev".to_string(),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };
        let (options, payload) = server_frame(&sync);
        assert_eq!(options, 0);
        let expected = [
            "01000002".to_string(),
            "0002000100000001".to_string(),
            "22".repeat(20),
            "45000000aa000000".to_string(),
            "00000002".to_string(),
            "00".repeat(20),
            "45760000".to_string(),
        ]
        .concat();
        assert_eq!(payload, expected);
    }
}
