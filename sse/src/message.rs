use axum::response::sse::Event;
use chrono::Local;
use serde::Serialize;

/// Event name of the sentinel sent after the last counter event.
pub const STREAM_END_EVENT: &str = "streamend";
/// Data line carried by the sentinel.
pub const STREAM_END_DATA: &str = "Stream complete";

/// One counter tick. Field order is part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamEvent {
    pub id: u32,
    pub timestamp: String,
    pub message: String,
}

impl StreamEvent {
    /// Builds the event for tick `id`, stamped with the current local wall-clock time.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            // e.g. "3:04:05 PM"
            timestamp: Local::now().format("%-I:%M:%S %p").to_string(),
            message: format!("Event stream count: {id}"),
        }
    }

    /// Encodes the event as an unnamed SSE message: `data: <json>\n\n`.
    pub fn to_sse(&self) -> Result<Event, axum::Error> {
        Event::default().json_data(self)
    }
}

/// The sentinel telling clients the stream ended on purpose:
/// `event: streamend\ndata: Stream complete\n\n`.
pub fn stream_end_event() -> Event {
    Event::default().event(STREAM_END_EVENT).data(STREAM_END_DATA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_event_serializes_fields_in_wire_order() {
        let event = StreamEvent {
            id: 3,
            timestamp: "9:41:00 AM".to_string(),
            message: "Event stream count: 3".to_string(),
        };

        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"id":3,"timestamp":"9:41:00 AM","message":"Event stream count: 3"}"#
        );
    }

    #[test]
    fn test_new_numbers_message_after_id() {
        let event = StreamEvent::new(14);

        assert_eq!(event.id, 14);
        assert_eq!(event.message, "Event stream count: 14");
    }

    #[test]
    fn test_timestamp_is_a_twelve_hour_clock_time() {
        let event = StreamEvent::new(0);
        let (clock, meridiem) = event.timestamp.split_once(' ').unwrap();

        assert!(meridiem == "AM" || meridiem == "PM");
        assert_eq!(clock.split(':').count(), 3);
    }
}
