//! Decoded intent events.

use serde_json::Value;

/// Discriminator value of the one recognized event kind.
pub const BOOKING_INTEREST: &str = "booking_interest";

/// One decoded line from the intent queue.
///
/// Decoding is permissive on purpose: unrecognized shapes are carried
/// through as [`IntentEvent::Unknown`] so the routing layer can report
/// them instead of rejecting them.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentEvent {
    /// A booking-interest signal.
    BookingInterest(BookingInterest),
    /// Any other shape; `kind` is the raw discriminator value, if the
    /// event had one at all.
    Unknown { kind: Option<Value> },
}

/// Fields of a booking-interest event.
///
/// Every field is optional and untyped: producers occasionally omit
/// them or send non-string values, and an absent field renders as
/// `null` in the routing output instead of failing the event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingInterest {
    /// The artist the interest is about.
    pub artist: Option<Value>,
    /// The requested date, as the producer sent it.
    pub date: Option<Value>,
    /// Free-form context from the producer.
    pub context: Option<Value>,
}

impl IntentEvent {
    /// Decode one queue line.
    ///
    /// Fails only when the line is not valid JSON; any valid JSON
    /// decodes, with unrecognized shapes becoming [`IntentEvent::Unknown`].
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(line)?;
        Ok(Self::from_value(&value))
    }

    /// Classify an already-decoded JSON value.
    pub fn from_value(value: &Value) -> Self {
        let kind = value.get("event");
        if kind.and_then(Value::as_str) == Some(BOOKING_INTEREST) {
            IntentEvent::BookingInterest(BookingInterest {
                artist: value.get("artist").cloned(),
                date: value.get("date").cloned(),
                context: value.get("context").cloned(),
            })
        } else {
            IntentEvent::Unknown {
                kind: kind.cloned(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_booking_interest() {
        let event = IntentEvent::parse(
            r#"{"event":"booking_interest","artist":"Nova","date":"2025-05-01","context":"test"}"#,
        )
        .unwrap();

        assert_eq!(
            event,
            IntentEvent::BookingInterest(BookingInterest {
                artist: Some(json!("Nova")),
                date: Some(json!("2025-05-01")),
                context: Some(json!("test")),
            })
        );
    }

    #[test]
    fn missing_fields_stay_none() {
        let event = IntentEvent::parse(r#"{"event":"booking_interest"}"#).unwrap();

        assert_eq!(
            event,
            IntentEvent::BookingInterest(BookingInterest::default())
        );
    }

    #[test]
    fn keeps_non_string_field_values() {
        let event =
            IntentEvent::parse(r#"{"event":"booking_interest","artist":7,"context":{"a":1}}"#)
                .unwrap();

        match event {
            IntentEvent::BookingInterest(fields) => {
                assert_eq!(fields.artist, Some(json!(7)));
                assert_eq!(fields.context, Some(json!({"a": 1})));
                assert_eq!(fields.date, None);
            }
            other => panic!("expected booking interest, got {other:?}"),
        }
    }

    #[test]
    fn other_discriminator_is_unknown() {
        let event = IntentEvent::parse(r#"{"event":"venue_hold"}"#).unwrap();

        assert_eq!(
            event,
            IntentEvent::Unknown {
                kind: Some(json!("venue_hold"))
            }
        );
    }

    #[test]
    fn absent_discriminator_is_unknown() {
        let event = IntentEvent::parse(r#"{"artist":"Nova"}"#).unwrap();

        assert_eq!(event, IntentEvent::Unknown { kind: None });
    }

    #[test]
    fn non_string_discriminator_is_unknown() {
        let event = IntentEvent::parse(r#"{"event":5}"#).unwrap();

        assert_eq!(
            event,
            IntentEvent::Unknown {
                kind: Some(json!(5))
            }
        );
    }

    #[test]
    fn non_object_json_is_unknown() {
        let event = IntentEvent::parse("[1, 2, 3]").unwrap();

        assert_eq!(event, IntentEvent::Unknown { kind: None });
    }

    #[test]
    fn invalid_json_fails() {
        assert!(IntentEvent::parse("{not json").is_err());
    }
}
