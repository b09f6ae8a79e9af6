//! Routing decisions for decoded events.
//!
//! Routing is log-only: the decision names the downstream systems a
//! real dispatcher would contact, but nothing is contacted. The
//! decision is a pure function of the event so it can be tested
//! without a consumer or a filesystem.

use serde_json::Value;

use crate::event::{BOOKING_INTEREST, BookingInterest, IntentEvent};

/// Downstream destination for booking dispatch.
pub const DISPATCH_DESTINATION: &str = "KAIROS";

/// Downstream destination for the audit trail.
pub const AUDIT_DESTINATION: &str = "SEVER";

/// Downstream destination for promotion candidates.
pub const PROMOTION_DESTINATION: &str = "LUMENA";

/// The routing outcome for one event.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingDecision {
    /// Route a booking-interest signal to all three destinations.
    Booking(BookingInterest),
    /// Report an unrecognized event kind.
    Unrecognized { kind: Option<Value> },
}

/// Decide where an event would be routed. Never fails: unknown shapes
/// become an [`RoutingDecision::Unrecognized`] report.
pub fn route(event: &IntentEvent) -> RoutingDecision {
    match event {
        IntentEvent::BookingInterest(fields) => RoutingDecision::Booking(fields.clone()),
        IntentEvent::Unknown { kind } => RoutingDecision::Unrecognized { kind: kind.clone() },
    }
}

impl RoutingDecision {
    /// Render the stdout lines for this decision.
    pub fn lines(&self) -> Vec<String> {
        match self {
            RoutingDecision::Booking(fields) => vec![
                format!(
                    "[CONSUMER] {BOOKING_INTEREST} → {DISPATCH_DESTINATION} | {} ({}) | context={}",
                    render(&fields.artist),
                    render(&fields.date),
                    render(&fields.context),
                ),
                format!("[CONSUMER] audit → {AUDIT_DESTINATION}"),
                format!("[CONSUMER] promotion_candidate → {PROMOTION_DESTINATION}"),
            ],
            RoutingDecision::Unrecognized { kind } => {
                vec![format!("[CONSUMER] unknown event type: {}", render(kind))]
            }
        }
    }
}

/// Render an optional JSON value for log output: absent fields become
/// `null`, strings render bare, everything else in JSON notation.
fn render(value: &Option<Value>) -> String {
    match value {
        None => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
