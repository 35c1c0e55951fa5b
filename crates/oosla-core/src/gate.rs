use crate::types::{AgingState, Priority};
use chrono::Weekday;

// ---------------------------------------------------------------------------
// NotificationGate
// ---------------------------------------------------------------------------

/// Decides whether a classified ticket produces a reminder comment and
/// watcher registration. Two independent restrictions:
///
/// - a priority override, when set, limits notifications to tickets of
///   exactly that priority;
/// - already-breached (OOSLA) tickets only notify on one designated
///   weekday, so daily runs don't pile comments onto tickets that are
///   long past their deadline. The approaching-deadline path fires on
///   every run.
///
/// The weekday is a parameter, not a clock read, so policy is testable
/// on any day.
#[derive(Debug, Clone)]
pub struct NotificationGate {
    pub priority_override: Option<Priority>,
    pub oosla_day: Weekday,
}

impl NotificationGate {
    pub fn new(priority_override: Option<Priority>, oosla_day: Weekday) -> Self {
        Self {
            priority_override,
            oosla_day,
        }
    }

    pub fn should_notify(&self, state: AgingState, priority: Priority, today: Weekday) -> bool {
        if let Some(only) = self.priority_override {
            if only != priority {
                return false;
            }
        }
        match state {
            AgingState::NotDue => false,
            AgingState::SoonToBeOosla => true,
            AgingState::Oosla => today == self.oosla_day,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
