use crate::sla::SlaTable;
use crate::types::{AgingState, IssueCategory, Priority};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Classification (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Classification {
    pub state: AgingState,
    /// Time remaining to the deadline (NotDue / SoonToBeOosla) or time
    /// past it (Oosla), in hours.
    pub magnitude_hours: f64,
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

/// Decide the aging state of a ticket from its age alone. One function,
/// one table lookup; the per-priority and per-class variation lives in
/// the table entries. The soon floor is an absolute age, not an offset
/// from the deadline: a ticket warns once it has aged past the floor
/// and keeps warning until the deadline passes.
pub fn classify(
    age_hours: f64,
    priority: Priority,
    category: IssueCategory,
    table: &SlaTable,
) -> Classification {
    let entry = table.entry(priority, category.is_security());

    if age_hours > entry.deadline_hours {
        return Classification {
            state: AgingState::Oosla,
            magnitude_hours: age_hours - entry.deadline_hours,
        };
    }

    let remaining = entry.deadline_hours - age_hours;
    if age_hours > entry.soon_floor_hours {
        Classification {
            state: AgingState::SoonToBeOosla,
            magnitude_hours: remaining,
        }
    } else {
        Classification {
            state: AgingState::NotDue,
            magnitude_hours: remaining,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
