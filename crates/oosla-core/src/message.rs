//! Reminder text composition. Pure formatting: the caller decides
//! whether anything is posted. The team name is threaded through
//! explicitly so the escalation phrasing never depends on ambient
//! process state.

use crate::age::Magnitude;
use crate::types::{AgingState, IssueCategory, Priority};
use serde::{Deserialize, Serialize};

const HEADER: &str = "[Auto OOSLA Reminder]";

// ---------------------------------------------------------------------------
// MessagePolicy
// ---------------------------------------------------------------------------

/// Escalation routing for security-class tickets. Teams whose name
/// starts with `security_prefix` get the direct channel/contact line;
/// everyone else is pointed at the security team noted on the ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePolicy {
    #[serde(default)]
    pub security_prefix: Option<String>,
    #[serde(default = "default_security_contact")]
    pub security_contact: String,
}

fn default_security_contact() -> String {
    "#security-escalations".to_string()
}

impl Default for MessagePolicy {
    fn default() -> Self {
        Self {
            security_prefix: None,
            security_contact: default_security_contact(),
        }
    }
}

impl MessagePolicy {
    fn assistance_line(&self, team: &str) -> String {
        let direct = self
            .security_prefix
            .as_deref()
            .is_some_and(|prefix| team.starts_with(prefix));
        if direct {
            format!(
                "For any assistance/help, please reach out to {}",
                self.security_contact
            )
        } else {
            "For any assistance/help, please reach out to the security team as mentioned in the ticket"
                .to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// compose
// ---------------------------------------------------------------------------

/// Build the reminder comment for a classified ticket. Returns `None`
/// for `NotDue`, which never produces a reminder.
pub fn compose(
    state: AgingState,
    priority: Priority,
    magnitude: Magnitude,
    category: IssueCategory,
    team: &str,
    policy: &MessagePolicy,
) -> Option<String> {
    let body = match (state, category.is_security()) {
        (AgingState::NotDue, _) => return None,
        (AgingState::SoonToBeOosla, false) => format!(
            "This {priority} ticket will be in OOSLA in the next {magnitude}, \
             kindly check and update the current status"
        ),
        (AgingState::SoonToBeOosla, true) => format!(
            "This {priority} ticket is going to be in OOSLA in the next {magnitude}, \
             kindly check and take immediate action to close it before it goes OOSLA\n{}",
            policy.assistance_line(team)
        ),
        (AgingState::Oosla, false) => format!(
            "This {priority} ticket is OOSLA for {magnitude}, \
             kindly check and update the current status"
        ),
        (AgingState::Oosla, true) => format!(
            "This {priority} ticket is OOSLA now for {magnitude}, \
             kindly check and provide an immediate update/plan for taking it to closure\n{}",
            policy.assistance_line(team)
        ),
    };
    Some(format!("{HEADER}\n{body}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
