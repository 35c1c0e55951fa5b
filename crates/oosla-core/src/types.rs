use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[Priority::P0, Priority::P1, Priority::P2, Priority::P3]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }

    /// The label the tracker uses in query expressions, e.g. `priority in ("P0: Immediate")`.
    pub fn search_label(self) -> &'static str {
        match self {
            Priority::P0 => "P0: Immediate",
            Priority::P1 => "P1: High",
            Priority::P2 => "P2: Medium",
            Priority::P3 => "P3: Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = crate::error::OoslaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p0" => Ok(Priority::P0),
            "p1" => Ok(Priority::P1),
            "p2" => Ok(Priority::P2),
            "p3" => Ok(Priority::P3),
            _ => Err(crate::error::OoslaError::InvalidPriority(s.to_string())),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = crate::error::OoslaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> String {
        p.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// IssueCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Security,
    Attribution,
    Privacy,
    Bug,
    Task,
    Other,
}

impl IssueCategory {
    /// Map a tracker issue-type name onto its SLA category.
    pub fn from_issue_type(issue_type: &str) -> IssueCategory {
        match issue_type {
            "Security Defect" => IssueCategory::Security,
            "Attribution Defect" => IssueCategory::Attribution,
            "Privacy" => IssueCategory::Privacy,
            "Bug" => IssueCategory::Bug,
            "Task" => IssueCategory::Task,
            _ => IssueCategory::Other,
        }
    }

    /// Security-class categories select the looser P2/P3 deadlines and
    /// the escalation message variants.
    pub fn is_security(self) -> bool {
        matches!(
            self,
            IssueCategory::Security | IssueCategory::Attribution | IssueCategory::Privacy
        )
    }

    /// Categories tracked from day one. Anything else sits out the
    /// maturity floor before it is classified at all.
    pub fn always_tracked(self) -> bool {
        self.is_security() || matches!(self, IssueCategory::Bug | IssueCategory::Task)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IssueCategory::Security => "security",
            IssueCategory::Attribution => "attribution",
            IssueCategory::Privacy => "privacy",
            IssueCategory::Bug => "bug",
            IssueCategory::Task => "task",
            IssueCategory::Other => "other",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AgingState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingState {
    NotDue,
    SoonToBeOosla,
    Oosla,
}

impl AgingState {
    /// Human label used in report rows.
    pub fn label(self) -> &'static str {
        match self {
            AgingState::NotDue => "Not Due",
            AgingState::SoonToBeOosla => "Soon to be OOSLA",
            AgingState::Oosla => "OOSLA",
        }
    }
}

impl fmt::Display for AgingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// One open ticket as returned by the tracker search. `created` is
/// tracker-local wall-clock time with no explicit offset; the age
/// calculator applies the configured skew correction.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub key: String,
    pub summary: String,
    /// Raw issue-type name from the tracker (shown in reports).
    pub issue_type: String,
    pub category: IssueCategory,
    pub priority: Priority,
    pub created: NaiveDateTime,
    pub assignee: Option<String>,
    pub environment: Option<String>,
}

impl Ticket {
    pub fn assignee_label(&self) -> &str {
        self.assignee.as_deref().unwrap_or("Unassigned")
    }

    pub fn environment_label(&self) -> &str {
        self.environment.as_deref().unwrap_or("Unknown")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
