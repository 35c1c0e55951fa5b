//! Data-driven SLA table: one `{deadline, soon floor}` entry per
//! (priority, category-class) pair, consumed by a single classification
//! function instead of per-priority branches. Operators tune entries
//! through the team document; anything left out keeps the deployment
//! defaults below.

use crate::error::{OoslaError, Result};
use crate::types::Priority;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SlaEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlaEntry {
    /// Maximum allowed age in hours before the ticket is OOSLA.
    pub deadline_hours: f64,
    /// Absolute age at which "soon to be OOSLA" starts firing. Lower
    /// severities get floors that sit further below their deadlines,
    /// giving proportionally longer advance warning.
    pub soon_floor_hours: f64,
}

impl SlaEntry {
    pub const fn new(deadline_hours: f64, soon_floor_hours: f64) -> Self {
        Self {
            deadline_hours,
            soon_floor_hours,
        }
    }
}

// ---------------------------------------------------------------------------
// SlaTable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlaTable {
    non_security: [SlaEntry; 4],
    security: [SlaEntry; 4],
}

impl Default for SlaTable {
    fn default() -> Self {
        Self {
            non_security: [
                SlaEntry::new(40.0, 36.0),
                SlaEntry::new(160.0, 48.0),
                SlaEntry::new(330.0, 168.0),
                SlaEntry::new(700.0, 480.0),
            ],
            security: [
                SlaEntry::new(40.0, 36.0),
                SlaEntry::new(160.0, 48.0),
                SlaEntry::new(700.0, 480.0),
                SlaEntry::new(2060.0, 1800.0),
            ],
        }
    }
}

impl SlaTable {
    /// Build the table from the defaults plus any operator overrides.
    pub fn resolve(overrides: &SlaOverrides) -> Self {
        let mut table = SlaTable::default();
        for p in Priority::all() {
            if let Some(entry) = overrides.non_security.get(*p) {
                table.non_security[p.index()] = entry;
            }
            if let Some(entry) = overrides.security.get(*p) {
                table.security[p.index()] = entry;
            }
        }
        table
    }

    pub fn entry(&self, priority: Priority, is_security: bool) -> SlaEntry {
        if is_security {
            self.security[priority.index()]
        } else {
            self.non_security[priority.index()]
        }
    }

    pub fn deadline(&self, priority: Priority, is_security: bool) -> f64 {
        self.entry(priority, is_security).deadline_hours
    }

    /// Deadlines must not tighten as severity drops, and security P2/P3
    /// must be at least as loose as their non-security counterparts.
    pub fn validate(&self) -> Result<()> {
        for class in [&self.non_security, &self.security] {
            for pair in class.windows(2) {
                if pair[1].deadline_hours < pair[0].deadline_hours {
                    return Err(OoslaError::InvalidConfig(
                        "sla deadlines must be non-decreasing from p0 to p3".to_string(),
                    ));
                }
            }
        }
        for p in Priority::all() {
            if self.security[p.index()].deadline_hours
                < self.non_security[p.index()].deadline_hours
            {
                return Err(OoslaError::InvalidConfig(format!(
                    "security sla deadline for {p} is tighter than non-security"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Overrides (team document `sla:` block)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlaOverrides {
    #[serde(default)]
    pub non_security: ClassOverrides,
    #[serde(default)]
    pub security: ClassOverrides,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p0: Option<SlaEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p1: Option<SlaEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2: Option<SlaEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p3: Option<SlaEntry>,
}

impl ClassOverrides {
    fn get(&self, priority: Priority) -> Option<SlaEntry> {
        match priority {
            Priority::P0 => self.p0,
            Priority::P1 => self.p1,
            Priority::P2 => self.p2,
            Priority::P3 => self.p3,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
