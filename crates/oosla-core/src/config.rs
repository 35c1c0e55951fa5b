//! Per-team onboarding document: which projects and priorities to
//! track, who to watch, what to skip, and the deployment-specific
//! knobs (SLA overrides, clock skew, reminder weekday). Loaded from
//! `<onboard_dir>/<team>.yaml` or `.json`; a missing document is fatal
//! before any remote call.

use crate::error::{OoslaError, Result};
use crate::message::MessagePolicy;
use crate::sla::{SlaOverrides, SlaTable};
use crate::types::Priority;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// TeamConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    /// Tracked project identifiers. Must be non-empty.
    pub projects: Vec<String>,
    #[serde(default = "default_priorities")]
    pub priorities: Vec<Priority>,
    /// Tracker issue-type names included in the search query. Empty
    /// means the query does not constrain issue type.
    #[serde(default)]
    pub issue_types: Vec<String>,
    /// Ticket keys that are never processed.
    #[serde(default)]
    pub exception_keys: Vec<String>,
    /// Identities registered as watchers when a reminder fires.
    #[serde(default)]
    pub watchers: Vec<String>,
    #[serde(default)]
    pub sla: SlaOverrides,
    /// Correction added to computed ages, compensating for the offset
    /// between the tracker's clock and the evaluation environment's.
    #[serde(default = "default_clock_skew_hours")]
    pub clock_skew_hours: f64,
    /// Tickets outside the security/bug/task categories are ignored
    /// until they are at least this old.
    #[serde(default = "default_maturity_floor_hours")]
    pub maturity_floor_hours: f64,
    /// Weekday on which already-breached tickets are reminded.
    #[serde(default = "default_oosla_day")]
    pub oosla_day: String,
    #[serde(default)]
    pub message: MessagePolicy,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_priorities() -> Vec<Priority> {
    Priority::all().to_vec()
}

fn default_clock_skew_hours() -> f64 {
    8.0
}

fn default_maturity_floor_hours() -> f64 {
    4380.0
}

fn default_oosla_day() -> String {
    "tuesday".to_string()
}

fn default_base_url() -> String {
    "https://jira.com".to_string()
}

impl TeamConfig {
    /// Load `<team>.yaml` (preferred) or `<team>.json` from the
    /// onboarding directory.
    pub fn load(onboard_dir: &Path, team: &str) -> Result<TeamConfig> {
        let yaml_path = onboard_dir.join(format!("{team}.yaml"));
        let json_path = onboard_dir.join(format!("{team}.json"));

        let config: TeamConfig = if yaml_path.exists() {
            serde_yaml::from_str(&std::fs::read_to_string(&yaml_path)?)?
        } else if json_path.exists() {
            serde_json::from_str(&std::fs::read_to_string(&json_path)?)?
        } else {
            return Err(OoslaError::ConfigNotFound(format!(
                "{} (looked for .yaml and .json)",
                onboard_dir.join(team).display()
            )));
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.projects.is_empty() {
            return Err(OoslaError::InvalidConfig(
                "at least one project must be listed".to_string(),
            ));
        }
        if self.priorities.is_empty() {
            return Err(OoslaError::InvalidConfig(
                "at least one priority must be listed".to_string(),
            ));
        }
        if self.maturity_floor_hours < 0.0 {
            return Err(OoslaError::InvalidConfig(
                "maturity_floor_hours must be non-negative".to_string(),
            ));
        }
        self.oosla_weekday()?;
        self.sla_table().validate()
    }

    pub fn sla_table(&self) -> SlaTable {
        SlaTable::resolve(&self.sla)
    }

    pub fn oosla_weekday(&self) -> Result<Weekday> {
        self.oosla_day
            .parse()
            .map_err(|_| OoslaError::InvalidWeekday(self.oosla_day.clone()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
