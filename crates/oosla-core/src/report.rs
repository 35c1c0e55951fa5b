//! Per project+priority HTML report fragment. Rows accumulate in
//! memory; `finish` only materializes a file when there is at least one
//! row, and clears any stale artifact from a previous run otherwise.

use crate::age::Magnitude;
use crate::error::Result;
use crate::io;
use crate::sla::SlaEntry;
use crate::types::{AgingState, Priority, Ticket};
use std::path::{Path, PathBuf};

/// P0 soon rows only appear once the ticket has aged past this absolute
/// floor, regardless of how early its soon window opens.
const P0_ROW_FLOOR_HOURS: f64 = 36.0;

// ---------------------------------------------------------------------------
// Row policy
// ---------------------------------------------------------------------------

/// Whether a classified ticket earns a report row. Independent of the
/// notification gate: breached tickets always do; approaching tickets
/// once age clears the per-priority floor; not-due tickets never do.
pub fn should_record(
    state: AgingState,
    priority: Priority,
    age_hours: f64,
    entry: SlaEntry,
) -> bool {
    match state {
        AgingState::NotDue => false,
        AgingState::Oosla => true,
        AgingState::SoonToBeOosla => match priority {
            Priority::P0 => age_hours > P0_ROW_FLOOR_HOURS,
            _ => age_hours > entry.deadline_hours - entry.soon_floor_hours,
        },
    }
}

// ---------------------------------------------------------------------------
// ReportWriter
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ReportWriter {
    team: String,
    project: String,
    priority: Priority,
    browse_base: String,
    rows: Vec<String>,
}

impl ReportWriter {
    pub fn new(team: &str, project: &str, priority: Priority, browse_base: &str) -> Self {
        Self {
            team: team.to_string(),
            project: project.to_string(),
            priority,
            browse_base: browse_base.trim_end_matches('/').to_string(),
            rows: Vec::new(),
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}_output.html",
            self.team,
            self.project,
            self.priority.as_str().to_lowercase()
        )
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Append one table row for a classified ticket.
    pub fn record(&mut self, ticket: &Ticket, state: AgingState, age_hours: f64) {
        let age = Magnitude::from_hours(age_hours).plain();
        self.rows.push(format!(
            "<tr><td><a href=\"{base}/browse/{key}\">{key}</a></td>\
             <td>{issue_type}</td><td>{env}</td><td>{priority}</td>\
             <td>{assignee}</td><td>{state}</td><td>{created}</td><td>{age}</td></tr>\n",
            base = self.browse_base,
            key = ticket.key,
            issue_type = ticket.issue_type,
            env = ticket.environment_label(),
            priority = ticket.priority,
            assignee = ticket.assignee_label(),
            state = state.label(),
            created = ticket.created,
            age = age,
        ));
    }

    /// Write the artifact under `dir`. Returns the path when a file was
    /// written, `None` when there were no rows (in which case any stale
    /// artifact from an earlier run is removed).
    pub fn finish(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let path = dir.join(self.file_name());
        if self.rows.is_empty() {
            io::remove_if_exists(&path)?;
            return Ok(None);
        }
        io::atomic_write(&path, self.rows.concat().as_bytes())?;
        Ok(Some(path))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sla::SlaTable;
    use crate::types::IssueCategory;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn ticket(key: &str) -> Ticket {
        Ticket {
            key: key.to_string(),
            summary: "broken".to_string(),
            issue_type: "Bug".to_string(),
            category: IssueCategory::Bug,
            priority: Priority::P1,
            created: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            assignee: Some("jdoe".to_string()),
            environment: None,
        }
    }

    #[test]
    fn oosla_always_earns_a_row() {
        let t = SlaTable::default();
        for &p in Priority::all() {
            let entry = t.entry(p, false);
            assert!(should_record(
                AgingState::Oosla,
                p,
                entry.deadline_hours + 1.0,
                entry
            ));
        }
    }

    #[test]
    fn not_due_never_earns_a_row() {
        let t = SlaTable::default();
        let entry = t.entry(Priority::P2, false);
        assert!(!should_record(AgingState::NotDue, Priority::P2, 10.0, entry));
    }

    #[test]
    fn p0_soon_row_needs_the_absolute_floor() {
        let t = SlaTable::default();
        let entry = t.entry(Priority::P0, false);
        // P0 rows only start past 36h of age.
        assert!(!should_record(
            AgingState::SoonToBeOosla,
            Priority::P0,
            10.0,
            entry
        ));
        assert!(should_record(
            AgingState::SoonToBeOosla,
            Priority::P0,
            37.0,
            entry
        ));
    }

    #[test]
    fn p1_soon_row_waits_for_the_deadline_window() {
        let t = SlaTable::default();
        let entry = t.entry(Priority::P1, false);
        // deadline 160, floor 48: rows from 112h.
        assert!(!should_record(
            AgingState::SoonToBeOosla,
            Priority::P1,
            111.0,
            entry
        ));
        assert!(should_record(
            AgingState::SoonToBeOosla,
            Priority::P1,
            113.0,
            entry
        ));
    }

    #[test]
    fn row_carries_all_columns() {
        let mut w = ReportWriter::new("team", "PROJ", Priority::P1, "https://jira.example.com/");
        w.record(&ticket("PROJ-7"), AgingState::Oosla, 200.0);
        assert_eq!(w.len(), 1);
        let row = &w.rows[0];
        assert!(row.contains("https://jira.example.com/browse/PROJ-7"));
        assert!(row.contains("<td>Bug</td>"));
        assert!(row.contains("<td>Unknown</td>"));
        assert!(row.contains("<td>P1</td>"));
        assert!(row.contains("<td>jdoe</td>"));
        assert!(row.contains("<td>OOSLA</td>"));
        assert!(row.contains("8 days"));
    }

    #[test]
    fn finish_writes_nothing_for_zero_rows_and_clears_stale_files() {
        let dir = TempDir::new().unwrap();
        let w = ReportWriter::new("team", "PROJ", Priority::P0, "https://jira.example.com");
        let stale = dir.path().join(w.file_name());
        std::fs::write(&stale, "old").unwrap();

        let written = w.finish(dir.path()).unwrap();
        assert!(written.is_none());
        assert!(!stale.exists());
    }

    #[test]
    fn finish_writes_named_artifact() {
        let dir = TempDir::new().unwrap();
        let mut w = ReportWriter::new("team", "PROJ", Priority::P3, "https://jira.example.com");
        w.record(&ticket("PROJ-9"), AgingState::SoonToBeOosla, 300.0);

        let path = w.finish(dir.path()).unwrap().unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "team_PROJ_p3_output.html"
        );
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Soon to be OOSLA"));
    }
}
