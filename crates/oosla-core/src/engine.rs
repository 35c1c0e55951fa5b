//! The run loop: for each configured project × priority, fetch open
//! tickets, filter, classify, notify when the gate allows, and record
//! report rows. One combination is processed end-to-end before the
//! next; remote failures never abort the run, only the ticket or
//! operation they hit.

use crate::age::{age_hours, Magnitude};
use crate::classifier::classify;
use crate::config::TeamConfig;
use crate::error::Result;
use crate::filter::ExclusionFilter;
use crate::gate::NotificationGate;
use crate::message::compose;
use crate::report::{should_record, ReportWriter};
use crate::sla::SlaTable;
use crate::tracker::{SearchQuery, Tracker};
use crate::types::Priority;
use chrono::{Datelike, Local, NaiveDateTime, Weekday};
use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// RunContext
// ---------------------------------------------------------------------------

/// Per-invocation state, captured once at run start so every ticket in
/// a run is judged against the same instant.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub team: String,
    pub now: NaiveDateTime,
    pub weekday: Weekday,
    pub priority_override: Option<Priority>,
}

impl RunContext {
    pub fn capture(team: &str, priority_override: Option<Priority>) -> Self {
        Self::at(team, Local::now().naive_local(), priority_override)
    }

    /// Fixed-instant constructor, used by tests and replayable runs.
    pub fn at(team: &str, now: NaiveDateTime, priority_override: Option<Priority>) -> Self {
        Self {
            team: team.to_string(),
            now,
            weekday: now.weekday(),
            priority_override,
        }
    }
}

// ---------------------------------------------------------------------------
// RunSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Serialize)]
pub struct RunSummary {
    pub combinations: u32,
    pub tickets_classified: u32,
    pub tickets_skipped: u32,
    pub notifications_sent: u32,
    pub reports_written: u32,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct Engine<'a, T: Tracker> {
    config: &'a TeamConfig,
    tracker: &'a T,
    ctx: RunContext,
    output_dir: PathBuf,
    dry_run: bool,
}

impl<'a, T: Tracker> Engine<'a, T> {
    pub fn new(
        config: &'a TeamConfig,
        tracker: &'a T,
        ctx: RunContext,
        output_dir: &Path,
        dry_run: bool,
    ) -> Self {
        Self {
            config,
            tracker,
            ctx,
            output_dir: output_dir.to_path_buf(),
            dry_run,
        }
    }

    pub fn run(&self) -> Result<RunSummary> {
        let table = self.config.sla_table();
        let gate = NotificationGate::new(self.ctx.priority_override, self.config.oosla_weekday()?);
        let mut filter = ExclusionFilter::new(self.config.exception_keys.iter().cloned());
        let mut summary = RunSummary::default();

        let priorities: Vec<Priority> = match self.ctx.priority_override {
            Some(p) => vec![p],
            None => self.config.priorities.clone(),
        };

        for project in &self.config.projects {
            for &priority in &priorities {
                summary.combinations += 1;
                if let Err(e) =
                    self.run_combination(project, priority, &table, &gate, &mut filter, &mut summary)
                {
                    tracing::warn!("skipping {project}/{priority}: {e}");
                }
            }
        }

        Ok(summary)
    }

    fn run_combination(
        &self,
        project: &str,
        priority: Priority,
        table: &SlaTable,
        gate: &NotificationGate,
        filter: &mut ExclusionFilter,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let query = SearchQuery::new(project, priority, &self.config.issue_types);
        tracing::debug!("searching: {}", query.jql());
        let tickets = self.tracker.search(&query)?;

        let mut writer = ReportWriter::new(&self.ctx.team, project, priority, &self.config.base_url);

        for ticket in &tickets {
            let age = age_hours(ticket.created, self.ctx.now, self.config.clock_skew_hours);

            if !filter.should_process(
                &ticket.key,
                ticket.category,
                age,
                self.config.maturity_floor_hours,
            ) {
                summary.tickets_skipped += 1;
                tracing::debug!("skipping {} (excluded, duplicate, or immature)", ticket.key);
                continue;
            }

            let classification = classify(age, priority, ticket.category, table);
            summary.tickets_classified += 1;

            if !self.dry_run
                && gate.should_notify(classification.state, priority, self.ctx.weekday)
            {
                self.notify(ticket, classification.state, classification.magnitude_hours, summary);
            }

            let entry = table.entry(priority, ticket.category.is_security());
            if should_record(classification.state, priority, age, entry) {
                writer.record(ticket, classification.state, age);
            }
        }

        if let Some(path) = writer.finish(&self.output_dir)? {
            summary.reports_written += 1;
            tracing::info!("wrote report {}", path.display());
        }
        Ok(())
    }

    fn notify(
        &self,
        ticket: &crate::types::Ticket,
        state: crate::types::AgingState,
        magnitude_hours: f64,
        summary: &mut RunSummary,
    ) {
        let Some(body) = compose(
            state,
            ticket.priority,
            Magnitude::from_hours(magnitude_hours),
            ticket.category,
            &self.ctx.team,
            &self.config.message,
        ) else {
            return;
        };

        match self.tracker.post_comment(&ticket.key, &body) {
            Ok(()) => summary.notifications_sent += 1,
            Err(e) => tracing::warn!("comment on {} failed: {e}", ticket.key),
        }

        for watcher in &self.config.watchers {
            if let Err(e) = self.tracker.add_watcher(&ticket.key, watcher) {
                tracing::warn!("adding watcher {watcher} to {} failed: {e}", ticket.key);
            }
        }
    }
}
