//! Remote tracker collaborator. The engine talks to a `Tracker` trait
//! object so tests can substitute an in-memory recorder; `JiraClient`
//! is the production implementation over the Jira v2 REST API.

use crate::error::{OoslaError, Result};
use crate::types::{IssueCategory, Priority, Ticket};
use chrono::NaiveDateTime;
use serde_json::Value;
use std::time::Duration;

/// Bounded per-call timeout: a hung tracker call should cost one ticket
/// or one page, not the whole run.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const PAGE_SIZE: u64 = 100;

// ---------------------------------------------------------------------------
// SearchQuery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub project: String,
    pub priority: Priority,
    pub issue_types: Vec<String>,
}

impl SearchQuery {
    pub fn new(project: &str, priority: Priority, issue_types: &[String]) -> Self {
        Self {
            project: project.to_string(),
            priority,
            issue_types: issue_types.to_vec(),
        }
    }

    /// Query expression: open tickets of one project and priority
    /// created in the last year, optionally constrained to the team's
    /// tracked issue types. Type names are quoted since several of them
    /// contain spaces ("Security Defect").
    pub fn jql(&self) -> String {
        let type_clause = if self.issue_types.is_empty() {
            String::new()
        } else {
            let quoted: Vec<String> = self
                .issue_types
                .iter()
                .map(|t| format!("\"{t}\""))
                .collect();
            format!(" AND issuetype in ({})", quoted.join(","))
        };
        format!(
            "project = {}{} AND status in (Open, \"In Progress\") AND priority in (\"{}\") AND created >= -365d",
            self.project,
            type_clause,
            self.priority.search_label()
        )
    }
}

// ---------------------------------------------------------------------------
// Tracker trait
// ---------------------------------------------------------------------------

pub trait Tracker {
    /// Run the search and return the full (already-paginated) result.
    fn search(&self, query: &SearchQuery) -> Result<Vec<Ticket>>;

    fn post_comment(&self, key: &str, body: &str) -> Result<()>;

    fn add_watcher(&self, key: &str, watcher: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// JiraClient
// ---------------------------------------------------------------------------

pub struct JiraClient {
    base_url: String,
    user: String,
    password: String,
    http: reqwest::blocking::Client,
}

impl JiraClient {
    pub fn new(base_url: &str, user: &str, password: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            password: password.to_string(),
            http,
        })
    }

    fn api(&self, path: &str) -> String {
        format!("{}/rest/api/2{}", self.base_url, path)
    }

    fn post(&self, path: &str, payload: &Value) -> Result<()> {
        let value: Value = self
            .http
            .post(self.api(path))
            .basic_auth(&self.user, Some(&self.password))
            .json(payload)
            .send()?
            .error_for_status()?
            .json()
            // Some POST endpoints reply with an empty body on success.
            .unwrap_or(Value::Null);
        check_api_errors(&value)?;
        Ok(())
    }
}

impl Tracker for JiraClient {
    fn search(&self, query: &SearchQuery) -> Result<Vec<Ticket>> {
        let jql = query.jql();
        let mut tickets = Vec::new();
        let mut start_at: u64 = 0;
        let mut total: u64 = 1;

        while start_at < total {
            let value: Value = self
                .http
                .get(self.api("/search"))
                .basic_auth(&self.user, Some(&self.password))
                .query(&[
                    ("jql", jql.as_str()),
                    ("startAt", &start_at.to_string()),
                    ("maxResults", &PAGE_SIZE.to_string()),
                ])
                .send()?
                .error_for_status()?
                .json()?;
            check_api_errors(&value)?;

            total = value["total"].as_u64().unwrap_or(0);
            let issues = value["issues"].as_array().cloned().unwrap_or_default();
            for issue in &issues {
                match parse_issue(issue, query.priority) {
                    Ok(ticket) => tickets.push(ticket),
                    // Data errors are per-ticket: log and keep going.
                    Err(e) => tracing::warn!("skipping malformed issue: {e}"),
                }
            }
            start_at += PAGE_SIZE;
        }

        Ok(tickets)
    }

    fn post_comment(&self, key: &str, body: &str) -> Result<()> {
        self.post(
            &format!("/issue/{key}/comment"),
            &serde_json::json!({ "type": "mention", "body": body }),
        )
    }

    fn add_watcher(&self, key: &str, watcher: &str) -> Result<()> {
        self.post(
            &format!("/issue/{key}/watchers"),
            &Value::String(watcher.to_string()),
        )
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

fn check_api_errors(value: &Value) -> Result<()> {
    if let Some(errors) = value.get("errors") {
        return Err(OoslaError::Tracker(errors.to_string()));
    }
    Ok(())
}

/// Creation timestamps arrive as `2024-03-01T09:30:00.000+0000`; the
/// fractional seconds and offset are dropped before parsing (the value
/// is tracker-local by contract).
fn parse_created(raw: &str) -> Result<NaiveDateTime> {
    let head = raw.split('.').next().unwrap_or(raw);
    let head = head.get(..19).unwrap_or(head);
    NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| OoslaError::InvalidTimestamp(raw.to_string()))
}

fn parse_issue(issue: &Value, priority: Priority) -> Result<Ticket> {
    let key = issue["key"]
        .as_str()
        .ok_or_else(|| OoslaError::Tracker("issue without key".to_string()))?
        .to_string();
    let fields = &issue["fields"];
    let issue_type = fields["issuetype"]["name"]
        .as_str()
        .unwrap_or("Unknown")
        .to_string();

    // Environment lives either in a deployment-specific custom field or
    // in the stock environment field.
    let environment = fields["customfield_123"][0]["value"]
        .as_str()
        .or_else(|| fields["environment"].as_str())
        .map(str::to_string);

    let created_raw = fields["created"]
        .as_str()
        .ok_or_else(|| OoslaError::InvalidTimestamp(format!("{key}: missing created field")))?;

    Ok(Ticket {
        key,
        summary: fields["summary"].as_str().unwrap_or("").to_string(),
        category: IssueCategory::from_issue_type(&issue_type),
        issue_type,
        priority,
        created: parse_created(created_raw)?,
        assignee: fields["assignee"]["name"].as_str().map(str::to_string),
        environment,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
