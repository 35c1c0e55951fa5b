use crate::output::{print_json, print_table};
use anyhow::Context;
use oosla_core::config::TeamConfig;
use oosla_core::engine::{Engine, RunContext};
use oosla_core::tracker::JiraClient;
use oosla_core::types::Priority;
use std::path::Path;

#[allow(clippy::too_many_arguments)]
pub fn run(
    team: &str,
    user: &str,
    password: &str,
    priority: Option<Priority>,
    onboard_dir: &Path,
    output_dir: &Path,
    base_url: Option<&str>,
    dry_run: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = TeamConfig::load(onboard_dir, team)
        .with_context(|| format!("loading team document for '{team}'"))?;
    if let Some(url) = base_url {
        config.base_url = url.to_string();
    }

    let client = JiraClient::new(&config.base_url, user, password)
        .context("building tracker client")?;
    let ctx = RunContext::capture(team, priority);

    let summary = Engine::new(&config, &client, ctx, output_dir, dry_run)
        .run()
        .context("evaluating SLA aging")?;

    if json {
        print_json(&summary)
    } else {
        print_table(
            &["combinations", "classified", "skipped", "notified", "reports"],
            &[vec![
                summary.combinations.to_string(),
                summary.tickets_classified.to_string(),
                summary.tickets_skipped.to_string(),
                summary.notifications_sent.to_string(),
                summary.reports_written.to_string(),
            ]],
        );
        Ok(())
    }
}
