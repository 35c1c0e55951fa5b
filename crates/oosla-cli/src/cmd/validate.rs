use crate::output::{print_json, print_table};
use anyhow::Context;
use oosla_core::config::TeamConfig;
use oosla_core::types::Priority;
use std::path::Path;

pub fn run(team: &str, onboard_dir: &Path, json: bool) -> anyhow::Result<()> {
    let config = TeamConfig::load(onboard_dir, team)
        .with_context(|| format!("loading team document for '{team}'"))?;
    let table = config.sla_table();

    if json {
        return print_json(&serde_json::json!({
            "team": team,
            "projects": config.projects,
            "priorities": config.priorities,
            "oosla_day": config.oosla_day,
            "clock_skew_hours": config.clock_skew_hours,
            "sla_table": table,
        }));
    }

    println!("team document for '{team}' is valid");
    println!(
        "projects: {}  reminder day: {}  clock skew: {}h",
        config.projects.join(", "),
        config.oosla_day,
        config.clock_skew_hours
    );
    println!();

    let mut rows = Vec::new();
    for &p in Priority::all() {
        let non_sec = table.entry(p, false);
        let sec = table.entry(p, true);
        rows.push(vec![
            p.to_string(),
            format!("{}h", non_sec.deadline_hours),
            format!("{}h", non_sec.soon_floor_hours),
            format!("{}h", sec.deadline_hours),
            format!("{}h", sec.soon_floor_hours),
        ]);
    }
    print_table(
        &["priority", "deadline", "soon floor", "sec deadline", "sec soon floor"],
        &rows,
    );
    Ok(())
}
