//! Summary command for per-member totals on a project.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use wl_core::{MemberWorkSummary, ProjectId, summarize_project};
use wl_db::{Database, EventScope};

use crate::commands::util::format_seconds;

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    project_id: &ProjectId,
    json: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    let events = db.list_events(EventScope::project(project_id))?;
    let summaries = summarize_project(&events, project_id);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summaries)?)?;
    } else {
        write!(writer, "{}", format_summary(project_id, &summaries, now))?;
    }
    Ok(())
}

pub fn format_summary(
    project_id: &ProjectId,
    summaries: &[MemberWorkSummary],
    now: DateTime<Utc>,
) -> String {
    let mut output = String::new();
    if summaries.is_empty() {
        let _ = writeln!(output, "No work recorded on {project_id}.");
        return output;
    }

    let width = summaries
        .iter()
        .map(|summary| summary.user_id.as_str().len())
        .max()
        .unwrap_or_default()
        .max("MEMBER".len());

    let _ = writeln!(output, "Project: {project_id}");
    let _ = writeln!(output);
    let _ = writeln!(output, "{:<width$}  {:>8}  {:>4}  SESSION", "MEMBER", "TOTAL", "DAYS");
    for summary in summaries {
        let session = if summary.current.is_running() {
            format!("running, {}", format_seconds(summary.current.elapsed_at(now)))
        } else {
            format!("last {}", format_seconds(summary.current.total_seconds))
        };
        let _ = writeln!(
            output,
            "{:<width$}  {:>8}  {:>4}  {session}",
            summary.user_id.as_str(),
            format_seconds(summary.total_seconds),
            summary.days_worked,
        );
    }
    output
}
