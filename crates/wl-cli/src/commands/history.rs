//! History command for a member's day-by-day work log.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use wl_core::{ProjectId, UserId, WorkHistoryDay, compute_work_history_by_day};
use wl_db::{Database, EventScope};

use crate::commands::util::format_seconds;

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    user_id: &UserId,
    project_id: Option<&ProjectId>,
    json: bool,
) -> Result<()> {
    let events = db.list_events(EventScope::member(user_id).in_project(project_id))?;
    let history = compute_work_history_by_day(&events, user_id);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&history)?)?;
    } else {
        write!(writer, "{}", format_history(user_id, &history))?;
    }
    Ok(())
}

/// Renders the history newest day first, one indented line per segment.
pub fn format_history(user_id: &UserId, history: &[WorkHistoryDay]) -> String {
    let mut output = String::new();
    if history.is_empty() {
        let _ = writeln!(output, "No work recorded for {user_id}.");
        return output;
    }

    let total: f64 = history.iter().map(|day| day.total_seconds).sum();
    let _ = writeln!(output, "Work history for {user_id} ({} total)", format_seconds(total));

    for day in history {
        let _ = writeln!(output);
        let _ = writeln!(output, "{}  {}", day.date, format_seconds(day.total_seconds));
        for segment in &day.segments {
            let _ = write!(
                output,
                "  {}-{}  {:>7}",
                clock(segment.start_at, day),
                clock(segment.end_at, day),
                format_seconds(segment.duration_seconds())
            );
            if let Some(note) = &segment.note {
                let _ = write!(output, "  {note}");
            }
            let _ = writeln!(output);
        }
    }
    output
}

/// HH:MM within the day; the closing midnight shows as 24:00.
fn clock(value: DateTime<Utc>, day: &WorkHistoryDay) -> String {
    if value.date_naive() > day.date {
        "24:00".to_string()
    } else {
        value.format("%H:%M").to_string()
    }
}
