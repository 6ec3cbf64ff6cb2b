//! Status command for a member's live work clock.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use wl_core::{CurrentSessionSummary, ProjectId, UserId, compute_member_work_seconds};
use wl_db::{Database, EventScope};

use crate::commands::util::format_seconds;

#[derive(Debug, Serialize)]
struct StatusJson<'a> {
    user_id: &'a UserId,
    #[serde(flatten)]
    session: &'a CurrentSessionSummary,
    elapsed_seconds: f64,
}

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    user_id: &UserId,
    project_id: Option<&ProjectId>,
    json: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    let events = db.list_events(EventScope::member(user_id).in_project(project_id))?;
    let session = compute_member_work_seconds(&events, user_id);

    if json {
        let status = StatusJson {
            user_id,
            session: &session,
            elapsed_seconds: session.elapsed_at(now),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&status)?)?;
    } else {
        write!(writer, "{}", format_status(user_id, &session, now))?;
    }
    Ok(())
}

pub fn format_status(user_id: &UserId, session: &CurrentSessionSummary, now: DateTime<Utc>) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Member: {user_id}");

    match session.running_since {
        Some(since) => {
            let _ = writeln!(
                output,
                "Status: running since {} UTC ({} elapsed)",
                since.format("%Y-%m-%d %H:%M"),
                format_seconds(session.elapsed_at(now))
            );
        }
        None if session.day_breakdown.is_empty() => {
            let _ = writeln!(output, "Status: no work recorded");
            return output;
        }
        None => {
            let _ = writeln!(output, "Status: not running");
        }
    }

    let _ = writeln!(output, "Session total: {}", format_seconds(session.total_seconds));
    for day in &session.day_breakdown {
        let _ = writeln!(output, "  {}  {}", day.date, format_seconds(day.seconds));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use wl_core::{EventId, WorkEventType, WorkTimeEvent};

    fn event(id: &str, kind: WorkEventType, at: &str) -> WorkTimeEvent {
        WorkTimeEvent::new(
            EventId::new(id).unwrap(),
            UserId::new("ana").unwrap(),
            kind,
            at.parse().unwrap(),
        )
    }

    fn now() -> DateTime<Utc> {
        "2025-03-05T10:30:00Z".parse().unwrap()
    }

    #[test]
    fn running_session_across_midnight() {
        let events = vec![
            event("1", WorkEventType::Start, "2025-03-04T23:00:00Z"),
            event("2", WorkEventType::Hold, "2025-03-05T01:00:00Z"),
            event("3", WorkEventType::Resume, "2025-03-05T10:00:00Z"),
        ];
        let ana = UserId::new("ana").unwrap();
        let session = compute_member_work_seconds(&events, &ana);

        assert_snapshot!(format_status(&ana, &session, now()), @r"
        Member: ana
        Status: running since 2025-03-05 10:00 UTC (2h 30m elapsed)
        Session total: 2h 0m
          2025-03-04  1h 0m
          2025-03-05  1h 0m
        ");
    }

    #[test]
    fn completed_session_is_not_running() {
        let events = vec![
            event("1", WorkEventType::Start, "2025-03-05T08:00:00Z"),
            event("2", WorkEventType::End, "2025-03-05T08:40:00Z"),
        ];
        let ana = UserId::new("ana").unwrap();
        let session = compute_member_work_seconds(&events, &ana);

        assert_snapshot!(format_status(&ana, &session, now()), @r"
        Member: ana
        Status: not running
        Session total: 40m
          2025-03-05  40m
        ");
    }

    #[test]
    fn no_events_reports_nothing_recorded() {
        let ana = UserId::new("ana").unwrap();
        let output = format_status(&ana, &CurrentSessionSummary::default(), now());
        assert_eq!(output, "Member: ana\nStatus: no work recorded\n");
    }

    #[test]
    fn json_includes_running_tail_in_elapsed() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_events(&[event("1", WorkEventType::Start, "2025-03-05T10:00:00Z")])
            .unwrap();
        let ana = UserId::new("ana").unwrap();

        let mut output = Vec::new();
        run(&mut output, &db, &ana, None, true, now()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["user_id"], "ana");
        assert_eq!(value["total_seconds"], 0.0);
        assert_eq!(value["running_since"], "2025-03-05T10:00:00Z");
        assert_eq!(value["elapsed_seconds"], 1_800.0);
        assert_eq!(value["day_breakdown"], serde_json::json!([]));
    }
}
