//! Record command for appending one event to the work log.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;
use wl_core::{EventId, UserId, WorkEventType, WorkTimeEvent};
use wl_db::Database;

use crate::RecordArgs;
use crate::commands::util::parse_datetime;

/// Records the event described by `args` and reports what was written.
pub fn run<W: Write>(
    writer: &mut W,
    db: &mut Database,
    args: &RecordArgs,
    user_id: UserId,
    now: DateTime<Utc>,
) -> Result<WorkTimeEvent> {
    let event = build_event(args, user_id, now)?;
    db.insert_events(std::slice::from_ref(&event))
        .context("failed to record event")?;

    if args.note.is_some() && event.event_type != WorkEventType::End {
        tracing::warn!(kind = %event.event_type, "notes are only kept on end events");
    }
    writeln!(
        writer,
        "Recorded {} for {} at {}",
        event.event_type,
        event.user_id,
        event.occurred_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    Ok(event)
}

/// Builds the event with a fresh ID, resolving `--at` against `now`.
pub fn build_event(args: &RecordArgs, user_id: UserId, now: DateTime<Utc>) -> Result<WorkTimeEvent> {
    let occurred_at = match args.at.as_deref() {
        Some(at) => parse_datetime(at, now).context("invalid --at")?,
        None => now,
    };
    let id = EventId::new(Uuid::new_v4().to_string())?;

    let mut event = WorkTimeEvent::new(id, user_id, args.kind, occurred_at);
    if let Some(project) = &args.member.project {
        event = event.with_project(project.clone());
    }
    if let Some(note) = args.note.as_deref().map(str::trim).filter(|note| !note.is_empty()) {
        event = event.with_note(note);
    }
    Ok(event)
}
