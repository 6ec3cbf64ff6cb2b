//! Import command for loading work-time events into the local event log.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use wl_core::{EventId, ProjectId, UserId, WorkEventType, WorkTimeEvent};
use wl_db::Database;

use crate::ImportArgs;

/// Reads JSON lines from `reader` and stores them, returning how many were new.
///
/// The whole batch is rejected if any line is invalid.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    db: &mut Database,
    args: &ImportArgs,
) -> Result<usize> {
    let events = parse_events(reader, args)?;
    let inserted = db.insert_events(&events)?;
    let stored = db.count_events()?;
    tracing::info!(
        read = events.len(),
        inserted,
        stored,
        "imported work-time events"
    );
    writeln!(writer, "Imported {inserted} new events ({stored} stored)")?;
    Ok(inserted)
}

fn parse_events<R: BufRead>(reader: R, defaults: &ImportArgs) -> Result<Vec<WorkTimeEvent>> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parsed: ImportEvent = serde_json::from_str(trimmed)
            .with_context(|| format!("invalid JSON on line {}", idx + 1))?;
        let event = parsed
            .into_event(defaults)
            .with_context(|| format!("invalid event on line {}", idx + 1))?;
        events.push(event);
    }
    Ok(events)
}

/// An incoming log line. Strings are validated in [`ImportEvent::into_event`]
/// so errors name the offending field.
#[derive(Debug, Deserialize)]
struct ImportEvent {
    id: String,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    project_id: Option<String>,
    #[serde(alias = "type")]
    event_type: String,
    occurred_at: String,
    #[serde(default)]
    note: Option<String>,
}

impl ImportEvent {
    fn into_event(self, defaults: &ImportArgs) -> Result<WorkTimeEvent> {
        let id = EventId::new(self.id).context("invalid id")?;
        let user_id = match self.user_id.filter(|value| !value.trim().is_empty()) {
            Some(value) => UserId::new(value).context("invalid user_id")?,
            None => defaults
                .user
                .clone()
                .context("missing user_id and no --user given")?,
        };
        let project_id = match self.project_id.filter(|value| !value.trim().is_empty()) {
            Some(value) => Some(ProjectId::new(value).context("invalid project_id")?),
            None => defaults.project.clone(),
        };
        let event_type: WorkEventType = self.event_type.parse()?;
        let occurred_at = DateTime::parse_from_rfc3339(self.occurred_at.trim())
            .with_context(|| format!("invalid occurred_at: {}", self.occurred_at))?
            .with_timezone(&Utc);
        let note = self.note.filter(|value| !value.trim().is_empty());

        Ok(WorkTimeEvent {
            id,
            user_id,
            project_id,
            event_type,
            occurred_at,
            note,
        })
    }
}
