//! Events command for dumping a member's log as JSON lines.

use std::io::Write;

use anyhow::Result;
use wl_core::{ProjectId, UserId};
use wl_db::{Database, EventScope};

/// Writes the member's events, oldest first, one JSON object per line.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    user_id: &UserId,
    project_id: Option<&ProjectId>,
) -> Result<()> {
    let events = db.list_events(EventScope::member(user_id).in_project(project_id))?;

    for event in events {
        let json = serde_json::to_string(&event)?;
        writeln!(writer, "{json}")?;
    }

    Ok(())
}
