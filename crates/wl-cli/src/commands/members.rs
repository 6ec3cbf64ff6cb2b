//! Members command for listing who has recorded work.

use std::io::Write;

use anyhow::Result;
use wl_core::ProjectId;
use wl_db::Database;

/// Writes one member id per line, sorted.
pub fn run<W: Write>(writer: &mut W, db: &Database, project_id: Option<&ProjectId>) -> Result<()> {
    let users = db.list_users(project_id)?;

    if users.is_empty() {
        match project_id {
            Some(project_id) => writeln!(writer, "No members recorded on {project_id}.")?,
            None => writeln!(writer, "No members recorded.")?,
        }
        return Ok(());
    }

    for user in &users {
        writeln!(writer, "{user}")?;
    }
    Ok(())
}
