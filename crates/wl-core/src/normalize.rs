//! Selecting and ordering the events that belong to one member or project.

use crate::event::{WorkEvent, WorkTimeEvent};
use crate::types::{ProjectId, UserId};

/// Returns the member's events in chronological order.
///
/// Events with identical `occurred_at` keep their relative input order, so a
/// log that returns events in recording order yields a deterministic walk.
pub fn member_events<'a>(events: &'a [WorkTimeEvent], user_id: &UserId) -> Vec<&'a WorkTimeEvent> {
    let mut selected: Vec<_> = events
        .iter()
        .filter(|event| &event.user_id == user_id)
        .collect();
    sort_chronologically(&mut selected);
    selected
}

/// Returns the events recorded against a project, in chronological order.
pub fn project_events<'a>(
    events: &'a [WorkTimeEvent],
    project_id: &ProjectId,
) -> Vec<&'a WorkTimeEvent> {
    let mut selected: Vec<_> = events
        .iter()
        .filter(|event| event.project_id.as_ref() == Some(project_id))
        .collect();
    sort_chronologically(&mut selected);
    selected
}

/// Stable sort by `occurred_at` ascending.
pub fn sort_chronologically<E: WorkEvent>(events: &mut [E]) {
    events.sort_by_key(|event| event.occurred_at());
}
