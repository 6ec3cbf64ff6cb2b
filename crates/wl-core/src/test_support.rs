//! Fixtures shared by the unit tests in this crate.

use chrono::{DateTime, Utc};

use crate::event::WorkTimeEvent;
use crate::event_type::WorkEventType;
use crate::types::{EventId, ProjectId, UserId};

pub fn at(timestamp: &str) -> DateTime<Utc> {
    timestamp.parse().expect("valid RFC 3339 timestamp")
}

pub fn event_for(user: &str, kind: WorkEventType, timestamp: &str) -> WorkTimeEvent {
    let id = format!("{user}-{kind}-{timestamp}");
    WorkTimeEvent::new(
        EventId::new(id).unwrap(),
        UserId::new(user).unwrap(),
        kind,
        at(timestamp),
    )
}

pub fn event(kind: WorkEventType, timestamp: &str) -> WorkTimeEvent {
    event_for("ana", kind, timestamp)
}

pub fn end_with_note(timestamp: &str, note: &str) -> WorkTimeEvent {
    event(WorkEventType::End, timestamp).with_note(note)
}

pub fn on_project(event: WorkTimeEvent, project: &str) -> WorkTimeEvent {
    event.with_project(ProjectId::new(project).unwrap())
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}
