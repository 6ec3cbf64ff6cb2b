//! Work-time events recorded by members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event_type::WorkEventType;
use crate::types::{EventId, ProjectId, UserId};

/// A single start/resume/hold/end action in a member's work log.
///
/// Events are append-only facts; nothing in this crate mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTimeEvent {
    /// Unique identifier for this event.
    pub id: EventId,
    /// The member who recorded the event.
    pub user_id: UserId,
    /// The project the work was recorded against, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// Which action was recorded.
    pub event_type: WorkEventType,
    /// When the action happened.
    pub occurred_at: DateTime<Utc>,
    /// Free-text note. Only meaningful on `end` events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WorkTimeEvent {
    /// Creates an event with no project and no note.
    pub const fn new(
        id: EventId,
        user_id: UserId,
        event_type: WorkEventType,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            project_id: None,
            event_type,
            occurred_at,
            note: None,
        }
    }

    /// Scopes the event to a project.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Attaches a note to the event.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// An event the segment reconstruction can walk.
///
/// This lets the algorithms run over owned events, borrowed events, or
/// test fixtures without copying.
pub trait WorkEvent {
    /// Returns when the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Returns the event's type.
    fn event_type(&self) -> WorkEventType;

    /// Returns the note attached to the event, if any.
    fn note(&self) -> Option<&str>;
}

impl WorkEvent for WorkTimeEvent {
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn event_type(&self) -> WorkEventType {
        self.event_type
    }

    fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

impl<E: WorkEvent + ?Sized> WorkEvent for &E {
    fn occurred_at(&self) -> DateTime<Utc> {
        (**self).occurred_at()
    }

    fn event_type(&self) -> WorkEventType {
        (**self).event_type()
    }

    fn note(&self) -> Option<&str> {
        (**self).note()
    }
}
