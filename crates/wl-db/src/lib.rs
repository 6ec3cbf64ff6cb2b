//! Storage layer for the work-time event log.
//!
//! Provides an append-only SQLite table of start/resume/hold/end events using
//! `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` can move between threads but cannot be shared without external
//! synchronization.
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! `occurred_at` is stored as TEXT in RFC 3339 UTC with nanosecond precision
//! (e.g., `2025-03-04T09:00:00.000000000Z`). The fixed width keeps lexicographic
//! ordering identical to chronological ordering.
//!
//! ## Ordering
//!
//! `seq` is the insertion sequence. Queries order by `(occurred_at, seq)` so
//! events recorded at the same instant come back in the order they were
//! recorded.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, Row, params};
use thiserror::Error;
use wl_core::{EventId, ProjectId, UnknownEventType, UserId, ValidationError, WorkTimeEvent};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse a stored event timestamp.
    #[error("invalid timestamp for event {event_id}: {timestamp}")]
    TimestampParse {
        event_id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored event type is not one of start/resume/hold/end.
    #[error("invalid event type for event {event_id}")]
    EventType {
        event_id: String,
        #[source]
        source: UnknownEventType,
    },
    /// A stored identifier failed validation.
    #[error("invalid identifier for event {event_id}")]
    Identifier {
        event_id: String,
        #[source]
        source: ValidationError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// Narrows a query to one member and/or one project.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventScope<'a> {
    pub user_id: Option<&'a UserId>,
    pub project_id: Option<&'a ProjectId>,
}

impl<'a> EventScope<'a> {
    /// All events of one member.
    pub const fn member(user_id: &'a UserId) -> Self {
        Self {
            user_id: Some(user_id),
            project_id: None,
        }
    }

    /// All events recorded against one project.
    pub const fn project(project_id: &'a ProjectId) -> Self {
        Self {
            user_id: None,
            project_id: Some(project_id),
        }
    }

    /// Adds a project filter.
    #[must_use]
    pub const fn in_project(mut self, project_id: Option<&'a ProjectId>) -> Self {
        self.project_id = project_id;
        self
    }
}

/// Raw column values of a stored event, before validation.
struct EventRow {
    id: String,
    user_id: String,
    project_id: Option<String>,
    event_type: String,
    occurred_at: String,
    note: Option<String>,
}

impl EventRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            project_id: row.get(2)?,
            event_type: row.get(3)?,
            occurred_at: row.get(4)?,
            note: row.get(5)?,
        })
    }

    fn into_event(self) -> Result<WorkTimeEvent, DbError> {
        let identifier = |source| DbError::Identifier {
            event_id: self.id.clone(),
            source,
        };
        let user_id = UserId::new(self.user_id.clone()).map_err(identifier)?;
        let project_id = self
            .project_id
            .clone()
            .map(ProjectId::new)
            .transpose()
            .map_err(identifier)?;
        let event_type = self.event_type.parse().map_err(|source| DbError::EventType {
            event_id: self.id.clone(),
            source,
        })?;
        let occurred_at = DateTime::parse_from_rfc3339(&self.occurred_at)
            .map_err(|source| DbError::TimestampParse {
                event_id: self.id.clone(),
                timestamp: self.occurred_at.clone(),
                source,
            })?
            .with_timezone(&Utc);
        let id = EventId::new(self.id.clone()).map_err(identifier)?;

        Ok(WorkTimeEvent {
            id,
            user_id,
            project_id,
            event_type,
            occurred_at,
            note: self.note,
        })
    }
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- Append-only work-time log
            -- occurred_at: RFC 3339 UTC, nanosecond precision
            -- event_type: start | resume | hold | end
            CREATE TABLE IF NOT EXISTS work_time_events (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                user_id TEXT NOT NULL,
                project_id TEXT,
                event_type TEXT NOT NULL,
                occurred_at TEXT NOT NULL,
                note TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_work_time_events_user
                ON work_time_events(user_id, occurred_at);
            CREATE INDEX IF NOT EXISTS idx_work_time_events_project
                ON work_time_events(project_id, occurred_at);
            ",
        )?;
        Ok(())
    }

    /// Appends a batch of events, ignoring duplicates by ID.
    ///
    /// Returns the number of events actually inserted.
    pub fn insert_events(&mut self, events: &[WorkTimeEvent]) -> Result<usize, DbError> {
        if events.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "
                INSERT OR IGNORE INTO work_time_events
                (id, user_id, project_id, event_type, occurred_at, note)
                VALUES (?, ?, ?, ?, ?, ?)
                ",
            )?;
            for event in events {
                inserted += stmt.execute(params![
                    event.id.as_str(),
                    event.user_id.as_str(),
                    event.project_id.as_ref().map(ProjectId::as_str),
                    event.event_type.as_str(),
                    format_timestamp(event.occurred_at),
                    event.note,
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!(inserted, total = events.len(), "inserted work-time events");
        Ok(inserted)
    }

    /// Lists events in scope, ordered by occurrence then recording order.
    pub fn list_events(&self, scope: EventScope<'_>) -> Result<Vec<WorkTimeEvent>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, user_id, project_id, event_type, occurred_at, note
            FROM work_time_events
            WHERE (?1 IS NULL OR user_id = ?1)
              AND (?2 IS NULL OR project_id = ?2)
            ORDER BY occurred_at ASC, seq ASC
            ",
        )?;
        let rows = stmt.query_map(
            params![
                scope.user_id.map(UserId::as_str),
                scope.project_id.map(ProjectId::as_str),
            ],
            EventRow::from_row,
        )?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?.into_event()?);
        }
        Ok(events)
    }

    /// Lists the members who recorded events, optionally within one project.
    pub fn list_users(&self, project_id: Option<&ProjectId>) -> Result<Vec<UserId>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT DISTINCT user_id
            FROM work_time_events
            WHERE (?1 IS NULL OR project_id = ?1)
            ORDER BY user_id ASC
            ",
        )?;
        let rows = stmt.query_map(params![project_id.map(ProjectId::as_str)], |row| {
            row.get::<_, String>(0)
        })?;
        let mut users = Vec::new();
        for row in rows {
            let user_id = row?;
            users.push(UserId::new(user_id.clone()).map_err(|source| DbError::Identifier {
                event_id: format!("<user {user_id}>"),
                source,
            })?);
        }
        Ok(users)
    }

    /// Counts all stored events.
    pub fn count_events(&self) -> Result<u64, DbError> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM work_time_events", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

/// Formats a timestamp for storage.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
