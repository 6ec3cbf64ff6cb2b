//! Current-session evaluation for the live work clock.
//!
//! A session is everything a member did between two `end` events. Hold and
//! resume cycles inside a session keep adding to the same total; `end`
//! freezes the total as the last completed session and starts a new one.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::event::{WorkEvent, WorkTimeEvent};
use crate::event_type::WorkEventType;
use crate::history::split_by_day;
use crate::normalize::member_events;
use crate::segment::{WorkSegment, seconds_between};
use crate::types::UserId;

/// Seconds worked on one UTC day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySeconds {
    pub date: NaiveDate,
    pub seconds: f64,
}

/// The member's current session, or the last completed one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrentSessionSummary {
    /// Closed work in the session. Excludes a still-running segment.
    pub total_seconds: f64,
    /// Start of the running segment, if the clock is running.
    pub running_since: Option<DateTime<Utc>>,
    /// Per-day split of `total_seconds`, oldest day first.
    pub day_breakdown: Vec<DaySeconds>,
}

impl CurrentSessionSummary {
    pub const fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Session total as of `now`, counting the running segment.
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> f64 {
        let running = self
            .running_since
            .filter(|since| *since < now)
            .map_or(0.0, |since| seconds_between(since, now));
        self.total_seconds + running
    }
}

#[derive(Debug, Default)]
struct SessionTotals {
    seconds: f64,
    by_day: BTreeMap<NaiveDate, f64>,
    /// Whether any start/resume happened since the last `end`.
    active: bool,
}

impl SessionTotals {
    fn add(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
        for (date, piece) in split_by_day(&WorkSegment::new(start, end, None)) {
            let seconds = piece.duration_seconds();
            self.seconds += seconds;
            *self.by_day.entry(date).or_insert(0.0) += seconds;
        }
    }

    fn into_summary(self, running_since: Option<DateTime<Utc>>) -> CurrentSessionSummary {
        CurrentSessionSummary {
            total_seconds: self.seconds,
            running_since,
            day_breakdown: self
                .by_day
                .into_iter()
                .map(|(date, seconds)| DaySeconds { date, seconds })
                .collect(),
        }
    }
}

/// Reports a member's current (or most recently completed) session.
pub fn compute_member_work_seconds(events: &[WorkTimeEvent], user_id: &UserId) -> CurrentSessionSummary {
    let events = member_events(events, user_id);
    let summary = evaluate_current_session(&events);
    tracing::debug!(
        user = %user_id,
        total_seconds = summary.total_seconds,
        running = summary.is_running(),
        "evaluated current session"
    );
    summary
}

/// Walks chronologically ordered events and reports the current session.
///
/// - A segment still open: totals so far plus `running_since`.
/// - A paused session (activity since the last `end`, nothing open): its totals.
/// - Otherwise the last completed session, or zero if there was none.
///
/// A `start`/`resume` while a segment is open closes it at that instant,
/// matching [`reconstruct_segments`](crate::reconstruct_segments), and the
/// closed piece counts toward the session totals alongside the
/// `start`/`resume` to `hold`/`end` pairings.
pub fn evaluate_current_session<E: WorkEvent>(events: &[E]) -> CurrentSessionSummary {
    let mut open: Option<DateTime<Utc>> = None;
    let mut current = SessionTotals::default();
    let mut last_completed: Option<SessionTotals> = None;

    for event in events {
        let event_time = event.occurred_at();
        match event.event_type() {
            WorkEventType::Start | WorkEventType::Resume => {
                if let Some(start) = open.replace(event_time) {
                    current.add(start, event_time);
                }
                current.active = true;
            }
            WorkEventType::Hold => {
                if let Some(start) = open.take() {
                    current.add(start, event_time);
                }
            }
            WorkEventType::End => {
                if let Some(start) = open.take() {
                    current.add(start, event_time);
                }
                // A repeated end has nothing to snapshot.
                if current.active {
                    last_completed = Some(std::mem::take(&mut current));
                }
            }
        }
    }

    if open.is_some() || current.active {
        return current.into_summary(open);
    }
    last_completed.map_or_else(CurrentSessionSummary::default, |totals| {
        totals.into_summary(None)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_type::WorkEventType::{End, Hold, Resume, Start};
    use crate::test_support::{at, end_with_note, event, event_for, user};

    fn breakdown(summary: &CurrentSessionSummary) -> Vec<(String, f64)> {
        summary
            .day_breakdown
            .iter()
            .map(|day| (day.date.to_string(), day.seconds))
            .collect()
    }

    #[test]
    fn no_events_reports_zero() {
        let summary = compute_member_work_seconds(&[], &user("ana"));
        assert_eq!(summary, CurrentSessionSummary::default());
        assert_eq!(summary.running_since, None);
        assert!(summary.day_breakdown.is_empty());
    }

    #[test]
    fn hold_resume_cycle_counts_only_worked_time() {
        let events = vec![
            event(Start, "2025-03-04T09:00:00Z"),
            event(Hold, "2025-03-04T10:00:00Z"),
            event(Resume, "2025-03-04T11:00:00Z"),
            end_with_note("2025-03-04T12:00:00Z", "x"),
        ];

        let summary = compute_member_work_seconds(&events, &user("ana"));

        assert!((summary.total_seconds - 7_200.0).abs() < f64::EPSILON);
        assert!(!summary.is_running());
        assert_eq!(breakdown(&summary), vec![("2025-03-04".to_string(), 7_200.0)]);
    }

    #[test]
    fn double_start_reports_running_since_second_start() {
        let events = vec![
            event(Start, "2025-03-04T09:00:00Z"),
            event(Start, "2025-03-04T09:30:00Z"),
        ];

        let summary = compute_member_work_seconds(&events, &user("ana"));

        assert_eq!(summary.running_since, Some(at("2025-03-04T09:30:00Z")));
        assert!((summary.total_seconds - 1_800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn running_segment_excludes_open_tail() {
        let events = vec![
            event(Start, "2025-03-04T09:00:00Z"),
            event(Hold, "2025-03-04T09:45:00Z"),
            event(Resume, "2025-03-04T10:00:00Z"),
        ];

        let summary = compute_member_work_seconds(&events, &user("ana"));

        assert_eq!(summary.running_since, Some(at("2025-03-04T10:00:00Z")));
        assert!((summary.total_seconds - 2_700.0).abs() < f64::EPSILON);
        let now = at("2025-03-04T10:15:00Z");
        assert!((summary.elapsed_at(now) - 3_600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_session_after_end_starts_from_zero() {
        let events = vec![
            event(Start, "2025-03-03T09:00:00Z"),
            event(End, "2025-03-03T17:00:00Z"),
            event(Start, "2025-03-04T09:00:00Z"),
        ];

        let summary = compute_member_work_seconds(&events, &user("ana"));

        assert_eq!(summary.running_since, Some(at("2025-03-04T09:00:00Z")));
        assert!(summary.total_seconds.abs() < f64::EPSILON);
        assert!(summary.day_breakdown.is_empty());
    }

    #[test]
    fn reports_last_completed_session_after_end() {
        let events = vec![
            event(Start, "2025-03-03T09:00:00Z"),
            event(End, "2025-03-03T17:00:00Z"),
            event(Start, "2025-03-04T09:00:00Z"),
            event(End, "2025-03-04T10:00:00Z"),
        ];

        let summary = compute_member_work_seconds(&events, &user("ana"));

        assert!((summary.total_seconds - 3_600.0).abs() < f64::EPSILON);
        assert_eq!(breakdown(&summary), vec![("2025-03-04".to_string(), 3_600.0)]);
    }

    #[test]
    fn repeated_end_keeps_last_completed_snapshot() {
        let events = vec![
            event(Start, "2025-03-04T09:00:00Z"),
            end_with_note("2025-03-04T10:00:00Z", "a"),
            end_with_note("2025-03-04T11:00:00Z", "b"),
        ];

        let summary = compute_member_work_seconds(&events, &user("ana"));

        assert!((summary.total_seconds - 3_600.0).abs() < f64::EPSILON);
        assert_eq!(summary.running_since, None);
    }

    #[test]
    fn paused_session_reports_accumulated_time() {
        let events = vec![
            event(Start, "2025-03-04T09:00:00Z"),
            event(End, "2025-03-04T09:30:00Z"),
            event(Start, "2025-03-04T13:00:00Z"),
            event(Hold, "2025-03-04T13:20:00Z"),
        ];

        let summary = compute_member_work_seconds(&events, &user("ana"));

        assert!((summary.total_seconds - 1_200.0).abs() < f64::EPSILON);
        assert!(!summary.is_running());
    }

    #[test]
    fn overnight_session_breakdown_is_chronological() {
        let events = vec![
            event(Start, "2025-03-04T23:00:00Z"),
            event(Hold, "2025-03-05T01:00:00Z"),
            event(Resume, "2025-03-05T02:00:00Z"),
            event(End, "2025-03-05T02:30:00Z"),
        ];

        let summary = compute_member_work_seconds(&events, &user("ana"));

        assert_eq!(
            breakdown(&summary),
            vec![
                ("2025-03-04".to_string(), 3_600.0),
                ("2025-03-05".to_string(), 5_400.0),
            ]
        );
        assert!((summary.total_seconds - 9_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn only_target_member_counts() {
        let events = vec![
            event(Start, "2025-03-04T09:00:00Z"),
            event_for("ben", End, "2025-03-04T09:10:00Z"),
        ];

        let summary = compute_member_work_seconds(&events, &user("ana"));

        assert_eq!(summary.running_since, Some(at("2025-03-04T09:00:00Z")));
    }

    #[test]
    fn elapsed_ignores_clock_skew() {
        let summary = CurrentSessionSummary {
            total_seconds: 60.0,
            running_since: Some(at("2025-03-04T10:00:00Z")),
            day_breakdown: Vec::new(),
        };
        let before = at("2025-03-04T09:59:00Z");
        assert!((summary.elapsed_at(before) - 60.0).abs() < f64::EPSILON);
    }
}
