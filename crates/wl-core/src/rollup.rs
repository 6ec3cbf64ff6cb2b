//! Project-level rollup across members.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::event::WorkTimeEvent;
use crate::history::bucket_segments_by_day;
use crate::normalize::project_events;
use crate::segment::reconstruct_segments;
use crate::session::{CurrentSessionSummary, evaluate_current_session};
use crate::types::{ProjectId, UserId};

/// One member's work on a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberWorkSummary {
    pub user_id: UserId,
    /// All closed work on the project.
    pub total_seconds: f64,
    /// Number of UTC days with any closed work.
    pub days_worked: usize,
    pub current: CurrentSessionSummary,
}

/// Summarizes every member who recorded time on a project, sorted by user ID.
pub fn summarize_project(events: &[WorkTimeEvent], project_id: &ProjectId) -> Vec<MemberWorkSummary> {
    let mut by_member: BTreeMap<&UserId, Vec<&WorkTimeEvent>> = BTreeMap::new();
    for event in project_events(events, project_id) {
        by_member.entry(&event.user_id).or_default().push(event);
    }
    let members: Vec<_> = by_member.into_iter().collect();

    tracing::debug!(project = %project_id, members = members.len(), "summarizing project");

    members
        .par_iter()
        .map(|(user_id, events)| {
            let timeline = reconstruct_segments(events);
            let days = bucket_segments_by_day(&timeline.segments);
            MemberWorkSummary {
                user_id: (*user_id).clone(),
                total_seconds: days.iter().map(|day| day.total_seconds).sum(),
                days_worked: days.len(),
                current: evaluate_current_session(events),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_type::WorkEventType::{End, Hold, Start};
    use crate::test_support::{at, event_for, on_project};

    fn project(id: &str) -> ProjectId {
        ProjectId::new(id).unwrap()
    }

    #[test]
    fn summarizes_each_member_in_user_order() {
        let events = vec![
            on_project(event_for("cleo", Start, "2025-03-04T09:00:00Z"), "site"),
            on_project(event_for("ana", Start, "2025-03-03T09:00:00Z"), "site"),
            on_project(event_for("ana", End, "2025-03-03T11:00:00Z"), "site"),
            on_project(event_for("ana", Start, "2025-03-04T09:00:00Z"), "site"),
            on_project(event_for("ana", Hold, "2025-03-04T09:30:00Z"), "site"),
            on_project(event_for("ben", Start, "2025-03-04T08:00:00Z"), "app"),
            event_for("ben", End, "2025-03-04T09:00:00Z"),
        ];

        let summaries = summarize_project(&events, &project("site"));

        let users: Vec<_> = summaries.iter().map(|s| s.user_id.as_str()).collect();
        assert_eq!(users, ["ana", "cleo"]);

        let ana = &summaries[0];
        assert!((ana.total_seconds - 9_000.0).abs() < f64::EPSILON);
        assert_eq!(ana.days_worked, 2);
        assert!((ana.current.total_seconds - 1_800.0).abs() < f64::EPSILON);
        assert!(!ana.current.is_running());

        let cleo = &summaries[1];
        assert!(cleo.total_seconds.abs() < f64::EPSILON);
        assert_eq!(cleo.days_worked, 0);
        assert_eq!(cleo.current.running_since, Some(at("2025-03-04T09:00:00Z")));
    }

    #[test]
    fn unknown_project_is_empty() {
        let events = vec![on_project(event_for("ana", Start, "2025-03-04T09:00:00Z"), "site")];
        assert!(summarize_project(&events, &project("other")).is_empty());
    }
}
