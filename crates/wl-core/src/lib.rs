//! Core domain logic for work-time tracking.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: the start/resume/hold/end log members record
//! - Segments: rebuilding closed work intervals from that log
//! - History: clipping segments into UTC day buckets
//! - Sessions: the live "current session" total
//! - Rollups: per-member totals for a project

pub mod event;
pub mod event_type;
mod history;
mod normalize;
mod rollup;
mod segment;
mod session;
pub mod types;

#[cfg(test)]
mod test_support;

pub use event::{WorkEvent, WorkTimeEvent};
pub use event_type::{UnknownEventType, WorkEventType};
pub use history::{
    WorkHistoryDay, bucket_segments_by_day, compute_work_history_by_day, day_bounds, split_by_day,
};
pub use normalize::{member_events, project_events, sort_chronologically};
pub use rollup::{MemberWorkSummary, summarize_project};
pub use segment::{SegmentTimeline, WorkSegment, reconstruct_segments};
pub use session::{
    CurrentSessionSummary, DaySeconds, compute_member_work_seconds, evaluate_current_session,
};
pub use types::{EventId, ProjectId, UserId, ValidationError};
