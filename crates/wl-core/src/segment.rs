//! Work segment reconstruction.
//!
//! Walks one member's chronologically ordered events and pairs each
//! `start`/`resume` with the next `hold`/`end`, producing closed
//! `[start_at, end_at)` segments.
//!
//! Malformed sequences are repaired rather than rejected:
//!
//! - a `start`/`resume` while a segment is open force-closes the open
//!   segment at the new event's time, so segments never overlap;
//! - an `end` with nothing open hands its note to the last segment if that
//!   segment has none yet;
//! - a `hold` with nothing open is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::WorkEvent;
use crate::event_type::WorkEventType;

/// A contiguous interval during which a member was working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSegment {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    /// Note from the `end` event that closed the segment.
    pub note: Option<String>,
}

impl WorkSegment {
    pub const fn new(start_at: DateTime<Utc>, end_at: DateTime<Utc>, note: Option<String>) -> Self {
        Self {
            start_at,
            end_at,
            note,
        }
    }

    /// Length of the segment in (fractional) seconds.
    pub fn duration_seconds(&self) -> f64 {
        seconds_between(self.start_at, self.end_at)
    }
}

/// Result of walking an event stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentTimeline {
    /// Closed segments, ordered by `start_at`.
    pub segments: Vec<WorkSegment>,
    /// Start of the trailing segment that no `hold`/`end` has closed yet.
    pub open_since: Option<DateTime<Utc>>,
}

/// Rebuilds closed work segments from a member's events.
///
/// Events must be sorted by `occurred_at` ascending (see
/// [`member_events`](crate::member_events)).
pub fn reconstruct_segments<E: WorkEvent>(events: &[E]) -> SegmentTimeline {
    let mut segments: Vec<WorkSegment> = Vec::new();
    let mut segment_start: Option<DateTime<Utc>> = None;

    for event in events {
        let event_time = event.occurred_at();
        let kind = event.event_type();

        match kind {
            WorkEventType::Start | WorkEventType::Resume => {
                if let Some(start) = segment_start.replace(event_time) {
                    tracing::debug!(%start, %event_time, %kind, "force-closing open segment");
                    segments.push(WorkSegment::new(start, event_time, None));
                }
            }
            WorkEventType::Hold | WorkEventType::End => {
                if let Some(start) = segment_start.take() {
                    let note = if kind == WorkEventType::End {
                        event.note().map(str::to_string)
                    } else {
                        None
                    };
                    segments.push(WorkSegment::new(start, event_time, note));
                } else if kind == WorkEventType::End {
                    attach_dangling_note(&mut segments, event.note());
                }
            }
        }
    }

    SegmentTimeline {
        segments,
        open_since: segment_start,
    }
}

/// Gives a dangling `end` note to the last segment, first note wins.
fn attach_dangling_note(segments: &mut [WorkSegment], note: Option<&str>) {
    let Some(note) = note else {
        return;
    };
    match segments.last_mut() {
        Some(last) if last.note.is_none() => {
            tracing::debug!(start = %last.start_at, "attaching dangling end note");
            last.note = Some(note.to_string());
        }
        Some(_) => tracing::debug!("dangling end note dropped, segment already has a note"),
        None => tracing::debug!("dangling end note dropped, no segment to attach to"),
    }
}

/// Seconds from `start` to `end` at full timestamp precision.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = end - start;
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        // Only spans beyond ~292 years overflow nanoseconds.
        None => delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9,
    }
}
