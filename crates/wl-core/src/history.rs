//! Per-day work history.
//!
//! Segments are clipped to UTC day buckets `[00:00:00.000, 24:00:00.000)` and
//! summed per day. A segment crossing midnight contributes one piece to each
//! day it touches; its note goes only to the piece on the day containing
//! the original `end_at`.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::event::WorkTimeEvent;
use crate::normalize::member_events;
use crate::segment::{WorkSegment, reconstruct_segments};
use crate::types::UserId;

/// One calendar day of a member's work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkHistoryDay {
    /// UTC calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub total_seconds: f64,
    /// Day-clipped segments in the order they were processed.
    pub segments: Vec<WorkSegment>,
}

impl WorkHistoryDay {
    const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_seconds: 0.0,
            segments: Vec::new(),
        }
    }
}

/// Builds a member's day-by-day history, most recent day first.
pub fn compute_work_history_by_day(events: &[WorkTimeEvent], user_id: &UserId) -> Vec<WorkHistoryDay> {
    let events = member_events(events, user_id);
    let timeline = reconstruct_segments(&events);
    tracing::debug!(
        user = %user_id,
        events = events.len(),
        segments = timeline.segments.len(),
        "computed work segments"
    );
    bucket_segments_by_day(&timeline.segments)
}

/// Groups segments into UTC day buckets, most recent day first.
///
/// Zero-length clips are dropped, so a day only appears when some work fell
/// inside it.
pub fn bucket_segments_by_day(segments: &[WorkSegment]) -> Vec<WorkHistoryDay> {
    let mut days: BTreeMap<NaiveDate, WorkHistoryDay> = BTreeMap::new();

    for segment in segments {
        for (date, piece) in split_by_day(segment) {
            let day = days.entry(date).or_insert_with(|| WorkHistoryDay::empty(date));
            day.total_seconds += piece.duration_seconds();
            day.segments.push(piece);
        }
    }

    days.into_values().rev().collect()
}

/// Splits a segment at UTC midnights, clipping each piece to its day.
///
/// The note goes only to the piece dated on `end_at`'s day; every earlier
/// piece has none. A segment ending exactly at midnight has no piece on that
/// day, so its note is not carried into the history.
pub fn split_by_day(segment: &WorkSegment) -> Vec<(NaiveDate, WorkSegment)> {
    let mut pieces = Vec::new();
    let last_day = segment.end_at.date_naive();
    let mut day = segment.start_at.date_naive();

    while day <= last_day {
        let (day_start, day_end) = day_bounds(day);
        let clip_start = segment.start_at.max(day_start);
        let clip_end = segment.end_at.min(day_end);
        if clip_end > clip_start {
            pieces.push((day, WorkSegment::new(clip_start, clip_end, None)));
        }
        let Some(next) = day.succ_opt() else {
            break;
        };
        day = next;
    }

    if let Some((_, last)) = pieces.last_mut().filter(|piece| piece.0 == last_day) {
        last.note.clone_from(&segment.note);
    } else if segment.note.is_some() {
        tracing::debug!(end = %segment.end_at, "segment closed at midnight, note not bucketed");
    }
    pieces
}

/// Start (inclusive) and end (exclusive) of a UTC day.
pub fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}
