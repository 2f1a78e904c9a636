//! Per-frame breakdown of a roster.

use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, instrument};

use super::record::Record;
use crate::eligibility::EligibilityRules;

/// Number of records sharing one participation frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct FrameCount {
    /// Participation frame name.
    frame: String,
    /// Records in this frame.
    count: usize,
    /// Whether the frame is excluded from drawing.
    excluded: bool,
}

/// Headcounts for the currently loaded roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct RosterStats {
    /// Records in the roster.
    total: usize,
    /// Records marked as attended.
    attendees: usize,
    /// Records currently in the eligible pool.
    eligible: usize,
    /// Winners drawn so far.
    winners: usize,
    /// All records grouped by frame, in first-seen order.
    frames: Vec<FrameCount>,
    /// Attended records grouped by frame, in first-seen order.
    attendee_frames: Vec<FrameCount>,
}

impl RosterStats {
    /// Computes headcounts for `roster` given the current pool and history sizes.
    #[instrument(skip(roster, rules), fields(records = roster.len()))]
    pub fn compute(
        roster: &[Record],
        eligible: usize,
        winners: usize,
        rules: &EligibilityRules,
    ) -> Self {
        let frames = count_by_frame(roster.iter(), rules);
        let attended: Vec<&Record> = roster.iter().filter(|r| rules.attended(r)).collect();
        let attendee_frames = count_by_frame(attended.iter().copied(), rules);

        debug!(
            frames = frames.len(),
            attendees = attended.len(),
            "Roster stats computed"
        );

        Self {
            total: roster.len(),
            attendees: attended.len(),
            eligible,
            winners,
            frames,
            attendee_frames,
        }
    }
}

fn count_by_frame<'a>(
    records: impl Iterator<Item = &'a Record>,
    rules: &EligibilityRules,
) -> Vec<FrameCount> {
    let mut counts: Vec<FrameCount> = Vec::new();
    for record in records {
        match counts
            .iter_mut()
            .find(|c| c.frame == *record.participation_frame())
        {
            Some(entry) => entry.count += 1,
            None => counts.push(FrameCount {
                frame: record.participation_frame().clone(),
                count: 1,
                excluded: rules.excluded_frame(record),
            }),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(frame: &str, user: &str, attendance: &str) -> Record {
        Record::new(
            frame.into(),
            user.into(),
            user.into(),
            "参加".into(),
            attendance.into(),
        )
    }

    #[test]
    fn test_frames_counted_in_first_seen_order() {
        let roster = vec![
            record("一般枠", "a", "出席"),
            record("運営枠", "b", "出席"),
            record("一般枠", "c", "欠席"),
        ];
        let stats = RosterStats::compute(&roster, 1, 0, &EligibilityRules::default());

        assert_eq!(*stats.total(), 3);
        assert_eq!(*stats.attendees(), 2);
        assert_eq!(stats.frames()[0].frame(), "一般枠");
        assert_eq!(*stats.frames()[0].count(), 2);
        assert!(*stats.frames()[1].excluded());

        let attended_general = &stats.attendee_frames()[0];
        assert_eq!(*attended_general.count(), 1);
    }
}
