//! Draw eligibility: which roster records may still be drawn.

use std::collections::HashSet;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::roster::Record;

/// Attendance value that makes a record draw-eligible.
pub const ATTENDED: &str = "出席";

/// Participation frame that is never drawn.
pub const ORGANIZER_FRAME: &str = "運営枠";

/// Literal values deciding eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct EligibilityRules {
    /// Exact attendance status meaning "attended".
    attended_marker: String,
    /// Exact participation frame meaning "organizer/staff slot".
    organizer_frame: String,
}

impl EligibilityRules {
    /// Creates rules from explicit literals.
    pub fn new(attended_marker: impl Into<String>, organizer_frame: impl Into<String>) -> Self {
        Self {
            attended_marker: attended_marker.into(),
            organizer_frame: organizer_frame.into(),
        }
    }

    /// Whether the record is marked as attended.
    pub fn attended(&self, record: &Record) -> bool {
        *record.attendance_status() == self.attended_marker
    }

    /// Whether the record sits in the excluded organizer frame.
    pub fn excluded_frame(&self, record: &Record) -> bool {
        *record.participation_frame() == self.organizer_frame
    }

    /// Derives the eligible pool: attended, not organizer, not yet a winner.
    ///
    /// Roster order is preserved.
    #[instrument(skip_all, fields(roster = roster.len(), history = history.len()))]
    pub fn eligible(&self, roster: &[Record], history: &[Record]) -> Vec<Record> {
        let winners: HashSet<&str> = history.iter().map(|w| w.username().as_str()).collect();

        let pool: Vec<Record> = roster
            .iter()
            .filter(|r| {
                self.attended(r)
                    && !self.excluded_frame(r)
                    && !winners.contains(r.username().as_str())
            })
            .cloned()
            .collect();

        debug!(eligible = pool.len(), "Eligible pool derived");
        pool
    }
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self::new(ATTENDED, ORGANIZER_FRAME)
    }
}

/// Derives the eligible pool under the default rules.
pub fn eligible(roster: &[Record], history: &[Record]) -> Vec<Record> {
    EligibilityRules::default().eligible(roster, history)
}
