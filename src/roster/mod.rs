//! Attendee roster: record types, text parser and per-frame statistics.

mod parser;
mod record;
mod stats;

pub use parser::{
    ATTENDANCE_STATUS, ATTENDANCE_TIMESTAMP, COMMENT, DISPLAY_NAME, ENROLLMENT_DATE,
    PARTICIPATION_FRAME, PARTICIPATION_STATUS, REQUIRED_HEADERS, SchemaError, USERNAME, parse,
    split_fields,
};
pub use record::{ExtraFields, Record};
pub use stats::{FrameCount, RosterStats};

/// Ordered records from one import.
pub type Roster = Vec<Record>;
