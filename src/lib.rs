//! Attendee lottery - non-repeating winner draws from an event roster.
//!
//! # Architecture
//!
//! - **Roster**: parses delimited attendee text into [`Record`]s with header validation
//! - **Eligibility**: derives the drawable pool from attendance, frame and prior winners
//! - **Draw**: uniform single-winner selection over an injectable [`RandomSource`]
//! - **Store**: [`WinnerHistory`] persisted through a [`KeyValueStore`]
//! - **Session**: the import → draw → reset lifecycle, with [`LotteryDesk`] for paced draws
//!
//! # Example
//!
//! ```
//! use attendee_lottery::{LotterySession, MemoryStore, SeededRandom, SessionState};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let csv = "参加枠名,ユーザー名,表示名,利用開始日,コメント,参加ステータス,出欠ステータス,出席日時\n\
//!            一般枠,alice,Alice,2024-01-01,,参加,出席,2024-02-01 19:00";
//!
//! let mut session = LotterySession::open(MemoryStore::new(), SeededRandom::new(42))?;
//! session.import(csv)?;
//! let winner = session.draw_one()?;
//! assert_eq!(winner.username(), "alice");
//! assert_eq!(session.state(), SessionState::Exhausted);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod desk;
mod draw;
mod eligibility;
mod invariants;
mod roster;
mod session;
mod store;

// Crate-level exports - Configuration
pub use config::{ConfigError, LotteryConfig};

// Crate-level exports - Roster
pub use roster::{
    ExtraFields, FrameCount, REQUIRED_HEADERS, Record, Roster, RosterStats, SchemaError, parse,
    split_fields,
};

// Crate-level exports - Eligibility
pub use eligibility::{ATTENDED, EligibilityRules, ORGANIZER_FRAME, eligible};

// Crate-level exports - Draw
pub use draw::{Draw, EmptyPoolError, RandomSource, SeededRandom, ThreadRandom, UnitInterval, draw};

// Crate-level exports - Persistence
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, WINNERS_KEY, WinnerHistory};

// Crate-level exports - Invariants
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, LotteryInvariants, PoolExcludesWinnersInvariant,
    PoolWithinRosterInvariant, Snapshot, UniqueWinnersInvariant,
};

// Crate-level exports - Session
pub use desk::LotteryDesk;
pub use session::{ImportSummary, LotteryError, LotterySession, SessionState};

/// Roster header column names.
pub mod headers {
    pub use crate::roster::{
        ATTENDANCE_STATUS, ATTENDANCE_TIMESTAMP, COMMENT, DISPLAY_NAME, ENROLLMENT_DATE,
        PARTICIPATION_FRAME, PARTICIPATION_STATUS, USERNAME,
    };
}
