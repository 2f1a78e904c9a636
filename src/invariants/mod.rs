//! First-class invariants for lottery sessions.
//!
//! Invariants are logical properties that must hold after every session
//! transition. They are checked in debug builds and can be tested
//! independently of the session.

mod pool_excludes_winners;
mod pool_within_roster;
mod unique_winners;

pub use pool_excludes_winners::PoolExcludesWinnersInvariant;
pub use pool_within_roster::PoolWithinRosterInvariant;
pub use unique_winners::UniqueWinnersInvariant;

use crate::roster::Record;

/// Borrowed view of the three session collections.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Records from the latest import.
    pub roster: &'a [Record],
    /// Current eligible pool.
    pub pool: &'a [Record],
    /// Winners, earliest first.
    pub winners: &'a [Record],
}

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All session invariants as a composable set.
pub type LotteryInvariants = (
    PoolWithinRosterInvariant,
    PoolExcludesWinnersInvariant,
    UniqueWinnersInvariant,
);
