//! Pool membership invariant: the pool is drawn from the roster.

use super::{Invariant, Snapshot};

/// Invariant: every pool record is present in the roster.
pub struct PoolWithinRosterInvariant;

impl<'a> Invariant<Snapshot<'a>> for PoolWithinRosterInvariant {
    fn holds(state: &Snapshot<'a>) -> bool {
        state.pool.iter().all(|p| state.roster.contains(p))
    }

    fn description() -> &'static str {
        "Eligible pool is a subset of the roster"
    }
}
