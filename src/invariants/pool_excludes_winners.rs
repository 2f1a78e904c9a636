//! Exclusion invariant: winners never re-enter the pool.

use std::collections::HashSet;

use super::{Invariant, Snapshot};

/// Invariant: no pool username appears in the winner history.
pub struct PoolExcludesWinnersInvariant;

impl<'a> Invariant<Snapshot<'a>> for PoolExcludesWinnersInvariant {
    fn holds(state: &Snapshot<'a>) -> bool {
        let winners: HashSet<&str> = state.winners.iter().map(|w| w.username().as_str()).collect();
        state
            .pool
            .iter()
            .all(|p| !winners.contains(p.username().as_str()))
    }

    fn description() -> &'static str {
        "Eligible pool contains no prior winner"
    }
}
