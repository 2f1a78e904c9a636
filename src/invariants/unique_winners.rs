//! History invariant: each attendee wins at most once.

use std::collections::HashSet;

use super::{Invariant, Snapshot};

/// Invariant: no username appears twice in the winner history.
pub struct UniqueWinnersInvariant;

impl<'a> Invariant<Snapshot<'a>> for UniqueWinnersInvariant {
    fn holds(state: &Snapshot<'a>) -> bool {
        let mut seen = HashSet::new();
        state.winners.iter().all(|w| seen.insert(w.username().as_str()))
    }

    fn description() -> &'static str {
        "Winner history has no repeated username"
    }
}
