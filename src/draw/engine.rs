//! Uniform single-winner selection.

use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

use super::random::RandomSource;
use crate::roster::Record;

/// A draw was attempted with no eligible candidates.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Empty pool error: no eligible candidates at {}:{}", file, line)]
pub struct EmptyPoolError {
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EmptyPoolError {
    /// Creates a new empty pool error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new() -> Self {
        let loc = std::panic::Location::caller();
        Self {
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl Default for EmptyPoolError {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one draw: the winner and the pool without them.
#[derive(Debug, Clone, Getters)]
pub struct Draw {
    /// The selected record.
    winner: Record,
    /// Pool with every slot sharing the winner's username removed.
    remaining: Vec<Record>,
}

impl Draw {
    /// Splits the outcome into its parts.
    pub fn into_parts(self) -> (Record, Vec<Record>) {
        (self.winner, self.remaining)
    }
}

/// Picks one record uniformly at random from `pool`.
///
/// The pool is not mutated; the caller installs [`Draw::remaining`] together
/// with recording the winner.
///
/// # Errors
///
/// Returns [`EmptyPoolError`] if `pool` is empty.
#[instrument(skip_all, fields(pool = pool.len()))]
pub fn draw<R>(pool: &[Record], rng: &mut R) -> Result<Draw, EmptyPoolError>
where
    R: RandomSource + ?Sized,
{
    if pool.is_empty() {
        warn!("Draw attempted on empty pool");
        return Err(EmptyPoolError::new());
    }

    let picked = rng.pick_index(pool.len());
    let index = if picked < pool.len() {
        picked
    } else {
        warn!(picked, len = pool.len(), "Random source out of range, clamping");
        pool.len() - 1
    };

    let winner = pool[index].clone();
    let remaining: Vec<Record> = pool
        .iter()
        .filter(|r| r.username() != winner.username())
        .cloned()
        .collect();

    debug!(index, remaining = remaining.len(), "Slot selected");
    info!(username = %winner.username(), label = %winner.label(), "Winner drawn");

    Ok(Draw { winner, remaining })
}
