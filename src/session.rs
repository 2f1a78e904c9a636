//! Lottery session: import → draw → reset lifecycle.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::draw::{self, EmptyPoolError, RandomSource};
use crate::eligibility::EligibilityRules;
use crate::invariants::{InvariantSet, LotteryInvariants, Snapshot};
use crate::roster::{self, Record, RosterStats, SchemaError};
use crate::store::{KeyValueStore, StoreError, WinnerHistory};

/// Observable phase of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionState {
    /// No roster imported yet.
    Empty,
    /// Roster imported; candidates may remain.
    Loaded,
    /// Roster imported, pool empty, at least one winner recorded.
    Exhausted,
}

/// Error raised by a session operation. The session stays usable after any of them.
#[derive(Debug, Clone, derive_more::Display)]
pub enum LotteryError {
    /// Roster header lacks required columns; prior roster kept.
    #[display("{}", _0)]
    Schema(SchemaError),
    /// No eligible candidates; nothing changed.
    #[display("{}", _0)]
    EmptyPool(EmptyPoolError),
    /// Winner history could not be persisted; nothing changed.
    #[display("{}", _0)]
    Store(StoreError),
    /// A paced draw is outstanding.
    #[display("Lottery is busy: a draw is in progress")]
    Busy,
}

impl std::error::Error for LotteryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LotteryError::Schema(e) => Some(e),
            LotteryError::EmptyPool(e) => Some(e),
            LotteryError::Store(e) => Some(e),
            LotteryError::Busy => None,
        }
    }
}

impl From<SchemaError> for LotteryError {
    fn from(err: SchemaError) -> Self {
        LotteryError::Schema(err)
    }
}

impl From<EmptyPoolError> for LotteryError {
    fn from(err: EmptyPoolError) -> Self {
        LotteryError::EmptyPool(err)
    }
}

impl From<StoreError> for LotteryError {
    fn from(err: StoreError) -> Self {
        LotteryError::Store(err)
    }
}

/// Headcounts reported after a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Getters)]
pub struct ImportSummary {
    /// Records parsed.
    total: usize,
    /// Records in the new eligible pool.
    eligible: usize,
}

/// One operator's lottery: roster, eligible pool and winner history.
///
/// Every mutating operation either completes fully or leaves the session
/// exactly as it was.
#[derive(Debug)]
pub struct LotterySession<S, R> {
    rules: EligibilityRules,
    roster: Option<Vec<Record>>,
    pool: Vec<Record>,
    history: WinnerHistory<S>,
    rng: R,
}

impl<S: KeyValueStore, R: RandomSource> LotterySession<S, R> {
    /// Creates an empty session over an already loaded history.
    #[instrument(skip_all, fields(winners = history.len()))]
    pub fn new(history: WinnerHistory<S>, rng: R) -> Self {
        info!("Creating lottery session");
        Self {
            rules: EligibilityRules::default(),
            roster: None,
            pool: Vec::new(),
            history,
            rng,
        }
    }

    /// Loads winner history from `store` and creates an empty session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the persisted history cannot be read.
    pub fn open(store: S, rng: R) -> Result<Self, StoreError> {
        Ok(Self::new(WinnerHistory::open(store)?, rng))
    }

    /// Replaces the eligibility literals and rederives the pool from the
    /// current roster and winner history.
    pub fn with_rules(mut self, rules: EligibilityRules) -> Self {
        self.rules = rules;
        if let Some(roster) = &self.roster {
            self.pool = self.rules.eligible(roster, self.history.records());
        }
        self.check_invariants();
        self
    }

    /// Current phase.
    pub fn state(&self) -> SessionState {
        match self.roster {
            None => SessionState::Empty,
            Some(_) if self.pool.is_empty() && !self.history.is_empty() => {
                SessionState::Exhausted
            }
            Some(_) => SessionState::Loaded,
        }
    }

    /// Records from the latest import.
    pub fn roster(&self) -> &[Record] {
        self.roster.as_deref().unwrap_or_default()
    }

    /// Records that can still be drawn.
    pub fn pool(&self) -> &[Record] {
        &self.pool
    }

    /// Winners, earliest draw first.
    pub fn winners(&self) -> &[Record] {
        self.history.records()
    }

    /// Eligibility literals in effect.
    pub fn rules(&self) -> &EligibilityRules {
        &self.rules
    }

    /// Headcounts and per-frame breakdown of the current roster.
    pub fn stats(&self) -> RosterStats {
        RosterStats::compute(
            self.roster(),
            self.pool.len(),
            self.history.len(),
            &self.rules,
        )
    }

    /// Parses `text` and installs it as the roster.
    ///
    /// Winner history is kept: prior winners stay excluded from the new pool.
    /// If every eligible attendee has already won, the session reports
    /// [`SessionState::Exhausted`] right after the import.
    ///
    /// # Errors
    ///
    /// Returns [`LotteryError::Schema`] if the header is invalid; the previous
    /// roster and pool are untouched.
    #[instrument(skip(self, text), fields(state = %self.state(), bytes = text.len()))]
    pub fn import(&mut self, text: &str) -> Result<ImportSummary, LotteryError> {
        let parsed = roster::parse(text)?;
        let pool = self.rules.eligible(&parsed, self.history.records());

        let summary = ImportSummary {
            total: parsed.len(),
            eligible: pool.len(),
        };

        self.roster = Some(parsed);
        self.pool = pool;
        self.check_invariants();

        info!(
            total = summary.total,
            eligible = summary.eligible,
            winners = self.history.len(),
            state = %self.state(),
            "Roster imported"
        );
        Ok(summary)
    }

    /// Draws one winner from the pool and records it.
    ///
    /// Selection, history append and pool shrink happen as one step.
    ///
    /// # Errors
    ///
    /// Returns [`LotteryError::EmptyPool`] if nobody is eligible, or
    /// [`LotteryError::Store`] if the history write fails. In both cases the
    /// pool and history are unchanged.
    #[instrument(skip(self), fields(state = %self.state(), pool = self.pool.len()))]
    pub fn draw_one(&mut self) -> Result<Record, LotteryError> {
        let (winner, remaining) = draw::draw(&self.pool, &mut self.rng)?.into_parts();

        self.history.append(winner.clone()).inspect_err(|e| {
            warn!(error = %e, "Winner not recorded, draw discarded");
        })?;
        self.pool = remaining;
        self.check_invariants();

        info!(
            username = %winner.username(),
            winners = self.history.len(),
            remaining = self.pool.len(),
            state = %self.state(),
            "Draw committed"
        );
        Ok(winner)
    }

    /// Clears winner history and rebuilds the pool from the current roster.
    ///
    /// Returns the size of the rebuilt pool.
    ///
    /// # Errors
    ///
    /// Returns [`LotteryError::Store`] if the history cannot be deleted.
    #[instrument(skip(self), fields(state = %self.state(), winners = self.history.len()))]
    pub fn reset(&mut self) -> Result<usize, LotteryError> {
        self.history.clear()?;
        self.pool = match &self.roster {
            Some(roster) => self.rules.eligible(roster, &[]),
            None => Vec::new(),
        };
        self.check_invariants();

        info!(eligible = self.pool.len(), state = %self.state(), "Lottery reset");
        Ok(self.pool.len())
    }

    /// Logs any violated session invariant (debug builds only).
    fn check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        let snapshot = Snapshot {
            roster: self.roster(),
            pool: &self.pool,
            winners: self.history.records(),
        };
        match LotteryInvariants::check_all(&snapshot) {
            Ok(()) => debug!("Session invariants hold"),
            Err(violations) => {
                for v in violations {
                    warn!(invariant = %v.description, "Session invariant violated");
                }
            }
        }
    }
}
