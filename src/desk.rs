//! Shared operator desk: single-flight access to a session and paced draws.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::draw::RandomSource;
use crate::roster::{Record, RosterStats};
use crate::session::{ImportSummary, LotteryError, LotterySession, SessionState};
use crate::store::KeyValueStore;

/// Holds the busy flag for as long as it lives.
#[derive(Debug)]
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    /// Claims the flag, or reports [`LotteryError::Busy`] if it is already held.
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, LotteryError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                warn!("Operation rejected: desk is busy");
                LotteryError::Busy
            })?;
        Ok(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        debug!("Desk idle");
    }
}

/// Cloneable handle serializing operator actions on one [`LotterySession`].
///
/// Mutating calls fail with [`LotteryError::Busy`] while a paced draw is
/// pending. Reads are always allowed.
pub struct LotteryDesk<S, R> {
    session: Arc<Mutex<LotterySession<S, R>>>,
    busy: Arc<AtomicBool>,
}

impl<S, R> Clone for LotteryDesk<S, R> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            busy: Arc::clone(&self.busy),
        }
    }
}

impl<S, R> std::fmt::Debug for LotteryDesk<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LotteryDesk")
            .field("busy", &self.busy.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore, R: RandomSource> LotteryDesk<S, R> {
    /// Wraps a session.
    #[instrument(skip_all)]
    pub fn new(session: LotterySession<S, R>) -> Self {
        info!(state = %session.state(), "Opening lottery desk");
        Self {
            session: Arc::new(Mutex::new(session)),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a paced draw is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn lock(&self) -> MutexGuard<'_, LotterySession<S, R>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the session for read access.
    pub fn with_session<T>(&self, f: impl FnOnce(&LotterySession<S, R>) -> T) -> T {
        f(&self.lock())
    }

    /// Current phase.
    pub fn state(&self) -> SessionState {
        self.lock().state()
    }

    /// Winners, earliest draw first.
    pub fn winners(&self) -> Vec<Record> {
        self.lock().winners().to_vec()
    }

    /// Headcounts of the current roster.
    pub fn stats(&self) -> RosterStats {
        self.lock().stats()
    }

    /// Imports a roster.
    ///
    /// # Errors
    ///
    /// [`LotteryError::Busy`] during a paced draw, otherwise as
    /// [`LotterySession::import`].
    #[instrument(skip(self, text))]
    pub fn import(&self, text: &str) -> Result<ImportSummary, LotteryError> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        self.lock().import(text)
    }

    /// Draws immediately, without a pause.
    ///
    /// # Errors
    ///
    /// [`LotteryError::Busy`] during a paced draw, otherwise as
    /// [`LotterySession::draw_one`].
    #[instrument(skip(self))]
    pub fn draw(&self) -> Result<Record, LotteryError> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        self.lock().draw_one()
    }

    /// Clears winners and rebuilds the pool.
    ///
    /// # Errors
    ///
    /// [`LotteryError::Busy`] during a paced draw, otherwise as
    /// [`LotterySession::reset`].
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<usize, LotteryError> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        self.lock().reset()
    }

    /// Waits `pause`, then draws.
    ///
    /// The desk is busy from the call until the draw commits. Dropping the
    /// future before the pause ends releases the desk with no state change.
    ///
    /// # Errors
    ///
    /// [`LotteryError::Busy`] if another draw is pending; otherwise as
    /// [`LotterySession::draw_one`]. An empty pool is reported before pausing.
    #[instrument(skip(self), fields(pause_ms = pause.as_millis() as u64))]
    pub async fn draw_with_suspense(&self, pause: Duration) -> Result<Record, LotteryError> {
        let guard = BusyGuard::acquire(&self.busy)?;

        if self.lock().pool().is_empty() {
            return Err(crate::draw::EmptyPoolError::new().into());
        }

        debug!("Suspense pause started");
        tokio::time::sleep(pause).await;

        let result = self.lock().draw_one();
        drop(guard);
        result
    }
}
