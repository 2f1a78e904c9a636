//! Persisted, append-only winner history.

use tracing::{debug, info, instrument, warn};

use super::{KeyValueStore, StoreError};
use crate::roster::Record;

/// Fixed key under which winners are persisted.
pub const WINNERS_KEY: &str = "lottery-winners";

/// Winners in draw order, written through to a [`KeyValueStore`].
///
/// The in-memory list only changes after the store accepted the write.
#[derive(Debug)]
pub struct WinnerHistory<S> {
    store: S,
    winners: Vec<Record>,
}

impl<S: KeyValueStore> WinnerHistory<S> {
    /// Loads any persisted winners from `store`; an absent key means empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or holds invalid JSON.
    #[instrument(skip(store))]
    pub fn open(store: S) -> Result<Self, StoreError> {
        let winners = match store.get(WINNERS_KEY)? {
            Some(json) => serde_json::from_str::<Vec<Record>>(&json)?,
            None => Vec::new(),
        };
        info!(winners = winners.len(), "Winner history loaded");
        Ok(Self { store, winners })
    }

    /// Winners, earliest draw first.
    pub fn records(&self) -> &[Record] {
        &self.winners
    }

    /// Number of winners recorded.
    pub fn len(&self) -> usize {
        self.winners.len()
    }

    /// Returns true if nobody has won yet.
    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    /// Whether `username` already won.
    pub fn contains(&self, username: &str) -> bool {
        self.winners.iter().any(|w| w.username() == username)
    }

    /// Appends a winner and persists the full list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails; the history is unchanged.
    #[instrument(skip(self, winner), fields(username = %winner.username()))]
    pub fn append(&mut self, winner: Record) -> Result<(), StoreError> {
        if self.contains(winner.username()) {
            warn!("Username already present in winner history");
        }

        let mut next = self.winners.clone();
        next.push(winner);
        let json = serde_json::to_string(&next)?;
        self.store.set(WINNERS_KEY, json)?;
        self.winners = next;

        debug!(winners = self.winners.len(), "Winner appended");
        Ok(())
    }

    /// Deletes the persisted history and empties the list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the delete fails; the history is unchanged.
    #[instrument(skip(self), fields(winners = self.winners.len()))]
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.delete(WINNERS_KEY)?;
        self.winners.clear();
        info!("Winner history cleared");
        Ok(())
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Releases the backing store.
    pub fn into_store(self) -> S {
        self.store
    }
}
