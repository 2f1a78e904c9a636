//! Shared roster fixtures for integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use attendee_lottery::{
    KeyValueStore, LotterySession, MemoryStore, RandomSource, SeededRandom, StoreError,
};

/// Canonical header row.
pub const HEADER: &str =
    "参加枠名,ユーザー名,表示名,利用開始日,コメント,参加ステータス,出欠ステータス,出席日時";

/// One data line with the canonical column order.
pub fn row(frame: &str, username: &str, attendance: &str) -> String {
    format!(
        "{},{},{},2024-01-01,,参加,{},2024-02-01 19:00",
        frame,
        username,
        username.to_uppercase(),
        attendance
    )
}

/// Joins the header and rows into roster text.
pub fn roster(rows: &[String]) -> String {
    let mut text = HEADER.to_string();
    for r in rows {
        text.push('\n');
        text.push_str(r);
    }
    text
}

/// `n` attended general-frame rows named `user0..userN`.
pub fn attendees(n: usize) -> Vec<String> {
    (0..n).map(|i| row("一般枠", &format!("user{}", i), "出席")).collect()
}

/// Session over an in-memory store with a fixed seed.
pub fn session() -> LotterySession<MemoryStore, SeededRandom> {
    LotterySession::open(MemoryStore::new(), SeededRandom::new(42)).expect("open session")
}

/// Replays a fixed list of indices.
pub struct Scripted(pub Vec<usize>);

impl RandomSource for Scripted {
    fn pick_index(&mut self, _len: usize) -> usize {
        if self.0.is_empty() { 0 } else { self.0.remove(0) }
    }
}

/// In-memory store whose writes start failing once `failing` is set.
pub struct SwitchableStore {
    inner: MemoryStore,
    failing: Rc<Cell<bool>>,
}

impl SwitchableStore {
    /// Returns the store and the switch that breaks its writes.
    pub fn new() -> (Self, Rc<Cell<bool>>) {
        let failing = Rc::new(Cell::new(false));
        let store = Self {
            inner: MemoryStore::new(),
            failing: Rc::clone(&failing),
        };
        (store, failing)
    }
}

impl KeyValueStore for SwitchableStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        if self.failing.get() {
            return Err(StoreError::new("storage quota exceeded"));
        }
        self.inner.set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        if self.failing.get() {
            return Err(StoreError::new("storage unavailable"));
        }
        self.inner.delete(key)
    }
}
