//! Tests for the lottery session lifecycle.

mod common;

use std::collections::HashSet;

use attendee_lottery::{
    EligibilityRules, LotteryError, LotterySession, MemoryStore, SessionState, eligible,
};
use common::{Scripted, SwitchableStore, attendees, roster, row, session};

#[test]
fn test_new_session_is_empty() {
    let session = session();
    assert_eq!(session.state(), SessionState::Empty);
    assert!(session.roster().is_empty());
    assert!(session.pool().is_empty());
    assert!(session.winners().is_empty());
}

#[test]
fn test_import_computes_pool_and_summary() {
    let mut session = session();
    let summary = session
        .import(&roster(&[
            row("一般枠", "a", "出席"),
            row("運営枠", "b", "出席"),
            row("一般枠", "c", "欠席"),
        ]))
        .expect("import");

    assert_eq!(*summary.total(), 3);
    assert_eq!(*summary.eligible(), 1);
    assert_eq!(session.state(), SessionState::Loaded);
}

#[test]
fn test_schema_error_keeps_prior_state() {
    let mut session = session();
    session.import(&roster(&attendees(3))).expect("import");
    session.draw_one().expect("draw");
    let pool_before = session.pool().to_vec();

    let result = session.import("参加枠名,ユーザー名\nA,b");
    assert!(matches!(result, Err(LotteryError::Schema(_))));
    assert_eq!(session.pool(), pool_before.as_slice());
    assert_eq!(session.roster().len(), 3);
    assert_eq!(session.winners().len(), 1);
    assert_eq!(session.state(), SessionState::Loaded);
}

#[test]
fn test_draw_until_exhausted() {
    let mut session = session();
    session.import(&roster(&attendees(5))).expect("import");

    let mut seen = HashSet::new();
    for n in 1..=5 {
        let winner = session.draw_one().expect("draw");
        assert!(seen.insert(winner.username().clone()), "repeat winner");
        assert_eq!(session.winners().len(), n);
        assert_eq!(session.pool().len(), 5 - n);
    }

    assert!(session.pool().is_empty());
    assert_eq!(session.state(), SessionState::Exhausted);
}

#[test]
fn test_empty_pool_draw_fails_without_change() {
    let mut session = session();
    session.import(&roster(&[row("運営枠", "staff", "出席")])).expect("import");

    let result = session.draw_one();
    assert!(matches!(result, Err(LotteryError::EmptyPool(_))));
    assert!(session.winners().is_empty());
    assert!(session.pool().is_empty());
    assert_eq!(session.state(), SessionState::Loaded);
}

#[test]
fn test_draw_before_import_fails() {
    let mut session = session();
    assert!(matches!(session.draw_one(), Err(LotteryError::EmptyPool(_))));
    assert_eq!(session.state(), SessionState::Empty);
}

#[test]
fn test_scripted_draw_order() {
    let mut session = LotterySession::open(MemoryStore::new(), Scripted(vec![2, 0, 0]))
        .expect("open");
    session.import(&roster(&attendees(3))).expect("import");

    let order: Vec<String> = (0..3)
        .map(|_| session.draw_one().expect("draw").username().clone())
        .collect();
    assert_eq!(order, vec!["user2", "user0", "user1"]);

    let history: Vec<_> = session.winners().iter().map(|w| w.username().as_str()).collect();
    assert_eq!(history, vec!["user2", "user0", "user1"]);
}

#[test]
fn test_reset_restores_original_pool() {
    let mut session = session();
    session.import(&roster(&attendees(4))).expect("import");
    let original = session.pool().to_vec();

    session.draw_one().expect("draw");
    session.draw_one().expect("draw");

    let eligible_after = session.reset().expect("reset");
    assert_eq!(eligible_after, 4);
    assert_eq!(session.pool(), original.as_slice());
    assert!(session.winners().is_empty());
    assert_eq!(session.pool(), eligible(session.roster(), &[]).as_slice());
    assert_eq!(session.state(), SessionState::Loaded);
}

#[test]
fn test_reset_from_exhausted() {
    let mut session = session();
    session.import(&roster(&attendees(2))).expect("import");
    session.draw_one().expect("draw");
    session.draw_one().expect("draw");
    assert_eq!(session.state(), SessionState::Exhausted);

    session.reset().expect("reset");
    assert_eq!(session.state(), SessionState::Loaded);
    assert_eq!(session.pool().len(), 2);
}

#[test]
fn test_reimport_keeps_history() {
    let mut session = LotterySession::open(MemoryStore::new(), Scripted(vec![0])).expect("open");
    session
        .import(&roster(&[row("一般枠", "alice", "出席"), row("一般枠", "bob", "出席")]))
        .expect("import");
    let first = session.draw_one().expect("draw");
    assert_eq!(first.username(), "alice");

    let summary = session
        .import(&roster(&[
            row("一般枠", "alice", "出席"),
            row("一般枠", "carol", "出席"),
        ]))
        .expect("reimport");

    assert_eq!(*summary.eligible(), 1);
    assert_eq!(session.pool()[0].username(), "carol");
    assert_eq!(session.winners().len(), 1);
}

#[test]
fn test_reimport_after_exhaustion_returns_to_loaded() {
    let mut session = session();
    session.import(&roster(&attendees(1))).expect("import");
    session.draw_one().expect("draw");
    assert_eq!(session.state(), SessionState::Exhausted);

    session
        .import(&roster(&[row("一般枠", "newcomer", "出席")]))
        .expect("import");
    assert_eq!(session.state(), SessionState::Loaded);
    assert_eq!(session.pool().len(), 1);
}

#[test]
fn test_duplicate_username_drawn_once() {
    let mut session = session();
    session
        .import(&roster(&[row("一般枠", "dup", "出席"), row("一般枠", "dup", "出席")]))
        .expect("import");
    assert_eq!(session.pool().len(), 2);

    session.draw_one().expect("draw");
    assert!(session.pool().is_empty());
    assert_eq!(session.state(), SessionState::Exhausted);
}

#[test]
fn test_stats_reflect_session() {
    let mut session = session();
    session
        .import(&roster(&[
            row("一般枠", "a", "出席"),
            row("一般枠", "b", "出席"),
            row("運営枠", "s", "出席"),
            row("一般枠", "x", "欠席"),
        ]))
        .expect("import");
    session.draw_one().expect("draw");

    let stats = session.stats();
    assert_eq!(*stats.total(), 4);
    assert_eq!(*stats.attendees(), 3);
    assert_eq!(*stats.eligible(), 1);
    assert_eq!(*stats.winners(), 1);
    assert_eq!(stats.attendee_frames().len(), 2);
}

#[test]
fn test_failed_history_write_discards_draw() {
    let (store, failing) = SwitchableStore::new();
    let mut session = LotterySession::open(store, Scripted(vec![0, 0])).expect("open");
    session.import(&roster(&attendees(3))).expect("import");
    session.draw_one().expect("draw");

    let pool_before = session.pool().to_vec();
    let winners_before = session.winners().to_vec();
    failing.set(true);

    let result = session.draw_one();
    assert!(matches!(result, Err(LotteryError::Store(_))));
    assert_eq!(session.pool(), pool_before.as_slice());
    assert_eq!(session.winners(), winners_before.as_slice());
    assert_eq!(session.state(), SessionState::Loaded);

    failing.set(false);
    let winner = session.draw_one().expect("draw after recovery");
    assert_eq!(winner.username(), "user1");
    assert_eq!(session.winners().len(), 2);
}

#[test]
fn test_failed_history_delete_keeps_winners() {
    let (store, failing) = SwitchableStore::new();
    let mut session = LotterySession::open(store, Scripted(vec![0, 0])).expect("open");
    session.import(&roster(&attendees(2))).expect("import");
    session.draw_one().expect("draw");
    session.draw_one().expect("draw");
    assert_eq!(session.state(), SessionState::Exhausted);

    failing.set(true);
    assert!(matches!(session.reset(), Err(LotteryError::Store(_))));
    assert_eq!(session.winners().len(), 2);
    assert!(session.pool().is_empty());
    assert_eq!(session.state(), SessionState::Exhausted);
}

#[test]
fn test_with_rules_rederives_pool() {
    let session = {
        let mut s = session();
        s.import(&roster(&[
            row("一般枠", "a", "出席"),
            row("一般枠", "b", "present"),
            row("運営枠", "c", "present"),
        ]))
        .expect("import");
        s
    };
    assert_eq!(session.pool().len(), 1);

    let session = session.with_rules(EligibilityRules::new("present", "運営枠"));
    let pool: Vec<_> = session.pool().iter().map(|r| r.username().as_str()).collect();
    assert_eq!(pool, vec!["b"]);
    assert_eq!(session.stats().eligible(), &1);
}

#[test]
fn test_with_rules_keeps_winners_excluded() {
    let mut session = LotterySession::open(MemoryStore::new(), Scripted(vec![0])).expect("open");
    session
        .import(&roster(&[row("一般枠", "a", "出席"), row("一般枠", "b", "出席")]))
        .expect("import");
    session.draw_one().expect("draw");

    let session = session.with_rules(EligibilityRules::new("出席", "none"));
    let pool: Vec<_> = session.pool().iter().map(|r| r.username().as_str()).collect();
    assert_eq!(pool, vec!["b"]);
}

#[test]
fn test_reimport_of_fully_drawn_roster_is_exhausted() {
    let mut session = session();
    let text = roster(&attendees(2));
    session.import(&text).expect("import");
    session.draw_one().expect("draw");
    session.draw_one().expect("draw");

    let summary = session.import(&text).expect("reimport");
    assert_eq!(*summary.total(), 2);
    assert_eq!(*summary.eligible(), 0);
    assert_eq!(session.state(), SessionState::Exhausted);
}
