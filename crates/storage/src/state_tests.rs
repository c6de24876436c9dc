// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{TimeZone, Utc};

fn addr(s: &str) -> Address {
    Address::parse(s).unwrap()
}

fn issuance(address: &str, token: &str, day: u32) -> Operation {
    Operation::RecordIssuance {
        entry: HistoryEntry::new(
            addr(address),
            Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap(),
            Token::new(token),
        ),
    }
}

#[test]
fn apply_mark_verified() {
    let mut state = MaterializedState::default();
    state.apply(&Operation::MarkVerified {
        address: addr("bob@example.com"),
    });

    assert!(state.is_verified(&addr("bob@example.com")));
    assert!(!state.is_verified(&addr("alice@example.com")));
}

#[test]
fn mark_verified_is_idempotent() {
    let op = Operation::MarkVerified {
        address: addr("bob@example.com"),
    };
    let state = MaterializedState::from_operations([&op, &op, &op]);
    assert_eq!(state.verified_count(), 1);
}

#[test]
fn apply_record_issuance_indexes_by_address_and_token() {
    let mut state = MaterializedState::default();
    state.apply(&issuance("bob@example.com", "T1", 1));

    let by_address = state.history_for(&addr("bob@example.com")).unwrap();
    assert_eq!(by_address.token, Token::new("T1"));

    let by_token = state.history_for_token(&Token::new("T1")).unwrap();
    assert_eq!(by_token.address, addr("bob@example.com"));
}

#[test]
fn reissuance_overwrites_and_retires_old_token() {
    let state = MaterializedState::from_operations(&[
        issuance("bob@example.com", "T1", 1),
        issuance("bob@example.com", "T2", 2),
    ]);

    assert_eq!(state.history_count(), 1);
    assert!(state.history_for_token(&Token::new("T1")).is_none());
    assert_eq!(
        state.history_for(&addr("bob@example.com")).unwrap().token,
        Token::new("T2")
    );
}

#[test]
fn colliding_token_resolves_to_newest_owner() {
    let state = MaterializedState::from_operations(&[
        issuance("bob@example.com", "SAME", 1),
        issuance("alice@example.com", "SAME", 1),
    ]);

    let owner = state.history_for_token(&Token::new("SAME")).unwrap();
    assert_eq!(owner.address, addr("alice@example.com"));
    // Bob's record is still his latest, it just no longer resolves by token
    assert!(state.history_for(&addr("bob@example.com")).is_some());
}

#[test]
fn reissuing_after_collision_keeps_other_owner() {
    let state = MaterializedState::from_operations(&[
        issuance("bob@example.com", "SAME", 1),
        issuance("alice@example.com", "SAME", 1),
        issuance("bob@example.com", "B2", 2),
    ]);

    assert_eq!(
        state.history_for_token(&Token::new("SAME")).unwrap().address,
        addr("alice@example.com")
    );
    assert_eq!(
        state.history_for_token(&Token::new("B2")).unwrap().address,
        addr("bob@example.com")
    );
}

#[test]
fn verification_is_independent_of_history() {
    let state = MaterializedState::from_operations(&[Operation::MarkVerified {
        address: addr("carol@example.com"),
    }]);
    assert!(state.is_verified(&addr("carol@example.com")));
    assert!(state.history_for(&addr("carol@example.com")).is_none());
}
