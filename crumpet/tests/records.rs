//! Behavioural tests for the closure-record arena.

use crumpet::lang::record::{Code, RecordError, Records};
use proptest::prelude::*;

#[test]
fn identity_returns_its_argument() {
    let mut records = Records::new();
    let identity = records.alloc(Code::Identity, &[]).unwrap();
    let argument = records.alloc(Code::Identity, &[]).unwrap();

    assert_eq!(records.invoke(identity, &[argument]), Ok(argument));
}

#[test]
fn wrapping_then_invoking_resolves_to_the_base_record() {
    let mut records = Records::new();
    let base = records.alloc(Code::Identity, &[]).unwrap();
    let wrapped = records.wrap(base).unwrap();

    // the canonical demonstration chain
    assert_eq!(records.invoke(wrapped, &[base]), Ok(base));
}

#[test]
fn wrapping_preserves_the_captured_record() {
    let mut records = Records::new();
    let inner = records.alloc(Code::Identity, &[]).unwrap();
    let wrapped = records.wrap(inner).unwrap();

    // later allocations leave earlier captures untouched
    for _ in 0..8 {
        records.alloc(Code::Identity, &[]).unwrap();
    }

    assert_eq!(records.get(wrapped).unwrap().captures(), &[inner][..]);
    assert_eq!(records.get(wrapped).unwrap().code(), Code::Forward);
}

#[test]
fn identity_without_an_argument_fails() {
    let mut records = Records::new();
    let identity = records.alloc(Code::Identity, &[]).unwrap();

    assert_eq!(
        records.invoke(identity, &[]),
        Err(RecordError::MissingArgument),
    );
}

#[test]
fn forwarding_without_captures_fails() {
    let mut records = Records::new();
    let forward = records.alloc(Code::Forward, &[]).unwrap();
    let argument = records.alloc(Code::Identity, &[]).unwrap();

    assert_eq!(
        records.invoke(forward, &[argument]),
        Err(RecordError::EmptyCaptures),
    );
}

#[test]
fn foreign_ids_are_rejected() {
    let mut records = Records::new();
    let mut other = Records::new();

    let foreign = other.alloc(Code::Identity, &[]).unwrap();
    let _ = other.alloc(Code::Identity, &[]).unwrap();
    let _ = other.wrap(foreign).unwrap();

    // `foreign` happens to be a valid id in `other`, but this arena has
    // nothing allocated yet
    assert_eq!(
        records.alloc(Code::Forward, &[foreign]),
        Err(RecordError::UnknownRecord(foreign)),
    );
    assert_eq!(
        records.invoke(foreign, &[]),
        Err(RecordError::UnknownRecord(foreign)),
    );
}

#[test]
fn dropping_a_cloned_arena_leaves_records_intact() {
    let mut records = Records::new();
    let inner = records.alloc(Code::Identity, &[]).unwrap();
    let wrapped = records.wrap(inner).unwrap();

    let cloned = records.clone();
    drop(cloned);

    assert_eq!(records.len(), 2);
    assert_eq!(records.invoke(wrapped, &[inner]), Ok(inner));
}

proptest! {
    /// Chains of forwarding records always resolve to the base record's
    /// behaviour, however deep the chain.
    #[test]
    fn forwarding_chains_terminate(depth in 0usize..64) {
        let mut records = Records::new();
        let base = records.alloc(Code::Identity, &[]).unwrap();
        let argument = records.alloc(Code::Identity, &[]).unwrap();

        let mut wrapped = base;
        for _ in 0..depth {
            wrapped = records.wrap(wrapped).unwrap();
        }

        prop_assert_eq!(records.invoke(wrapped, &[argument]), Ok(argument));
    }

    /// The identity law holds for every record in an arbitrary arena.
    #[test]
    fn identity_law_holds_for_any_record(count in 1usize..32) {
        let mut records = Records::new();
        let identity = records.alloc(Code::Identity, &[]).unwrap();

        let mut ids = vec![identity];
        for i in 0..count {
            let captured = ids[i % ids.len()];
            let id = records.alloc(Code::Forward, &[captured]).unwrap();
            ids.push(id);
        }

        for id in ids {
            prop_assert_eq!(records.invoke(identity, &[id]), Ok(id));
        }
    }
}
