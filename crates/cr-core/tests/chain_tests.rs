//! Chain behaviour tests
//!
//! Walks the CAT -> DOG scenario end to end and checks the comparator and
//! attempt-accounting properties with proptest.

use cr_core::prelude::*;
use cr_core::{differs_by_exactly_one, ErrorKind};
use cr_test_utils::{cat_dog_chain, completion_recorder};
use proptest::prelude::*;

#[test]
fn test_cat_dog_scenario() {
    let (mut chain, _clock) = cat_dog_chain();
    let (fired, callback) = completion_recorder();
    chain.on_complete(callback);

    let first = chain.submit(1, "COT").unwrap();
    assert_eq!(first.next_slot, Some(2));
    assert!(!chain.is_complete());

    let second = chain.submit(2, "COG").unwrap();
    assert_eq!(second.next_slot, None);
    assert!(chain.is_complete());

    assert_eq!(*fired.lock().unwrap(), vec![(2, 0)]);
}

#[test]
fn test_is_complete_is_idempotent() {
    let (mut chain, clock) = cat_dog_chain();
    let (fired, callback) = completion_recorder();
    chain.on_complete(callback);

    chain.submit(1, "COT").unwrap();
    clock.advance_secs(8);
    chain.submit(2, "COG").unwrap();

    for _ in 0..5 {
        assert!(chain.is_complete());
        clock.advance_secs(1);
    }

    // Late submissions are refused and do not re-fire
    assert!(matches!(chain.submit(1, "CAT"), Err(ChainError::AlreadyComplete)));
    assert_eq!(*fired.lock().unwrap(), vec![(2, 8)]);
    assert_eq!(chain.elapsed_secs(), 8);
}

#[test]
fn test_engine_interface() {
    let mut engine = ChainEngine::new();
    let handle = engine.create_chain("cat", "dog", 4).unwrap();
    let (fired, callback) = completion_recorder();
    engine.on_complete(handle, callback).unwrap();

    let outcome = engine.submit_word(handle, 2, "CAT").unwrap();
    assert!(!outcome.accepted);
    assert_eq!(outcome.error_kind, Some(ErrorKind::InvalidTransition));

    assert!(engine.submit_word(handle, 1, "cot").unwrap().accepted);
    assert!(engine.submit_word(handle, 2, "cog").unwrap().accepted);
    assert!(engine.is_complete(handle).unwrap());

    let recorded = fired.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, 3);
}

fn same_length_words() -> impl Strategy<Value = (String, String)> {
    (1usize..8).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::char::range('A', 'D'), n),
            prop::collection::vec(prop::char::range('A', 'D'), n),
        )
            .prop_map(|(a, b)| (a.into_iter().collect(), b.into_iter().collect()))
    })
}

proptest! {
    #[test]
    fn prop_comparator_is_symmetric((a, b) in same_length_words()) {
        prop_assert_eq!(differs_by_exactly_one(&a, &b), differs_by_exactly_one(&b, &a));
    }

    #[test]
    fn prop_different_lengths_never_match(a in "[A-Z]{0,6}", b in "[A-Z]{7,10}") {
        prop_assert!(!differs_by_exactly_one(&a, &b));
        prop_assert!(!differs_by_exactly_one(&b, &a));
    }

    #[test]
    fn prop_wrong_length_counts_without_mutating(
        candidate in "[a-zA-Z]{0,2}|[a-zA-Z]{4,9}",
        slot in 1usize..3,
        repeats in 1u32..6,
    ) {
        let (mut chain, _clock) = cat_dog_chain();
        let before = chain.snapshot().slots;

        for _ in 0..repeats {
            let err = chain.submit(slot, &candidate).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::LengthMismatch);
        }

        prop_assert_eq!(chain.snapshot().slots, before);
        prop_assert_eq!(chain.attempts(), repeats);
    }
}
