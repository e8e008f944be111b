//! Behaviour shared by every store backend. Each test takes a freshly opened
//! backend, and `attestation_log_tests!` instantiates the whole set per
//! backend.

use qgb_attestation_types::AttestationRequest;
use qgb_config::PruningConfig;
use qgb_kv::{KvBackend, MemKvStore, SledKvStore};
use qgb_test_utils::{sequential_requests, with_nonce};

use crate::{
    execute_block, AttestationEvent, AttestationLog, AttestationPruner, AttestationQuery,
    InvariantViolation, PruneOutcome, TransitionError,
};

fn reader<B: KvBackend>(backend: &B) -> AttestationLog<&B> {
    AttestationLog::new(backend)
}

fn append_block<B: KvBackend>(backend: &B, height: u64, reqs: &[AttestationRequest]) {
    execute_block(backend, height, |log| {
        for req in reqs {
            log.append(req)?;
        }
        Ok(())
    })
    .expect("test: append block");
}

fn snapshot<B: KvBackend>(backend: &B, upto: u64) -> Vec<Option<AttestationRequest>> {
    let log = reader(backend);
    (0..=upto)
        .map(|n| log.attestation_by_nonce(n).expect("test: get"))
        .collect()
}

pub(crate) fn test_fresh_log_has_no_counters<B: KvBackend>(backend: &B) {
    let log = reader(backend);
    assert_eq!(log.latest_nonce().unwrap(), None);
    assert_eq!(log.last_pruned_nonce().unwrap(), None);
    assert_eq!(log.last_unbonding_nonce().unwrap(), None);
    assert_eq!(log.attestation_by_nonce(1).unwrap(), None);
}

pub(crate) fn test_append_then_read<B: KvBackend>(backend: &B) {
    let reqs = sequential_requests(1);
    append_block(backend, 1, &reqs);

    let log = reader(backend);
    assert_eq!(log.latest_nonce().unwrap(), Some(1));
    assert_eq!(log.attestation_by_nonce(1).unwrap(), Some(reqs[0].clone()));
    assert_eq!(log.retained_range().unwrap(), Some(1..=1));
}

pub(crate) fn test_gap_aborts_block<B: KvBackend>(backend: &B) {
    let reqs = sequential_requests(3);
    append_block(backend, 1, &reqs[..1]);
    let before = snapshot(backend, 4);

    let err = execute_block(backend, 2, |log| log.append(&reqs[2])).unwrap_err();
    assert!(matches!(
        err,
        TransitionError::Aborted {
            height: 2,
            violation: InvariantViolation::NonceGap {
                latest: Some(1),
                got: 3
            }
        }
    ));

    assert_eq!(reader(backend).latest_nonce().unwrap(), Some(1));
    assert_eq!(snapshot(backend, 4), before);
}

pub(crate) fn test_reappend_is_fatal<B: KvBackend>(backend: &B) {
    let reqs = sequential_requests(2);
    append_block(backend, 1, &reqs);

    // Same nonce, different payload.
    let other = with_nonce(&sequential_requests(3)[2], 2);
    let err = execute_block(backend, 2, |log| log.append(&other)).unwrap_err();
    assert!(matches!(
        err,
        TransitionError::Aborted {
            violation: InvariantViolation::NonceGap { .. },
            ..
        }
    ));

    let log = reader(backend);
    assert_eq!(log.attestation_by_nonce(2).unwrap(), Some(reqs[1].clone()));
    assert_eq!(log.latest_nonce().unwrap(), Some(2));
}

pub(crate) fn test_prune_boundary<B: KvBackend>(backend: &B) {
    let reqs = sequential_requests(5);
    append_block(backend, 1, &reqs);

    let out = execute_block(backend, 2, |log| log.prune_up_to(3)).unwrap();
    assert_eq!(out.value, PruneOutcome::Pruned { from: 1, to: 3 });
    assert_eq!(out.events, vec![AttestationEvent::Pruned { from: 1, to: 3 }]);

    let log = reader(backend);
    for n in 1..=3 {
        assert_eq!(log.attestation_by_nonce(n).unwrap(), None);
    }
    assert_eq!(log.attestation_by_nonce(4).unwrap(), Some(reqs[3].clone()));
    assert_eq!(log.attestation_by_nonce(5).unwrap(), Some(reqs[4].clone()));
    assert_eq!(log.last_pruned_nonce().unwrap(), Some(3));
    assert_eq!(log.retained_range().unwrap(), Some(4..=5));
}

pub(crate) fn test_prune_latest_rejected<B: KvBackend>(backend: &B) {
    append_block(backend, 1, &sequential_requests(5));
    let before = snapshot(backend, 5);

    let err = execute_block(backend, 2, |log| log.prune_up_to(5)).unwrap_err();
    assert!(matches!(
        err,
        TransitionError::Aborted {
            violation: InvariantViolation::PruneBeyondLatest {
                target: 5,
                latest: Some(5)
            },
            ..
        }
    ));
    assert_eq!(snapshot(backend, 5), before);
    assert_eq!(reader(backend).last_pruned_nonce().unwrap(), None);
}

pub(crate) fn test_prune_empty_log_rejected<B: KvBackend>(backend: &B) {
    let err = execute_block(backend, 1, |log| log.prune_up_to(0)).unwrap_err();
    assert!(matches!(
        err,
        TransitionError::Aborted {
            violation: InvariantViolation::PruneBeyondLatest {
                target: 0,
                latest: None
            },
            ..
        }
    ));
}

pub(crate) fn test_prune_is_idempotent<B: KvBackend>(backend: &B) {
    append_block(backend, 1, &sequential_requests(6));
    execute_block(backend, 2, |log| log.prune_up_to(4)).unwrap();

    let out = execute_block(backend, 3, |log| {
        let lower = log.prune_up_to(2)?;
        let same = log.prune_up_to(4)?;
        Ok((lower, same))
    })
    .unwrap();
    assert_eq!(
        out.value,
        (PruneOutcome::NothingToPrune, PruneOutcome::NothingToPrune)
    );
    assert!(out.events.is_empty());

    let out = execute_block(backend, 4, |log| log.prune_up_to(5)).unwrap();
    assert_eq!(out.value, PruneOutcome::Pruned { from: 5, to: 5 });
    assert_eq!(reader(backend).retained_range().unwrap(), Some(6..=6));
}

pub(crate) fn test_unknown_future_nonce<B: KvBackend>(backend: &B) {
    append_block(backend, 1, &sequential_requests(5));
    execute_block(backend, 2, |log| log.prune_up_to(2)).unwrap();

    let log = reader(backend);
    // Pruned and never-appended look the same.
    assert_eq!(log.attestation_by_nonce(1).unwrap(), None);
    assert_eq!(log.attestation_by_nonce(42).unwrap(), None);
    assert!(!log.has_attestation(42).unwrap());
}

pub(crate) fn test_blocks_accumulate<B: KvBackend>(backend: &B) {
    let reqs = sequential_requests(7);
    append_block(backend, 1, &reqs[..3]);
    append_block(backend, 2, &[]);
    append_block(backend, 3, &reqs[3..]);

    let log = reader(backend);
    assert_eq!(log.latest_nonce().unwrap(), Some(7));
    for req in &reqs {
        assert_eq!(
            log.attestation_by_nonce(req.nonce()).unwrap().as_ref(),
            Some(req)
        );
    }
}

pub(crate) fn test_uncommitted_writes_are_invisible<B: KvBackend>(backend: &B) {
    let reqs = sequential_requests(2);
    append_block(backend, 1, &reqs[..1]);

    execute_block(backend, 2, |log| {
        log.append(&reqs[1])?;
        assert_eq!(log.latest_nonce()?, Some(2));

        // Orchestrators only see committed state.
        let committed = reader(backend);
        assert_eq!(AttestationQuery::latest_nonce(&committed).unwrap(), Some(1));
        assert_eq!(
            AttestationQuery::attestation_by_nonce(&committed, 2).unwrap(),
            None
        );
        Ok(())
    })
    .unwrap();

    assert_eq!(
        AttestationQuery::latest_nonce(&reader(backend)).unwrap(),
        Some(2)
    );
}

pub(crate) fn test_last_unbonding_nonce<B: KvBackend>(backend: &B) {
    append_block(backend, 1, &sequential_requests(3));
    execute_block(backend, 2, |log| {
        let latest = log.latest_nonce()?.unwrap_or_default();
        log.set_last_unbonding_nonce(latest)?;
        Ok(())
    })
    .unwrap();

    let log = reader(backend);
    assert_eq!(log.last_unbonding_nonce().unwrap(), Some(3));
    assert_eq!(log.last_pruned_nonce().unwrap(), None);
}

pub(crate) fn test_pruner_at_block_end<B: KvBackend>(backend: &B) {
    let pruner = AttestationPruner::new(PruningConfig::new(2, 2));
    let reqs = sequential_requests(6);

    for (i, req) in reqs.iter().enumerate() {
        let height = i as u64 + 1;
        let out = execute_block(backend, height, |log| {
            log.append(req)?;
            pruner.maybe_prune(log, height)
        })
        .unwrap();

        match height {
            4 => assert_eq!(out.value, Some(PruneOutcome::Pruned { from: 1, to: 2 })),
            6 => assert_eq!(out.value, Some(PruneOutcome::Pruned { from: 3, to: 4 })),
            _ => assert_eq!(out.value, None),
        }
    }

    let log = reader(backend);
    assert_eq!(log.retained_range().unwrap(), Some(5..=6));
    assert_eq!(log.last_pruned_nonce().unwrap(), Some(4));
}

/// Appended nonces stay contiguous and pruning removes exactly the nonces at or
/// below the boundary, over arbitrary block shapes.
pub(crate) fn check_append_and_prune<B: KvBackend>(
    backend: &B,
    block_sizes: &[usize],
    prune_points: &[u64],
) {
    let total: usize = block_sizes.iter().sum();
    let reqs = sequential_requests(total as u64);

    let mut next = 0;
    for (height, size) in block_sizes.iter().enumerate() {
        let out = execute_block(backend, height as u64, |log| {
            let mut appended = Vec::new();
            for req in &reqs[next..next + size] {
                appended.push(log.append(req)?);
            }
            Ok(appended)
        })
        .unwrap();
        let expected: Vec<u64> = (next as u64 + 1..=(next + size) as u64).collect();
        assert_eq!(out.value, expected);
        next += size;
    }

    let latest = total as u64;
    assert_eq!(
        reader(backend).latest_nonce().unwrap(),
        (latest > 0).then_some(latest)
    );

    let mut boundary = 0;
    for &point in prune_points {
        if latest == 0 {
            break;
        }
        let target = point % latest;
        execute_block(backend, 0, |log| log.prune_up_to(target)).unwrap();
        boundary = boundary.max(target);

        let log = reader(backend);
        for (i, req) in reqs.iter().enumerate() {
            let nonce = i as u64 + 1;
            let got = log.attestation_by_nonce(nonce).unwrap();
            if nonce <= boundary {
                assert_eq!(got, None);
            } else {
                assert_eq!(got.as_ref(), Some(req));
            }
        }
    }
}

macro_rules! attestation_log_tests {
    ($setup_expr:expr) => {
        use proptest::prelude::*;

        #[test]
        fn test_fresh_log_has_no_counters() {
            let backend = $setup_expr;
            $crate::suite::test_fresh_log_has_no_counters(&backend);
        }

        #[test]
        fn test_append_then_read() {
            let backend = $setup_expr;
            $crate::suite::test_append_then_read(&backend);
        }

        #[test]
        fn test_gap_aborts_block() {
            let backend = $setup_expr;
            $crate::suite::test_gap_aborts_block(&backend);
        }

        #[test]
        fn test_reappend_is_fatal() {
            let backend = $setup_expr;
            $crate::suite::test_reappend_is_fatal(&backend);
        }

        #[test]
        fn test_prune_boundary() {
            let backend = $setup_expr;
            $crate::suite::test_prune_boundary(&backend);
        }

        #[test]
        fn test_prune_latest_rejected() {
            let backend = $setup_expr;
            $crate::suite::test_prune_latest_rejected(&backend);
        }

        #[test]
        fn test_prune_empty_log_rejected() {
            let backend = $setup_expr;
            $crate::suite::test_prune_empty_log_rejected(&backend);
        }

        #[test]
        fn test_prune_is_idempotent() {
            let backend = $setup_expr;
            $crate::suite::test_prune_is_idempotent(&backend);
        }

        #[test]
        fn test_unknown_future_nonce() {
            let backend = $setup_expr;
            $crate::suite::test_unknown_future_nonce(&backend);
        }

        #[test]
        fn test_blocks_accumulate() {
            let backend = $setup_expr;
            $crate::suite::test_blocks_accumulate(&backend);
        }

        #[test]
        fn test_uncommitted_writes_are_invisible() {
            let backend = $setup_expr;
            $crate::suite::test_uncommitted_writes_are_invisible(&backend);
        }

        #[test]
        fn test_last_unbonding_nonce() {
            let backend = $setup_expr;
            $crate::suite::test_last_unbonding_nonce(&backend);
        }

        #[test]
        fn test_pruner_at_block_end() {
            let backend = $setup_expr;
            $crate::suite::test_pruner_at_block_end(&backend);
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn proptest_append_and_prune(
                block_sizes in prop::collection::vec(0usize..5, 1..6),
                prune_points in prop::collection::vec(any::<u64>(), 0..4),
            ) {
                let backend = $setup_expr;
                $crate::suite::check_append_and_prune(&backend, &block_sizes, &prune_points);
            }
        }
    };
}

mod mem {
    use super::MemKvStore;

    attestation_log_tests!(MemKvStore::new());
}

mod sled_backend {
    use super::SledKvStore;

    attestation_log_tests!(SledKvStore::temporary().expect("test: open temporary sled"));
}
