use super::{distinct_candidates, init_test_logging, scripted_candidates};
use crate::candidate::{ALPHABET, CANDIDATE_LEN, CandidateSource, RandomCandidates};
use crate::config::SearchConfig;
use crate::error::ConfigError;
use crate::hash::{HashValue, hash};
use crate::search::{CollisionSearch, Progress, SearchEvent, SearchState};

use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn random_candidates_use_the_alphabet() {
    let mut source = RandomCandidates::new(StdRng::seed_from_u64(1));
    for _ in 0..100 {
        let candidate = source.next_candidate(CANDIDATE_LEN);
        assert_eq!(candidate.len(), 8);
        assert!(candidate.bytes().all(|b| ALPHABET.contains(&b)), "{candidate}");
    }
}

/// Every alphabet character is drawn, each close to `1/62` of the time.
#[test]
fn random_candidates_cover_the_whole_alphabet() {
    const DRAWS: usize = 4_000;
    let mut source = RandomCandidates::new(StdRng::seed_from_u64(7));
    let mut counts = [0_usize; 256];
    for _ in 0..DRAWS {
        for b in source.next_candidate(CANDIDATE_LEN).bytes() {
            counts[usize::from(b)] += 1;
        }
    }

    let total = DRAWS * CANDIDATE_LEN;
    let expected = total / ALPHABET.len();
    for &b in ALPHABET {
        let seen = counts[usize::from(b)];
        assert!(
            (expected / 2..=expected * 2).contains(&seen),
            "{:?} drawn {seen} times, expected about {expected}",
            char::from(b)
        );
    }
    assert_eq!(ALPHABET.iter().map(|&b| counts[usize::from(b)]).sum::<usize>(), total);

    let class = |range: std::ops::RangeInclusive<u8>| range.map(|b| counts[usize::from(b)]).sum::<usize>();
    let (upper, lower, digits) = (class(b'A'..=b'Z'), class(b'a'..=b'z'), class(b'0'..=b'9'));
    assert!(upper > total / 3 && upper < total / 2, "uppercase {upper} of {total}");
    assert!(lower > total / 3 && lower < total / 2, "lowercase {lower} of {total}");
    assert!(digits > total / 8 && digits < total / 4, "digits {digits} of {total}");
}

#[test]
fn new_search_is_idle() {
    let search = CollisionSearch::seeded(0);
    let status = search.status();
    assert_eq!(status.state, SearchState::Idle);
    assert_eq!(status.attempts, 0);
    assert_eq!(status.unique_hashes, 0);
    assert_eq!(status.result, None);
}

#[test]
fn invalid_config_is_rejected() {
    let err = CollisionSearch::new(SearchConfig::new().with_batch_size(0), distinct_candidates());
    assert_eq!(err.err(), Some(ConfigError::ZeroBatchSize));

    let err = CollisionSearch::new(SearchConfig::new().with_max_attempts(0), distinct_candidates());
    assert_eq!(err.err(), Some(ConfigError::ZeroAttemptBudget));

    let err = CollisionSearch::new(SearchConfig::new().with_candidate_len(0), distinct_candidates());
    assert_eq!(err.err(), Some(ConfigError::ZeroCandidateLength));
}

/// A seeded run finds a genuine collision well inside the budget.
#[test]
fn seeded_run_finds_collision() {
    init_test_logging();
    let mut search = CollisionSearch::seeded(42);
    assert_eq!(search.run(|_| {}), SearchState::Found);

    let result = search.result().expect("collision recorded").clone();
    assert_eq!(hash(result.first()), result.hash());
    assert_eq!(hash(result.second()), result.hash());
    assert!(result.attempts() <= 10_000);

    let progress = search.progress();
    assert_eq!(progress.attempts, result.attempts());
    assert_eq!(progress.unique_hashes as u32 + 1, result.attempts());
    assert_eq!(search.recorded(result.hash()), Some(result.first()));
}

/// Same seed → same attempt count, same pair, same record.
#[test]
fn seeded_runs_are_reproducible() {
    let mut a = CollisionSearch::seeded(2024);
    let mut b = CollisionSearch::seeded(2024);
    a.run(|_| {});
    b.run(|_| {});

    assert_eq!(a.status(), b.status());
    assert_eq!(a.record_digest(), b.record_digest());
}

/// Before a collision, every attempt adds one fingerprint.
#[test]
fn unique_hashes_track_attempts_until_collision() {
    let mut search = CollisionSearch::seeded(7);
    assert!(search.start());

    while search.run_batch() == SearchState::Running {
        let Progress {
            attempts,
            unique_hashes,
        } = search.progress();
        assert_eq!(unique_hashes, attempts as usize);
        assert_eq!(attempts % 50, 0);
    }
}

#[test]
fn scripted_collision() {
    let source = scripted_candidates(["ar0", "x", "b0q"]);
    let mut search = CollisionSearch::new(SearchConfig::default(), source).unwrap();

    assert_eq!(search.run(|_| {}), SearchState::Found);
    let result = search.result().unwrap();
    assert_eq!(result.first(), "ar0");
    assert_eq!(result.second(), "b0q");
    assert_eq!(result.hash(), HashValue::new(0x212B));
    assert_eq!(result.attempts(), 3);
    assert_eq!(search.progress().unique_hashes, 2);
}

/// Regenerating an earlier input is reported like any other collision.
#[test]
fn regenerated_input_counts_as_collision() {
    let source = scripted_candidates(["AAAAAAAA", "AAAAAAAA"]);
    let mut search = CollisionSearch::new(SearchConfig::default(), source).unwrap();

    assert_eq!(search.run(|_| {}), SearchState::Found);
    let result = search.result().unwrap();
    assert_eq!(result.first(), result.second());
    assert_eq!(result.attempts(), 2);
}

#[test]
fn exhausts_after_exactly_ten_thousand_attempts() {
    init_test_logging();
    let mut search = CollisionSearch::new(SearchConfig::default(), distinct_candidates()).unwrap();

    let mut batches = 0;
    let state = search.run(|event| {
        if let SearchEvent::Progress(_) = event {
            batches += 1;
        }
    });

    assert_eq!(state, SearchState::Exhausted);
    assert_eq!(batches, 199);
    let status = search.status();
    assert_eq!(status.attempts, 10_000);
    assert_eq!(status.unique_hashes, 10_000);
    assert_eq!(status.result, None);
}

/// The last batch is trimmed to the remaining budget.
#[test]
fn budget_not_a_multiple_of_batch_size() {
    let config = SearchConfig::new().with_max_attempts(120);
    let mut search = CollisionSearch::new(config, distinct_candidates()).unwrap();

    let mut events = Vec::new();
    search.run(|event| events.push(format!("{event:?}")));

    assert_eq!(
        events,
        [
            format!("{:?}", SearchEvent::Progress(Progress { attempts: 50, unique_hashes: 50 })),
            format!("{:?}", SearchEvent::Progress(Progress { attempts: 100, unique_hashes: 100 })),
            format!("{:?}", SearchEvent::Exhausted(Progress { attempts: 120, unique_hashes: 120 })),
        ]
    );
}

/// A collision on the final budgeted attempt is still a collision.
#[test]
fn collision_on_last_attempt_wins_over_exhaustion() {
    let config = SearchConfig::new().with_max_attempts(2);
    let mut search = CollisionSearch::new(config, scripted_candidates(["ar0", "b0q"])).unwrap();
    assert_eq!(search.run(|_| {}), SearchState::Found);
    assert_eq!(search.result().unwrap().attempts(), 2);
}

#[test]
fn start_while_running_is_a_no_op() {
    let mut search = CollisionSearch::new(SearchConfig::default(), distinct_candidates()).unwrap();
    assert!(search.start());
    assert_eq!(search.run_batch(), SearchState::Running);

    assert!(!search.start());
    assert_eq!(search.state(), SearchState::Running);
    assert_eq!(search.progress().attempts, 50);
}

#[test]
fn batches_outside_running_do_nothing() {
    let mut search = CollisionSearch::new(SearchConfig::default(), distinct_candidates()).unwrap();
    assert_eq!(search.run_batch(), SearchState::Idle);
    assert_eq!(search.progress(), Progress::default());
}

#[test]
fn reset_clears_everything() {
    let mut search = CollisionSearch::seeded(3);
    search.run(|_| {});
    assert_eq!(search.state(), SearchState::Found);

    search.reset();
    let status = search.status();
    assert_eq!(status.state, SearchState::Idle);
    assert_eq!(status.attempts, 0);
    assert_eq!(status.unique_hashes, 0);
    assert_eq!(status.result, None);
    assert_eq!(search.record_digest(), 0);
    assert!(search.table().is_empty());
}

/// A finished search can be started again from a clean record.
#[test]
fn restart_after_found() {
    let mut search = CollisionSearch::seeded(11);
    search.run(|_| {});
    let first = search.result().unwrap().clone();

    assert!(search.start());
    assert_eq!(search.result(), None);
    assert_eq!(search.progress(), Progress::default());

    assert_eq!(search.run(|_| {}), SearchState::Found);
    assert_ne!(search.result(), Some(&first));
}

/// Cancellation lands on the next batch boundary and resets to idle.
#[test]
fn cancel_takes_effect_at_batch_boundary() {
    let mut search = CollisionSearch::new(SearchConfig::default(), distinct_candidates()).unwrap();
    search.start();
    search.run_batch();

    search.cancel();
    assert_eq!(search.state(), SearchState::Running);
    assert_eq!(search.progress().attempts, 50);

    assert_eq!(search.run_batch(), SearchState::Idle);
    assert_eq!(search.progress(), Progress::default());
}

#[test]
fn cancel_from_observer_stops_run() {
    let mut search = CollisionSearch::new(SearchConfig::default(), distinct_candidates()).unwrap();
    let handle = search.cancel_handle();

    let mut events = Vec::new();
    let state = search.run(|event| {
        if let SearchEvent::Progress(_) = event {
            handle.cancel();
        }
        events.push(format!("{event:?}"));
    });

    assert_eq!(state, SearchState::Idle);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1], "Cancelled");
    assert!(!handle.is_cancelled());
}

/// A cancel requested while idle does not leak into the next run.
#[test]
fn stale_cancel_is_cleared_by_start() {
    let mut search = CollisionSearch::seeded(5);
    search.cancel();
    assert_eq!(search.run(|_| {}), SearchState::Found);
}

#[test]
fn cancel_handle_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<crate::CancelHandle>();
}
