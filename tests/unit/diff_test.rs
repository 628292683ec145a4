//! Tests for the snapshot diff engine

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slurm_watch::core::{diff, ChangeKind, Snapshot};

fn random_snapshot(rng: &mut StdRng) -> Snapshot<u32, ()> {
    let states = ["A", "B", "C"];
    let mut snapshot = Snapshot::new();
    for key in 0..50u32 {
        if rng.random_bool(0.7) {
            snapshot.insert(key, states[rng.random_range(0..states.len())], ());
        }
    }
    snapshot
}

#[test]
fn test_diff_of_snapshot_with_itself_is_empty() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let snapshot = random_snapshot(&mut rng);
        assert!(diff(&snapshot, &snapshot).is_empty());
    }
}

#[test]
fn test_diff_is_ordered_and_consistent() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let prev = random_snapshot(&mut rng);
        let curr = random_snapshot(&mut rng);
        let changes = diff(&prev, &curr);

        assert!(changes.windows(2).all(|w| w[0].key < w[1].key));
        for change in &changes {
            match change.kind {
                ChangeKind::New => {
                    assert!(!prev.contains(&change.key) && curr.contains(&change.key));
                }
                ChangeKind::Removed => {
                    assert!(prev.contains(&change.key) && !curr.contains(&change.key));
                }
                ChangeKind::Changed => {
                    assert_ne!(change.previous_state(), change.new_state());
                }
            }
        }

        // Every differing key is reported exactly once.
        let differing = (0..50u32)
            .filter(|k| prev.get(k).map(|e| &e.state) != curr.get(k).map(|e| &e.state))
            .count();
        assert_eq!(changes.len(), differing);
        assert_eq!(diff(&prev, &curr), changes);
    }
}
