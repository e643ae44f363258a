// Comparator registry tests.
// Lazy construction, sharing across threads, and teardown.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use etf_comparator::comparator::Registry;
use etf_comparator::TermComparator;

static COUNTED_BUILDS: AtomicUsize = AtomicUsize::new(0);

fn counted() -> TermComparator {
    COUNTED_BUILDS.fetch_add(1, Ordering::SeqCst);
    TermComparator::new()
}

// =============================================================================
// Test 1: Racing first callers construct once and share the instance
// =============================================================================
#[test]
fn concurrent_first_access_constructs_once() {
    static REGISTRY: Registry<TermComparator> = Registry::new(counted);

    let barrier = Arc::new(Barrier::new(16));
    let mut handles = vec![];

    for _ in 0..16 {
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            REGISTRY.get()
        }));
    }

    let instances: Vec<Arc<TermComparator>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    for inst in &instances[1..] {
        assert!(Arc::ptr_eq(&instances[0], inst));
    }
    assert_eq!(REGISTRY.constructions(), 1);
    assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Test 2: Global accessor hands out one instance until shutdown
// =============================================================================
#[test]
fn global_lifecycle() {
    let registry = etf_comparator::comparator::registry::global();

    let first = etf_comparator::comparator();
    let second = etf_comparator::comparator();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(registry.is_initialized());
    assert_eq!(registry.constructions(), 1);

    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(etf_comparator::comparator))
        .collect();
    for h in handles {
        assert!(Arc::ptr_eq(&first, &h.join().unwrap()));
    }
    assert_eq!(registry.constructions(), 1);

    assert!(etf_comparator::shutdown());
    assert!(!registry.is_initialized());
    assert!(!etf_comparator::shutdown());
}

// =============================================================================
// Test 3: Shared instance compares from many threads
// =============================================================================
#[test]
fn shared_instance_compares_concurrently() {
    use etf_comparator::Comparator;

    let registry = Registry::new(TermComparator::new);
    let cmp = registry.get();

    let lo = vec![131, 104, 1, 100, 0, 2, b'a', b'a'];
    let hi = vec![131, 104, 1, 100, 0, 2, b'z', b'z'];

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cmp = Arc::clone(&cmp);
            let (lo, hi) = (lo.clone(), hi.clone());
            thread::spawn(move || {
                for _ in 0..1000 {
                    assert_eq!(cmp.compare(&lo, &hi), std::cmp::Ordering::Less);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
