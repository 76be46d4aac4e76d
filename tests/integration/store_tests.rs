//! Shared reading store under concurrent access.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use thermalert::{SharedReading, Temperature};

const COLD: f32 = -12.5;
const HOT: f32 = 87.25;
const READERS: usize = 4;
/// Reads each reader must complete while the writer is still alternating.
const MIN_READS: u32 = 5_000;

/// A reader racing the writer must only ever see a pair the writer
/// actually wrote, never celsius from one write and fahrenheit from another.
#[test]
fn concurrent_readers_never_observe_a_mixed_pair() {
    let store = Arc::new(SharedReading::new());
    let done = Arc::new(AtomicBool::new(false));
    let start = Arc::new(Barrier::new(READERS + 1));
    let counts: Arc<Vec<AtomicU32>> = Arc::new((0..READERS).map(|_| AtomicU32::new(0)).collect());
    let cold = Temperature::from_celsius(COLD);
    let hot = Temperature::from_celsius(HOT);

    let readers: Vec<_> = (0..READERS)
        .map(|id| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            let start = Arc::clone(&start);
            let counts = Arc::clone(&counts);
            thread::spawn(move || {
                start.wait();
                while !done.load(Ordering::Acquire) {
                    let t = store.read();
                    assert!(
                        t == Temperature::ZERO || t == cold || t == hot,
                        "mixed pair observed: {:?}",
                        t
                    );
                    counts[id].fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    start.wait();
    let mut writes = 0u64;
    while counts.iter().any(|c| c.load(Ordering::Relaxed) < MIN_READS) {
        store.write(if writes % 2 == 0 { cold } else { hot });
        writes += 1;
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.join().unwrap();
    }
    assert!(writes > 0);
    for c in counts.iter() {
        assert!(c.load(Ordering::Relaxed) >= MIN_READS);
    }
}

#[test]
fn readers_share_one_store() {
    let store = Arc::new(SharedReading::new());
    let reader = Arc::clone(&store);

    store.write(Temperature::from_celsius(25.0));

    let t = thread::spawn(move || reader.read()).join().unwrap();
    assert_eq!(t.celsius(), 25.0);
    assert_eq!(t.fahrenheit(), 77.0);
}
