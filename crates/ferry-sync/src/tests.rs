//! Unit tests for ferry-sync.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Raise `max` to at least `current`.
fn record_peak(max: &AtomicUsize, current: usize) {
    max.fetch_max(current, Ordering::SeqCst);
}

#[cfg(test)]
mod semaphore {
    use super::*;
    use crate::Semaphore;

    #[test]
    fn try_acquire_respects_count() {
        let s = Semaphore::new(2);
        assert!(s.try_acquire());
        assert!(s.try_acquire());
        assert!(!s.try_acquire());
        s.release();
        assert_eq!(s.available(), 1);
    }

    #[test]
    fn release_may_exceed_initial_permits() {
        let s = Semaphore::new(1);
        s.release();
        assert_eq!(s.available(), 2);
    }

    #[test]
    fn acquire_blocks_until_release() {
        let s = Arc::new(Semaphore::new(0));
        let acquired = Arc::new(AtomicUsize::new(0));

        let handle = {
            let s = Arc::clone(&s);
            let acquired = Arc::clone(&acquired);
            thread::spawn(move || {
                assert!(s.acquire());
                acquired.store(1, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(30));
        assert_eq!(acquired.load(Ordering::SeqCst), 0, "acquired without a permit");
        s.release();
        handle.join().unwrap();
        assert_eq!(acquired.load(Ordering::SeqCst), 1);
        assert_eq!(s.available(), 0);
    }

    #[test]
    fn close_releases_waiters_without_a_permit() {
        let s = Arc::new(Semaphore::new(0));
        let waiter = {
            let s = Arc::clone(&s);
            thread::spawn(move || s.acquire())
        };
        thread::sleep(Duration::from_millis(20));
        assert!(!waiter.is_finished());

        s.close();
        assert!(!waiter.join().unwrap());
        assert!(s.is_closed());
        s.release();
        assert!(!s.try_acquire(), "closed semaphore hands out no permits");
    }
}

#[cfg(test)]
mod gate {
    use super::*;
    use crate::GateBank;
    use ferry_core::{GateIndex, Side};

    #[test]
    fn gates_start_free() {
        let bank = GateBank::new();
        for side in Side::BOTH {
            assert_eq!(bank.occupancy(side, GateIndex(0)), 0);
            assert_eq!(bank.occupancy(side, GateIndex(1)), 0);
        }
    }

    #[test]
    fn guard_occupies_only_its_gate() {
        let bank = GateBank::new();
        let guard = bank.acquire(Side::B, GateIndex(1)).unwrap();
        assert_eq!(guard.side(), Side::B);
        assert_eq!(bank.occupancy(Side::B, GateIndex(1)), 1);
        assert_eq!(bank.occupancy(Side::B, GateIndex(0)), 0);
        assert_eq!(bank.occupancy(Side::A, GateIndex(1)), 0);
        guard.release();
        assert_eq!(bank.occupancy(Side::B, GateIndex(1)), 0);
    }

    #[test]
    fn gate_is_exclusive_under_contention() {
        let bank = Arc::new(GateBank::new());
        let contenders = 6;
        let barrier = Arc::new(Barrier::new(contenders));
        let inside = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..contenders)
            .map(|_| {
                let bank = Arc::clone(&bank);
                let barrier = Arc::clone(&barrier);
                let inside = Arc::clone(&inside);
                let peak = Arc::clone(&peak);
                thread::spawn(move || {
                    barrier.wait();
                    let _g = bank.acquire(Side::A, GateIndex(0)).unwrap();
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    record_peak(&peak, now);
                    thread::sleep(Duration::from_millis(5));
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for h in handles {
            h.join().expect("gate thread panicked");
        }
        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert_eq!(bank.occupancy(Side::A, GateIndex(0)), 0);
    }

    #[test]
    fn service_time_is_inside_the_exclusion_window() {
        let bank = Arc::new(GateBank::new());
        let start = std::time::Instant::now();
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let bank = Arc::clone(&bank);
                thread::spawn(move || {
                    assert!(bank.pass_through(Side::B, GateIndex(1), Duration::from_millis(20)));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        // Three serialized 20 ms services.
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn closing_turns_away_queued_vehicles() {
        let bank = Arc::new(GateBank::new());
        let held = bank.acquire(Side::A, GateIndex(0)).unwrap();

        let queued = {
            let bank = Arc::clone(&bank);
            thread::spawn(move || bank.acquire(Side::A, GateIndex(0)).is_some())
        };
        thread::sleep(Duration::from_millis(20));
        bank.close();
        assert!(!queued.join().unwrap());
        assert!(!bank.pass_through(Side::B, GateIndex(1), Duration::ZERO));

        drop(held);
        assert_eq!(bank.occupancy(Side::A, GateIndex(0)), 0);
    }
}

#[cfg(test)]
mod dock {
    use super::*;
    use crate::DockArea;
    use ferry_core::Side;

    #[test]
    fn occupancy_is_bounded_under_contention() {
        let capacity = 3;
        let dock = Arc::new(DockArea::new(capacity));
        let inside = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let dock = Arc::clone(&dock);
                let inside = Arc::clone(&inside);
                let peak = Arc::clone(&peak);
                thread::spawn(move || {
                    assert!(dock.acquire_slot(Side::A));
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    record_peak(&peak, now);
                    assert!(dock.occupancy(Side::A) <= capacity as isize);
                    thread::sleep(Duration::from_millis(5));
                    inside.fetch_sub(1, Ordering::SeqCst);
                    dock.release_slot(Side::A);
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert!(peak.load(Ordering::SeqCst) <= capacity);
        assert_eq!(dock.occupancy(Side::A), 0);
    }

    #[test]
    fn release_on_landing_side_moves_the_slot() {
        let dock = DockArea::new(2);
        assert!(dock.acquire_slot(Side::A));
        assert_eq!(dock.occupancy(Side::A), 1);
        // The vehicle crosses and lands on B.
        dock.release_slot(Side::B);
        assert_eq!(dock.occupancy(Side::A), 1);
        assert_eq!(dock.occupancy(Side::B), -1);
    }

    #[test]
    fn try_acquire_fails_on_full_side_only() {
        let dock = DockArea::new(1);
        assert!(dock.try_acquire_slot(Side::A));
        assert!(!dock.try_acquire_slot(Side::A));
        assert!(dock.try_acquire_slot(Side::B));
    }

    #[test]
    fn landing_unblocks_a_waiter_on_that_side() {
        let dock = Arc::new(DockArea::new(1));
        assert!(dock.acquire_slot(Side::B));

        let waiter = {
            let dock = Arc::clone(&dock);
            thread::spawn(move || dock.acquire_slot(Side::B))
        };
        thread::sleep(Duration::from_millis(20));
        assert!(!waiter.is_finished());

        // A vehicle from A lands on B and frees a slot there.
        dock.release_slot(Side::B);
        assert!(waiter.join().unwrap());
        assert_eq!(dock.occupancy(Side::B), 1);
    }

    #[test]
    fn closing_releases_a_blocked_vehicle() {
        let dock = Arc::new(DockArea::new(1));
        assert!(dock.acquire_slot(Side::A));

        let waiter = {
            let dock = Arc::clone(&dock);
            thread::spawn(move || dock.acquire_slot(Side::A))
        };
        thread::sleep(Duration::from_millis(20));
        dock.close();
        assert!(!waiter.join().unwrap(), "no slot was granted");
        assert!(!dock.try_acquire_slot(Side::B));
        assert_eq!(dock.occupancy(Side::A), 1);
    }
}

#[cfg(test)]
mod latch {
    use super::*;
    use crate::StartLatch;

    #[test]
    fn releases_every_waiter_with_the_same_instant() {
        let latch = Arc::new(StartLatch::new());
        let handles: Vec<_> = (0..5)
            .map(|_| {
                let latch = Arc::clone(&latch);
                thread::spawn(move || latch.wait())
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        assert!(!latch.is_open());
        let opened = latch.open();

        for h in handles {
            assert_eq!(h.join().unwrap(), opened);
        }
    }

    #[test]
    fn reopening_keeps_first_instant() {
        let latch = StartLatch::new();
        let first = latch.open();
        thread::sleep(Duration::from_millis(2));
        assert_eq!(latch.open(), first);
        assert_eq!(latch.wait(), first);
    }
}
