//! `ferry-sync` — the blocking resources vehicles contend for on the way to
//! the ferry.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`semaphore`]   | `Semaphore` — counting semaphore on `Mutex` + `Condvar`  |
//! | [`gate`]        | `GateBank`, `GateGuard` — two toll gates per side        |
//! | [`dock`]        | `DockArea` — bounded holding area per side               |
//! | [`latch`]       | `StartLatch` — one-shot start barrier                    |
//!
//! # Locking rules
//!
//! Every primitive here owns exactly one mutex and never calls out while
//! holding it, so none of them can take part in a lock cycle.  The ferry
//! coordinator in `ferry-sim` may call [`DockArea::try_acquire_slot`] while
//! holding its own lock; nothing in this crate ever takes that lock.
//!
//! Gates and docks can be closed.  Closing wakes every waiter and fails all
//! further acquisitions, which is how a run tears itself down after a panic.
//!
//! All waits re-check their predicate after every wake (`Condvar::wait_while`),
//! so a spurious wake or a `notify_one` that races another waiter can never
//! strand a thread.

pub mod dock;
pub mod gate;
pub mod latch;
pub mod semaphore;

#[cfg(test)]
mod tests;

pub use dock::DockArea;
pub use gate::{GateBank, GateGuard};
pub use latch::StartLatch;
pub use semaphore::Semaphore;
