//! An element type that counts its constructions and drops.
//!
//! Counters are thread-local, so every test sees its own numbers as long as
//! it calls [`reset`] first.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use core::cell::Cell;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static CREATED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };
    static WENT_NEGATIVE: Cell<bool> = const { Cell::new(false) };
    static FAIL_AFTER: Cell<Option<usize>> = const { Cell::new(None) };
}

/// A snapshot of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub live: isize,
    pub created: usize,
    pub dropped: usize,
}

pub fn reset() {
    LIVE.set(0);
    CREATED.set(0);
    DROPPED.set(0);
    WENT_NEGATIVE.set(false);
    FAIL_AFTER.set(None);
}

pub fn counters() -> Counters {
    Counters {
        live: LIVE.get(),
        created: CREATED.get(),
        dropped: DROPPED.get(),
    }
}

/// Lets `n` more constructions or assignments succeed, then panics once.
pub fn fail_after(n: usize) {
    FAIL_AFTER.set(Some(n));
}

/// Every constructed value was dropped exactly once.
#[track_caller]
pub fn assert_balanced() {
    let c = counters();
    assert!(!WENT_NEGATIVE.get(), "more drops than constructions: {c:?}");
    assert_eq!(c.live, 0, "leaked elements: {c:?}");
    assert_eq!(c.created, c.dropped, "unbalanced counters: {c:?}");
}

fn tick() {
    if let Some(n) = FAIL_AFTER.get() {
        if n == 0 {
            FAIL_AFTER.set(None);
            panic!("injected failure");
        }
        FAIL_AFTER.set(Some(n - 1));
    }
}

// -----------------------------------------------------------------------------
// Tracked

#[derive(Debug, PartialEq, Eq)]
pub struct Tracked(pub i32);

impl Tracked {
    pub fn new(value: i32) -> Self {
        tick();
        LIVE.set(LIVE.get() + 1);
        CREATED.set(CREATED.get() + 1);
        Self(value)
    }
}

impl Default for Tracked {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(self.0)
    }

    fn clone_from(&mut self, source: &Self) {
        tick();
        self.0 = source.0;
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        let live = LIVE.get() - 1;
        if live < 0 {
            WENT_NEGATIVE.set(true);
        }
        LIVE.set(live);
        DROPPED.set(DROPPED.get() + 1);
    }
}

/// Builds `Tracked` values from plain integers.
pub fn tracked(values: &[i32]) -> da_vec::DynArray<Tracked> {
    values.iter().map(|&v| Tracked::new(v)).collect()
}

/// The plain integers held by an array of `Tracked`.
pub fn values(arr: &da_vec::DynArray<Tracked>) -> Vec<i32> {
    arr.iter().map(|t| t.0).collect()
}
