//! Behavior when element code panics in the middle of an operation.

mod common;

use std::panic::{AssertUnwindSafe, catch_unwind};

use common::{Tracked, assert_balanced, counters, fail_after, reset, tracked, values};
use da_vec::DynArray;

/// Runs `f` and asserts that it panicked.
#[track_caller]
fn expect_panic<R>(f: impl FnOnce() -> R) {
    let result = catch_unwind(AssertUnwindSafe(f));
    assert!(result.is_err(), "expected a panic");
}

#[test]
fn sized_construction_rolls_back() {
    reset();
    fail_after(3);
    expect_panic(|| DynArray::<Tracked>::with_len(10));
    assert_eq!(counters().created, 3);
    assert_balanced();
}

#[test]
fn clone_rolls_back_and_leaves_source() {
    reset();
    {
        let source = tracked(&[1, 2, 3, 4]);
        fail_after(2);
        expect_panic(|| source.clone());

        assert_eq!(values(&source), [1, 2, 3, 4]);
        assert_eq!(counters().live, 4);
    }
    assert_balanced();
}

#[test]
fn emplace_back_growth_failure_leaves_original() {
    reset();
    {
        let mut arr = tracked(&[1, 2, 3]);
        assert_eq!(arr.len(), arr.capacity());
        let ptr = arr.as_ptr();

        fail_after(0);
        expect_panic(|| {
            arr.emplace_back_with(|| Tracked::new(4));
        });

        assert_eq!(values(&arr), [1, 2, 3]);
        assert_eq!(arr.capacity(), 3);
        assert_eq!(arr.as_ptr(), ptr);
    }
    assert_balanced();
}

#[test]
fn emplace_back_failure_without_growth() {
    reset();
    {
        let mut arr = tracked(&[1]);
        arr.reserve(4);

        fail_after(0);
        expect_panic(|| {
            arr.emplace_back_with(|| Tracked::new(2));
        });

        assert_eq!(values(&arr), [1]);
        assert_eq!(arr.capacity(), 4);
    }
    assert_balanced();
}

#[test]
fn insert_growth_failure_leaves_original() {
    reset();
    {
        let mut arr = tracked(&[1, 2, 3, 4]);
        let ptr = arr.as_ptr();

        fail_after(0);
        expect_panic(|| arr.emplace_with(1, || Tracked::new(99)));

        assert_eq!(values(&arr), [1, 2, 3, 4]);
        assert_eq!(arr.capacity(), 4);
        assert_eq!(arr.as_ptr(), ptr);
    }
    assert_balanced();
}

#[test]
fn insert_in_place_failure_leaves_original() {
    // The value is built before anything shifts and the shift cannot fail,
    // so the in-place path is all-or-nothing as well.
    reset();
    {
        let mut arr = tracked(&[1, 2, 3]);
        arr.reserve(8);

        fail_after(0);
        expect_panic(|| arr.emplace_with(0, || Tracked::new(99)));

        assert_eq!(values(&arr), [1, 2, 3]);
    }
    assert_balanced();
}

#[test]
fn clone_from_with_reallocation_is_all_or_nothing() {
    reset();
    {
        let mut dst = tracked(&[7]);
        let source = tracked(&[1, 2, 3, 4]);

        fail_after(2);
        expect_panic(|| dst.clone_from(&source));

        assert_eq!(values(&dst), [7]);
        assert_eq!(dst.capacity(), 1);
    }
    assert_balanced();
}

#[test]
fn clone_from_in_place_stays_valid() {
    reset();
    {
        let mut dst = tracked(&[7, 7]);
        dst.reserve(8);
        let source = tracked(&[1, 2, 3, 4, 5]);

        // Two assignments and one clone succeed, the second clone fails.
        fail_after(3);
        expect_panic(|| dst.clone_from(&source));

        // Partially updated: the assigned prefix and the finished clone.
        assert_eq!(values(&dst), [1, 2, 3]);
        assert_eq!(counters().live, 8);
    }
    assert_balanced();
}

#[test]
fn clone_from_assignment_failure_stays_valid() {
    reset();
    {
        let mut dst = tracked(&[7, 7, 7]);
        let source = tracked(&[1, 2]);

        fail_after(1);
        expect_panic(|| dst.clone_from(&source));

        // The tail was not dropped yet when the second assignment failed.
        assert_eq!(values(&dst), [1, 7, 7]);
    }
    assert_balanced();
}

#[test]
fn resize_failure_keeps_finished_elements() {
    reset();
    {
        let mut arr = tracked(&[1]);

        fail_after(2);
        expect_panic(|| arr.resize(5));

        assert_eq!(values(&arr), [1, 0, 0]);
        assert_eq!(arr.capacity(), 5);
    }
    assert_balanced();
}

// -----------------------------------------------------------------------------
// Panicking destructors

struct Fuse {
    armed: bool,
}

impl Drop for Fuse {
    fn drop(&mut self) {
        if self.armed {
            panic!("fuse blew");
        }
    }
}

#[test]
fn erase_is_consistent_when_drop_panics() {
    let mut arr = DynArray::new();
    arr.push_back(Fuse { armed: false });
    arr.push_back(Fuse { armed: true });
    arr.push_back(Fuse { armed: false });

    expect_panic(|| arr.erase(1));

    assert_eq!(arr.len(), 2);
    assert!(arr.iter().all(|f| !f.armed));
}

#[test]
fn truncate_drops_rest_when_drop_panics() {
    reset();
    let mut arr = DynArray::new();
    for i in 0..4 {
        arr.push_back((Tracked::new(i), Fuse { armed: i == 1 }));
    }

    expect_panic(|| arr.truncate(0));
    assert!(arr.is_empty());
    assert_balanced();
}
