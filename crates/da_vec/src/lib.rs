//! A contiguous, growable array built on [`RawMemory`](da_mem::RawMemory).
//!
//! [`DynArray<T>`] owns exactly one raw block plus a count of live elements.
//! Slots `[0, len)` are initialized and slots `[len, capacity)` are not.
//! Every operation that grows the array allocates a new block, builds into it,
//! and only then releases the old one, so a failure while growing leaves the
//! array exactly as it was.
//!
//! # Failure model
//!
//! - Allocation failure is reported as [`AllocError`] by the `try_*` methods.
//!   The other methods diverge through [`AllocError::handle`], like `Vec`.
//! - A panic raised by element code (`Default`, `Clone`, a constructor
//!   closure, `Drop`) never leaks and never double drops. Which state the
//!   array is left in is documented per method.
//! - Contract violations (out-of-range index or position) panic.
//!
//! # Relocation
//!
//! Growing moves the live elements into the new block. A Rust move is a
//! bitwise copy that cannot fail, so relocation never needs the `Clone`
//! fallback a throwing move would require, and every growth path keeps the
//! strong guarantee for every `T`.
//!
//! # Examples
//!
//! ```
//! use da_vec::{DynArray, dyn_array};
//!
//! let mut arr = dyn_array![1, 2, 3];
//! arr.insert(1, 99);
//! assert_eq!(arr, [1, 99, 2, 3]);
//!
//! arr.erase(2);
//! assert_eq!(arr, [1, 99, 3]);
//!
//! let copy = arr.clone();
//! arr.push_back(4);
//! assert_eq!(copy, [1, 99, 3]);
//! ```
#![expect(unsafe_code, reason = "Manual construction in raw memory.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    da_cfg::define_alias! {
        #[cfg(any(feature = "debug", debug_assertions))] => debug,
    }
}

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod array;
mod guard;
mod into_iter;
mod macros;

// -----------------------------------------------------------------------------
// Top-level exports

pub use array::DynArray;
pub use da_mem::AllocError;
pub use into_iter::IntoIter;
