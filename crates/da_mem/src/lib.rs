//! Raw, typed storage that never touches element lifetimes.
//!
//! **RawMemory**
//!
//! [`RawMemory<T>`] owns an allocated but uninitialized block sized for a
//! fixed number of `T` slots. It computes slot addresses and transfers
//! ownership, but it never constructs, reads, or drops an element. Whoever
//! writes into the slots is responsible for dropping them before the block is
//! released.
//!
//! **AllocError**
//!
//! [`AllocError`] is the single resource-exhaustion error: either the byte size
//! of the request cannot be represented, or the global allocator refused it.
#![expect(unsafe_code, reason = "Raw allocation is inherently unsafe.")]
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

// -----------------------------------------------------------------------------
// Modules

mod error;
mod layout;
mod raw;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::AllocError;
pub use layout::array_layout;
pub use raw::RawMemory;
