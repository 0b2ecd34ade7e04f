use core::alloc::Layout;

use thiserror::Error;

/// The allocation behind a [`RawMemory`](crate::RawMemory) could not be made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The requested slot count does not fit in `isize::MAX` bytes.
    #[error("capacity overflow")]
    CapacityOverflow,
    /// The global allocator returned null for `layout`.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    OutOfMemory { layout: Layout },
}

impl AllocError {
    /// Diverges the way `alloc::vec::Vec` does on the same failure.
    ///
    /// [`CapacityOverflow`](Self::CapacityOverflow) panics and
    /// [`OutOfMemory`](Self::OutOfMemory) calls
    /// [`handle_alloc_error`](alloc::alloc::handle_alloc_error).
    #[cold]
    #[inline(never)]
    #[track_caller]
    pub fn handle(self) -> ! {
        log::error!("{self}");
        match self {
            Self::CapacityOverflow => panic!("capacity overflow"),
            Self::OutOfMemory { layout } => alloc::alloc::handle_alloc_error(layout),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
