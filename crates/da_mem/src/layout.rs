use core::alloc::Layout;

use crate::AllocError;

/// Creates the layout of `[T; n]`, checking for overflow.
///
/// Fails with [`AllocError::CapacityOverflow`] when `n * size_of::<T>()`
/// overflows or exceeds `isize::MAX`.
///
/// # Examples
///
/// ```
/// use da_mem::{AllocError, array_layout};
///
/// let layout = array_layout::<u32>(3).unwrap();
/// assert_eq!(layout.size(), 12);
/// assert_eq!(layout.align(), 4);
///
/// assert_eq!(array_layout::<u32>(usize::MAX), Err(AllocError::CapacityOverflow));
/// ```
#[inline]
pub const fn array_layout<T>(n: usize) -> Result<Layout, AllocError> {
    let Some(alloc_size) = size_of::<T>().checked_mul(n) else {
        return Err(AllocError::CapacityOverflow);
    };

    // `size_of::<T>()` is a multiple of the alignment, so no padding is added.
    if alloc_size > isize::MAX as usize {
        return Err(AllocError::CapacityOverflow);
    }

    Ok(unsafe { Layout::from_size_align_unchecked(alloc_size, align_of::<T>()) })
}

/// Creates the layout of `[T; n]` without checking.
///
/// # Safety
/// - `size_of::<T>() * n` must not overflow
/// - The resulting size must be <= `isize::MAX`
#[inline(always)]
pub(crate) const unsafe fn array_layout_unchecked<T>(n: usize) -> Layout {
    unsafe { Layout::from_size_align_unchecked(size_of::<T>() * n, align_of::<T>()) }
}

// -----------------------------------------------------------------------------
// Tests
