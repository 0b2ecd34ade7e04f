use core::fmt;
use core::iter::FusedIterator;
use core::ptr;
use core::slice;

use da_mem::RawMemory;

// -----------------------------------------------------------------------------
// IntoIter

/// An owning iterator over the elements of a [`DynArray`](crate::DynArray).
///
/// The iterator takes over the array's block. Slots `[start, end)` are the
/// elements not yet yielded; whatever remains when the iterator is dropped is
/// dropped with it, and then the block is released.
///
/// # Examples
///
/// ```
/// use da_vec::dyn_array;
///
/// let mut iter = dyn_array![1, 2, 3, 4].into_iter();
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next_back(), Some(4));
/// assert_eq!(iter.as_slice(), &[2, 3]);
/// assert_eq!(iter.len(), 2);
/// ```
pub struct IntoIter<T> {
    data: RawMemory<T>,
    start: usize,
    end: usize,
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: `[start, end)` is still initialized.
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
        }
    }
}

impl<T> IntoIter<T> {
    /// Takes over `data`, whose slots `[0, len)` are initialized.
    #[inline(always)]
    pub(crate) const fn new(data: RawMemory<T>, len: usize) -> Self {
        Self {
            data,
            start: 0,
            end: len,
        }
    }

    /// Returns the elements not yet yielded as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` is initialized.
        unsafe { slice::from_raw_parts(self.data.ptr_at(self.start), self.end - self.start) }
    }

    /// Returns the elements not yet yielded as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.end - self.start;
        // SAFETY: `[start, end)` is initialized.
        unsafe { slice::from_raw_parts_mut(self.data.ptr_at_mut(self.start), len) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let index = self.start;
        self.start += 1;
        // SAFETY: the slot was live and is now outside `[start, end)`.
        Some(unsafe { self.data.ptr_at(index).read() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: the slot was live and is now outside `[start, end)`.
        Some(unsafe { self.data.ptr_at(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
