use core::iter;
use core::mem::ManuallyDrop;
use core::ptr;
use core::slice;

use da_mem::{AllocError, RawMemory};

use crate::guard::SetLenOnDrop;

mod clone;
mod edit;
mod grow;
mod impls;

// -----------------------------------------------------------------------------
// DynArray

/// A contiguous growable array with explicit control over its storage.
///
/// The array owns one [`RawMemory`] block and the number of live elements in
/// it. When an insertion needs more room than the block has, the capacity
/// doubles (`0` grows to `1`), which makes appending amortized O(1).
///
/// References and pointers into the array are invalidated by any operation
/// that reallocates; the borrow checker enforces this for references.
///
/// # Examples
///
/// ```
/// use da_vec::DynArray;
///
/// let mut arr = DynArray::new();
/// arr.push_back(1);
/// arr.push_back(2);
///
/// arr.reserve(10);
/// assert_eq!(arr.capacity(), 10);
/// assert_eq!(arr, [1, 2]);
/// ```
pub struct DynArray<T> {
    data: RawMemory<T>,
    len: usize,
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        // SAFETY: `[0, len)` is initialized; the block itself is released by
        // `RawMemory` afterwards.
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
        }
    }
}

impl<T> DynArray<T> {
    /// Creates an empty array. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::DynArray;
    ///
    /// let arr: DynArray<i32> = DynArray::new();
    /// assert!(arr.is_empty());
    /// assert_eq!(arr.capacity(), 0);
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            data: RawMemory::new(),
            len: 0,
        }
    }

    /// Creates an empty array with room for exactly `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the block cannot be allocated.
    #[inline]
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            data: RawMemory::try_with_capacity(capacity)?,
            len: 0,
        })
    }

    /// Creates an empty array with room for exactly `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::DynArray;
    ///
    /// let arr: DynArray<String> = DynArray::with_capacity(3);
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(arr.capacity(), 3);
    /// ```
    #[inline]
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|e| e.handle())
    }

    /// Creates an array of `len` elements, each built by calling `f`.
    ///
    /// The capacity is exactly `len`. If `f` panics, the elements built so
    /// far are dropped and the block is released.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the block cannot be allocated. `f` is not
    /// called in that case.
    pub fn try_with_len_with<F>(len: usize, f: F) -> Result<Self, AllocError>
    where
        F: FnMut() -> T,
    {
        let mut this = Self::try_with_capacity(len)?;
        // SAFETY: exactly `len` items into a block of capacity `len`.
        unsafe {
            this.extend_trusted(iter::repeat_with(f).take(len));
        }
        Ok(this)
    }

    /// Creates an array of `len` elements, each built by calling `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::DynArray;
    ///
    /// let mut next = 0;
    /// let arr = DynArray::with_len_with(3, || { next += 1; next });
    /// assert_eq!(arr, [1, 2, 3]);
    /// ```
    #[inline]
    #[track_caller]
    pub fn with_len_with<F>(len: usize, f: F) -> Self
    where
        F: FnMut() -> T,
    {
        Self::try_with_len_with(len, f).unwrap_or_else(|e| e.handle())
    }

    /// Creates an array of `len` default-constructed elements.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the block cannot be allocated.
    #[inline]
    pub fn try_with_len(len: usize) -> Result<Self, AllocError>
    where
        T: Default,
    {
        Self::try_with_len_with(len, T::default)
    }

    /// Creates an array of `len` default-constructed elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::DynArray;
    ///
    /// let arr: DynArray<u8> = DynArray::with_len(4);
    /// assert_eq!(arr, [0, 0, 0, 0]);
    /// assert_eq!(arr.capacity(), 4);
    /// ```
    #[inline]
    #[track_caller]
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::with_len_with(len, T::default)
    }

    /// Creates an array holding `n` copies of `elem`, with capacity `n`.
    ///
    /// `elem` itself is moved into the last slot, so only `n - 1` clones are
    /// made. For `n == 0` it is dropped.
    #[track_caller]
    pub fn from_elem(elem: T, n: usize) -> Self
    where
        T: Clone,
    {
        let mut this = Self::with_capacity(n);
        // SAFETY: exactly `n` items into a block of capacity `n`.
        unsafe {
            this.extend_trusted(iter::repeat_n(elem, n));
        }
        this
    }

    /// Returns the number of live elements.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots the current block was sized for.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns the address of the first slot.
    ///
    /// The pointer is dangling when nothing is allocated, and it is
    /// invalidated by any reallocation.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Returns the mutable address of the first slot.
    #[inline(always)]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    /// Views the live elements as a slice.
    #[inline(always)]
    pub const fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is initialized and the pointer is aligned.
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    /// Views the live elements as a mutable slice.
    #[inline(always)]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `[0, len)` is initialized and the pointer is aligned.
        unsafe { slice::from_raw_parts_mut(self.data.as_mut_ptr(), self.len) }
    }

    /// Returns a reference to the element at `index` without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len). Violations panic when
    /// the `debug` configuration is active and are undefined behavior
    /// otherwise.
    #[inline(always)]
    #[track_caller]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        crate::cfg::debug! {
            assert!(index < self.len, "index out of bounds: the len is {} but the index is {index}", self.len);
        }
        unsafe { self.data.get(index) }
    }

    /// Returns a mutable reference to the element at `index` without bounds
    /// checks.
    ///
    /// # Safety
    ///
    /// See [`get_unchecked`](Self::get_unchecked).
    #[inline(always)]
    #[track_caller]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        crate::cfg::debug! {
            assert!(index < self.len, "index out of bounds: the len is {} but the index is {index}", self.len);
        }
        unsafe { self.data.get_mut(index) }
    }

    /// Returns an iterator over the live elements.
    #[inline(always)]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator that allows modifying each live element.
    #[inline(always)]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Steals the buffer and the elements, leaving `self` empty with zero
    /// capacity. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::dyn_array;
    ///
    /// let mut a = dyn_array![1, 2, 3];
    /// let b = a.take();
    ///
    /// assert_eq!((a.len(), a.capacity()), (0, 0));
    /// assert_eq!(b, [1, 2, 3]);
    /// ```
    #[inline(always)]
    pub const fn take(&mut self) -> Self {
        let len = self.len;
        self.len = 0;
        Self {
            data: self.data.take(),
            len,
        }
    }

    /// Exchanges the contents of two arrays in O(1). Never fails.
    #[inline(always)]
    pub const fn swap(&mut self, other: &mut Self) {
        self.data.swap(&mut other.data);
        core::mem::swap(&mut self.len, &mut other.len);
    }

    /// Moves the block out, for [`IntoIter`](crate::IntoIter).
    ///
    /// The caller takes over the `len` live elements in the returned block.
    #[inline(always)]
    pub(crate) fn into_raw_parts(self) -> (RawMemory<T>, usize) {
        let mut this = ManuallyDrop::new(self);
        (this.data.take(), this.len)
    }

    // -------------------------------------------------------------------------
    // Building blocks shared by the mutating operations.

    /// Constructs the items of `iter` into the spare tail, in order.
    ///
    /// If the iterator panics, `len` covers exactly the items written so far.
    ///
    /// # Safety
    ///
    /// `iter` must not yield more items than `capacity - len`.
    unsafe fn extend_trusted<I>(&mut self, iter: I)
    where
        I: Iterator<Item = T>,
    {
        let base = self.data.as_mut_ptr();
        let mut len = SetLenOnDrop::new(&mut self.len);

        for value in iter {
            crate::cfg::debug! {
                assert!(len.current() < self.data.capacity(), "iterator exceeded the spare capacity");
            }
            // SAFETY: the slot is in bounds and uninitialized.
            unsafe {
                base.add(len.current()).write(value);
            }
            len.increment();
        }
    }

    /// The capacity after one doubling step.
    #[inline]
    fn grown_capacity(&self) -> Result<usize, AllocError> {
        match self.data.capacity() {
            0 => Ok(1),
            cap => cap.checked_mul(2).ok_or(AllocError::CapacityOverflow),
        }
    }

    /// Installs `new_data` as the storage and releases the old block.
    ///
    /// The live elements must already have been relocated into `new_data`;
    /// the old slots are treated as moved-from and are not dropped.
    #[inline]
    fn adopt(&mut self, mut new_data: RawMemory<T>) {
        log::trace!(
            "DynArray<{}>: reallocated {} -> {} slots",
            core::any::type_name::<T>(),
            self.data.capacity(),
            new_data.capacity(),
        );
        self.data.swap(&mut new_data);
    }
}

// -----------------------------------------------------------------------------
// Relocation

/// Moves `count` live elements from `src` into the uninitialized slots at
/// `dst`.
///
/// Relocation never needs a `Clone` fallback: moving a value is a bitwise
/// copy and cannot panic, so no partially relocated state is observable.
///
/// # Safety
/// - `src..src + count` must be initialized and is moved-from afterwards.
/// - `dst..dst + count` must be uninitialized and must not overlap `src`.
#[inline(always)]
unsafe fn relocate<T>(src: *const T, dst: *mut T, count: usize) {
    unsafe {
        ptr::copy_nonoverlapping(src, dst, count);
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::DynArray;

    #[test]
    fn is_sync_send() {
        use core::panic::{RefUnwindSafe, UnwindSafe};

        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}
        fn is_unwindsafe<T: UnwindSafe>() {}
        fn is_refunwindsafe<T: RefUnwindSafe>() {}

        is_send::<DynArray<i32>>();
        is_sync::<DynArray<i32>>();
        is_unwindsafe::<DynArray<i32>>();
        is_refunwindsafe::<DynArray<i32>>();
    }

    #[test]
    fn sized_construction() {
        let arr: DynArray<u32> = DynArray::with_len(3);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.capacity(), 3);
        assert!(arr.iter().all(|&x| x == 0));

        let empty: DynArray<u32> = DynArray::with_len(0);
        assert_eq!(empty.capacity(), 0);
    }

    #[test]
    fn from_elem_moves_the_original() {
        use core::cell::Cell;

        struct CountClones<'a>(&'a Cell<usize>);

        impl Clone for CountClones<'_> {
            fn clone(&self) -> Self {
                self.0.set(self.0.get() + 1);
                Self(self.0)
            }
        }

        let clones = Cell::new(0);
        let arr = DynArray::from_elem(CountClones(&clones), 4);
        assert_eq!(arr.len(), 4);
        assert_eq!(arr.capacity(), 4);
        assert_eq!(clones.get(), 3);

        clones.set(0);
        let empty = DynArray::from_elem(CountClones(&clones), 0);
        assert!(empty.is_empty());
        assert_eq!(clones.get(), 0);
    }

    #[test]
    fn take_leaves_empty_state() {
        let mut a = DynArray::from_elem(7u8, 5);
        let ptr = a.as_ptr();

        let b = a.take();
        assert_eq!(a.len(), 0);
        assert_eq!(a.capacity(), 0);
        assert_eq!(b.as_ptr(), ptr);
        assert_eq!(b, [7; 5]);
    }

    #[test]
    fn swap_exchanges_storage() {
        let mut a = DynArray::from_elem(1u8, 2);
        let mut b = DynArray::with_capacity(8);
        b.push_back(9u8);

        a.swap(&mut b);
        assert_eq!(a, [9]);
        assert_eq!(a.capacity(), 8);
        assert_eq!(b, [1, 1]);
        assert_eq!(b.capacity(), 2);
    }

    #[test]
    fn unchecked_access() {
        let mut arr = DynArray::from([1, 2, 3]);
        unsafe {
            *arr.get_unchecked_mut(1) = 20;
            assert_eq!(*arr.get_unchecked(1), 20);
        }
    }

    #[test]
    #[cfg(any(feature = "debug", debug_assertions))]
    #[should_panic(expected = "index out of bounds")]
    fn unchecked_access_is_checked_in_debug() {
        let arr = DynArray::from([1, 2, 3]);
        let _ = unsafe { arr.get_unchecked(3) };
    }
}
