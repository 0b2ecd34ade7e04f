use alloc::alloc as malloc;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, MaybeUninit};
use core::panic::{RefUnwindSafe, UnwindSafe};
use core::ptr::NonNull;

use crate::AllocError;
use crate::layout::{array_layout, array_layout_unchecked};

// -----------------------------------------------------------------------------
// RawMemory

/// An owned, uninitialized block of `capacity` slots for `T`.
///
/// `RawMemory` only allocates and releases. It never constructs or drops the
/// values placed in its slots, so the owner of those values must drop every
/// live one before the block goes away.
///
/// A capacity of zero never allocates, and neither does a zero-sized `T`; in
/// both cases the address is dangling but well aligned.
///
/// The type is move-only. Besides an ordinary Rust move, ownership can be
/// transferred out of a place with [`take`](Self::take), which leaves the
/// empty state behind, or exchanged with [`swap`](Self::swap).
///
/// # Examples
///
/// ```
/// use da_mem::RawMemory;
///
/// let mut mem = RawMemory::<String>::with_capacity(2);
/// assert_eq!(mem.capacity(), 2);
///
/// mem.slot(0).write("hello".to_string());
/// assert_eq!(unsafe { mem.get(0) }, "hello");
///
/// // `RawMemory` does not drop what it holds.
/// unsafe { mem.ptr_at_mut(0).drop_in_place() };
/// ```
pub struct RawMemory<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for RawMemory<T> {}
unsafe impl<T: Sync> Sync for RawMemory<T> {}
impl<T: UnwindSafe> UnwindSafe for RawMemory<T> {}
impl<T: RefUnwindSafe> RefUnwindSafe for RawMemory<T> {}

impl<T> Drop for RawMemory<T> {
    fn drop(&mut self) {
        if Self::IS_ZST || self.capacity == 0 {
            return;
        }
        // SAFETY: the layout was validated by `try_with_capacity`.
        unsafe {
            let layout = array_layout_unchecked::<T>(self.capacity);
            malloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
        }
    }
}

impl<T> Default for RawMemory<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RawMemory<T> {
    const IS_ZST: bool = size_of::<T>() == 0;

    /// Creates the empty state: capacity zero, nothing allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_mem::RawMemory;
    ///
    /// let mem = RawMemory::<u8>::new();
    /// assert_eq!(mem.capacity(), 0);
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates room for exactly `capacity` slots.
    ///
    /// No allocation takes place for `capacity == 0` or a zero-sized `T`.
    ///
    /// # Errors
    ///
    /// - [`AllocError::CapacityOverflow`] if the byte size is not representable.
    /// - [`AllocError::OutOfMemory`] if the global allocator refuses.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_mem::{AllocError, RawMemory};
    ///
    /// let mem = RawMemory::<u64>::try_with_capacity(16).unwrap();
    /// assert_eq!(mem.capacity(), 16);
    ///
    /// let huge = RawMemory::<u64>::try_with_capacity(usize::MAX);
    /// assert!(matches!(huge, Err(AllocError::CapacityOverflow)));
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        if Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        let layout = array_layout::<T>(capacity)?;
        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe { malloc::alloc(layout) };

        match NonNull::new(ptr.cast::<T>()) {
            Some(ptr) => Ok(Self {
                ptr,
                capacity,
                _marker: PhantomData,
            }),
            None => Err(AllocError::OutOfMemory { layout }),
        }
    }

    /// Allocates room for exactly `capacity` slots.
    ///
    /// Diverges through [`AllocError::handle`] instead of returning an error.
    #[inline]
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(mem) => mem,
            Err(e) => e.handle(),
        }
    }

    /// Returns the number of slots this block was sized for.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if no slots are held.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Returns the address of slot `0`.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns the mutable address of slot `0`.
    #[inline(always)]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns the address of slot `offset`.
    ///
    /// `offset == capacity` is allowed and yields the one-past-the-end
    /// address, which must never be dereferenced. Larger offsets are a
    /// contract violation; the result is then not a usable pointer.
    #[inline(always)]
    #[track_caller]
    pub fn ptr_at(&self, offset: usize) -> *const T {
        crate::cfg::debug! {
            assert!(offset <= self.capacity, "slot offset out of range");
        }
        self.ptr.as_ptr().wrapping_add(offset)
    }

    /// Returns the mutable address of slot `offset`.
    ///
    /// See [`ptr_at`](Self::ptr_at).
    #[inline(always)]
    #[track_caller]
    pub fn ptr_at_mut(&mut self, offset: usize) -> *mut T {
        crate::cfg::debug! {
            assert!(offset <= self.capacity, "slot offset out of range");
        }
        self.ptr.as_ptr().wrapping_add(offset)
    }

    /// Returns slot `index` as uninitialized memory, ready to be written.
    ///
    /// Writing through the returned reference overwrites the slot without
    /// dropping whatever it held.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    #[track_caller]
    pub fn slot(&mut self, index: usize) -> &mut MaybeUninit<T> {
        assert!(index < self.capacity, "slot index out of range");
        // SAFETY: in bounds, and `MaybeUninit` has no validity requirement.
        unsafe { &mut *self.ptr.as_ptr().add(index).cast::<MaybeUninit<T>>() }
    }

    /// Returns a reference to the value in slot `index`.
    ///
    /// # Safety
    /// - `index` must be less than `capacity`.
    /// - The slot must hold an initialized value.
    #[inline(always)]
    #[track_caller]
    pub unsafe fn get(&self, index: usize) -> &T {
        crate::cfg::debug! {
            assert!(index < self.capacity, "slot index out of range");
        }
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// Returns a mutable reference to the value in slot `index`.
    ///
    /// # Safety
    /// - `index` must be less than `capacity`.
    /// - The slot must hold an initialized value.
    #[inline(always)]
    #[track_caller]
    pub unsafe fn get_mut(&mut self, index: usize) -> &mut T {
        crate::cfg::debug! {
            assert!(index < self.capacity, "slot index out of range");
        }
        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }

    /// Moves the block out, leaving the empty state in its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_mem::RawMemory;
    ///
    /// let mut a = RawMemory::<u32>::with_capacity(4);
    /// let b = a.take();
    ///
    /// assert_eq!(a.capacity(), 0);
    /// assert_eq!(b.capacity(), 4);
    /// ```
    #[inline(always)]
    pub const fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    /// Exchanges the blocks owned by `self` and `other`.
    #[inline(always)]
    pub const fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }
}

impl<T> fmt::Debug for RawMemory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawMemory")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
