use core::iter;
use core::ptr;

use da_mem::{AllocError, RawMemory};

use super::{DynArray, relocate};

// -----------------------------------------------------------------------------
// Reserve and resize

impl<T> DynArray<T> {
    /// Makes the capacity at least `capacity` slots in total.
    ///
    /// Does nothing if the current capacity is already large enough, so
    /// element addresses stay valid. Otherwise allocates a block of exactly
    /// `capacity` slots, moves the elements into it, and releases the old
    /// block.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] and leaves the array untouched if the new block
    /// cannot be allocated.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), AllocError> {
        if capacity <= self.data.capacity() {
            return Ok(());
        }

        let mut new_data = RawMemory::try_with_capacity(capacity)?;
        // SAFETY: the new block has room for `len` and is a different allocation.
        unsafe {
            relocate(self.data.as_ptr(), new_data.as_mut_ptr(), self.len);
        }
        self.adopt(new_data);
        Ok(())
    }

    /// Makes the capacity at least `capacity` slots in total.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::dyn_array;
    ///
    /// let mut arr = dyn_array![1, 2];
    /// arr.reserve(10);
    /// assert_eq!(arr.capacity(), 10);
    ///
    /// let ptr = arr.as_ptr();
    /// arr.reserve(4);
    /// assert_eq!(arr.capacity(), 10);
    /// assert_eq!(arr.as_ptr(), ptr);
    /// ```
    #[inline]
    #[track_caller]
    pub fn reserve(&mut self, capacity: usize) {
        self.try_reserve(capacity).unwrap_or_else(|e| e.handle());
    }

    /// Makes room for `additional` more elements, following the doubling
    /// policy instead of reserving exactly.
    ///
    /// The new capacity is the larger of the required total and one doubling
    /// step, so repeated small requests stay amortized O(1).
    pub(super) fn try_reserve_amortized(&mut self, additional: usize) -> Result<(), AllocError> {
        let total = self
            .len
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow)?;
        if total <= self.data.capacity() {
            return Ok(());
        }

        // A doubling that overflows still leaves room for the exact total.
        let target = match self.grown_capacity() {
            Ok(grown) => grown.max(total),
            Err(_) => total,
        };
        self.try_reserve(target)
    }

    /// Resizes the array to `len` elements, building new ones with `f`.
    ///
    /// Shrinking drops the trailing `self.len() - len` elements. Growing
    /// first reserves exactly `len` slots and then constructs the missing
    /// elements at the end. If `f` panics, the elements it already built stay
    /// in the array.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] and leaves the array untouched if growing
    /// needs a block that cannot be allocated.
    pub fn try_resize_with<F>(&mut self, len: usize, f: F) -> Result<(), AllocError>
    where
        F: FnMut() -> T,
    {
        let old_len = self.len;
        if len <= old_len {
            self.truncate(len);
            return Ok(());
        }

        self.try_reserve(len)?;
        // SAFETY: the reserve above guarantees `len - old_len` spare slots.
        unsafe {
            self.extend_trusted(iter::repeat_with(f).take(len - old_len));
        }
        Ok(())
    }

    /// Resizes the array to `len` elements, building new ones with `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::dyn_array;
    ///
    /// let mut arr = dyn_array![1, 2];
    /// arr.resize_with(4, || 7);
    /// assert_eq!(arr, [1, 2, 7, 7]);
    ///
    /// arr.resize_with(1, || unreachable!());
    /// assert_eq!(arr, [1]);
    /// ```
    #[inline]
    #[track_caller]
    pub fn resize_with<F>(&mut self, len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        self.try_resize_with(len, f).unwrap_or_else(|e| e.handle());
    }

    /// Resizes the array to `len` elements, default-constructing new ones.
    ///
    /// # Errors
    ///
    /// See [`try_resize_with`](Self::try_resize_with).
    #[inline]
    pub fn try_resize(&mut self, len: usize) -> Result<(), AllocError>
    where
        T: Default,
    {
        self.try_resize_with(len, T::default)
    }

    /// Resizes the array to `len` elements, default-constructing new ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::dyn_array;
    ///
    /// let mut arr = dyn_array![5u8];
    /// arr.resize(3);
    /// assert_eq!(arr, [5, 0, 0]);
    /// assert_eq!(arr.capacity(), 3);
    /// ```
    #[inline]
    #[track_caller]
    pub fn resize(&mut self, len: usize)
    where
        T: Default,
    {
        self.resize_with(len, T::default);
    }
}

// -----------------------------------------------------------------------------
// Append

impl<T> DynArray<T> {
    /// Constructs an element from `f` at the end and returns a reference to it.
    ///
    /// At full capacity the array first allocates a block of twice the
    /// capacity (`1` when empty) and builds the new element directly in its
    /// final slot there, before any existing element moves. If `f` panics,
    /// the new block is released and the array is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] and leaves the array untouched, without calling
    /// `f`, if growing fails.
    pub fn try_emplace_back_with<F>(&mut self, f: F) -> Result<&mut T, AllocError>
    where
        F: FnOnce() -> T,
    {
        let len = self.len;

        if len == self.data.capacity() {
            let mut new_data = RawMemory::try_with_capacity(self.grown_capacity()?)?;
            new_data.slot(len).write(f());
            // SAFETY: `[0, len)` of the new block is free; the blocks differ.
            unsafe {
                relocate(self.data.as_ptr(), new_data.as_mut_ptr(), len);
            }
            self.adopt(new_data);
        } else {
            self.data.slot(len).write(f());
        }

        self.len = len + 1;
        // SAFETY: the slot was written above.
        Ok(unsafe { self.data.get_mut(len) })
    }

    /// Constructs an element from `f` at the end and returns a reference to it.
    ///
    /// The reference cannot outlive the next mutation of the array.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::DynArray;
    ///
    /// let mut arr = DynArray::new();
    /// let s = arr.emplace_back_with(|| String::from("abc"));
    /// s.push('d');
    /// assert_eq!(arr[0], "abcd");
    /// ```
    #[inline]
    #[track_caller]
    pub fn emplace_back_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_back_with(f) {
            Ok(value) => value,
            Err(e) => e.handle(),
        }
    }

    /// Appends `value` to the end.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growing fails. The array is untouched and
    /// `value` is dropped.
    #[inline]
    pub fn try_push_back(&mut self, value: T) -> Result<(), AllocError> {
        self.try_emplace_back_with(|| value).map(|_| ())
    }

    /// Appends `value` to the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::DynArray;
    ///
    /// let mut arr = DynArray::new();
    /// arr.push_back(1);
    /// assert_eq!(arr.capacity(), 1);
    /// arr.push_back(2);
    /// assert_eq!(arr.capacity(), 2);
    /// arr.push_back(3);
    /// assert_eq!(arr.capacity(), 4);
    /// assert_eq!(arr, [1, 2, 3]);
    /// ```
    #[inline]
    #[track_caller]
    pub fn push_back(&mut self, value: T) {
        self.emplace_back_with(|| value);
    }
}

// -----------------------------------------------------------------------------
// Insert

impl<T> DynArray<T> {
    /// Constructs an element from `f` at `index`, shifting everything after
    /// it one slot to the right, and returns `index`.
    ///
    /// `index == len` appends. When the array is full, the new element is
    /// built in the doubled block first and the existing elements are then
    /// moved around it, so a panic in `f` leaves the array untouched. When
    /// there is room, the value is built before any element shifts, and the
    /// shift itself cannot fail, so this path is also all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] and leaves the array untouched, without calling
    /// `f`, if growing fails.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[track_caller]
    pub fn try_emplace_with<F>(&mut self, index: usize, f: F) -> Result<usize, AllocError>
    where
        F: FnOnce() -> T,
    {
        let len = self.len;
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );

        if len == self.data.capacity() {
            let mut new_data = RawMemory::try_with_capacity(self.grown_capacity()?)?;
            new_data.slot(index).write(f());
            // SAFETY: both ranges land in free slots of the new block, around
            // the element written above; the blocks differ.
            unsafe {
                let src = self.data.as_ptr();
                let dst = new_data.as_mut_ptr();
                relocate(src, dst, index);
                relocate(src.add(index), dst.add(index + 1), len - index);
            }
            self.adopt(new_data);
        } else if index == len {
            self.data.slot(len).write(f());
        } else {
            let value = f();
            // SAFETY: `len < capacity`, so shifting `[index, len)` right by
            // one stays in bounds; the vacated slot is then overwritten
            // without being dropped because its value now lives at `index + 1`.
            unsafe {
                let at = self.data.ptr_at_mut(index);
                ptr::copy(at, at.add(1), len - index);
                at.write(value);
            }
        }

        self.len = len + 1;
        Ok(index)
    }

    /// Constructs an element from `f` at `index` and returns `index`.
    ///
    /// See [`try_emplace_with`](Self::try_emplace_with).
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::dyn_array;
    ///
    /// let mut arr = dyn_array![1, 3];
    /// let pos = arr.emplace_with(1, || 2);
    /// assert_eq!(pos, 1);
    /// assert_eq!(arr, [1, 2, 3]);
    /// ```
    #[inline]
    #[track_caller]
    pub fn emplace_with<F>(&mut self, index: usize, f: F) -> usize
    where
        F: FnOnce() -> T,
    {
        self.try_emplace_with(index, f).unwrap_or_else(|e| e.handle())
    }

    /// Inserts `value` at `index` and returns `index`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growing fails. The array is untouched and
    /// `value` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[inline]
    #[track_caller]
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<usize, AllocError> {
        self.try_emplace_with(index, || value)
    }

    /// Inserts `value` at `index` and returns `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::dyn_array;
    ///
    /// let mut arr = dyn_array![1, 2, 3];
    /// assert_eq!(arr.insert(1, 99), 1);
    /// assert_eq!(arr, [1, 99, 2, 3]);
    ///
    /// arr.insert(4, 100);
    /// assert_eq!(arr, [1, 99, 2, 3, 100]);
    /// ```
    #[inline]
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.emplace_with(index, || value)
    }
}

// -----------------------------------------------------------------------------
// Tests
