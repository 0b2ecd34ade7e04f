use core::ptr;

use super::DynArray;

// -----------------------------------------------------------------------------
// Removal

impl<T> DynArray<T> {
    /// Removes the last element and returns it, or `None` if empty.
    ///
    /// Never reallocates. The element is destroyed when the returned value
    /// is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::dyn_array;
    ///
    /// let mut arr = dyn_array![1, 2];
    /// assert_eq!(arr.pop_back(), Some(2));
    /// assert_eq!(arr.pop_back(), Some(1));
    /// assert_eq!(arr.pop_back(), None);
    /// assert_eq!(arr.capacity(), 2);
    /// ```
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now outside `[0, len)`.
        Some(unsafe { self.data.ptr_at(self.len).read() })
    }

    /// Removes and drops the element at `index`, shifting everything after
    /// it one slot to the left. Returns `index`, which now refers to the
    /// element that followed the erased one (or to the end).
    ///
    /// Never reallocates. The array is already consistent when the erased
    /// element is dropped, so a panicking `Drop` cannot corrupt it.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`, which includes every call on an empty array.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::dyn_array;
    ///
    /// let mut arr = dyn_array![1, 2, 3];
    /// assert_eq!(arr.erase(1), 1);
    /// assert_eq!(arr, [1, 3]);
    /// assert_eq!(arr[1], 3);
    /// ```
    #[track_caller]
    pub fn erase(&mut self, index: usize) -> usize {
        let len = self.len;
        assert!(
            index < len,
            "erase index (is {index}) should be < len (is {len})"
        );

        // SAFETY: `index < len`; the erased value is read out before its slot
        // is overwritten by the shift, and `len` shrinks before it is dropped.
        let erased = unsafe {
            let at = self.data.ptr_at_mut(index);
            let erased = at.read();
            ptr::copy(at.add(1), at, len - index - 1);
            erased
        };
        self.len = len - 1;
        drop(erased);

        index
    }

    /// Drops the elements from `len` onward. Does nothing if `len` is not
    /// less than the current length. The capacity is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::dyn_array;
    ///
    /// let mut arr = dyn_array![1, 2, 3, 4];
    /// arr.truncate(1);
    /// assert_eq!(arr, [1]);
    /// assert_eq!(arr.capacity(), 4);
    /// ```
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(self.data.ptr_at_mut(len), self.len - len);
        // Shrink first: if a `Drop` panics, the rest of the tail is still
        // dropped by `drop_in_place` and nothing is dropped twice.
        self.len = len;
        // SAFETY: `tail` was the initialized range `[len, old_len)`.
        unsafe {
            ptr::drop_in_place(tail);
        }
    }

    /// Drops every element. The capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::DynArray;
    use std::rc::Rc;

    #[test]
    fn erase_shifts_and_drops() {
        let probe = Rc::new(());
        let mut arr = DynArray::new();
        for _ in 0..4 {
            arr.push_back(Rc::clone(&probe));
        }
        assert_eq!(Rc::strong_count(&probe), 5);

        assert_eq!(arr.erase(3), 3);
        assert_eq!(arr.erase(0), 0);
        assert_eq!(arr.len(), 2);
        assert_eq!(Rc::strong_count(&probe), 3);
    }

    #[test]
    fn erase_keeps_order() {
        let mut arr = DynArray::from([10, 20, 30, 40]);
        arr.erase(1);
        assert_eq!(arr, [10, 30, 40]);
        arr.erase(2);
        assert_eq!(arr, [10, 30]);
    }

    #[test]
    #[should_panic(expected = "erase index (is 0) should be < len (is 0)")]
    fn erase_on_empty() {
        let mut arr: DynArray<i32> = DynArray::new();
        arr.erase(0);
    }

    #[test]
    fn truncate_and_clear_drop_tail() {
        let probe = Rc::new(());
        let mut arr = DynArray::from_elem(Rc::clone(&probe), 6);
        assert_eq!(Rc::strong_count(&probe), 7);

        arr.truncate(10);
        assert_eq!(Rc::strong_count(&probe), 7);

        arr.truncate(4);
        assert_eq!(Rc::strong_count(&probe), 5);

        arr.clear();
        assert!(arr.is_empty());
        assert_eq!(arr.capacity(), 6);
        assert_eq!(Rc::strong_count(&probe), 1);
    }

    #[test]
    fn pop_back_on_empty_is_noop() {
        let mut arr: DynArray<u8> = DynArray::with_capacity(2);
        assert_eq!(arr.pop_back(), None);
        assert_eq!(arr.capacity(), 2);
    }
}
