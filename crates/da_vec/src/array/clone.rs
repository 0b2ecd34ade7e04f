use da_mem::AllocError;

use super::DynArray;

// -----------------------------------------------------------------------------
// Copy

impl<T: Clone> DynArray<T> {
    /// Deep-copies the array into a block of exactly `len` slots.
    ///
    /// If a `clone` panics, the copies made so far are dropped and the new
    /// block is released; `self` is never touched.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the block cannot be allocated.
    pub fn try_clone(&self) -> Result<Self, AllocError> {
        let mut copy = Self::try_with_capacity(self.len)?;
        // SAFETY: `len` items into a block of capacity `len`.
        unsafe {
            copy.extend_trusted(self.iter().cloned());
        }
        Ok(copy)
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// Deep-copies the array into a block of exactly `len` slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::DynArray;
    ///
    /// let mut a = DynArray::with_capacity(8);
    /// a.push_back(String::from("x"));
    ///
    /// let mut b = a.clone();
    /// assert_eq!(b.capacity(), 1);
    ///
    /// b[0].push('y');
    /// assert_eq!(a[0], "x");
    /// ```
    #[inline]
    #[track_caller]
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|e| e.handle())
    }

    /// Makes `self` an element-wise copy of `source`, reusing storage.
    ///
    /// If `source` has more elements than `self` has capacity, a full copy
    /// is built first and swapped in: a panic leaves `self` unchanged.
    ///
    /// Otherwise the copy happens in place: the shared prefix is assigned
    /// with `clone_from`, surplus elements of `self` are dropped, and missing
    /// ones are cloned into the spare tail. This path only keeps `self`
    /// valid if a `clone` panics: it may then hold a mix of old and new
    /// values, but nothing is leaked or dropped twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::dyn_array;
    ///
    /// let mut dst = dyn_array![0; 8];
    /// let ptr = dst.as_ptr();
    ///
    /// dst.clone_from(&dyn_array![1, 2, 3]);
    /// assert_eq!(dst, [1, 2, 3]);
    /// assert_eq!(dst.as_ptr(), ptr);
    /// ```
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.data.capacity() {
            let mut copy = source.clone();
            self.swap(&mut copy);
            return;
        }

        let shared = self.len.min(source.len);
        for (dst, src) in self.as_mut_slice()[..shared]
            .iter_mut()
            .zip(&source.as_slice()[..shared])
        {
            dst.clone_from(src);
        }

        self.truncate(source.len);

        // SAFETY: `source.len <= capacity`, so the missing elements fit.
        unsafe {
            self.extend_trusted(source.as_slice()[shared..].iter().cloned());
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
