use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::slice::{self, SliceIndex};

use super::DynArray;
use crate::IntoIter;

// -----------------------------------------------------------------------------
// Slice access

impl<T> Deref for DynArray<T> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for DynArray<T> {
    type Output = I::Output;

    #[inline(always)]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for DynArray<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {
    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

// -----------------------------------------------------------------------------
// Common traits

impl<T> Default for DynArray<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Hash> Hash for DynArray<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state);
    }
}

impl<T, U> PartialEq<DynArray<U>> for DynArray<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &DynArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U> PartialEq<[U]> for DynArray<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<&[U]> for DynArray<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for DynArray<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Eq> Eq for DynArray<T> {}

// -----------------------------------------------------------------------------
// Construction from other collections

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<T> Extend<T> for DynArray<T> {
    /// Appends every item, growing by the doubling policy.
    ///
    /// Room for the iterator's lower size bound is made up front, so an
    /// exact-size iterator reallocates at most once.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.try_reserve_amortized(lower).unwrap_or_else(|e| e.handle());
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> DynArray<T> {
    /// Builds an array of exactly `iter.len()` slots from `iter`.
    #[track_caller]
    fn from_exact<I: ExactSizeIterator<Item = T>>(iter: I) -> Self {
        let len = iter.len();
        let mut this = Self::with_capacity(len);
        // SAFETY: `take` caps the items at the capacity just allocated.
        unsafe {
            this.extend_trusted(iter.take(len));
        }
        this
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    /// Creates an array with capacity exactly `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::DynArray;
    ///
    /// let arr = DynArray::from(["a", "b"]);
    /// assert_eq!(arr.capacity(), 2);
    /// ```
    #[inline]
    fn from(array: [T; N]) -> Self {
        Self::from_exact(array.into_iter())
    }
}

impl<T: Clone> From<&[T]> for DynArray<T> {
    /// Creates an array of clones with capacity exactly `slice.len()`.
    #[inline]
    fn from(slice: &[T]) -> Self {
        Self::from_exact(slice.iter().cloned())
    }
}

impl<T> From<Vec<T>> for DynArray<T> {
    /// Moves the elements into a block of exactly `vec.len()` slots.
    #[inline]
    fn from(vec: Vec<T>) -> Self {
        Self::from_exact(vec.into_iter())
    }
}

impl<T> From<DynArray<T>> for Vec<T> {
    #[inline]
    fn from(array: DynArray<T>) -> Self {
        array.into_iter().collect()
    }
}

// -----------------------------------------------------------------------------
// Iteration

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the array, yielding its elements in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use da_vec::dyn_array;
    ///
    /// let words = dyn_array!["a".to_string(), "b".to_string()];
    /// let joined: String = words.into_iter().collect();
    /// assert_eq!(joined, "ab");
    /// ```
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let (data, len) = self.into_raw_parts();
        IntoIter::new(data, len)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::DynArray;
    use std::format;
    use std::vec::Vec;

    #[test]
    fn debug_matches_slice() {
        let arr = DynArray::from([1, 2, 3]);
        assert_eq!(format!("{arr:?}"), "[1, 2, 3]");
    }

    #[test]
    fn extend_grows_like_push_back() {
        let mut arr = DynArray::from([0u8]);
        arr.extend([1, 2, 3, 4]);
        assert_eq!(arr.capacity(), 5);
        assert_eq!(arr, [0, 1, 2, 3, 4]);

        arr.extend(&[5, 6]);
        assert_eq!(arr.capacity(), 10);
        assert_eq!(arr.len(), 7);

        let mut extended = DynArray::new();
        let mut pushed = DynArray::new();
        let mut seen = Vec::new();
        for i in 0..8 {
            extended.extend([i]);
            pushed.push_back(i);
            seen.push(extended.capacity());
            assert_eq!(extended.capacity(), pushed.capacity());
        }
        assert_eq!(seen, [1, 2, 4, 4, 8, 8, 8, 8]);
    }

    #[test]
    fn conversions_are_tight() {
        assert_eq!(DynArray::from([1, 2, 3]).capacity(), 3);
        assert_eq!(DynArray::from(&[1, 2, 3, 4][..]).capacity(), 4);
        assert_eq!(DynArray::from(Vec::from([1, 2])).capacity(), 2);
        assert_eq!(crate::dyn_array![1, 2, 3, 4, 5].capacity(), 5);

        let empty: DynArray<u8> = DynArray::from([]);
        assert_eq!(empty.capacity(), 0);
    }

    #[test]
    fn vec_round_trip() {
        let arr: DynArray<i32> = Vec::from([3, 1, 2]).into();
        assert_eq!(arr, [3, 1, 2]);

        let back: Vec<i32> = arr.into();
        assert_eq!(back, [3, 1, 2]);
    }

    #[test]
    fn slice_methods_through_deref() {
        let mut arr = DynArray::from([3, 1, 2]);
        arr.sort_unstable();
        assert_eq!(arr.first(), Some(&1));
        assert_eq!(&arr[1..], &[2, 3]);
        assert!(arr.contains(&3));
    }
}
