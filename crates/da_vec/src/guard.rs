// -----------------------------------------------------------------------------
// SetLenOnDrop

/// Writes a locally tracked length back into the array when dropped.
///
/// Used while constructing elements into the spare tail one at a time: if a
/// constructor panics, the array's length still covers exactly the elements
/// that were finished, so the unwinding drop neither leaks nor double drops.
pub(crate) struct SetLenOnDrop<'a> {
    len: &'a mut usize,
    local_len: usize,
}

impl<'a> SetLenOnDrop<'a> {
    #[inline(always)]
    pub(crate) fn new(len: &'a mut usize) -> Self {
        let local_len = *len;
        Self { len, local_len }
    }

    #[inline(always)]
    pub(crate) const fn current(&self) -> usize {
        self.local_len
    }

    #[inline(always)]
    pub(crate) const fn increment(&mut self) {
        self.local_len += 1;
    }
}

impl Drop for SetLenOnDrop<'_> {
    #[inline(always)]
    fn drop(&mut self) {
        *self.len = self.local_len;
    }
}

// -----------------------------------------------------------------------------
// Tests
