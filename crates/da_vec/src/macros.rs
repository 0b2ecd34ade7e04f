/// Creates a [`DynArray`](crate::DynArray) containing the arguments.
///
/// - `dyn_array![]` creates an empty array without allocating.
/// - `dyn_array![elem; n]` holds `n` copies of `elem`, with capacity `n`.
/// - `dyn_array![a, b, c]` holds the listed values, with capacity equal to
///   their count.
///
/// # Examples
///
/// ```
/// use da_vec::{DynArray, dyn_array};
///
/// let empty: DynArray<u8> = dyn_array![];
/// assert_eq!(empty.capacity(), 0);
///
/// let zeros = dyn_array![0u8; 3];
/// assert_eq!(zeros, [0, 0, 0]);
///
/// let listed = dyn_array![1, 2, 3,];
/// assert_eq!(listed.capacity(), 3);
/// ```
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynArray::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynArray::from([$($x),+])
    };
}
