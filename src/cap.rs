//! Capacity abstraction to permit its invariants.

/// Representation of the `capacity`.
///
/// # Invariants
/// Inner value times `size_of::<T>()` must be <= [`isize::MAX`]
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct Cap(usize);
impl Cap {
    /// A `capacity` of zero (unallocated).
    pub(crate) const ZERO: Self = Self(0);

    /// Creates a new `capacity` without checking that the block it describes
    /// fits in [`isize::MAX`] bytes. The result is undefined if it does not.
    ///
    /// # Safety
    /// `cap * size_of::<T>()` must be <= [`isize::MAX`]
    #[inline]
    pub(crate) const unsafe fn new_unchecked<T>(cap: usize) -> Self {
        if size_of::<T>() == 0 { Self::ZERO } else { Self(cap) }
    }

    /// Creates a new `capacity` if `cap * size_of::<T>()` is <= [`isize::MAX`]
    ///
    /// if `T` is a ZST, this returns a capacity of zero.
    #[inline]
    pub(crate) const fn new<T>(cap: usize) -> Option<Self> {
        if size_of::<T>() == 0 {
            return Some(Self::ZERO);
        }
        match cap.checked_mul(size_of::<T>()) {
            // SAFETY: `cap` is in the correct range of values.
            Some(bytes) if bytes <= isize::MAX as usize => {
                Some(unsafe { Self::new_unchecked::<T>(cap) })
            }
            _ => None,
        }
    }
    /// Returns the `capacity` as a primitive value.
    #[inline]
    pub(crate) const fn get(self) -> usize {
        self.0
    }
}
