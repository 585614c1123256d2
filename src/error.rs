use {std::alloc::Layout, thiserror::Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TryReserveError {
    #[error("memory allocation failed because capacity exceeded maximum")]
    CapacityOverflow,
    #[error("memory allocation failed because allocator returned an error")]
    AllocError(Layout),
}
impl From<Layout> for TryReserveError {
    #[inline]
    fn from(e: Layout) -> Self {
        Self::AllocError(e)
    }
}

/// An index was outside the initialized range of a
/// [`GrowVec`](crate::GrowVec).
///
/// The container is left untouched by the failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("index {index} out of range for `GrowVec` of length {len}")]
pub struct OutOfBounds {
    /// The rejected index.
    pub index: usize,
    /// Length of the container at the time of the call.
    pub len: usize,
}
