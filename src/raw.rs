use {
    crate::{cap::Cap, error::TryReserveError},
    std::{
        alloc::{self, Layout, handle_alloc_error},
        marker::PhantomData,
        ptr::NonNull,
    },
};

/// Owned storage block of the [`GrowVec`](crate::GrowVec).
///
/// Knows its pointer and capacity only; the element count (and element
/// drops) are the container's concern. The block is released exactly once,
/// on drop.
pub(crate) struct RawGrowVec<T> {
    /// Pointer to the first byte of the buffer.
    ///
    /// Dangling (but well-aligned) when `cap` is zero.
    ptr: NonNull<u8>,
    /// Capacity of the buffer.
    ///
    /// Cannot exceed [`isize::MAX`] bytes once multiplied by `size_of::<T>()`
    cap: Cap,
    _marker: PhantomData<T>,
}

impl<T> RawGrowVec<T> {
    /// An unallocated buffer. Holds no block and never releases one.
    pub(crate) const DANGLING: Self = Self {
        ptr: NonNull::<T>::dangling().cast(),
        cap: Cap::ZERO,
        _marker: PhantomData,
    };

    /// Constructs a new [`RawGrowVec<T>`] with room for exactly `cap`
    /// elements, returning an error if the allocation fails.
    ///
    /// # Errors
    /// Returns an error if:
    /// * `cap * size_of::<T>` overflows `isize::MAX`
    /// * memory is exhausted
    pub(crate) fn try_with_capacity(cap: Cap) -> Result<Self, TryReserveError> {
        // `cap` for ZST is zero.
        if cap == Cap::ZERO {
            return Ok(Self::DANGLING);
        }

        let Ok(layout) = Layout::array::<T>(cap.get()) else {
            return Err(TryReserveError::CapacityOverflow);
        };

        // SAFETY: `cap` is nonzero and `T` is not a ZST (`Cap::new` maps
        // ZSTs to zero), so `layout` has a nonzero size.
        let block = unsafe { alloc::alloc(layout) };
        let Some(ptr) = NonNull::new(block) else {
            return Err(TryReserveError::AllocError(layout));
        };

        Ok(Self {
            ptr,
            cap,
            _marker: PhantomData,
        })
    }
    /// Constructs a new [`RawGrowVec<T>`] with room for exactly `cap`
    /// elements, aborting on allocation failure.
    #[inline]
    pub(crate) fn with_capacity(cap: Cap) -> Self {
        match Self::try_with_capacity(cap) {
            Ok(this) => this,
            Err(e @ TryReserveError::CapacityOverflow) => panic!("{e}"),
            Err(TryReserveError::AllocError(layout)) => {
                handle_alloc_error(layout)
            }
        }
    }
    /// Constructs a new [`RawGrowVec<T>`] directly from a pointer and a
    /// capacity.
    ///
    /// # Safety
    /// * `ptr` must be currently allocated with the global allocator
    ///   (or dangling, if `cap` is [`Cap::ZERO`]).
    /// * `T` needs to have the same alignment as what `ptr` was allocated
    ///   with.
    /// * `size_of::<T>() * cap` must be the same as the size the pointer was
    ///   allocated with.
    /// * the allocated size in bytes cannot exceed [`isize::MAX`]
    #[inline]
    #[must_use]
    pub(crate) unsafe fn from_raw(ptr: *mut T, cap: Cap) -> Self {
        Self {
            // SAFETY: the safety contract must be upheld by the caller.
            ptr: unsafe { NonNull::new_unchecked(ptr).cast() },
            cap,
            _marker: PhantomData,
        }
    }
    #[inline]
    pub(crate) const fn as_non_null(&self) -> NonNull<T> {
        self.ptr.cast()
    }
    #[inline]
    pub(crate) const fn as_mut_ptr(&self) -> *mut T {
        self.as_non_null().as_ptr()
    }
    #[inline]
    pub(crate) const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr() as _
    }
    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        if size_of::<T>() == 0 {
            usize::MAX
        } else {
            self.cap.get()
        }
    }
    #[inline]
    #[cfg(test)]
    pub(crate) const fn raw_cap(&self) -> Cap {
        self.cap
    }

    fn memory_layout(&self) -> Option<(NonNull<u8>, Layout)> {
        if self.cap == Cap::ZERO {
            None
        } else {
            // SAFETY:
            // * we allocated this chunk of memory so `unchecked_mul` and
            //   `size` rounded to the nearest power of two both cannot
            //   overflow `isize::MAX`.
            // * `align` is obtained through align_of so it is a power of two.
            unsafe {
                let size = size_of::<T>().unchecked_mul(self.cap.get());
                let layout =
                    Layout::from_size_align_unchecked(size, align_of::<T>());
                Some((self.ptr, layout))
            }
        }
    }
}

impl<T> Drop for RawGrowVec<T> {
    fn drop(&mut self) {
        if let Some((ptr, layout)) = self.memory_layout() {
            // SAFETY: we allocated this block of memory with this ptr and
            // this layout
            unsafe {
                alloc::dealloc(ptr.as_ptr(), layout);
            }
        }
    }
}
