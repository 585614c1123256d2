#![doc = include_str!("../docs/lib-docs.md")]

mod cap;
pub mod error;
pub mod iter;
mod macros;
mod raw;

use {
    crate::{
        cap::Cap,
        error::{OutOfBounds, TryReserveError},
        iter::{Iter, IterMut},
        raw::RawGrowVec,
    },
    std::{
        alloc::handle_alloc_error,
        borrow::Borrow,
        cmp, fmt,
        hash::{Hash, Hasher},
        mem::ManuallyDrop,
        ops,
        ptr,
        slice::SliceIndex,
    },
};

#[doc = include_str!("../docs/growvec.md")]
pub struct GrowVec<T> {
    buf: RawGrowVec<T>,
    len: usize,
}

/// # Safety:
/// A [`GrowVec<T>`] exclusively owns its block and the `T`s in it, so it is
/// safe to transfer between threads whenever `T` is.
unsafe impl<T: Send> Send for GrowVec<T> {}
/// # Safety:
/// There is no interior mutability; shared access only ever hands out `&T`.
unsafe impl<T: Sync> Sync for GrowVec<T> {}

impl<T> GrowVec<T> {
    /// Constructs a new, empty [`GrowVec<T>`] without allocating.
    ///
    /// # Examples
    /// ```
    /// use growvec::GrowVec;
    ///
    /// let empty: GrowVec<u32> = GrowVec::new();
    /// assert_eq!(empty.capacity(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: RawGrowVec::DANGLING,
            len: 0,
        }
    }

    /// Constructs a new [`GrowVec<T>`] with room for `capacity` elements,
    /// returning an error if the allocation fails.
    ///
    /// # Errors
    /// Returns an error if:
    /// * `capacity * size_of::<T>` overflows [`isize::MAX`]
    /// * memory is exhausted
    ///
    /// # Examples
    /// ```
    /// use growvec::GrowVec;
    ///
    /// let staging: GrowVec<u32> = GrowVec::try_with_capacity(10).unwrap();
    /// assert_eq!(staging.capacity(), 10);
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let Some(cap) = Cap::new::<T>(capacity) else {
            return Err(TryReserveError::CapacityOverflow);
        };
        let buf = RawGrowVec::try_with_capacity(cap)?;

        Ok(Self { buf, len: 0 })
    }

    /// Constructs a new [`GrowVec<T>`] with room for `capacity` elements.
    ///
    /// # Panics
    /// Panics if `capacity * size_of::<T>` overflows [`isize::MAX`], and
    /// aborts if memory is exhausted.
    ///
    /// # Examples
    /// ```
    /// use growvec::GrowVec;
    ///
    /// let staging: GrowVec<String> = GrowVec::with_capacity(10);
    /// ```
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = Cap::new::<T>(capacity)
            .unwrap_or_else(|| panic!("{}", TryReserveError::CapacityOverflow));
        let buf = RawGrowVec::with_capacity(cap);

        Self { buf, len: 0 }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }
    #[inline]
    #[must_use]
    pub const fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }
    #[inline]
    #[must_use]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY:
        // * `self.as_ptr()` is never null, and valid for reads up to
        //   `self.len` if we can have a reference to `self` (which we do)
        // * the entire block of memory is within a single allocation
        // * the first `self.len` elements are correctly initialized.
        // * `capacity * size_of::<T>()` doesn't overflow `isize::MAX`, so
        //   neither does `self.len * size_of::<T>()`
        unsafe { std::slice::from_raw_parts(self.as_ptr(), self.len) }
    }
    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: see `as_slice`; the `&mut self` makes the access unique.
        unsafe {
            std::slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len)
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] when `index >= self.len()`; the container is
    /// left untouched and remains fully usable.
    ///
    /// # Examples
    /// ```
    /// use growvec::growvec;
    ///
    /// let primes = growvec![2, 3, 5];
    /// assert_eq!(primes.get(1), Ok(&3));
    /// assert!(primes.get(3).is_err());
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T, OutOfBounds> {
        let len = self.len;
        self.as_slice().get(index).ok_or(OutOfBounds { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] when `index >= self.len()`; the container is
    /// left untouched and remains fully usable.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfBounds> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfBounds { index, len })
    }

    /// Appends `value` to the back of the container, growing the block when
    /// it is full.
    ///
    /// Growth doubles the capacity (one slot when starting from zero) and
    /// relocates the existing elements by move, so the amortized cost over
    /// a run of appends is O(1).
    ///
    /// # Panics
    /// Panics if the doubled capacity overflows [`isize::MAX`] bytes, and
    /// aborts if memory is exhausted. The container is unchanged in either
    /// case.
    ///
    /// # Examples
    /// ```
    /// use growvec::GrowVec;
    ///
    /// let mut squares = GrowVec::new();
    /// squares.push(1);
    /// squares.push(4);
    /// squares.push(9);
    /// assert_eq!(squares, [1, 4, 9]);
    /// ```
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow();
        }
        // SAFETY: `len < capacity` after the growth step, so slot `len`
        // exists and is vacant.
        unsafe {
            self.as_mut_ptr().add(self.len).write(value);
        }
        self.len += 1;
    }

    /// Removes the element at `index` and returns it, shifting every
    /// element behind it one slot toward the front.
    ///
    /// Capacity is unchanged. Costs O(`len` − `index`).
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] when `index >= self.len()`; the container is
    /// left untouched.
    ///
    /// # Examples
    /// ```
    /// use growvec::growvec;
    ///
    /// let mut letters = growvec!['a', 'b', 'c'];
    /// assert_eq!(letters.remove(1), Ok('b'));
    /// assert_eq!(letters, ['a', 'c']);
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T, OutOfBounds> {
        if index >= self.len {
            return Err(OutOfBounds {
                index,
                len: self.len,
            });
        }
        let ptr = self.as_mut_ptr();
        // SAFETY: `index < len`, so the slot is initialized. The tail shift
        // moves `[index + 1, len)` down one slot; the duplicated last slot
        // is never observed again once `len` is decremented.
        let value = unsafe {
            let value = ptr::read(ptr.add(index));
            ptr::copy(ptr.add(index + 1), ptr.add(index), self.len - index - 1);
            value
        };
        self.len -= 1;
        Ok(value)
    }

    /// Grows the block to hold at least `new_capacity` elements, returning
    /// an error if the allocation fails.
    ///
    /// No-op when `new_capacity <= self.capacity()`. Note that this takes
    /// the requested *total* capacity, not an element count to add on top
    /// of the current length.
    ///
    /// # Errors
    /// Returns an error if:
    /// * `new_capacity * size_of::<T>` overflows [`isize::MAX`]
    /// * memory is exhausted
    ///
    /// The container is unchanged on error.
    pub fn try_reserve(
        &mut self,
        new_capacity: usize,
    ) -> Result<(), TryReserveError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        let Some(cap) = Cap::new::<T>(new_capacity) else {
            return Err(TryReserveError::CapacityOverflow);
        };
        self.try_relocate(cap)
    }

    /// Grows the block to hold at least `new_capacity` elements.
    ///
    /// No-op when `new_capacity <= self.capacity()`. Note that this takes
    /// the requested *total* capacity, not an element count to add on top
    /// of the current length.
    ///
    /// # Panics
    /// Panics if `new_capacity * size_of::<T>` overflows [`isize::MAX`]
    /// bytes, and aborts if memory is exhausted.
    ///
    /// # Examples
    /// ```
    /// use growvec::GrowVec;
    ///
    /// let mut staging: GrowVec<u8> = GrowVec::new();
    /// staging.reserve(100);
    /// assert_eq!(staging.capacity(), 100);
    /// assert_eq!(staging.len(), 0);
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) {
        match self.try_reserve(new_capacity) {
            Ok(()) => {}
            Err(e @ TryReserveError::CapacityOverflow) => panic!("{e}"),
            Err(TryReserveError::AllocError(layout)) => {
                handle_alloc_error(layout)
            }
        }
    }

    /// Drops every element, keeping the block and its capacity.
    ///
    /// # Examples
    /// ```
    /// use growvec::growvec;
    ///
    /// let mut tags = growvec![4, ["a", "b"]];
    /// tags.clear();
    /// assert!(tags.is_empty());
    /// assert_eq!(tags.capacity(), 4);
    /// ```
    pub fn clear(&mut self) {
        let vacated: *mut [T] = self.as_mut_slice();
        // `len` goes to zero before the drops so a panicking `Drop` impl
        // cannot leave dropped elements observable.
        self.len = 0;
        // SAFETY: the slots held exactly the initialized elements, which
        // are logically absent from this point on.
        unsafe {
            ptr::drop_in_place(vacated);
        }
    }

    /// Drops every element and releases the block, returning the container
    /// to its default-constructed state.
    ///
    /// # Examples
    /// ```
    /// use growvec::growvec;
    ///
    /// let mut tags = growvec!["a", "b"];
    /// tags.reset();
    /// assert_eq!((tags.len(), tags.capacity()), (0, 0));
    /// ```
    pub fn reset(&mut self) {
        self.clear();
        // old block is released by the replaced `RawGrowVec`
        self.buf = RawGrowVec::DANGLING;
    }

    /// Relocates the elements into a block sized exactly to the length and
    /// releases the old one. No-op when length and capacity already match.
    ///
    /// # Examples
    /// ```
    /// use growvec::GrowVec;
    ///
    /// let mut samples: GrowVec<u32> = GrowVec::with_capacity(100);
    /// samples.push(1);
    /// samples.push(2);
    /// samples.shrink_to_fit();
    /// assert_eq!(samples.capacity(), 2);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        if self.len == self.buf.capacity() {
            return;
        }
        // SAFETY: `len` elements fit the current, larger block, so `len`
        // satisfies the `Cap` invariant as a capacity of its own.
        let cap = unsafe { Cap::new_unchecked::<T>(self.len) };
        self.relocate(cap);
    }

    /// Returns a cursor over the elements, front to back.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
    /// Returns a mutating cursor over the elements, front to back.
    #[inline]
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Replaces the block with one of capacity `cap`, relocating the `len`
    /// initialized elements by move.
    fn try_relocate(&mut self, cap: Cap) -> Result<(), TryReserveError> {
        let new_buf = RawGrowVec::try_with_capacity(cap)?;
        // SAFETY: the blocks are distinct allocations each sized for at
        // least `len` elements. The old slots are given up without being
        // dropped, which transfers ownership of every element to the new
        // block (`RawGrowVec` never drops elements, only the allocation).
        unsafe {
            ptr::copy_nonoverlapping(
                self.buf.as_ptr(),
                new_buf.as_mut_ptr(),
                self.len,
            );
        }
        // old block is released here
        self.buf = new_buf;
        Ok(())
    }

    fn relocate(&mut self, cap: Cap) {
        match self.try_relocate(cap) {
            Ok(()) => {}
            Err(e @ TryReserveError::CapacityOverflow) => panic!("{e}"),
            Err(TryReserveError::AllocError(layout)) => {
                handle_alloc_error(layout)
            }
        }
    }

    #[cold]
    fn grow(&mut self) {
        // ZSTs report a capacity of `usize::MAX`, so reaching this point
        // means `len` itself has run out.
        let cap = if size_of::<T>() == 0 {
            None
        } else {
            Cap::new::<T>(cmp::max(1, self.buf.capacity().saturating_mul(2)))
        };
        let Some(cap) = cap else {
            panic!("{}", TryReserveError::CapacityOverflow);
        };
        self.relocate(cap);
    }
}

impl<T> Drop for GrowVec<T> {
    fn drop(&mut self) {
        // SAFETY: exactly the first `len` slots are initialized; the block
        // itself is released by `buf` right after.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_mut_ptr(),
                self.len,
            ));
        }
    }
}

impl<T: Clone> Clone for GrowVec<T> {
    /// Duplicates the container element by element into a fresh block sized
    /// to the source's capacity. The two containers are fully independent
    /// afterwards.
    fn clone(&self) -> Self {
        let mut clone = Self::with_capacity(self.capacity());
        for value in self {
            clone.push(value.clone());
        }
        clone
    }
    /// Replaces `self`'s contents with a duplicate of `source`'s, reusing
    /// the existing block when its capacity suffices.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.reserve(source.len());
        for value in source {
            self.push(value.clone());
        }
    }
}

impl<T> ops::Deref for GrowVec<T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T> ops::DerefMut for GrowVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}
impl<T> Borrow<[T]> for GrowVec<T> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T> AsRef<[T]> for GrowVec<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T> AsMut<[T]> for GrowVec<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I> ops::Index<I> for GrowVec<T>
where
    I: SliceIndex<[T]>,
{
    type Output = <I as SliceIndex<[T]>>::Output;
    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        ops::Index::index(&**self, index)
    }
}
impl<T, I> ops::IndexMut<I> for GrowVec<T>
where
    I: SliceIndex<[T]>,
{
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        ops::IndexMut::index_mut(&mut **self, index)
    }
}
impl<T> Default for GrowVec<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for GrowVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (low, _) = iter.size_hint();
        self.reserve(self.len.saturating_add(low));
        for value in iter {
            self.push(value);
        }
    }
}
impl<T> FromIterator<T> for GrowVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

// ------------------------------- fmt impl -------------------------------

impl<T: fmt::Debug> fmt::Debug for GrowVec<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
/// Renders the elements in index order, comma-and-space separated and
/// bracket-enclosed; an empty container renders as `[]`.
impl<T: fmt::Display> fmt::Display for GrowVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut values = self.iter();
        if let Some(first) = values.next() {
            write!(f, "{first}")?;
            for value in values {
                write!(f, ", {value}")?;
            }
        }
        f.write_str("]")
    }
}

// ----------------------------- From impl -----------------------------

impl<T> From<Vec<T>> for GrowVec<T> {
    #[inline]
    fn from(value: Vec<T>) -> Self {
        let mut value = ManuallyDrop::new(value);
        let (ptr, len, cap) =
            (value.as_mut_ptr(), value.len(), value.capacity());
        Self {
            // SAFETY: the parts come from a live `Vec`, whose block is
            // allocated with the global allocator under the exact
            // `Layout::array::<T>(cap)` and respects the `isize::MAX`
            // limit. `value` is never dropped, so ownership transfers
            // wholesale.
            buf: unsafe {
                RawGrowVec::from_raw(ptr, Cap::new_unchecked::<T>(cap))
            },
            len,
        }
    }
}
impl<T> From<GrowVec<T>> for Vec<T> {
    #[inline]
    fn from(value: GrowVec<T>) -> Self {
        let this = ManuallyDrop::new(value);
        // SAFETY: the block was allocated with the global allocator under
        // `Layout::array::<T>(capacity)` and holds `len` initialized
        // elements. `this` is never dropped, so ownership transfers
        // wholesale.
        unsafe {
            Vec::from_raw_parts(
                this.buf.as_mut_ptr(),
                this.len,
                this.buf.capacity(),
            )
        }
    }
}

// ----------------------------- PartialEq impl -----------------------------

impl<T, U> PartialEq<GrowVec<U>> for GrowVec<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, rhs: &GrowVec<U>) -> bool {
        PartialEq::eq(&**self, &**rhs)
    }
}
impl<T, U> PartialEq<[U]> for GrowVec<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, rhs: &[U]) -> bool {
        PartialEq::eq(&**self, rhs)
    }
}
impl<T, U> PartialEq<GrowVec<U>> for [T]
where
    T: PartialEq<U>,
{
    fn eq(&self, rhs: &GrowVec<U>) -> bool {
        PartialEq::eq(self, &**rhs)
    }
}
impl<T, U> PartialEq<&[U]> for GrowVec<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, rhs: &&[U]) -> bool {
        PartialEq::eq(&**self, *rhs)
    }
}
impl<T, U> PartialEq<GrowVec<U>> for &[T]
where
    T: PartialEq<U>,
{
    fn eq(&self, rhs: &GrowVec<U>) -> bool {
        PartialEq::eq(*self, &**rhs)
    }
}
impl<T, U> PartialEq<&mut [U]> for GrowVec<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, rhs: &&mut [U]) -> bool {
        PartialEq::eq(&**self, *rhs)
    }
}
impl<T, U> PartialEq<GrowVec<U>> for &mut [T]
where
    T: PartialEq<U>,
{
    fn eq(&self, rhs: &GrowVec<U>) -> bool {
        PartialEq::eq(*self, &**rhs)
    }
}
impl<T, U, const N: usize> PartialEq<[U; N]> for GrowVec<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, rhs: &[U; N]) -> bool {
        PartialEq::eq(&**self, rhs)
    }
}
impl<T, U, const N: usize> PartialEq<GrowVec<U>> for [T; N]
where
    T: PartialEq<U>,
{
    fn eq(&self, rhs: &GrowVec<U>) -> bool {
        PartialEq::eq(self, &**rhs)
    }
}
impl<T, U> PartialEq<Vec<U>> for GrowVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, rhs: &Vec<U>) -> bool {
        PartialEq::eq(&**self, &**rhs)
    }
}

// ----------------------------- Eq and Hash impl -----------------------------

impl<T: Eq> Eq for GrowVec<T> {}
/// [`GrowVec`] implements [`Borrow<[T]>`], so we need to `hash` the
/// same way as the slice does.
impl<T: Hash> Hash for GrowVec<T> {
    /// [`GrowVec`] implements [`Borrow<[T]>`], so we need to `hash` the
    /// same way as the slice does.
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&**self, state);
    }
}
