use crate::error::TryReserveError;
use crate::linear_list::{Cursor, CursorMut};
use crate::raw::{Allocator, Global, RawArray};

use std::cmp::min;
use std::fmt;
use std::iter::FusedIterator;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr::{self, NonNull};
use std::slice::SliceIndex;

/// A growable array of `T` in one contiguous block, built on a pluggable
/// [`Allocator`].
///
/// Slots `[0, len)` hold live values, slots `[len, capacity)` are allocated
/// but empty. An array with no capacity owns no memory at all.
///
/// When a push finds the array full the capacity becomes
/// `max(1, 2 * capacity)`. Explicit [`reserve`](Self::reserve),
/// [`resize`](Self::resize) and construction allocate exactly what they are
/// asked for.
///
/// Indexing is checked and panics when out of range. `front`, `back` and
/// their `_mut` forms return `None` on an empty array. The unchecked path is
/// the `unsafe` [`get_unchecked`](slice::get_unchecked) of the slice this
/// array derefs to.
pub struct DynamicArray<T, A: Allocator = Global> {
    pub(crate) raw: RawArray<T, A>,
    pub(crate) len: usize,
    // invariant: len <= raw.cap
}

impl<T> DynamicArray<T> {
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// `len` default values, with capacity `len`.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::with_len_in(len, Global)
    }

    /// `n` clones of `elem`, with capacity `n`.
    pub fn from_elem(elem: T, n: usize) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(elem, n, Global)
    }
}

impl<T, A: Allocator> DynamicArray<T, A> {
    pub const fn new_in(alloc: A) -> Self {
        Self {
            raw: RawArray::new_in(alloc),
            len: 0,
        }
    }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        Self {
            raw: RawArray::with_capacity_in(capacity, alloc),
            len: 0,
        }
    }

    pub fn with_len_in(len: usize, alloc: A) -> Self
    where
        T: Default,
    {
        let mut array = Self::with_capacity_in(len, alloc);
        for _ in 0..len {
            unsafe { array.push_unchecked(T::default()) };
        }
        array
    }

    pub fn from_elem_in(elem: T, n: usize, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut array = Self::with_capacity_in(n, alloc);
        for _ in 0..n {
            unsafe { array.push_unchecked(elem.clone()) };
        }
        array
    }

    /// Builds an array holding the items of `iter` in order, with capacity
    /// equal to the reported length.
    pub fn from_iter_in<I>(iter: I, alloc: A) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let mut array = Self::with_capacity_in(iter.len(), alloc);
        for elem in iter {
            array.push_back(elem);
        }
        array
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.raw.cap
    }

    pub fn allocator(&self) -> &A {
        self.raw.allocator()
    }

    pub fn as_slice(&self) -> &[T] {
        unsafe { self.raw.as_slice(self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { self.raw.as_slice_mut(self.len) }
    }

    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Appends `elem`, doubling the capacity first when the array is full.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows; aborts through
    /// [`handle_alloc_error`](std::alloc::handle_alloc_error) if the
    /// allocator fails.
    pub fn push_back(&mut self, elem: T) {
        if self.len == self.raw.cap {
            if let Err(err) = self.grow_one() {
                err.handle()
            }
        }
        unsafe { self.push_unchecked(elem) }
    }

    /// Like [`push_back`](Self::push_back) but reports growth failure.
    /// On error `elem` is dropped and the array is unchanged.
    pub fn try_push_back(&mut self, elem: T) -> Result<(), TryReserveError> {
        if self.len == self.raw.cap {
            self.grow_one()?;
        }
        unsafe { self.push_unchecked(elem) };
        Ok(())
    }

    /// Removes the last element. An empty array is left as it is.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        Some(unsafe { self.raw.offset(self.len).read() })
    }

    /// Destroys every element past `len`. Capacity is kept.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = self.len - len;
        self.len = len;
        unsafe { self.destroy_range(len, tail) }
    }

    /// Destroys every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0)
    }

    /// Grows the block to exactly `new_capacity` slots. Does nothing when
    /// the capacity is already large enough.
    ///
    /// Every cursor into the array must be gone before this is called.
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_reserve(new_capacity) {
            err.handle()
        }
    }

    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        if new_capacity <= self.raw.cap {
            return Ok(());
        }
        unsafe { self.raw.reallocate(new_capacity, self.len) }
    }

    /// Sets the length to `new_len`, filling new slots with values from `f`.
    /// Growth reserves exactly `new_len` slots.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }

        self.reserve(new_len);
        while self.len < new_len {
            unsafe { self.push_unchecked(f()) };
        }
    }

    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone())
    }

    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Drops spare capacity. An empty array gives its block back entirely.
    pub fn shrink_to_fit(&mut self) {
        if self.raw.cap <= self.len {
            return;
        }
        if let Err(err) = unsafe { self.raw.reallocate(self.len, self.len) } {
            err.handle()
        }
    }

    /// Exchanges buffers, lengths, capacities and allocators.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    /// Moves the whole state out, leaving `self` unallocated with a clone of
    /// its allocator.
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let alloc = self.raw.alloc.clone();
        mem::replace(self, Self::new_in(alloc))
    }

    /// Releases the current contents and takes over those of `other`, which
    /// ends up unallocated.
    pub fn move_assign(&mut self, other: &mut Self) {
        self.clear();
        self.shrink_to_fit();
        self.swap(other);
    }

    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len)
    }

    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), index)
    }

    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.as_mut_slice(), 0)
    }

    pub fn cursor_mut_at(&mut self, index: usize) -> CursorMut<'_, T> {
        CursorMut::new(self.as_mut_slice(), index)
    }

    fn grow_one(&mut self) -> Result<(), TryReserveError> {
        let new_cap = if self.raw.cap == 0 {
            1
        } else {
            self.raw.cap.checked_mul(2).ok_or(TryReserveError::CapacityOverflow)?
        };
        self.try_reserve(new_cap)
    }

    /// # Safety
    ///
    /// `self.len < self.raw.cap`.
    unsafe fn push_unchecked(&mut self, elem: T) {
        let slot = NonNull::new_unchecked(self.raw.offset(self.len));
        self.raw.alloc.construct(slot, elem);
        self.len += 1;
    }

    /// # Safety
    ///
    /// `[start, start + count)` must be live slots that nothing reads again.
    unsafe fn destroy_range(&mut self, start: usize, count: usize) {
        let run = ptr::slice_from_raw_parts_mut(self.raw.offset(start), count);
        self.raw.alloc.destroy(NonNull::new_unchecked(run));
    }
}

impl<T, A: Allocator> Drop for DynamicArray<T, A> {
    fn drop(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        unsafe { self.destroy_range(0, len) }
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for DynamicArray<T, A> {
    fn clone(&self) -> Self {
        let mut array = Self::with_capacity_in(self.len, self.raw.alloc.clone());
        for elem in self.iter() {
            unsafe { array.push_unchecked(elem.clone()) };
        }
        array
    }

    fn clone_from(&mut self, source: &Self) {
        if self.raw.cap < source.len {
            self.clear();
            unsafe { self.raw.dealloc() };
            self.reserve(source.len);
            for elem in source.iter() {
                unsafe { self.push_unchecked(elem.clone()) };
            }
            return;
        }

        let overlap = min(self.len, source.len);
        self.as_mut_slice()[..overlap].clone_from_slice(&source[..overlap]);
        if source.len < self.len {
            self.truncate(source.len);
        } else {
            for elem in &source[overlap..] {
                unsafe { self.push_unchecked(elem.clone()) };
            }
        }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> Deref for DynamicArray<T, A> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for DynamicArray<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator> Index<I> for DynamicArray<T, A> {
    type Output = I::Output;
    fn index(&self, index: I) -> &I::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator> IndexMut<I> for DynamicArray<T, A> {
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for DynamicArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, A1: Allocator, A2: Allocator> PartialEq<DynamicArray<T, A2>> for DynamicArray<T, A1> {
    fn eq(&self, other: &DynamicArray<T, A2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, A: Allocator, const N: usize> PartialEq<[T; N]> for DynamicArray<T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, A: Allocator> PartialEq<[T]> for DynamicArray<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Eq, A: Allocator> Eq for DynamicArray<T, A> {}

impl<T, A: Allocator> Extend<T> for DynamicArray<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push_back(elem);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut array = Self::with_capacity(iter.size_hint().0);
        array.extend(iter);
        array
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(items: [T; N]) -> Self {
        Self::from_iter_in(items, Global)
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(items: &[T]) -> Self {
        Self::from_iter_in(items.iter().cloned(), Global)
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_iter_in(items, Global)
    }
}

impl<T, A: Allocator> From<DynamicArray<T, A>> for Vec<T> {
    fn from(array: DynamicArray<T, A>) -> Self {
        array.into_iter().collect()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a DynamicArray<T, A> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut DynamicArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// ----------------------------------------
// begin: IntoIter
pub struct IntoIter<T, A: Allocator = Global> {
    raw: RawArray<T, A>,
    head: usize,
    tail: usize,
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let count = self.tail - self.head;
        unsafe {
            let run = ptr::slice_from_raw_parts_mut(self.raw.offset(self.head), count);
            self.raw.alloc.destroy(NonNull::new_unchecked(run));
        }
    }
}

impl<T, A: Allocator> IntoIterator for DynamicArray<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;
    fn into_iter(self) -> IntoIter<T, A> {
        let this = ManuallyDrop::new(self);
        let raw = unsafe { ptr::read(&this.raw) };

        IntoIter {
            raw,
            head: 0,
            tail: this.len,
        }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        let elem = unsafe { self.raw.offset(self.head).read() };
        self.head += 1;
        Some(elem)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tail - self.head;
        (len, Some(len))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        Some(unsafe { self.raw.offset(self.tail).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

// end: IntoIter
// ----------------------------------------
