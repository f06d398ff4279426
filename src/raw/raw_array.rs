use crate::error::TryReserveError;
use crate::raw::{Allocator, Global};

use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem::{self, size_of};
use std::ptr::NonNull;

/// An owned block of `cap` slots of `T` that are allocated but not
/// constructed.
///
/// `RawArray` knows nothing about which slots are live. Its owner tracks
/// that and destroys the values before the block goes away; dropping a
/// `RawArray` only releases the memory.
pub struct RawArray<T, A: Allocator = Global> {
    pub(crate) ptr: Option<NonNull<T>>,
    pub(crate) cap: usize,
    pub(crate) alloc: A,
    _marker: PhantomData<T>,
}

// invariant: ptr.is_none() == (cap == 0)

unsafe impl<T: Send, A: Allocator + Send> Send for RawArray<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawArray<T, A> {}

impl<T> RawArray<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }
}

impl<T, A: Allocator> RawArray<T, A> {
    pub const fn new_in(alloc: A) -> Self {
        Self {
            ptr: None,
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        match Self::try_with_capacity_in(capacity, alloc) {
            Ok(raw) => raw,
            Err(err) => err.handle(),
        }
    }

    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, TryReserveError> {
        let mut raw = Self::new_in(alloc);
        if capacity != 0 {
            raw.ptr = Some(raw.allocate_block(capacity)?);
            raw.cap = capacity;
        }
        Ok(raw)
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Base pointer of the block, dangling when nothing is allocated.
    pub fn as_ptr(&self) -> *mut T {
        match self.ptr {
            Some(ptr) => ptr.as_ptr(),
            None => NonNull::dangling().as_ptr(),
        }
    }

    /// # Safety
    ///
    /// `index <= self.cap`.
    pub unsafe fn offset(&self, index: usize) -> *mut T {
        self.as_ptr().add(index)
    }

    /// # Safety
    ///
    /// The first `len` slots must be live.
    pub unsafe fn as_slice(&self, len: usize) -> &[T] {
        std::slice::from_raw_parts(self.as_ptr(), len)
    }

    /// # Safety
    ///
    /// The first `len` slots must be live.
    pub unsafe fn as_slice_mut(&mut self, len: usize) -> &mut [T] {
        std::slice::from_raw_parts_mut(self.as_ptr(), len)
    }

    /// Moves the block to a new allocation of exactly `new_cap` slots,
    /// carrying the first `len` values over. `new_cap == 0` releases the
    /// block.
    ///
    /// The new block is obtained before the old one is touched, so on error
    /// `self` is unchanged.
    ///
    /// # Safety
    ///
    /// The first `len` slots must be live and `len <= new_cap`.
    pub unsafe fn reallocate(&mut self, new_cap: usize, len: usize) -> Result<(), TryReserveError> {
        debug_assert!(len <= self.cap && len <= new_cap);

        if new_cap == 0 {
            self.dealloc();
            return Ok(());
        }

        let new_ptr = self.allocate_block(new_cap)?;
        std::ptr::copy_nonoverlapping(self.as_ptr(), new_ptr.as_ptr(), len);

        #[cfg(feature = "tracing")]
        tracing::trace!(old_cap = self.cap, new_cap, moved = len, "reallocating raw array");

        self.dealloc();
        self.ptr = Some(new_ptr);
        self.cap = new_cap;
        Ok(())
    }

    /// Releases the block and returns to the unallocated state.
    ///
    /// # Safety
    ///
    /// No slot may be live, or the values are leaked without being dropped.
    pub unsafe fn dealloc(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            if let Some(layout) = Self::layout_for(self.cap) {
                if layout.size() != 0 {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(cap = self.cap, "releasing raw array");

                    self.alloc.deallocate(ptr.cast(), layout);
                }
            }
        }
        self.cap = 0;
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    fn layout_for(capacity: usize) -> Option<Layout> {
        Layout::array::<T>(capacity).ok()
    }

    fn allocate_block(&self, capacity: usize) -> Result<NonNull<T>, TryReserveError> {
        let layout = Self::layout_for(capacity).ok_or(TryReserveError::CapacityOverflow)?;

        if size_of::<T>() == 0 {
            return Ok(NonNull::dangling());
        }

        let ptr = self.alloc.allocate(layout)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(cap = capacity, bytes = layout.size(), "allocated raw array");

        Ok(ptr.cast())
    }
}

impl<T, A: Allocator> Drop for RawArray<T, A> {
    fn drop(&mut self) {
        unsafe { self.dealloc() }
    }
}

#[cfg(test)]
mod test {
    use super::RawArray;
    use crate::error::TryReserveError;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_raw_array() {
        let raw = <RawArray<u32>>::with_capacity(0);
        assert!(!raw.is_allocated());
        assert_eq!(raw.capacity(), 0);

        let mut raw = <RawArray<String>>::with_capacity(2);
        assert!(raw.is_allocated());
        assert_eq!(raw.capacity(), 2);

        unsafe {
            raw.offset(0).write("a".to_owned());
            raw.offset(1).write("b".to_owned());

            raw.reallocate(5, 2).unwrap();
            assert_eq!(raw.capacity(), 5);
            assert_eq!(raw.as_slice(2), ["a", "b"]);

            raw.reallocate(2, 2).unwrap();
            assert_eq!(raw.capacity(), 2);
            assert_eq!(raw.as_slice(2), ["a", "b"]);

            std::ptr::drop_in_place(raw.as_slice_mut(2));
            raw.reallocate(0, 0).unwrap();
        }
        assert!(!raw.is_allocated());
        assert_eq!(raw.capacity(), 0);
    }

    #[test]
    fn test_zero_sized() {
        let mut raw = <RawArray<()>>::with_capacity(8);
        assert!(raw.is_allocated());
        assert_eq!(raw.capacity(), 8);

        unsafe { raw.reallocate(16, 0).unwrap() };
        assert_eq!(raw.capacity(), 16);
    }

    #[test]
    fn test_overflow() {
        let res = <RawArray<u64>>::try_with_capacity_in(usize::MAX, crate::Global);
        assert_eq!(res.err(), Some(TryReserveError::CapacityOverflow));
    }

    #[test]
    fn test_swap() {
        let mut a = <RawArray<u8>>::with_capacity(3);
        let mut b = <RawArray<u8>>::with_capacity(0);
        a.swap(&mut b);
        assert_eq!(a.capacity(), 0);
        assert!(!a.is_allocated());
        assert_eq!(b.capacity(), 3);
    }
}
