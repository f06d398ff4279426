//! Storage strategy used by [`RawArray`](super::RawArray) and
//! [`DynamicArray`](crate::DynamicArray).
//!
//! A strategy hands out raw storage and builds or tears down values inside
//! it. The containers never call `std::alloc` directly.

use crate::error::AllocError;

use std::alloc::Layout;
use std::ptr::{self, NonNull};

/// Raw allocation plus in-place construction and destruction.
///
/// # Safety
///
/// Implementors must return memory that is valid for reads and writes of
/// `layout.size()` bytes, aligned to `layout.align()`, and not aliased by any
/// other live allocation until it is passed back to `deallocate`.
pub unsafe trait Allocator {
    /// Obtains uninitialized storage for `layout`.
    ///
    /// Callers never pass a zero-size layout.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// # Safety
    ///
    /// `ptr` must come from `allocate` on this strategy (or a clone of it)
    /// with the same `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// # Safety
    ///
    /// `slot` must be valid for writes and hold no live value.
    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        slot.as_ptr().write(value)
    }

    /// # Safety
    ///
    /// `slot` must hold a live value which is not used again.
    unsafe fn destroy<T: ?Sized>(&self, slot: NonNull<T>) {
        ptr::drop_in_place(slot.as_ptr())
    }
}

unsafe impl<A: Allocator> Allocator for &A {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).deallocate(ptr, layout)
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        (**self).construct(slot, value)
    }

    unsafe fn destroy<T: ?Sized>(&self, slot: NonNull<T>) {
        (**self).destroy(slot)
    }
}

/// The process-wide allocator behind `std::alloc`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

unsafe impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0);
        let ptr = unsafe { std::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or(AllocError::new(layout))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        std::alloc::dealloc(ptr.as_ptr(), layout)
    }
}

#[cfg(test)]
mod test {
    use super::{Allocator, Global};

    use std::alloc::Layout;
    use std::cell::Cell;
    use std::ptr::NonNull;

    #[test]
    fn test_global_construct_destroy() {
        struct Probe<'a>(&'a Cell<u32>);

        impl Drop for Probe<'_> {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Cell::new(0);
        let layout = Layout::array::<Probe<'_>>(2).unwrap();
        let alloc = &Global;

        unsafe {
            let base = alloc.allocate(layout).unwrap().cast::<Probe<'_>>();
            let second = NonNull::new_unchecked(base.as_ptr().add(1));
            alloc.construct(base, Probe(&drops));
            alloc.construct(second, Probe(&drops));

            let both = NonNull::new_unchecked(std::ptr::slice_from_raw_parts_mut(base.as_ptr(), 2));
            alloc.destroy(both);
            assert_eq!(drops.get(), 2);

            alloc.deallocate(base.cast(), layout);
        }
    }
}
