use dynamic_array::{AllocError, Allocator, Global};

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Stats {
    pub allocations: Cell<usize>,
    pub deallocations: Cell<usize>,
    pub live_bytes: Cell<usize>,
    pub constructs: Cell<usize>,
    pub destroys: Cell<usize>,
    // allocations left before every further request fails
    pub budget: Cell<Option<usize>>,
}

/// Forwards to [`Global`] and records every call. Clones share the same
/// counters.
#[derive(Debug, Clone, Default)]
pub struct CountingAllocator {
    pub stats: Rc<Stats>,
}

impl CountingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_after(&self, allocations: usize) {
        self.stats.budget.set(Some(allocations));
    }

    pub fn live_blocks(&self) -> usize {
        self.stats.allocations.get() - self.stats.deallocations.get()
    }
}

unsafe impl Allocator for CountingAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        assert_ne!(layout.size(), 0, "zero-size allocation requested");

        if let Some(left) = self.stats.budget.get() {
            if left == 0 {
                return Err(AllocError::new(layout));
            }
            self.stats.budget.set(Some(left - 1));
        }

        let ptr = Global.allocate(layout)?;
        self.stats.allocations.set(self.stats.allocations.get() + 1);
        self.stats.live_bytes.set(self.stats.live_bytes.get() + layout.size());
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.stats.deallocations.set(self.stats.deallocations.get() + 1);
        self.stats.live_bytes.set(self.stats.live_bytes.get() - layout.size());
        Global.deallocate(ptr, layout)
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        self.stats.constructs.set(self.stats.constructs.get() + 1);
        slot.as_ptr().write(value)
    }

    unsafe fn destroy<T: ?Sized>(&self, slot: NonNull<T>) {
        self.stats.destroys.set(self.stats.destroys.get() + 1);
        std::ptr::drop_in_place(slot.as_ptr())
    }
}
