use std::alloc::Layout;

use thiserror::Error;

/// The storage strategy could not provide memory for `layout`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("memory allocation of {} bytes failed", .layout.size())]
pub struct AllocError {
    pub layout: Layout,
}

impl AllocError {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }
}

/// Error returned by the fallible growth operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TryReserveError {
    #[error("capacity overflow")]
    CapacityOverflow,

    #[error(transparent)]
    Alloc(#[from] AllocError),
}

impl TryReserveError {
    /// Turns the error into the fatal outcome of the infallible operations.
    pub(crate) fn handle(self) -> ! {
        match self {
            TryReserveError::CapacityOverflow => panic!("capacity overflow"),
            TryReserveError::Alloc(err) => std::alloc::handle_alloc_error(err.layout),
        }
    }
}
