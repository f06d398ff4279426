//! A growable contiguous array with an explicit storage strategy, and a
//! last-in first-out adapter on top of it.
//!
//! ```
//! use dynamic_array::{dynamic_array, Stack};
//!
//! let mut array = dynamic_array![10, 20, 30];
//! array.push_back(40);
//! assert_eq!(array.capacity(), 6);
//!
//! let mut stack = Stack::from_container(array);
//! assert_eq!(stack.pop(), Some(40));
//! assert_eq!(stack.top(), Some(&30));
//! ```

pub mod error;
pub mod linear_list;
pub mod raw;
pub mod stack;

pub use crate::error::{AllocError, TryReserveError};
pub use crate::linear_list::{Cursor, CursorMut, DynamicArray};
pub use crate::raw::{Allocator, Global};
pub use crate::stack::{Stack, StackContainer};

/// Builds a [`DynamicArray`] the way `vec!` builds a `Vec`.
///
/// `dynamic_array![a, b, c]` holds the items in order with capacity equal to
/// their count; `dynamic_array![elem; n]` holds `n` clones of `elem`.
#[macro_export]
macro_rules! dynamic_array {
    () => {
        $crate::DynamicArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynamicArray::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($x),+])
    };
}
