mod allocator;
mod raw_array;

pub use self::allocator::{Allocator, Global};
pub use self::raw_array::RawArray;
