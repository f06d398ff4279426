mod cursor;
mod dynamic_array;

pub use self::cursor::{Cursor, CursorMut};
pub use self::dynamic_array::{DynamicArray, IntoIter};
