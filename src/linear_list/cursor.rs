//! Bidirectional positions inside a [`DynamicArray`](crate::DynamicArray).
//!
//! A cursor borrows the array it points into, so nothing that could move
//! the elements (`push_back`, `reserve`, `shrink_to_fit`, ...) compiles while
//! the cursor is alive. Stepping is unchecked: a cursor may walk before the
//! first slot or past the last one, and [`Cursor::get`] then yields `None`.

use std::fmt;
use std::ptr;

pub struct Cursor<'a, T> {
    slice: &'a [T],
    index: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub fn new(slice: &'a [T], index: usize) -> Self {
        Self { slice, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The element under the cursor, if the position is in range.
    pub fn get(&self) -> Option<&'a T> {
        self.slice.get(self.index)
    }

    /// Prefix increment.
    pub fn move_next(&mut self) -> &mut Self {
        self.index = self.index.wrapping_add(1);
        self
    }

    /// Prefix decrement.
    pub fn move_prev(&mut self) -> &mut Self {
        self.index = self.index.wrapping_sub(1);
        self
    }

    /// Postfix increment: steps forward and returns the old position.
    pub fn post_next(&mut self) -> Self {
        let prior = *self;
        self.move_next();
        prior
    }

    /// Postfix decrement: steps back and returns the old position.
    pub fn post_prev(&mut self) -> Self {
        let prior = *self;
        self.move_prev();
        prior
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

// two cursors are equal when they point at the same slot of the same block
impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.slice.as_ptr(), other.slice.as_ptr()) && self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("len", &self.slice.len())
            .finish()
    }
}

/// A cursor that can write through to the element it points at.
///
/// There is no postfix step: the old position would be a second live
/// mutable cursor into the same slot.
pub struct CursorMut<'a, T> {
    slice: &'a mut [T],
    index: usize,
}

impl<'a, T> CursorMut<'a, T> {
    pub fn new(slice: &'a mut [T], index: usize) -> Self {
        Self { slice, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self) -> Option<&T> {
        self.slice.get(self.index)
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slice.get_mut(self.index)
    }

    pub fn into_mut(self) -> Option<&'a mut T> {
        self.slice.get_mut(self.index)
    }

    pub fn move_next(&mut self) -> &mut Self {
        self.index = self.index.wrapping_add(1);
        self
    }

    pub fn move_prev(&mut self) -> &mut Self {
        self.index = self.index.wrapping_sub(1);
        self
    }

    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.slice, self.index)
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index)
            .field("len", &self.slice.len())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use crate::dynamic_array;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_cursor_walk() {
        let array = dynamic_array![1, 2, 3];

        let mut sum = 0;
        let mut cursor = array.begin();
        let end = array.end();
        while cursor != end {
            sum += *cursor.get().unwrap();
            cursor.move_next();
        }
        assert_eq!(sum, 6);
        assert_eq!(cursor.get(), None);

        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&3));
        assert_eq!(*cursor.move_prev().get().unwrap(), 2);
    }

    #[test]
    fn test_cursor_postfix() {
        let array = dynamic_array![10, 20];
        let mut cursor = array.begin();

        let prior = cursor.post_next();
        assert_eq!(prior.get(), Some(&10));
        assert_eq!(cursor.get(), Some(&20));
        assert_eq!(prior.index(), 0);

        let prior = cursor.post_prev();
        assert_eq!(prior.get(), Some(&20));
        assert_eq!(cursor, array.begin());
    }

    #[test]
    fn test_cursor_equality() {
        let a = dynamic_array![1, 2];
        let b = a.clone();

        assert_eq!(a.cursor_at(1), a.cursor_at(1));
        assert!(a.cursor_at(0) != a.cursor_at(1));
        assert!(a.cursor_at(0) != b.cursor_at(0));
        assert_eq!(a.cursor_at(2), a.end());
    }

    #[test]
    fn test_cursor_before_begin() {
        let array = dynamic_array![1];
        let mut cursor = array.begin();
        cursor.move_prev();
        assert_eq!(cursor.get(), None);
        cursor.move_next();
        assert_eq!(cursor, array.begin());
    }

    #[test]
    fn test_cursor_mut() {
        let mut array = dynamic_array![1, 2, 3];
        {
            let mut cursor = array.begin_mut();
            while let Some(elem) = cursor.get_mut() {
                *elem *= 10;
                cursor.move_next();
            }
            assert_eq!(cursor.index(), 3);
            cursor.move_prev();
            assert_eq!(cursor.as_cursor().get(), Some(&30));
        }
        assert_eq!(array, [10, 20, 30]);

        if let Some(elem) = array.cursor_mut_at(1).into_mut() {
            *elem = 0;
        }
        assert_eq!(array, [10, 0, 30]);
    }
}
