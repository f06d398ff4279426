use crate::linear_list::DynamicArray;
use crate::raw::Allocator;

use std::fmt;
use std::marker::PhantomData;
use std::mem;

/// What [`Stack`] needs from the container underneath it: access to the
/// last element and insertion/removal at the end.
pub trait StackContainer<T> {
    fn back(&self) -> Option<&T>;

    fn back_mut(&mut self) -> Option<&mut T>;

    fn push_back(&mut self, elem: T);

    /// Removes the last element; an empty container is left as it is.
    fn pop_back(&mut self) -> Option<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, A: Allocator> StackContainer<T> for DynamicArray<T, A> {
    fn back(&self) -> Option<&T> {
        DynamicArray::back(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        DynamicArray::back_mut(self)
    }

    fn push_back(&mut self, elem: T) {
        DynamicArray::push_back(self, elem)
    }

    fn pop_back(&mut self) -> Option<T> {
        DynamicArray::pop_back(self)
    }

    fn len(&self) -> usize {
        DynamicArray::len(self)
    }

    fn is_empty(&self) -> bool {
        DynamicArray::is_empty(self)
    }
}

impl<T> StackContainer<T> for Vec<T> {
    fn back(&self) -> Option<&T> {
        self.last()
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        self.last_mut()
    }

    fn push_back(&mut self, elem: T) {
        self.push(elem)
    }

    fn pop_back(&mut self) -> Option<T> {
        self.pop()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

/// A last-in first-out adapter over a [`StackContainer`].
///
/// Every operation forwards to the end of the container; the stack never
/// looks at any other element.
pub struct Stack<T, C = DynamicArray<T>> {
    container: C,
    _marker: PhantomData<T>,
}

impl<T, C: StackContainer<T>> Stack<T, C> {
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::from_container(C::default())
    }

    /// Adopts `container` as the initial contents; its last element becomes
    /// the top. Pass a clone to build the stack from a copy.
    pub fn from_container(container: C) -> Self {
        Self {
            container,
            _marker: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn top(&self) -> Option<&T> {
        self.container.back()
    }

    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.container.back_mut()
    }

    pub fn push(&mut self, elem: T) {
        self.container.push_back(elem)
    }

    pub fn pop(&mut self) -> Option<T> {
        self.container.pop_back()
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.container, &mut other.container)
    }

    /// Moves the contents out, leaving `self` with an empty container.
    pub fn take(&mut self) -> Self
    where
        C: Default,
    {
        Self::from_container(mem::take(&mut self.container))
    }

    pub fn into_inner(self) -> C {
        self.container
    }
}

impl<T, C: StackContainer<T> + Default> Default for Stack<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clone> Clone for Stack<T, C> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            _marker: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.container.clone_from(&source.container)
    }
}

impl<T, C: StackContainer<T>> From<C> for Stack<T, C> {
    fn from(container: C) -> Self {
        Self::from_container(container)
    }
}

impl<T, C: StackContainer<T>> Extend<T> for Stack<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push(elem);
        }
    }
}

impl<T, C: StackContainer<T> + Default> FromIterator<T> for Stack<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}

impl<T, C: fmt::Debug> fmt::Debug for Stack<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack").field("container", &self.container).finish()
    }
}
