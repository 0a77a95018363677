//! Growable ordered sequence
//!
//! `List<T>` backs polygon vertex storage and the scene registries. Growth is
//! geometric (capacity doubles when full). Out-of-range access and removal
//! from an empty list are programming errors and panic. Elements are dropped
//! when removed or when the list itself is dropped.

use std::ops::{Index, IndexMut};

/// A growable array with doubling growth and checked access
#[derive(Debug, Clone, PartialEq)]
pub struct List<T> {
    items: Vec<T>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> List<T> {
    /// Create an empty list with no allocation
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty list with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    #[track_caller]
    fn check_index(&self, index: usize) {
        if index >= self.items.len() {
            panic!(
                "list index {index} out of range for list of length {}",
                self.items.len()
            );
        }
    }

    /// Element at `index`
    #[track_caller]
    pub fn get(&self, index: usize) -> &T {
        self.check_index(index);
        &self.items[index]
    }

    /// Mutable element at `index`
    #[track_caller]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.check_index(index);
        &mut self.items[index]
    }

    /// Replace the element at `index`, dropping the previous one
    #[track_caller]
    pub fn set(&mut self, index: usize, value: T) {
        self.check_index(index);
        self.items[index] = value;
    }

    /// Append to the end, doubling capacity when full
    pub fn push(&mut self, value: T) {
        if self.items.len() == self.items.capacity() {
            let target = self.items.capacity().max(1) * 2;
            self.items.reserve_exact(target - self.items.len());
        }
        self.items.push(value);
    }

    /// Remove and return the element at `index`, shifting later elements down
    #[track_caller]
    pub fn remove_at(&mut self, index: usize) -> T {
        if self.items.is_empty() {
            panic!("cannot remove index {index} from an empty list");
        }
        self.check_index(index);
        self.items.remove(index)
    }

    /// Keep only elements matching `keep`, preserving order
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> Index<usize> for List<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.get(index)
    }
}

impl<T> IndexMut<usize> for List<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index)
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
