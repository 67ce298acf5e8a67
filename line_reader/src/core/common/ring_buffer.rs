// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A fixed-capacity ring buffer on the heap. Once full, adding an item drops the
//! oldest one. Used by the kill ring and the undo history, which both need a bound and
//! both need to address items relative to the newest one.

use std::fmt::Debug;

/// Index `0` is the oldest item and `len() - 1` is the newest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingBufferHeap<T, const N: usize> {
    internal_storage: Vec<Option<T>>,
    head: usize,
    tail: usize,
    count: usize,
}

impl<T, const N: usize> Default for RingBufferHeap<T, N> {
    fn default() -> Self { Self::new() }
}

impl<T, const N: usize> RingBufferHeap<T, N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            internal_storage: Vec::with_capacity(N),
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize { N }

    #[must_use]
    pub fn len(&self) -> usize { self.count }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.count == 0 }

    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        self.internal_storage.iter_mut().for_each(|x| *x = None);
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.count {
            return None;
        }
        let actual_index = (self.tail + index) % N;
        self.internal_storage
            .get(actual_index)
            .and_then(|item| item.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.count {
            return None;
        }
        let actual_index = (self.tail + index) % N;
        self.internal_storage
            .get_mut(actual_index)
            .and_then(|item| item.as_mut())
    }

    /// `offset` counts back from the newest item, `0` being the newest.
    #[must_use]
    pub fn get_from_newest(&self, offset: usize) -> Option<&T> {
        let index = self.count.checked_sub(offset + 1)?;
        self.get(index)
    }

    #[must_use]
    pub fn newest(&self) -> Option<&T> { self.get_from_newest(0) }

    pub fn newest_mut(&mut self) -> Option<&mut T> {
        let index = self.count.checked_sub(1)?;
        self.get_mut(index)
    }

    /// Insert at head (ie, insert the newest item).
    pub fn add(&mut self, value: T) {
        if N == 0 {
            return;
        }
        if self.count == N {
            let _unused: Option<_> = self.remove();
        }
        // After `remove_head` or `truncate`, head sits inside the storage already
        // grown, so the slot there is reused instead of pushing past a hole.
        if self.head < self.internal_storage.len() {
            self.internal_storage[self.head] = Some(value);
        } else {
            self.internal_storage.push(Some(value));
        }
        self.head = (self.head + 1) % N;
        self.count = std::cmp::min(self.count + 1, N);
    }

    /// Remove from tail (ie, remove the oldest item).
    pub fn remove(&mut self) -> Option<T> {
        if self.count == 0 || self.internal_storage.is_empty() {
            return None;
        }
        let value = self.internal_storage[self.tail].take();
        self.tail = (self.tail + 1) % N;
        self.count -= 1;
        value
    }

    /// Remove from head (ie, remove the newest item). This is the opposite of
    /// [`Self::remove`].
    pub fn remove_head(&mut self) -> Option<T> {
        if self.count == 0 || self.internal_storage.is_empty() {
            return None;
        }
        self.head = (self.head + N - 1) % N;
        let value = self.internal_storage[self.head].take();
        self.count -= 1;
        value
    }

    /// Delete the items from the given index to the end of the buffer.
    pub fn truncate(&mut self, index: usize) {
        if index >= self.count {
            return;
        }
        let actual_index = (self.tail + index) % N;
        for i in 0..(self.count - index) {
            let wrapped_index = (actual_index + i) % N;
            self.internal_storage[wrapped_index] = None;
        }
        self.head = actual_index;
        self.count = index;
    }

    #[must_use]
    pub fn iter(&self) -> RingBufferHeapIterator<'_, T, N> {
        RingBufferHeapIterator {
            ring_buffer: self,
            iterator_index: 0,
        }
    }
}

/// This implementation allows the ring buffer to be used in a for loop directly.
impl<'a, T, const N: usize> IntoIterator for &'a RingBufferHeap<T, N> {
    type Item = &'a T;
    type IntoIter = RingBufferHeapIterator<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

#[derive(Debug)]
pub struct RingBufferHeapIterator<'a, T, const N: usize> {
    ring_buffer: &'a RingBufferHeap<T, N>,
    iterator_index: usize,
}

impl<'a, T, const N: usize> Iterator for RingBufferHeapIterator<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.ring_buffer.get(self.iterator_index)?;
        self.iterator_index += 1;
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_past_capacity_drops_oldest() {
        let mut ring_buffer = RingBufferHeap::<&str, 3>::new();
        for it in ["one", "two", "three", "four"] {
            ring_buffer.add(it);
        }
        assert_eq!(ring_buffer.len(), 3);
        assert_eq!(ring_buffer.get(0), Some(&"two"));
        assert_eq!(ring_buffer.newest(), Some(&"four"));
        assert_eq!(ring_buffer.get_from_newest(2), Some(&"two"));
        assert_eq!(ring_buffer.get_from_newest(3), None);
    }

    #[test]
    fn test_remove_head_and_remove() {
        let mut ring_buffer = RingBufferHeap::<i32, 4>::new();
        ring_buffer.add(1);
        ring_buffer.add(2);
        ring_buffer.add(3);
        assert_eq!(ring_buffer.remove_head(), Some(3));
        assert_eq!(ring_buffer.remove(), Some(1));
        assert_eq!(ring_buffer.iter().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_add_after_remove_head_reuses_slot() {
        let mut ring_buffer = RingBufferHeap::<i32, 5>::new();
        ring_buffer.add(1);
        ring_buffer.add(2);
        ring_buffer.add(3);
        assert_eq!(ring_buffer.remove_head(), Some(3));
        ring_buffer.add(4);
        assert_eq!(ring_buffer.len(), 3);
        assert_eq!(ring_buffer.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4]);
        assert_eq!(ring_buffer.get(2), Some(&4));
        assert_eq!(ring_buffer.remove_head(), Some(4));
        assert_eq!(ring_buffer.remove_head(), Some(2));
        assert_eq!(ring_buffer.remove_head(), Some(1));
        assert_eq!(ring_buffer.remove_head(), None);
    }

    #[test]
    fn test_truncate_then_add() {
        let mut ring_buffer = RingBufferHeap::<i32, 3>::new();
        for it in 1..=5 {
            ring_buffer.add(it);
        }
        // Holds 3, 4, 5 with wrapped storage.
        ring_buffer.truncate(1);
        assert_eq!(ring_buffer.iter().copied().collect::<Vec<_>>(), vec![3]);
        ring_buffer.add(6);
        ring_buffer.add(7);
        ring_buffer.add(8);
        assert_eq!(ring_buffer.iter().copied().collect::<Vec<_>>(), vec![6, 7, 8]);
    }

    #[test]
    fn test_newest_mut() {
        let mut ring_buffer = RingBufferHeap::<String, 2>::new();
        ring_buffer.add("ab".to_string());
        if let Some(it) = ring_buffer.newest_mut() {
            it.push('c');
        }
        assert_eq!(ring_buffer.newest().map(String::as_str), Some("abc"));
    }
}
