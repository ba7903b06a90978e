// src/acquisition/sliding_window.rs
//! Fixed-capacity append/evict window over the most recent samples

use std::collections::vec_deque::{self, VecDeque};
use thiserror::Error;

/// Chronological buffer that holds at most `capacity` items.
///
/// Once full, every push evicts exactly one item from the front, so the
/// length never changes after initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

/// Sliding window error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("Invalid window capacity (must be at least 1)")]
    InvalidCapacity,
    #[error("Window expects exactly {expected} items, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl<T> SlidingWindow<T> {
    /// Create an empty window
    pub fn new(capacity: usize) -> Result<Self, WindowError> {
        if capacity == 0 {
            return Err(WindowError::InvalidCapacity);
        }
        Ok(Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Create a full window from exactly `capacity` items
    pub fn filled<I>(capacity: usize, items: I) -> Result<Self, WindowError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut window = Self::new(capacity)?;
        window.replace_all(items)?;
        Ok(window)
    }

    /// Replace the whole content; the new content must fill the window exactly.
    /// On error the previous content is kept.
    pub fn replace_all<I>(&mut self, items: I) -> Result<(), WindowError>
    where
        I: IntoIterator<Item = T>,
    {
        let fresh: VecDeque<T> = items.into_iter().collect();
        if fresh.len() != self.capacity {
            return Err(WindowError::LengthMismatch {
                expected: self.capacity,
                actual: fresh.len(),
            });
        }
        self.buffer = fresh;
        Ok(())
    }

    /// Regenerate the whole window from `make(index)` for `index in 0..capacity`
    pub fn refill_with<F>(&mut self, make: F)
    where
        F: FnMut(usize) -> T,
    {
        self.buffer.clear();
        self.buffer.extend((0..self.capacity).map(make));
    }

    /// Append one item, evicting and returning the oldest when full
    pub fn push_evict(&mut self, item: T) -> Option<T> {
        let evicted = if self.is_full() {
            self.buffer.pop_front()
        } else {
            None
        };
        self.buffer.push_back(item);
        evicted
    }

    pub fn first(&self) -> Option<&T> {
        self.buffer.front()
    }

    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.buffer.get(index)
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.buffer.iter()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> SlidingWindow<T> {
    /// Copy out the content, oldest first
    pub fn to_vec(&self) -> Vec<T> {
        self.buffer.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a SlidingWindow<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffer.iter()
    }
}
