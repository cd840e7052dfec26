//! Core types shared by the buffer and sorting primitives.
//!
//! This module defines:
//! - [`BufferError`]: every way a hard-fail buffer operation can be refused.
//! - [`SlotStorage`]: the storage a ring buffer runs over.
//! - Cursors: the cache-aligned bookkeeping block of a ring buffer.

use cuneiform::cuneiform;
use thiserror::Error;

/// Result type alias for buffer operations.
pub type Result<T> = std::result::Result<T, BufferError>;

/// Error type for [`RingBuffer`](crate::RingBuffer) operations.
///
/// A returned error always means nothing was mutated: every count and capacity
/// check runs before the first element is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Enqueue attempted on a full buffer.
    #[error("buffer is full")]
    BufferFull,

    /// Dequeue or drain attempted on an empty buffer.
    #[error("buffer is empty")]
    BufferEmpty,

    /// The source buffer holds fewer elements than a move asked for.
    #[error("source has too few items: requested {requested}, available {available}")]
    InsufficientSource {
        /// Number of elements the move asked for
        requested: usize,
        /// Number of elements the source holds
        available: usize,
    },

    /// The destination buffer cannot accept the elements of a move.
    #[error("destination has insufficient space: requested {requested}, remaining {remaining}")]
    InsufficientCapacity {
        /// Number of elements the move asked for
        requested: usize,
        /// Free slots in the destination
        remaining: usize,
    },

    /// The slice given to a drain cannot hold the buffer contents past the offset.
    #[error("destination too small: needed {needed}, available {available}")]
    DestinationTooSmall {
        /// Number of elements to be drained
        needed: usize,
        /// Slots available in the destination from the offset onward
        available: usize,
    },

    /// Caller-provided storage does not describe a valid ring.
    #[error("invalid storage: {reason}")]
    InvalidStorage {
        /// Explanation of the problem
        reason: String,
    },
}

/// Backing storage a [`RingBuffer`](crate::RingBuffer) can run over.
///
/// Any contiguous region of `Option<T>` slots qualifies: an owned
/// `Box<[Option<T>]>` or `Vec<Option<T>>`, or a borrowed `&mut [Option<T>]`.
/// A slot holds `Some` exactly while it is part of the buffer's live region.
///
/// # Examples
///
/// ```
/// use burstkit::RingBuffer;
///
/// let storage: Vec<Option<u32>> = vec![Some(1), Some(2), None, None];
/// let mut buffer = RingBuffer::from_storage(storage, 0..4).unwrap();
///
/// assert_eq!(buffer.len(), 2);
/// assert_eq!(buffer.dequeue(), Ok(1));
/// ```
pub trait SlotStorage<T>: AsRef<[Option<T>]> + AsMut<[Option<T>]> {}

// Blanket implementation for anything exposing a slot slice.
impl<T, S> SlotStorage<T> for S
where
    S: AsRef<[Option<T>]> + AsMut<[Option<T>]> + ?Sized,
{
}

/// Read/write positions of a ring over the slot range `[lower, upper)`.
///
/// `start == end` holds both when empty and when full, so `count` alone
/// decides between the two.
#[cuneiform]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cursors {
    pub lower: usize,
    pub upper: usize,
    pub start: usize,
    pub end: usize,
    pub count: usize,
}

impl Cursors {
    /// Cursors for a ring over `lower..upper` whose first `count` slots are live.
    pub(crate) fn new(lower: usize, upper: usize, count: usize) -> Self {
        let mut cursors = Self {
            lower,
            upper,
            start: lower,
            end: lower,
            count: 0,
        };
        cursors.advance_end(count);
        cursors.count = count;
        cursors
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.upper - self.lower
    }

    #[inline(always)]
    pub(crate) fn remaining(&self) -> usize {
        self.capacity() - self.count
    }

    /// Longest run of live slots readable from `start` without wrapping.
    #[inline(always)]
    pub(crate) fn readable_run(&self) -> usize {
        self.count.min(self.upper - self.start)
    }

    /// Longest run of free slots writable from `end` without wrapping.
    #[inline(always)]
    pub(crate) fn writable_run(&self) -> usize {
        self.remaining().min(self.upper - self.end)
    }

    #[inline(always)]
    pub(crate) fn advance_start(&mut self, n: usize) {
        self.start = self.wrap(self.start + n);
    }

    #[inline(always)]
    pub(crate) fn advance_end(&mut self, n: usize) {
        self.end = self.wrap(self.end + n);
    }

    /// Resets to empty without touching any slot.
    pub(crate) fn reset(&mut self) {
        self.start = self.lower;
        self.end = self.lower;
        self.count = 0;
    }

    // Positions never exceed `upper + capacity`, so one subtraction suffices.
    #[inline(always)]
    fn wrap(&self, pos: usize) -> usize {
        if pos >= self.upper {
            pos - self.capacity()
        } else {
            pos
        }
    }
}
