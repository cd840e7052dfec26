//! # Burstkit
//!
//! `burstkit` provides two leaf primitives for cache-conscious string sorting
//! engines in the style of [Burstsort](https://en.wikipedia.org/wiki/Burstsort):
//!
//! - [`RingBuffer`]: a fixed-capacity FIFO whose contents can be moved to another
//!   buffer, or drained into a flat slice, with a handful of contiguous run
//!   copies instead of one operation per element.
//! - [`heapsort`]: an in-place O(n log n) sort with O(1) extra space, the final
//!   ordering step a drained bucket is handed to.
//!
//! ## Key Features
//!
//! - **Bulk Transfer**: [`RingBuffer::move_to`] and [`RingBuffer::drain_into`] copy
//!   at most three contiguous runs no matter how many elements move.
//! - **All-or-Nothing Errors**: every hard-fail operation checks counts and
//!   capacities before touching a slot, so a [`BufferError`] means nothing changed.
//! - **Flexible Storage**: buffers own their slots by default, or run directly over
//!   caller-provided storage through [`RingBuffer::borrowed`] and
//!   [`RingBuffer::from_storage`].
//!
//! ## Usage
//!
//! ### Growing a Bucket
//!
//! Buffers never resize. A full buffer is replaced by a larger one and drained
//! into it:
//!
//! ```rust
//! use burstkit::{BufferError, RingBuffer};
//!
//! let mut bucket = RingBuffer::with_capacity(2);
//! bucket.enqueue("banana").unwrap();
//! bucket.enqueue("apple").unwrap();
//!
//! if let Err(BufferError::BufferFull) = bucket.enqueue("cherry") {
//!     let mut grown = RingBuffer::with_capacity(bucket.capacity() * 2);
//!     bucket.drain_into(&mut grown).unwrap();
//!     bucket = grown;
//!     bucket.enqueue("cherry").unwrap();
//! }
//!
//! assert_eq!(bucket.len(), 3);
//! ```
//!
//! ### Finalizing a Bucket
//!
//! ```rust
//! use burstkit::{heapsort, RingBuffer};
//!
//! let mut bucket = RingBuffer::from_vec(vec!["date", "banana", "cherry", "apple"]);
//! let mut flat = Vec::with_capacity(bucket.len());
//! bucket.drain_into_vec(&mut flat).unwrap();
//! heapsort(&mut flat);
//!
//! assert_eq!(flat, vec!["apple", "banana", "cherry", "date"]);
//! ```
//!
//! ## Concurrency
//!
//! Neither primitive synchronizes. A buffer shared between threads must have all
//! structural operations serialized by its owner, or buffers should be
//! partitioned one per worker.

pub mod algo;
pub mod buffer;
pub mod core;
pub use crate::algo::{heapsort, heapsort_by};
pub use crate::buffer::RingBuffer;
pub use crate::core::{BufferError, Result, SlotStorage};

pub mod prelude {
    pub use crate::algo::{heapsort, heapsort_by};
    pub use crate::buffer::RingBuffer;
    pub use crate::core::{BufferError, SlotStorage};
}
