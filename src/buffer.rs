//! Fixed-capacity ring buffer with bulk transfer between buffers.
//!
//! A [`RingBuffer`] never grows. When one fills up, the owner allocates a larger
//! buffer and drains the old one into it with [`RingBuffer::drain_into`], which
//! copies whole contiguous runs instead of going element by element.

use crate::core::{BufferError, Cursors, Result, SlotStorage};
use log::{debug, trace};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;

/// A fixed-capacity FIFO queue over a contiguous region of slots.
///
/// The read cursor (`start`) and write cursor (`end`) wrap around the region.
/// Both an empty and a full buffer have `start == end`; the element count is
/// what tells them apart.
///
/// The buffer is not synchronized. Sharing one between threads requires the
/// caller to serialize every structural operation.
///
/// # Type Parameters
///
/// * `T` - Element type
/// * `S` - Backing storage, owned `Box<[Option<T>]>` unless constructed over
///   caller storage with [`RingBuffer::from_storage`] or [`RingBuffer::borrowed`]
///
/// # Examples
///
/// ```
/// use burstkit::{BufferError, RingBuffer};
///
/// let mut buffer = RingBuffer::with_capacity(4);
/// buffer.enqueue("a").unwrap();
/// buffer.enqueue("b").unwrap();
/// buffer.enqueue("c").unwrap();
/// assert_eq!(buffer.dequeue(), Ok("a"));
///
/// buffer.enqueue("d").unwrap();
/// buffer.enqueue("e").unwrap();
/// assert!(buffer.is_full());
/// assert_eq!(buffer.enqueue("f"), Err(BufferError::BufferFull));
/// ```
pub struct RingBuffer<T, S = Box<[Option<T>]>> {
    storage: S,
    cursors: Cursors,
    _marker: PhantomData<T>,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer owning `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let storage = std::iter::repeat_with(|| None).take(capacity).collect();
        Self {
            storage,
            cursors: Cursors::new(0, capacity, 0),
            _marker: PhantomData,
        }
    }

    /// Creates a full buffer holding a copy of `initial`.
    ///
    /// The caller's data is duplicated into newly owned storage, so later
    /// changes to `initial` do not reach the buffer.
    pub fn from_slice(initial: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_iter_exact(initial.iter().cloned())
    }

    /// Creates a full buffer that takes ownership of the elements of `initial`.
    ///
    /// ```
    /// use burstkit::RingBuffer;
    ///
    /// let mut buffer = RingBuffer::from_vec(vec!["x".to_string(), "y".to_string()]);
    /// assert!(buffer.is_full());
    /// assert_eq!(buffer.dequeue().unwrap(), "x");
    /// ```
    pub fn from_vec(initial: Vec<T>) -> Self {
        Self::from_iter_exact(initial.into_iter())
    }

    fn from_iter_exact<I: ExactSizeIterator<Item = T>>(initial: I) -> Self {
        let count = initial.len();
        let storage = initial.map(Some).collect();
        Self {
            storage,
            cursors: Cursors::new(0, count, count),
            _marker: PhantomData,
        }
    }
}

impl<'a, T> RingBuffer<T, &'a mut [Option<T>]> {
    /// Creates a buffer that runs directly over caller-owned slots.
    ///
    /// The buffer aliases `slots` for its whole lifetime; the borrow keeps the
    /// caller from reading or writing them until the buffer is dropped.
    /// See [`RingBuffer::from_storage`] for the layout `slots` must have.
    ///
    /// ```
    /// use burstkit::RingBuffer;
    ///
    /// let mut slots = [Some(7), Some(8), None];
    /// {
    ///     let mut buffer = RingBuffer::borrowed(&mut slots).unwrap();
    ///     buffer.enqueue(9).unwrap();
    ///     assert_eq!(buffer.dequeue(), Ok(7));
    /// }
    /// assert_eq!(slots, [None, Some(8), Some(9)]);
    /// ```
    pub fn borrowed(slots: &'a mut [Option<T>]) -> Result<Self> {
        let len = slots.len();
        Self::from_storage(slots, 0..len)
    }
}

impl<T, S> RingBuffer<T, S>
where
    S: SlotStorage<T>,
{
    /// Creates a buffer over `region` of caller-provided storage.
    ///
    /// The region must hold a run of occupied slots followed only by vacant
    /// ones; the occupied run becomes the initial contents, front first.
    /// Slots outside the region are never touched.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidStorage`] if `region` does not fit inside
    /// `storage`, or if an occupied slot follows a vacant one.
    pub fn from_storage(storage: S, region: Range<usize>) -> Result<Self> {
        let len = storage.as_ref().len();
        if region.start > region.end || region.end > len {
            return Err(BufferError::InvalidStorage {
                reason: format!(
                    "region {}..{} out of bounds for {len} slots",
                    region.start, region.end
                ),
            });
        }

        let slots = &storage.as_ref()[region.clone()];
        let count = slots.iter().take_while(|slot| slot.is_some()).count();
        if let Some(stray) = slots[count..].iter().position(Option::is_some) {
            return Err(BufferError::InvalidStorage {
                reason: format!(
                    "occupied slot {} follows vacant slot {}",
                    region.start + count + stray,
                    region.start + count
                ),
            });
        }

        Ok(Self {
            storage,
            cursors: Cursors::new(region.start, region.end, count),
            _marker: PhantomData,
        })
    }

    /// Consumes the buffer and returns its backing storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cursors.capacity()
    }

    /// Number of elements currently queued.
    #[inline]
    pub fn len(&self) -> usize {
        self.cursors.count
    }

    /// Number of elements that can be enqueued before the buffer is full.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.cursors.remaining()
    }

    /// Returns `true` if no elements are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursors.count == 0
    }

    /// Returns `true` if every slot holds an element.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.cursors.count == self.cursors.capacity()
    }

    /// Appends `value` at the back.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::BufferFull`] if no slot is free. The value is
    /// dropped and the buffer is left unchanged.
    pub fn enqueue(&mut self, value: T) -> Result<()> {
        self.try_enqueue(value).map_err(|_| BufferError::BufferFull)
    }

    /// Appends `value` at the back, handing it back as `Err` if the buffer is full.
    pub fn try_enqueue(&mut self, value: T) -> std::result::Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        let end = self.cursors.end;
        self.slots_mut()[end] = Some(value);
        self.cursors.advance_end(1);
        self.cursors.count += 1;
        Ok(())
    }

    /// Removes and returns the front element.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::BufferEmpty`] if there is nothing to remove.
    pub fn dequeue(&mut self) -> Result<T> {
        self.try_dequeue().ok_or(BufferError::BufferEmpty)
    }

    /// Removes and returns the front element, or `None` if the buffer is empty.
    pub fn try_dequeue(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let start = self.cursors.start;
        let value = self.slots_mut()[start].take();
        self.cursors.advance_start(1);
        self.cursors.count -= 1;
        value
    }

    /// Returns the front element without removing it, or `None` if empty.
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots()[self.cursors.start].as_ref()
    }

    /// Returns the front element without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::BufferEmpty`] if the buffer is empty.
    pub fn front(&self) -> Result<&T> {
        self.peek().ok_or(BufferError::BufferEmpty)
    }

    /// Moves `n` elements from the front of this buffer to the back of `dest`.
    ///
    /// Equivalent to `n` rounds of `dest.enqueue(self.dequeue()?)`, but done
    /// run by run: each step transfers the longest stretch that is contiguous
    /// both as live slots here and as free slots in `dest`. Each side wraps at
    /// most once, so at most three steps are needed regardless of `n`.
    ///
    /// # Errors
    ///
    /// * [`BufferError::InsufficientSource`] if fewer than `n` elements are queued.
    /// * [`BufferError::InsufficientCapacity`] if `dest` has fewer than `n` free slots.
    ///
    /// On error neither buffer is modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use burstkit::RingBuffer;
    ///
    /// let mut small = RingBuffer::with_capacity(4);
    /// for i in 0..4 {
    ///     small.enqueue(i).unwrap();
    /// }
    /// let mut large = RingBuffer::with_capacity(8);
    /// small.move_to(&mut large, 3).unwrap();
    ///
    /// assert_eq!(small.len(), 1);
    /// assert_eq!(large.dequeue(), Ok(0));
    /// ```
    pub fn move_to<D>(&mut self, dest: &mut RingBuffer<T, D>, n: usize) -> Result<()>
    where
        D: SlotStorage<T>,
    {
        if self.cursors.count < n {
            return Err(BufferError::InsufficientSource {
                requested: n,
                available: self.cursors.count,
            });
        }
        if dest.remaining() < n {
            return Err(BufferError::InsufficientCapacity {
                requested: n,
                remaining: dest.remaining(),
            });
        }

        debug!(
            "Moving {} elements from buffer of capacity {} to buffer of capacity {}",
            n,
            self.capacity(),
            dest.capacity()
        );

        let mut to_copy = n;
        while to_copy > 0 {
            let run = to_copy
                .min(self.cursors.readable_run())
                .min(dest.cursors.writable_run());
            let src = self.cursors.start;
            let dst = dest.cursors.end;
            trace!("Copying run of {run} from slot {src} to slot {dst}");

            // Free slots in `dest` are vacant, so the swap leaves vacancies behind here.
            dest.slots_mut()[dst..dst + run]
                .swap_with_slice(&mut self.slots_mut()[src..src + run]);

            self.cursors.advance_start(run);
            self.cursors.count -= run;
            dest.cursors.advance_end(run);
            dest.cursors.count += run;
            to_copy -= run;
        }
        Ok(())
    }

    /// Moves every element into `dest`, leaving this buffer empty.
    ///
    /// This is how a full buffer is grown: allocate a larger one and drain into it.
    ///
    /// # Errors
    ///
    /// * [`BufferError::BufferEmpty`] if this buffer is empty.
    /// * [`BufferError::InsufficientCapacity`] if `dest` cannot take every element.
    pub fn drain_into<D>(&mut self, dest: &mut RingBuffer<T, D>) -> Result<()>
    where
        D: SlotStorage<T>,
    {
        if self.is_empty() {
            return Err(BufferError::BufferEmpty);
        }
        self.move_to(dest, self.cursors.count)
    }

    /// Moves every element into `dest` starting at `offset`, leaving this buffer empty.
    ///
    /// The slots `dest[offset..offset + len]` are overwritten in queue order.
    /// A buffer whose live region does not wrap is copied in one run, otherwise
    /// in two.
    ///
    /// # Errors
    ///
    /// * [`BufferError::BufferEmpty`] if this buffer is empty.
    /// * [`BufferError::DestinationTooSmall`] if fewer than `len` slots follow
    ///   `offset`; nothing is copied in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use burstkit::RingBuffer;
    ///
    /// let mut buffer = RingBuffer::from_vec(vec![3, 1, 2]);
    /// let mut out = [0; 5];
    /// buffer.drain_into_slice(&mut out, 1).unwrap();
    ///
    /// assert!(buffer.is_empty());
    /// assert_eq!(out, [0, 3, 1, 2, 0]);
    /// ```
    pub fn drain_into_slice(&mut self, dest: &mut [T], offset: usize) -> Result<()> {
        let count = self.cursors.count;
        if count == 0 {
            return Err(BufferError::BufferEmpty);
        }
        let available = dest.len().saturating_sub(offset);
        if available < count {
            return Err(BufferError::DestinationTooSmall {
                needed: count,
                available,
            });
        }

        debug!("Draining {count} elements into slice at offset {offset}");

        let (head, tail) = self.live_runs_mut();
        let (dest_head, dest_tail) = dest[offset..offset + count].split_at_mut(head.len());
        for (slot, value) in dest_head.iter_mut().zip(head.iter_mut().filter_map(Option::take)) {
            *slot = value;
        }
        for (slot, value) in dest_tail.iter_mut().zip(tail.iter_mut().filter_map(Option::take)) {
            *slot = value;
        }
        self.cursors.reset();
        Ok(())
    }

    /// Moves every element onto the end of `dest`, leaving this buffer empty.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::BufferEmpty`] if this buffer is empty.
    pub fn drain_into_vec(&mut self, dest: &mut Vec<T>) -> Result<()> {
        let count = self.cursors.count;
        if count == 0 {
            return Err(BufferError::BufferEmpty);
        }

        debug!("Draining {count} elements into vector");

        dest.reserve(count);
        let (head, tail) = self.live_runs_mut();
        dest.extend(head.iter_mut().filter_map(Option::take));
        dest.extend(tail.iter_mut().filter_map(Option::take));
        self.cursors.reset();
        Ok(())
    }

    /// Drops every queued element and resets to empty.
    pub fn clear(&mut self) {
        let (head, tail) = self.live_runs_mut();
        head.iter_mut().chain(tail.iter_mut()).for_each(|slot| *slot = None);
        self.cursors.reset();
    }

    #[inline(always)]
    fn slots(&self) -> &[Option<T>] {
        self.storage.as_ref()
    }

    #[inline(always)]
    fn slots_mut(&mut self) -> &mut [Option<T>] {
        self.storage.as_mut()
    }

    /// The live region as (run from `start`, wrapped run from `lower`).
    fn live_runs_mut(&mut self) -> (&mut [Option<T>], &mut [Option<T>]) {
        let Cursors {
            lower,
            start,
            count,
            ..
        } = self.cursors;
        let head_len = self.cursors.readable_run();
        let tail_len = count - head_len;
        let (front, back) = self.slots_mut().split_at_mut(start);
        (&mut back[..head_len], &mut front[lower..lower + tail_len])
    }
}

impl<T, S> fmt::Debug for RingBuffer<T, S>
where
    S: SlotStorage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("start", &self.cursors.start)
            .field("end", &self.cursors.end)
            .finish()
    }
}
