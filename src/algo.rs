//! In-place binary heapsort.
//!
//! This is the fallback ordering routine a finalized bucket is handed to once
//! its buffer has been drained into a flat slice. It runs in O(n log n) time
//! with O(1) extra space and performs a deterministic sequence of comparisons
//! for a given input.
//!
//! The main entry points are [`heapsort`] and [`heapsort_by`].

use std::cmp::Ordering;

/// Sorts `data` in place in non-decreasing order.
///
/// The sort is not stable: equal elements may be reordered. Slices of length
/// zero or one are left untouched.
///
/// # Examples
///
/// ```
/// use burstkit::heapsort;
///
/// let mut data = [3, 1, 4, 1, 5, 9, 2, 6];
/// heapsort(&mut data);
///
/// assert_eq!(data, [1, 1, 2, 3, 4, 5, 6, 9]);
/// ```
pub fn heapsort<T: Ord>(data: &mut [T]) {
    heapsort_by(data, T::cmp);
}

/// Sorts `data` in place with a comparator function.
///
/// `compare` must define a total order over the elements.
///
/// # Arguments
///
/// * `data` - The slice to reorder.
/// * `compare` - Returns how its first argument orders relative to its second.
///
/// # Examples
///
/// ```
/// use burstkit::heapsort_by;
///
/// let mut words = vec!["pear", "fig", "banana"];
/// heapsort_by(&mut words, |a, b| a.len().cmp(&b.len()));
///
/// assert_eq!(words, vec!["fig", "pear", "banana"]);
/// ```
pub fn heapsort_by<T, F>(data: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = data.len();
    if len < 2 {
        return;
    }

    // Heapify from the last parent node up to the root.
    for root in (0..=(len - 2) / 2).rev() {
        sift_down(data, root, len, &mut compare);
    }

    // Move the maximum behind the shrinking heap.
    for end in (1..len).rev() {
        data.swap(0, end);
        sift_down(data, 0, end, &mut compare);
    }
}

// Restores `parent >= child` below `node` within `data[..end]`.
//
// On equal children the right one is taken.
#[inline]
fn sift_down<T, F>(data: &mut [T], mut node: usize, end: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    loop {
        let mut child = 2 * node + 1;
        if child >= end {
            break;
        }

        if child + 1 < end && compare(&data[child + 1], &data[child]) != Ordering::Less {
            child += 1;
        }

        if compare(&data[node], &data[child]) != Ordering::Less {
            break;
        }

        data.swap(node, child);
        node = child;
    }
}
