use burstkit::prelude::*;
use rstest::rstest;

fn dequeue_all<T, S: SlotStorage<T>>(buffer: &mut RingBuffer<T, S>) -> Vec<T> {
    let mut out = Vec::with_capacity(buffer.len());
    while let Some(value) = buffer.try_dequeue() {
        out.push(value);
    }
    out
}

#[test]
fn test_fill_to_capacity() {
    let mut buffer = RingBuffer::with_capacity(4);
    buffer.enqueue("a").unwrap();
    buffer.enqueue("b").unwrap();
    buffer.enqueue("c").unwrap();
    assert_eq!(buffer.len(), 3);

    assert_eq!(buffer.dequeue(), Ok("a"));
    assert_eq!(buffer.len(), 2);

    buffer.enqueue("d").unwrap();
    buffer.enqueue("e").unwrap();
    assert_eq!(buffer.len(), 4);
    assert!(buffer.is_full());

    assert_eq!(buffer.enqueue("f"), Err(BufferError::BufferFull));
    assert_eq!(buffer.try_enqueue("f"), Err("f"));
    assert_eq!(buffer.len(), 4);
    assert_eq!(dequeue_all(&mut buffer), vec!["b", "c", "d", "e"]);
}

#[test]
fn test_move_wrapped_pair_into_larger_buffer() {
    // Two elements straddling the end of a capacity-4 buffer.
    let mut small = RingBuffer::with_capacity(4);
    for value in ["x", "x", "x"] {
        small.enqueue(value).unwrap();
    }
    for _ in 0..3 {
        small.dequeue().unwrap();
    }
    small.enqueue("first").unwrap();
    small.enqueue("second").unwrap();

    let mut large = RingBuffer::with_capacity(8);
    small.move_to(&mut large, 2).unwrap();

    assert!(small.is_empty());
    assert_eq!(large.len(), 2);
    assert_eq!(dequeue_all(&mut large), vec!["first", "second"]);
}

#[test]
fn test_grow_by_draining() {
    let mut bucket = RingBuffer::with_capacity(2);
    let mut grown_times = 0;

    for word in ["kiwi", "fig", "lime", "pear", "plum", "date", "sloe"] {
        if let Err(word) = bucket.try_enqueue(word) {
            let mut grown = RingBuffer::with_capacity(bucket.capacity() * 2);
            bucket.drain_into(&mut grown).unwrap();
            bucket = grown;
            bucket.enqueue(word).unwrap();
            grown_times += 1;
        }
    }

    assert_eq!(grown_times, 2);
    assert_eq!(bucket.capacity(), 8);
    assert_eq!(
        dequeue_all(&mut bucket),
        vec!["kiwi", "fig", "lime", "pear", "plum", "date", "sloe"]
    );
}

#[test]
fn test_drain_then_heapsort() {
    let mut bucket = RingBuffer::from_slice(&["date", "banana", "cherry", "apple"]);
    bucket.dequeue().unwrap();
    bucket.enqueue("elder").unwrap();

    let mut flat = vec![""; 6];
    bucket.drain_into_slice(&mut flat, 2).unwrap();
    assert!(bucket.is_empty());
    assert_eq!(flat, vec!["", "", "banana", "cherry", "apple", "elder"]);

    heapsort(&mut flat[2..]);
    assert_eq!(flat, vec!["", "", "apple", "banana", "cherry", "elder"]);
}

#[test]
fn test_from_slice_copies() {
    let mut source = vec![1, 2, 3];
    let mut buffer = RingBuffer::from_slice(&source);
    source[0] = 100;

    assert!(buffer.is_full());
    assert_eq!(buffer.peek(), Some(&1));
    assert_eq!(dequeue_all(&mut buffer), vec![1, 2, 3]);
}

#[test]
fn test_borrowed_storage_between_buffers() {
    let mut left = [Some(1), Some(2), Some(3), None];
    let mut right = [None, None, None];
    {
        let mut src = RingBuffer::borrowed(&mut left).unwrap();
        let mut dest = RingBuffer::borrowed(&mut right).unwrap();
        src.move_to(&mut dest, 2).unwrap();
        assert_eq!(src.len(), 1);
        assert_eq!(dest.len(), 2);
    }
    assert_eq!(left, [None, None, Some(3), None]);
    assert_eq!(right, [Some(1), Some(2), None]);
}

#[test]
fn test_move_between_owned_and_borrowed() {
    let mut slots = vec![None; 5];
    let mut dest = RingBuffer::from_storage(slots.as_mut_slice(), 1..4).unwrap();
    let mut src = RingBuffer::from_vec(vec!['a', 'b', 'c', 'd']);

    assert_eq!(
        src.move_to(&mut dest, 4),
        Err(BufferError::InsufficientCapacity {
            requested: 4,
            remaining: 3,
        })
    );
    src.move_to(&mut dest, 3).unwrap();
    assert!(dest.is_full());
    assert_eq!(src.peek(), Some(&'d'));

    drop(dest);
    assert_eq!(slots, vec![None, Some('a'), Some('b'), Some('c'), None]);
}

#[test]
fn test_clear_then_reuse() {
    let mut buffer = RingBuffer::from_vec(vec![String::from("a"), String::from("b")]);
    buffer.clear();
    assert!(buffer.is_empty());
    assert_eq!(buffer.remaining(), 2);
    assert_eq!(buffer.front(), Err(BufferError::BufferEmpty));

    buffer.enqueue(String::from("c")).unwrap();
    assert_eq!(buffer.front().map(String::as_str), Ok("c"));
}

#[test]
fn test_heapsort_example() {
    let mut data = [3, 1, 4, 1, 5, 9, 2, 6];
    heapsort(&mut data);
    assert_eq!(data, [1, 1, 2, 3, 4, 5, 6, 9]);
}

#[test]
fn test_heapsort_absent_and_empty() {
    let mut absent: Option<Vec<i32>> = None;
    if let Some(data) = absent.as_deref_mut() {
        heapsort(data);
    }
    assert!(absent.is_none());

    let mut empty: Vec<String> = vec![];
    heapsort(&mut empty);
    assert!(empty.is_empty());
}

#[rstest]
#[case::single(vec!["a"], vec!["a"])]
#[case::pair(vec!["b", "a"], vec!["a", "b"])]
#[case::reversed(vec!["c", "b", "a"], vec!["a", "b", "c"])]
#[case::all_empty(vec![""; 10], vec![""; 10])]
#[case::peculiar(
    vec!["z", "m", "", "a", "d", "tt", "tt", "tt", "foo", "bar"],
    vec!["", "a", "bar", "d", "foo", "m", "tt", "tt", "tt", "z"]
)]
fn test_heapsort_strings(#[case] input: Vec<&str>, #[case] expected: Vec<&str>) {
    let mut input = input;
    heapsort(&mut input);
    assert_eq!(input, expected);
}
