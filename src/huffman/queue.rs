use std::cmp::{Eq, Ord, Ordering, PartialEq, PartialOrd, Reverse};
use std::collections::BinaryHeap;

struct Entry<K, T> {
    key: K,
    sequence: u64,
    item: T,
}

impl<K: Ord, T> Ord for Entry<K, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl<K: Ord, T> PartialOrd for Entry<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, T> PartialEq for Entry<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord, T> Eq for Entry<K, T> {}

/// Min-priority queue that hands out items with equal keys in insertion order.
pub struct PriorityQueue<K: Ord, T> {
    heap: BinaryHeap<Reverse<Entry<K, T>>>,
    next_sequence: u64,
}

impl<K: Ord, T> PriorityQueue<K, T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub fn insert(&mut self, key: K, item: T) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Reverse(Entry {
            key,
            sequence,
            item,
        }));
    }

    pub fn extract_min(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(entry)| entry.item)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<K: Ord, T> Default for PriorityQueue<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::PriorityQueue;

    #[test]
    fn test_extracts_in_key_order() {
        let mut queue = PriorityQueue::new();
        for key in [5, 1, 4, 2, 3] {
            queue.insert(key, key * 10);
        }
        let extracted: Vec<i32> = std::iter::from_fn(|| queue.extract_min()).collect();
        assert_eq!(extracted, vec![10, 20, 30, 40, 50]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_equal_keys_come_out_first_in_first_out() {
        let mut queue = PriorityQueue::new();
        queue.insert(7, "first");
        queue.insert(3, "smallest");
        queue.insert(7, "second");
        queue.insert(7, "third");
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.extract_min(), Some("smallest"));
        assert_eq!(queue.extract_min(), Some("first"));
        queue.insert(7, "fourth");
        assert_eq!(queue.extract_min(), Some("second"));
        assert_eq!(queue.extract_min(), Some("third"));
        assert_eq!(queue.extract_min(), Some("fourth"));
        assert_eq!(queue.extract_min(), None);
    }
}
