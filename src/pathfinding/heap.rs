use std::cmp::Ordering;

/// Sentinel slot value for an element that is not a live heap member.
pub const NOT_IN_HEAP: usize = usize::MAX;

/// Storage that owns the priority and heap slot of every element.
///
/// The heap itself only holds lightweight handles (`T`). Whatever `T` refers to
/// keeps its own priority and a mutable slot recording where the heap currently
/// stores it, which is what makes `update` O(log n).
pub trait HeapSlots<T> {
    /// `Greater` means `a` should be popped before `b`.
    fn compare(&self, a: T, b: T) -> Ordering;
    fn heap_index(&self, item: T) -> usize;
    fn set_heap_index(&mut self, item: T, index: usize);
}

/// Fixed-capacity binary max-heap with back-pointers into `HeapSlots`.
///
/// Invariant: for every live element at offset `i`, `slots.heap_index(items[i]) == i`,
/// and every element compares `>=` its children.
#[derive(Clone, Debug)]
pub struct IndexedHeap<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Copy + PartialEq> IndexedHeap<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn peek(&self) -> Option<T> {
        self.items.first().copied()
    }

    /// Inserts `item` and sifts it up.
    ///
    /// # Panics
    /// If the heap is already at capacity. Callers size the heap to the maximum
    /// number of simultaneously live elements, so overflow is a logic error.
    pub fn insert<S: HeapSlots<T>>(&mut self, slots: &mut S, item: T) {
        assert!(
            self.items.len() < self.capacity,
            "IndexedHeap capacity {} exceeded",
            self.capacity
        );
        let index = self.items.len();
        self.items.push(item);
        slots.set_heap_index(item, index);
        self.sift_up(slots, index);
    }

    /// Removes and returns the highest-priority element.
    pub fn extract_top<S: HeapSlots<T>>(&mut self, slots: &mut S) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let top = self.items.swap_remove(0);
        slots.set_heap_index(top, NOT_IN_HEAP);
        if let Some(&moved) = self.items.first() {
            slots.set_heap_index(moved, 0);
            self.sift_down(slots, 0);
        }
        Some(top)
    }

    /// True iff `item` is live at the offset its slot claims.
    pub fn contains<S: HeapSlots<T>>(&self, slots: &S, item: T) -> bool {
        let index = slots.heap_index(item);
        index < self.items.len() && self.items[index] == item
    }

    /// Restores heap order after `item`'s priority improved.
    ///
    /// Priorities in a search only ever improve once queued, so only the upward
    /// sift is needed.
    pub fn update<S: HeapSlots<T>>(&mut self, slots: &mut S, item: T) {
        let index = slots.heap_index(item);
        debug_assert!(self.contains(slots, item), "update on non-member");
        self.sift_up(slots, index);
    }

    pub fn clear<S: HeapSlots<T>>(&mut self, slots: &mut S) {
        for &item in &self.items {
            slots.set_heap_index(item, NOT_IN_HEAP);
        }
        self.items.clear();
    }

    /// Checks the heap-order and back-pointer invariants.
    pub fn is_valid<S: HeapSlots<T>>(&self, slots: &S) -> bool {
        self.items.iter().enumerate().all(|(i, &item)| {
            let ordered = i == 0 || slots.compare(self.items[(i - 1) / 2], item) != Ordering::Less;
            ordered && slots.heap_index(item) == i
        })
    }

    fn sift_up<S: HeapSlots<T>>(&mut self, slots: &mut S, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if slots.compare(self.items[index], self.items[parent]) == Ordering::Greater {
                self.swap(slots, index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down<S: HeapSlots<T>>(&mut self, slots: &mut S, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = index * 2 + 1;
            let right = left + 1;
            if left >= len {
                break;
            }

            let mut child = left;
            if right < len
                && slots.compare(self.items[right], self.items[left]) == Ordering::Greater
            {
                child = right;
            }

            if slots.compare(self.items[child], self.items[index]) == Ordering::Greater {
                self.swap(slots, index, child);
                index = child;
            } else {
                break;
            }
        }
    }

    fn swap<S: HeapSlots<T>>(&mut self, slots: &mut S, a: usize, b: usize) {
        self.items.swap(a, b);
        slots.set_heap_index(self.items[a], a);
        slots.set_heap_index(self.items[b], b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    /// Min-priority arena: lower key pops first.
    struct Keys {
        keys: Vec<i64>,
        slots: Vec<usize>,
    }

    impl Keys {
        fn new(keys: Vec<i64>) -> Self {
            let n = keys.len();
            Self {
                keys,
                slots: vec![NOT_IN_HEAP; n],
            }
        }
    }

    impl HeapSlots<usize> for Keys {
        fn compare(&self, a: usize, b: usize) -> Ordering {
            self.keys[b].cmp(&self.keys[a])
        }

        fn heap_index(&self, item: usize) -> usize {
            self.slots[item]
        }

        fn set_heap_index(&mut self, item: usize, index: usize) {
            self.slots[item] = index;
        }
    }

    #[test]
    fn test_extracts_in_priority_order() {
        let mut keys = Keys::new(vec![5, 3, 8, 1, 9, 2]);
        let mut heap = IndexedHeap::with_capacity(6);
        for i in 0..6 {
            heap.insert(&mut keys, i);
            assert!(heap.is_valid(&keys));
        }
        assert_eq!(heap.count(), 6);

        let mut popped = Vec::new();
        while let Some(i) = heap.extract_top(&mut keys) {
            assert!(heap.is_valid(&keys));
            popped.push(keys.keys[i]);
        }
        assert_eq!(popped, vec![1, 2, 3, 5, 8, 9]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_contains_tracks_membership() {
        let mut keys = Keys::new(vec![4, 2, 7]);
        let mut heap = IndexedHeap::with_capacity(3);
        heap.insert(&mut keys, 0);
        heap.insert(&mut keys, 1);

        assert!(heap.contains(&keys, 0));
        assert!(heap.contains(&keys, 1));
        assert!(!heap.contains(&keys, 2));

        let top = heap.extract_top(&mut keys).unwrap();
        assert_eq!(top, 1);
        assert!(!heap.contains(&keys, 1));
        assert!(heap.contains(&keys, 0));
    }

    #[test]
    fn test_update_moves_improved_item_to_top() {
        let mut keys = Keys::new(vec![10, 20, 30, 40]);
        let mut heap = IndexedHeap::with_capacity(4);
        for i in 0..4 {
            heap.insert(&mut keys, i);
        }

        keys.keys[3] = 1;
        heap.update(&mut keys, 3);
        assert!(heap.is_valid(&keys));
        assert_eq!(heap.peek(), Some(3));
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn test_insert_beyond_capacity_panics() {
        let mut keys = Keys::new(vec![1, 2]);
        let mut heap = IndexedHeap::with_capacity(1);
        heap.insert(&mut keys, 0);
        heap.insert(&mut keys, 1);
    }

    #[test]
    fn test_clear_resets_slots() {
        let mut keys = Keys::new(vec![1, 2]);
        let mut heap = IndexedHeap::with_capacity(2);
        heap.insert(&mut keys, 0);
        heap.insert(&mut keys, 1);
        heap.clear(&mut keys);
        assert!(heap.is_empty());
        assert_eq!(keys.slots, vec![NOT_IN_HEAP, NOT_IN_HEAP]);
    }

    #[test]
    fn test_random_operations_match_reference() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 200;
        let mut keys = Keys::new((0..n).map(|_| rng.random_range(0..1000)).collect());
        let mut heap = IndexedHeap::with_capacity(n);
        let mut live: Vec<usize> = Vec::new();
        let mut next = 0;

        for _ in 0..2000 {
            match rng.random_range(0..3) {
                0 if next < n => {
                    heap.insert(&mut keys, next);
                    live.push(next);
                    next += 1;
                }
                1 if !live.is_empty() => {
                    let pick = live[rng.random_range(0..live.len())];
                    keys.keys[pick] -= rng.random_range(0..50);
                    heap.update(&mut keys, pick);
                }
                _ => {
                    let expected = live.iter().map(|&i| keys.keys[i]).min();
                    let got = heap.extract_top(&mut keys);
                    assert_eq!(got.map(|i| keys.keys[i]), expected);
                    if let Some(i) = got {
                        live.retain(|&x| x != i);
                    }
                }
            }
            assert_eq!(heap.count(), live.len());
            assert!(heap.is_valid(&keys));
        }
    }
}
