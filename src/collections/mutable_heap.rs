//! Binary min-heap with externally tracked positions.
//!
//! The heap stores items only. Ordering and position bookkeeping live in a
//! [`HeapOrder`] supplied to every call, so the caller can keep keys and
//! slots in its own arrays and lower a key in place before calling
//! [`MutableHeap::decrease_key`] with the item's current slot.

/// Ordering and position callbacks for [`MutableHeap`].
pub trait HeapOrder<T> {
    /// Returns `true` if `a` must be extracted before `b`.
    fn less(&self, a: &T, b: &T) -> bool;

    /// Called whenever `item` is placed at `slot`.
    fn moved(&mut self, item: &T, slot: usize);
}

/// [`HeapOrder`] built from a comparator and a position-update closure.
pub struct ClosureOrder<L, M> {
    less: L,
    moved: M,
}

impl<L, M> ClosureOrder<L, M> {
    /// Wraps `less(a, b) -> bool` and `moved(item, slot)`.
    pub fn new(less: L, moved: M) -> Self {
        Self { less, moved }
    }
}

impl<T, L, M> HeapOrder<T> for ClosureOrder<L, M>
where
    L: Fn(&T, &T) -> bool,
    M: FnMut(&T, usize),
{
    fn less(&self, a: &T, b: &T) -> bool {
        (self.less)(a, b)
    }

    fn moved(&mut self, item: &T, slot: usize) {
        (self.moved)(item, slot);
    }
}

/// Binary min-heap supporting `O(log n)` decrease-key.
#[derive(Debug, Clone)]
pub struct MutableHeap<T> {
    items: Vec<T>,
}

impl<T> Default for MutableHeap<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> MutableHeap<T> {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a heap from `items` in `O(n)`, reporting every final slot.
    pub fn from_vec<O: HeapOrder<T>>(items: Vec<T>, order: &mut O) -> Self {
        let mut heap = Self { items };
        for (slot, item) in heap.items.iter().enumerate() {
            order.moved(item, slot);
        }
        for slot in (0..heap.items.len() / 2).rev() {
            heap.sift_down(slot, order);
        }
        heap
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the heap holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The minimum item.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Item currently stored at `slot`.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&T> {
        self.items.get(slot)
    }

    /// Removes every item without notifying the order.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Inserts an item.
    pub fn push<O: HeapOrder<T>>(&mut self, item: T, order: &mut O) {
        let slot = self.items.len();
        self.items.push(item);
        order.moved(&self.items[slot], slot);
        self.sift_up(slot, order);
    }

    /// Removes and returns the minimum item.
    pub fn pop<O: HeapOrder<T>>(&mut self, order: &mut O) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let top = self.items.swap_remove(0);
        if !self.items.is_empty() {
            order.moved(&self.items[0], 0);
            self.sift_down(0, order);
        }
        Some(top)
    }

    /// Restores heap order after the key of the item at `slot` was lowered.
    ///
    /// Out-of-range slots are ignored.
    pub fn decrease_key<O: HeapOrder<T>>(&mut self, slot: usize, order: &mut O) {
        if slot < self.items.len() {
            self.sift_up(slot, order);
        }
    }

    /// Restores heap order after the key at `slot` changed in either
    /// direction.
    pub fn update_key<O: HeapOrder<T>>(&mut self, slot: usize, order: &mut O) {
        if slot < self.items.len() {
            let slot = self.sift_up(slot, order);
            self.sift_down(slot, order);
        }
    }

    fn swap<O: HeapOrder<T>>(&mut self, a: usize, b: usize, order: &mut O) {
        self.items.swap(a, b);
        order.moved(&self.items[a], a);
        order.moved(&self.items[b], b);
    }

    fn sift_up<O: HeapOrder<T>>(&mut self, mut slot: usize, order: &mut O) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !order.less(&self.items[slot], &self.items[parent]) {
                break;
            }
            self.swap(slot, parent, order);
            slot = parent;
        }
        slot
    }

    fn sift_down<O: HeapOrder<T>>(&mut self, mut slot: usize, order: &mut O) {
        let len = self.items.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && order.less(&self.items[left], &self.items[smallest]) {
                smallest = left;
            }
            if right < len && order.less(&self.items[right], &self.items[smallest]) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest, order);
            slot = smallest;
        }
    }
}
