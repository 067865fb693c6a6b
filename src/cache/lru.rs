//! LRU Recency List Module
//!
//! Implements the recency order used for LRU eviction.
//!
//! Entries live in a flat slot arena and are chained into a doubly linked
//! list through slot indices, which gives O(1) move-to-front and O(1)
//! removal from the rear without shared mutable references.

use crate::cache::entry::{Entry, SlotId};

// == Recency List ==
/// Doubly linked recency order over an arena of entries.
///
/// - Front = Most recently used
/// - Rear = Least recently used
#[derive(Debug)]
pub struct RecencyList<K, V> {
    /// Entry arena; `None` marks a free slot
    slots: Vec<Option<Entry<K, V>>>,
    /// Freed slots available for reuse
    free: Vec<SlotId>,
    /// Most recently used entry
    front: Option<SlotId>,
    /// Least recently used entry
    rear: Option<SlotId>,
    /// Number of linked entries
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            front: None,
            rear: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Links a new entry as the most recently used and returns its slot.
    ///
    /// On an empty list the entry becomes both front and rear.
    pub fn push_front(&mut self, key: K, value: V) -> SlotId {
        let slot = self.allocate(Entry::detached(key, value));

        match self.front {
            None => {
                self.front = Some(slot);
                self.rear = Some(slot);
            }
            Some(old_front) => self.link_front(slot, old_front),
        }

        self.len += 1;
        slot
    }

    // == Move To Front ==
    /// Marks an entry as most recently used.
    ///
    /// No-op when the entry is already the front, which includes the case
    /// where it is the only entry, and when `slot` is free.
    pub fn move_to_front(&mut self, slot: SlotId) {
        let Some(old_front) = self.front else {
            return;
        };
        if old_front == slot {
            return;
        }

        let Some((prev, next)) = self.get(slot).map(|entry| (entry.prev, entry.next)) else {
            return;
        };

        // Anything that is not the front has a predecessor
        let Some(prev) = prev else {
            return;
        };

        self.entry_mut(prev).next = next;
        match next {
            Some(next) => self.entry_mut(next).prev = Some(prev),
            None => self.rear = Some(prev),
        }

        self.link_front(slot, old_front);
    }

    // == Pop Rear ==
    /// Detaches and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_rear(&mut self) -> Option<(K, V)> {
        let rear = self.rear?;
        let entry = self.release(rear);

        match entry.prev {
            Some(prev) => {
                self.entry_mut(prev).next = None;
                self.rear = Some(prev);
            }
            None => {
                self.front = None;
                self.rear = None;
            }
        }

        self.len -= 1;
        Some(entry.into_pair())
    }

    // == Peek Rear ==
    /// Returns the least recently used entry without removing it.
    pub fn peek_rear(&self) -> Option<(&K, &V)> {
        self.rear.map(|slot| {
            let entry = self.entry(slot);
            (&entry.key, &entry.value)
        })
    }

    // == Drain ==
    /// Removes every entry, returning the pairs in unspecified order.
    ///
    /// The list stays usable and keeps its slot allocation.
    pub fn drain(&mut self) -> Vec<(K, V)> {
        let pairs = self
            .slots
            .drain(..)
            .flatten()
            .map(Entry::into_pair)
            .collect();

        self.free.clear();
        self.front = None;
        self.rear = None;
        self.len = 0;
        pairs
    }

    // == Accessors ==
    /// Borrows the entry stored in `slot`, if occupied.
    pub fn get(&self, slot: SlotId) -> Option<&Entry<K, V>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Mutably borrows the value stored in `slot`, if occupied.
    ///
    /// Links are owned by the list; only the value can be changed.
    pub fn value_mut(&mut self, slot: SlotId) -> Option<&mut V> {
        self.slot_mut(slot).map(|entry| &mut entry.value)
    }

    /// Slot of the most recently used entry.
    pub fn front(&self) -> Option<SlotId> {
        self.front
    }

    /// Slot of the least recently used entry.
    pub fn rear(&self) -> Option<SlotId> {
        self.rear
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.front,
        }
    }

    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    // == Internal Helpers ==
    fn link_front(&mut self, slot: SlotId, old_front: SlotId) {
        self.entry_mut(old_front).prev = Some(slot);

        let entry = self.entry_mut(slot);
        entry.prev = None;
        entry.next = Some(old_front);

        self.front = Some(slot);
    }

    fn allocate(&mut self, entry: Entry<K, V>) -> SlotId {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, slot: SlotId) -> Entry<K, V> {
        let entry = self.slots[slot]
            .take()
            .expect("linked slot must be occupied");
        self.free.push(slot);
        entry
    }

    fn entry(&self, slot: SlotId) -> &Entry<K, V> {
        self.get(slot).expect("linked slot must be occupied")
    }

    fn entry_mut(&mut self, slot: SlotId) -> &mut Entry<K, V> {
        self.slot_mut(slot).expect("linked slot must be occupied")
    }

    fn slot_mut(&mut self, slot: SlotId) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }
}

// == Iterator ==
/// Front-to-rear iterator over a [`RecencyList`].
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<SlotId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.cursor?)?;
        self.cursor = entry.next;
        Some((&entry.key, &entry.value))
    }
}
