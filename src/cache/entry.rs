//! Cache Entry Module
//!
//! Defines a single cached key/value pair and its links in the recency order.

// == Slot Id ==
/// Position of an entry inside the recency list's slot arena.
pub type SlotId = usize;

// == Cache Entry ==
/// One cached key/value pair plus its neighbours in recency order.
///
/// `prev` and `next` are arena indices, not owning references: the list
/// owns every entry and the links only describe position.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    /// Key, kept for reverse lookup in the index during eviction
    pub key: K,
    /// The stored value, replaced in place on overwrite
    pub value: V,
    /// Neighbour closer to the front (more recently used)
    pub(crate) prev: Option<SlotId>,
    /// Neighbour closer to the rear (less recently used)
    pub(crate) next: Option<SlotId>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates an entry that is not yet linked into any list.
    pub fn detached(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    // == Is Detached ==
    /// True when the entry has no neighbours on either side.
    ///
    /// A linked entry is detached only when it is the sole element.
    pub fn is_detached(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }

    /// Slot of the more recently used neighbour.
    pub fn prev(&self) -> Option<SlotId> {
        self.prev
    }

    /// Slot of the less recently used neighbour.
    pub fn next(&self) -> Option<SlotId> {
        self.next
    }

    /// Consumes the entry, returning its key and value.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_detached() {
        let entry = Entry::detached("k", 1);

        assert_eq!(entry.key, "k");
        assert_eq!(entry.value, 1);
        assert!(entry.is_detached());
    }

    #[test]
    fn test_entry_linked_is_not_detached() {
        let mut entry = Entry::detached("k", 1);
        entry.next = Some(3);

        assert!(!entry.is_detached());
    }

    #[test]
    fn test_entry_into_pair() {
        let entry = Entry::detached("k".to_string(), vec![1, 2]);
        assert_eq!(entry.into_pair(), ("k".to_string(), vec![1, 2]));
    }
}
