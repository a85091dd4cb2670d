//! Slot table and linear-probe lookup.
//!
//! The table is a fixed-length boxed slice; its length only changes when the
//! owning dictionary swaps in a freshly allocated table during a rebuild.

#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
}

/// A tombstone keeps its slot occupied for probing purposes but holds no data:
/// the removed key and value are handed back to the caller on removal.
#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    Empty,
    Live(Entry<K, V>),
    Tombstone,
}

#[derive(Debug, Clone)]
pub(crate) struct SlotTable<K, V> {
    slots: Box<[Slot<K, V>]>,
}

impl<K, V> SlotTable<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: (0..capacity).map(|_| Slot::Empty).collect(),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    /// Linear probe starting at `hash % capacity`, wrapping around. Stops at
    /// the first empty slot or the first live entry accepted by `eq`.
    /// Tombstones are stepped over, never matched.
    pub(crate) fn find(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> usize {
        let capacity = self.capacity();
        let mut index = (hash % capacity as u64) as usize;
        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => return index,
                Slot::Live(e) if e.hash == hash && eq(&e.key) => return index,
                _ => {}
            }
            index = (index + 1) % capacity;
        }
        unreachable!("slot table of capacity {capacity} has no empty slot");
    }

    #[inline]
    pub(crate) fn live(&self, index: usize) -> Option<&Entry<K, V>> {
        match &self.slots[index] {
            Slot::Live(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn live_mut(&mut self, index: usize) -> Option<&mut Entry<K, V>> {
        match &mut self.slots[index] {
            Slot::Live(e) => Some(e),
            _ => None,
        }
    }

    /// Write `entry` into a slot that holds no live entry.
    pub(crate) fn occupy(&mut self, index: usize, entry: Entry<K, V>) {
        debug_assert!(!matches!(self.slots[index], Slot::Live(_)));
        self.slots[index] = Slot::Live(entry);
    }

    /// Replace a live entry with a tombstone, returning the entry.
    pub(crate) fn bury(&mut self, index: usize) -> Option<Entry<K, V>> {
        match std::mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Live(e) => Some(e),
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Index of the first live slot at or after `from`.
    pub(crate) fn next_live(&self, from: usize) -> Option<usize> {
        next_live(&self.slots, from)
    }

    pub(crate) fn into_live_entries(self) -> impl Iterator<Item = Entry<K, V>> {
        self.slots.into_vec().into_iter().filter_map(|slot| match slot {
            Slot::Live(e) => Some(e),
            _ => None,
        })
    }
}

pub(crate) fn next_live<K, V>(slots: &[Slot<K, V>], from: usize) -> Option<usize> {
    slots
        .get(from..)?
        .iter()
        .position(|s| matches!(s, Slot::Live(_)))
        .map(|offset| from + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: u32, hash: u64) -> Entry<u32, &'static str> {
        Entry {
            key,
            value: "v",
            hash,
        }
    }

    /// Invariant: a probe into an empty table lands on the home slot.
    #[test]
    fn probe_lands_on_home_slot() {
        let t: SlotTable<u32, &str> = SlotTable::with_capacity(8);
        assert_eq!(t.find(3, |_| true), 3);
        assert_eq!(t.find(11, |_| true), 3);
    }

    /// Invariant: colliding keys chain forward and wrap past the end of the table.
    #[test]
    fn probe_wraps_around() {
        let mut t = SlotTable::with_capacity(4);
        t.occupy(3, entry(1, 7));
        let idx = t.find(7, |k| *k == 2);
        assert_eq!(idx, 0);
        t.occupy(idx, entry(2, 7));
        assert_eq!(t.find(7, |k| *k == 2), 0);
        assert_eq!(t.find(7, |k| *k == 1), 3);
    }

    /// Invariant: tombstones are skipped during lookup, keeping later chain members reachable.
    #[test]
    fn probe_skips_tombstones() {
        let mut t = SlotTable::with_capacity(8);
        t.occupy(2, entry(1, 2));
        t.occupy(3, entry(2, 2));
        assert_eq!(t.bury(2).map(|e| e.key), Some(1));
        assert_eq!(t.find(2, |k| *k == 2), 3);
        // The buried key is not found at its old slot; the probe runs to the first empty slot.
        assert_eq!(t.find(2, |k| *k == 1), 4);
    }

    /// Invariant: burying a non-live slot is a no-op.
    #[test]
    fn bury_only_affects_live_slots() {
        let mut t: SlotTable<u32, &str> = SlotTable::with_capacity(2);
        assert!(t.bury(0).is_none());
        assert!(matches!(t.slots()[0], Slot::Empty));
    }

    /// Invariant: `next_live` skips empty and tombstoned slots and stops at the end.
    #[test]
    fn next_live_skips_gaps() {
        let mut t = SlotTable::with_capacity(6);
        t.occupy(1, entry(1, 1));
        t.occupy(4, entry(4, 4));
        t.occupy(5, entry(5, 5));
        let _ = t.bury(4);
        assert_eq!(t.next_live(0), Some(1));
        assert_eq!(t.next_live(2), Some(5));
        assert_eq!(t.next_live(6), None);
        assert_eq!(t.next_live(60), None);
        let keys: Vec<u32> = t.into_live_entries().map(|e| e.key).collect();
        assert_eq!(keys, vec![1, 5]);
    }
}
