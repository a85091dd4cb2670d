//! Dictionary: map core and resize policy over the slot table.

use crate::config::{DictionaryConfig, GROWTH_FACTOR, SHRINK_THRESHOLD};
use crate::error::ConfigError;
use crate::slot::{Entry, SlotTable};
use crate::view::{
    EntrySet, EntrySetMut, Iter, KeySet, KeySetMut, ProjectEntry, ValueCollection,
    ValueCollectionMut, View,
};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::Index;
use std::collections::hash_map::RandomState;

/// Open-addressing map with linear probing and lazy (tombstoned) deletion.
///
/// The table is rebuilt when occupancy (live entries plus tombstones) rises
/// above the load factor, and halved when it falls below a quarter of it.
/// Rebuilds are the only point at which tombstones are reclaimed.
pub struct Dictionary<K, V, S = RandomState> {
    pub(crate) table: SlotTable<K, V>,
    len: usize,
    occupied: usize,
    load_factor: f64,
    min_capacity: usize,
    hasher: S,
}

impl<K, V> Dictionary<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    pub fn with_config(config: DictionaryConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, Default::default())
    }

    pub fn with_load_factor(load_factor: f64) -> Result<Self, ConfigError> {
        Self::with_config(DictionaryConfig::new().load_factor(load_factor))
    }

    pub fn with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f64,
    ) -> Result<Self, ConfigError> {
        Self::with_config(
            DictionaryConfig::new()
                .initial_capacity(capacity)
                .load_factor(load_factor),
        )
    }
}

impl<K, V> Default for Dictionary<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Dictionary<K, V, S> {
    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of slots in the table.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Live entries plus tombstones.
    #[inline]
    pub(crate) fn occupied(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub(crate) fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Drop every entry and reset the table to the minimum capacity.
    pub fn clear(&mut self) {
        tracing::trace!(live = self.len, capacity = self.capacity(), "clearing dictionary");
        self.table = SlotTable::with_capacity(self.min_capacity);
        self.len = 0;
        self.occupied = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V, ProjectEntry> {
        Iter::new(self.table.slots(), self.len)
    }

    /// Tombstone the live slot at `index` without consulting the resize policy.
    pub(crate) fn bury_at(&mut self, index: usize) -> Option<(K, V)> {
        let entry = self.table.bury(index)?;
        self.len -= 1;
        Some((entry.key, entry.value))
    }
}

impl<K, V, S> Dictionary<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        let config = DictionaryConfig::default();
        Self {
            table: SlotTable::with_capacity(config.initial_capacity),
            len: 0,
            occupied: 0,
            load_factor: config.load_factor,
            min_capacity: config.initial_capacity,
            hasher,
        }
    }

    pub fn with_config_and_hasher(config: DictionaryConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            table: SlotTable::with_capacity(config.initial_capacity),
            len: 0,
            occupied: 0,
            load_factor: config.load_factor,
            min_capacity: config.initial_capacity,
            hasher,
        })
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Index of the live slot holding `q`, if any.
    pub(crate) fn find<Q>(&self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let index = self.table.find(hash, |k| k.borrow() == q);
        self.table.live(index).map(|_| index)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(q).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find(q)?;
        self.table.live(index).map(|e| (&e.key, &e.value))
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find(q)?;
        self.table.live_mut(index).map(|e| &mut e.value)
    }

    /// Linear scan over live entries.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }

    /// Insert or overwrite. Returns the previous value when `key` was live;
    /// the stored key is kept on overwrite.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        let previous = self.insert_hashed(hash, key, value);
        self.maybe_rebuild();
        previous
    }

    fn insert_hashed(&mut self, hash: u64, key: K, value: V) -> Option<V> {
        let index = self.table.find(hash, |k| *k == key);
        if let Some(entry) = self.table.live_mut(index) {
            return Some(core::mem::replace(&mut entry.value, value));
        }
        self.table.occupy(index, Entry { key, value, hash });
        self.len += 1;
        self.occupied += 1;
        None
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find(q)?;
        let removed = self.bury_at(index);
        self.maybe_rebuild();
        removed
    }

    /// Grow when occupancy exceeds the load factor, shrink when it falls below
    /// `load_factor * SHRINK_THRESHOLD` and the table is above minimum capacity.
    pub(crate) fn maybe_rebuild(&mut self) {
        let capacity = self.capacity();
        let ratio = self.occupied() as f64 / capacity as f64;
        if ratio > self.load_factor {
            // Doubling once is not always enough for very small load factors.
            let mut target = capacity * GROWTH_FACTOR;
            while self.len as f64 / target as f64 > self.load_factor {
                target *= GROWTH_FACTOR;
            }
            self.rebuild(target);
        } else if ratio < self.load_factor * SHRINK_THRESHOLD && capacity > self.min_capacity() {
            self.rebuild((capacity / GROWTH_FACTOR).max(self.min_capacity()));
        }
    }

    fn rebuild(&mut self, capacity: usize) {
        tracing::debug!(
            from = self.capacity(),
            to = capacity,
            live = self.len,
            tombstones = self.occupied() - self.len,
            "rebuilding slot table"
        );
        let old = core::mem::replace(&mut self.table, SlotTable::with_capacity(capacity));
        self.len = 0;
        self.occupied = 0;
        for entry in old.into_live_entries() {
            let _ = self.insert_hashed(entry.hash, entry.key, entry.value);
        }
        debug_assert_eq!(self.len, self.occupied);
    }

    pub fn key_set(&self) -> KeySet<'_, K, V, S> {
        View::new(self)
    }

    pub fn value_collection(&self) -> ValueCollection<'_, K, V, S> {
        View::new(self)
    }

    pub fn entry_set(&self) -> EntrySet<'_, K, V, S> {
        View::new(self)
    }

    pub fn key_set_mut(&mut self) -> KeySetMut<'_, K, V, S> {
        View::new(self)
    }

    pub fn value_collection_mut(&mut self) -> ValueCollectionMut<'_, K, V, S> {
        View::new(self)
    }

    pub fn entry_set_mut(&mut self) -> EntrySetMut<'_, K, V, S> {
        View::new(self)
    }
}

impl<K, V, S> Clone for Dictionary<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            len: self.len,
            occupied: self.occupied,
            load_factor: self.load_factor,
            min_capacity: self.min_capacity,
            hasher: self.hasher.clone(),
        }
    }
}

impl<K, V, S> fmt::Debug for Dictionary<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two dictionaries are equal when they hold the same key/value pairs,
/// regardless of capacity, hasher or slot layout.
impl<K, V, S> PartialEq for Dictionary<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).map_or(false, |ov| v == ov))
    }
}

impl<K, V, S> Eq for Dictionary<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for Dictionary<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            let _ = self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for Dictionary<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, Q, V, S> Index<&Q> for Dictionary<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Eq + Hash,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V, S> IntoIterator for &'a Dictionary<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, ProjectEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
