//! Key, value and entry views over a `Dictionary`.
//!
//! All three views are instantiations of one `View<M, P>`: `M` is the borrow
//! of the dictionary (`&Dictionary` for read-only views, `&mut Dictionary` for
//! views that can remove through a cursor) and `P` projects a live slot to the
//! item the view yields. Views never copy the table; every read goes through
//! the borrowed dictionary's current state.

use crate::dictionary::Dictionary;
use crate::error::ViewError;
use crate::slot::{self, Slot};
use crate::unmodifiable::{UnmodifiableCollection, UnmodifiableSet};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use std::collections::hash_map::RandomState;

/// Maps a live `(key, value)` slot to the item a view yields.
pub trait Projection<K, V> {
    /// Owned element type, used by the unmodifiable-collection traits.
    type Element;
    type Item<'a>
    where
        K: 'a,
        V: 'a;

    fn project<'a>(key: &'a K, value: &'a V) -> Self::Item<'a>;
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectKey;
#[derive(Debug, Clone, Copy)]
pub struct ProjectValue;
#[derive(Debug, Clone, Copy)]
pub struct ProjectEntry;

impl<K, V> Projection<K, V> for ProjectKey {
    type Element = K;
    type Item<'a> = &'a K where K: 'a, V: 'a;

    #[inline]
    fn project<'a>(key: &'a K, _value: &'a V) -> &'a K {
        key
    }
}

impl<K, V> Projection<K, V> for ProjectValue {
    type Element = V;
    type Item<'a> = &'a V where K: 'a, V: 'a;

    #[inline]
    fn project<'a>(_key: &'a K, value: &'a V) -> &'a V {
        value
    }
}

impl<K, V> Projection<K, V> for ProjectEntry {
    type Element = (K, V);
    type Item<'a> = (&'a K, &'a V) where K: 'a, V: 'a;

    #[inline]
    fn project<'a>(key: &'a K, value: &'a V) -> (&'a K, &'a V) {
        (key, value)
    }
}

/// A live projection over a dictionary. See the module docs.
pub struct View<M, P> {
    map: M,
    _projection: PhantomData<fn() -> P>,
}

pub type KeySet<'a, K, V, S = RandomState> = View<&'a Dictionary<K, V, S>, ProjectKey>;
pub type ValueCollection<'a, K, V, S = RandomState> = View<&'a Dictionary<K, V, S>, ProjectValue>;
pub type EntrySet<'a, K, V, S = RandomState> = View<&'a Dictionary<K, V, S>, ProjectEntry>;
pub type KeySetMut<'a, K, V, S = RandomState> = View<&'a mut Dictionary<K, V, S>, ProjectKey>;
pub type ValueCollectionMut<'a, K, V, S = RandomState> =
    View<&'a mut Dictionary<K, V, S>, ProjectValue>;
pub type EntrySetMut<'a, K, V, S = RandomState> = View<&'a mut Dictionary<K, V, S>, ProjectEntry>;

impl<M, P> View<M, P> {
    pub(crate) fn new(map: M) -> Self {
        Self {
            map,
            _projection: PhantomData,
        }
    }
}

impl<M, P, K, V, S> View<M, P>
where
    M: Deref<Target = Dictionary<K, V, S>>,
    P: Projection<K, V>,
{
    /// Live entry count of the underlying dictionary.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter<'a>(&'a self) -> Iter<'a, K, V, P>
    where
        S: 'a,
    {
        Iter::new(self.map.table.slots(), self.map.len())
    }
}

impl<M, P, K, V, S> View<M, P>
where
    M: DerefMut<Target = Dictionary<K, V, S>>,
    P: Projection<K, V>,
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Cursor that can remove the entries it visits.
    pub fn cursor(&mut self) -> Cursor<'_, K, V, S, P> {
        Cursor::new(&mut *self.map)
    }
}

impl<M, K, V, S> View<M, ProjectKey>
where
    M: Deref<Target = Dictionary<K, V, S>>,
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }
}

impl<M, K, V, S> View<M, ProjectKey>
where
    M: Deref<Target = Dictionary<K, V, S>>,
    K: Hash,
{
    /// Order-independent hash of the key set: the wrapping sum of each key's
    /// hash under `build`. Equal key sets agree under the same `build`.
    pub fn set_hash<B: BuildHasher>(&self, build: &B) -> u64 {
        self.map
            .iter()
            .fold(0u64, |acc, (k, _)| acc.wrapping_add(build.hash_one(k)))
    }
}

impl<M, K, V, S> View<M, ProjectValue>
where
    M: Deref<Target = Dictionary<K, V, S>>,
    V: PartialEq,
{
    /// Linear scan; values are not indexed.
    pub fn contains(&self, value: &V) -> bool {
        self.map.iter().any(|(_, v)| v == value)
    }

    pub fn contains_all<'e, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'e V>,
        V: 'e,
    {
        values.into_iter().all(|v| self.contains(v))
    }
}

impl<M, K, V, S> View<M, ProjectEntry>
where
    M: Deref<Target = Dictionary<K, V, S>>,
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    /// True when `key` is live and mapped to a value equal to `value`.
    pub fn contains_entry<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map_or(false, |v| v == value)
    }
}

impl<M, K, V, S> View<M, ProjectEntry>
where
    M: Deref<Target = Dictionary<K, V, S>>,
    K: Hash,
    V: Hash,
{
    /// Wrapping sum of the `(key, value)` pair hashes under `build`.
    pub fn set_hash<B: BuildHasher>(&self, build: &B) -> u64 {
        self.map
            .iter()
            .fold(0u64, |acc, entry| acc.wrapping_add(build.hash_one(entry)))
    }
}

impl<'v, M, P, K, V, S> IntoIterator for &'v View<M, P>
where
    M: Deref<Target = Dictionary<K, V, S>>,
    P: Projection<K, V>,
    K: 'v,
    V: 'v,
    S: 'v,
{
    type Item = P::Item<'v>;
    type IntoIter = Iter<'v, K, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S, P> IntoIterator for View<&'a Dictionary<K, V, S>, P>
where
    P: Projection<K, V>,
    K: 'a,
    V: 'a,
{
    type Item = P::Item<'a>;
    type IntoIter = Iter<'a, K, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self.map.table.slots(), self.map.len())
    }
}

impl<M, P, K, V, S> UnmodifiableCollection for View<M, P>
where
    M: Deref<Target = Dictionary<K, V, S>>,
    P: Projection<K, V>,
{
    type Element = P::Element;

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<M, K, V, S> UnmodifiableSet for View<M, ProjectKey>
where
    M: Deref<Target = Dictionary<K, V, S>>,
    K: Eq + Hash,
    S: BuildHasher,
{
    fn contains(&self, element: &K) -> bool {
        self.map.contains_key(element)
    }
}

impl<M, K, V, S> UnmodifiableSet for View<M, ProjectEntry>
where
    M: Deref<Target = Dictionary<K, V, S>>,
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn contains(&self, element: &(K, V)) -> bool {
        self.contains_entry(&element.0, &element.1)
    }
}

/// Read-only iterator over the live slots of a table, in slot order.
pub struct Iter<'a, K, V, P> {
    slots: &'a [Slot<K, V>],
    cursor: usize,
    remaining: usize,
    _projection: PhantomData<fn() -> P>,
}

impl<'a, K, V, P> Iter<'a, K, V, P> {
    pub(crate) fn new(slots: &'a [Slot<K, V>], len: usize) -> Self {
        Self {
            slots,
            cursor: 0,
            remaining: len,
            _projection: PhantomData,
        }
    }
}

impl<'a, K, V, P> Iterator for Iter<'a, K, V, P>
where
    P: Projection<K, V>,
    K: 'a,
    V: 'a,
{
    type Item = P::Item<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        let index = slot::next_live(slots, self.cursor)?;
        self.cursor = index + 1;
        self.remaining -= 1;
        match &slots[index] {
            Slot::Live(e) => Some(P::project(&e.key, &e.value)),
            _ => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, P> ExactSizeIterator for Iter<'a, K, V, P>
where
    P: Projection<K, V>,
    K: 'a,
    V: 'a,
{
}

impl<'a, K, V, P> FusedIterator for Iter<'a, K, V, P>
where
    P: Projection<K, V>,
    K: 'a,
    V: 'a,
{
}

/// Removal-capable traversal over a dictionary's live slots.
///
/// State is a slot index (`cursor`) and the index handed out by the last
/// successful `next` (`last_returned`). Every call re-reads the dictionary's
/// table. Removal tombstones without rebuilding so that slot indices stay
/// valid; the resize check runs once the cursor is dropped.
///
/// Mutating the dictionary by other means while a cursor exists is prevented
/// by the borrow the cursor holds.
pub struct Cursor<'a, K, V, S, P>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    map: &'a mut Dictionary<K, V, S>,
    cursor: usize,
    last_returned: Option<usize>,
    removed_any: bool,
    _projection: PhantomData<fn() -> P>,
}

impl<'a, K, V, S, P> Cursor<'a, K, V, S, P>
where
    K: Eq + Hash,
    S: BuildHasher,
    P: Projection<K, V>,
{
    pub(crate) fn new(map: &'a mut Dictionary<K, V, S>) -> Self {
        Self {
            map,
            cursor: 0,
            last_returned: None,
            removed_any: false,
            _projection: PhantomData,
        }
    }

    /// Advance past empty and tombstoned slots without consuming an item.
    /// Idempotent.
    pub fn has_next(&mut self) -> bool {
        match self.map.table.next_live(self.cursor) {
            Some(index) => {
                self.cursor = index;
                true
            }
            None => {
                self.cursor = self.map.capacity();
                false
            }
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<P::Item<'_>, ViewError> {
        if !self.has_next() {
            return Err(ViewError::Exhausted);
        }
        let index = self.cursor;
        self.last_returned = Some(index);
        self.cursor += 1;
        self.map
            .table
            .live(index)
            .map(|e| P::project(&e.key, &e.value))
            .ok_or(ViewError::Exhausted)
    }

    /// Remove the entry returned by the last `next`, handing it back.
    pub fn remove(&mut self) -> Result<(K, V), ViewError> {
        let index = self.last_returned.take().ok_or(ViewError::IllegalRemove)?;
        let removed = self.map.bury_at(index).ok_or(ViewError::IllegalRemove)?;
        self.removed_any = true;
        Ok(removed)
    }
}

impl<'a, K, V, S, P> Drop for Cursor<'a, K, V, S, P>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn drop(&mut self) {
        if self.removed_any {
            self.map.maybe_rebuild();
        }
    }
}
