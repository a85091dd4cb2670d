//! probe-dictionary: a single-threaded open-addressing map with linear
//! probing, tombstoned deletion and resizing in both directions, plus live
//! key/value/entry views whose cursors can remove entries.
//!
//! Internal Design:
//!
//! Summary
//! - Layers:
//!   - SlotTable<K, V>: fixed-length slice of `Empty | Live(entry) |
//!     Tombstone` slots and the linear probe over it.
//!   - Dictionary<K, V, S>: map operations on top of the table, with the
//!     live count, occupied count (live + tombstones) and the resize policy.
//!   - View<M, P>: key set, value collection and entry set as projections
//!     of a borrowed dictionary; `Cursor` adds removal.
//!
//! Probing
//! - Start index is `hash % capacity` (hashes are `u64`, never negative);
//!   scan forward with wraparound to the first empty slot or the first live
//!   entry with an equal key. Tombstones never match.
//! - Each entry stores its precomputed hash; rebuilds re-insert by stored
//!   hash and `K: Hash` is not invoked again.
//!
//! Resize policy
//! - Checked after every insert and remove. Occupancy counts tombstones.
//! - Occupancy above the load factor: rebuild at double capacity.
//! - Occupancy below a quarter of the load factor and capacity above the
//!   configured minimum: rebuild at half capacity.
//! - A rebuild re-inserts live entries into a fresh table and drops all
//!   tombstones; it is the only way tombstones are reclaimed.
//! - `clear()` resets to the minimum capacity.
//!
//! Views and cursors
//! - Views hold the borrow, never a copy of the table. Read-only views
//!   borrow `&Dictionary`; `_mut` views borrow `&mut Dictionary` and hand out
//!   a `Cursor` with `has_next`/`next`/`remove`.
//! - Cursor removal tombstones without rebuilding, keeping slot indices
//!   valid during traversal; the resize check runs when the cursor drops.
//! - All other view mutators fail with `ViewError::UnsupportedMutation`.
//!
//! Constraints
//! - Single-threaded; no interior mutability and no locking. The borrow
//!   checker rules out mutating the dictionary while a view is alive.
//! - Absence is `Option::None`, never a sentinel value.
//! - Worst-case probe length is O(capacity) under clustering; there is no
//!   secondary hashing.

mod config;
mod dictionary;
mod dictionary_proptest;
mod error;
mod slot;
mod unmodifiable;
pub mod view;

// Public surface
pub use config::{DictionaryConfig, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use dictionary::Dictionary;
pub use error::{ConfigError, ViewError};
pub use unmodifiable::{UnmodifiableCollection, UnmodifiableSet};
pub use view::{
    Cursor, EntrySet, EntrySetMut, Iter, KeySet, KeySetMut, ValueCollection, ValueCollectionMut,
    View,
};
