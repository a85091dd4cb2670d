use probe_dictionary::{Dictionary, UnmodifiableCollection, UnmodifiableSet, ViewError};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{BuildHasher, BuildHasherDefault};

fn sample() -> Dictionary<u32, String> {
    let mut d = Dictionary::new();
    for k in 0..50u32 {
        d.insert(k, format!("v{k}"));
    }
    d
}

// Test: removal through a key-set cursor.
// Assumes: the cursor hands back the removed pair and tombstones its slot.
// Verifies: the key is gone from the map and from all three views; len drops by one.
#[test]
fn key_cursor_removal_is_visible_everywhere() {
    let mut d = sample();
    {
        let mut keys = d.key_set_mut();
        let mut c = keys.cursor();
        loop {
            match c.next() {
                Ok(&k) if k == 17 => {
                    let (rk, rv) = c.remove().unwrap();
                    assert_eq!((rk, rv.as_str()), (17, "v17"));
                    break;
                }
                Ok(_) => {}
                Err(e) => panic!("key 17 never visited: {e}"),
            }
        }
    }
    assert_eq!(d.len(), 49);
    assert!(!d.contains_key(&17));
    assert!(!d.key_set().contains(&17));
    assert!(!d.entry_set().contains_entry(&17, &"v17".to_string()));
    assert!(!d.value_collection().iter().any(|v| v == "v17"));
    assert_eq!(d.value_collection().iter().count(), 49);
}

// Test: in-place filtering through an entry-set cursor.
// Assumes: has_next/next/remove may be interleaved over the whole table.
// Verifies: exactly the odd keys are removed and the even keys survive.
#[test]
fn entry_cursor_filters_in_place() {
    let mut d = sample();
    let mut removed = Vec::new();
    {
        let mut entries = d.entry_set_mut();
        let mut c = entries.cursor();
        while c.has_next() {
            let odd = matches!(c.next(), Ok((k, _)) if k % 2 == 1);
            if odd {
                removed.push(c.remove().unwrap().0);
            }
        }
    }
    assert_eq!(removed.len(), 25);
    assert_eq!(d.len(), 25);
    let keys: BTreeSet<u32> = d.key_set().into_iter().copied().collect();
    assert_eq!(keys, (0..50).step_by(2).collect());
}

// Test: cursor state machine on a one-entry map.
// Assumes: remove is legal only once per successful next.
// Verifies: IllegalRemove before next and after a repeated remove; Exhausted past the end.
#[test]
fn cursor_misuse_is_reported() {
    let mut d: Dictionary<u32, u32> = Dictionary::new();
    d.insert(1, 1);
    let mut values = d.value_collection_mut();
    let mut c = values.cursor();
    assert_eq!(c.remove().err(), Some(ViewError::IllegalRemove));
    assert_eq!(c.next().copied(), Ok(1));
    assert!(c.remove().is_ok());
    assert_eq!(c.remove().err(), Some(ViewError::IllegalRemove));
    assert_eq!(c.next().err(), Some(ViewError::Exhausted));
}

// Test: views over an empty dictionary.
// Assumes: no live slots exist.
// Verifies: the iterator yields nothing; the cursor reports no next and Exhausted.
#[test]
fn empty_view_is_exhausted() {
    let mut d: Dictionary<String, u32> = Dictionary::new();
    assert_eq!(d.key_set().iter().next(), None);
    let mut keys = d.key_set_mut();
    let mut c = keys.cursor();
    assert!(!c.has_next());
    assert_eq!(c.next().err(), Some(ViewError::Exhausted));
}

// Test: mutators inherited from the unmodifiable-collection traits.
// Assumes: views only remove through a cursor.
// Verifies: every mutator returns UnsupportedMutation and the map is untouched.
#[test]
fn direct_view_mutation_is_unsupported() {
    let mut d = sample();
    let mut keys = d.key_set_mut();
    assert_eq!(keys.add(99), Err(ViewError::UnsupportedMutation));
    assert_eq!(keys.add_all([100, 101]), Err(ViewError::UnsupportedMutation));
    assert_eq!(UnmodifiableCollection::remove(&mut keys, &3), Err(ViewError::UnsupportedMutation));
    assert_eq!(keys.retain_all(&[1, 2]), Err(ViewError::UnsupportedMutation));
    assert_eq!(keys.remove_all(&[1, 2]), Err(ViewError::UnsupportedMutation));
    assert_eq!(keys.remove_if(|_| true), Err(ViewError::UnsupportedMutation));
    assert_eq!(UnmodifiableCollection::clear(&mut keys), Err(ViewError::UnsupportedMutation));
    assert_eq!(keys.len(), 50);
    drop(keys);

    let mut values = d.value_collection_mut();
    assert_eq!(values.add("x".to_string()), Err(ViewError::UnsupportedMutation));
    drop(values);

    let mut entries = d.entry_set_mut();
    assert_eq!(entries.add((7, "x".to_string())), Err(ViewError::UnsupportedMutation));
    drop(entries);
    assert_eq!(d.len(), 50);
}

// Test: view liveness.
// Assumes: views read the dictionary's current table rather than a snapshot.
// Verifies: a view built after insert/remove reflects both.
#[test]
fn views_track_later_mutation() {
    let mut d = sample();
    assert_eq!(d.key_set().len(), 50);
    d.insert(1000, "new".into());
    d.remove(&0);
    let keys = d.key_set();
    assert_eq!(keys.len(), 50);
    assert!(keys.contains(&1000));
    assert!(!keys.contains(&0));
    assert!(keys.contains_all(&[1, 2, 1000]));
}

// Test: set equality on the key view.
// Assumes: set_eq compares against a duplicate-free sequence.
// Verifies: the full key range matches; a range missing one key does not.
#[test]
fn key_set_equality() {
    let d = sample();
    let expected: Vec<u32> = (0..50).collect();
    assert!(d.key_set().set_eq(&expected));
    assert!(!d.key_set().set_eq(&expected[1..]));
}

// Test: ExactSizeIterator on view and map iterators.
// Assumes: the remaining count starts at len and drops per yielded item.
// Verifies: len() before and after one step, and count() of the rest.
#[test]
fn iterators_report_exact_len() {
    let mut d = sample();
    for k in 0..10 {
        d.remove(&k);
    }
    let values = d.value_collection();
    let mut it = values.iter();
    assert_eq!(it.len(), 40);
    it.next();
    assert_eq!(it.len(), 39);
    assert_eq!(it.count(), 39);
    assert_eq!(d.iter().len(), 40);
}

fn keys_through_views<S: BuildHasher>(d: &Dictionary<u32, String, S>) -> (Vec<u32>, Vec<u32>) {
    let view = d.key_set();
    let by_iter: Vec<u32> = view.iter().copied().collect();
    let mut by_ref = Vec::new();
    for k in &view {
        by_ref.push(*k);
    }
    (by_iter, by_ref)
}

// Test: borrowing iteration through a view whose hasher is a type parameter.
// Assumes: View::iter and `&View: IntoIterator` only borrow the view.
// Verifies: both walks see every live key in the same slot order.
#[test]
fn view_iteration_with_generic_hasher() {
    let mut d: Dictionary<u32, String, BuildHasherDefault<DefaultHasher>> =
        Dictionary::with_hasher(BuildHasherDefault::default());
    for k in 0..20u32 {
        d.insert(k, format!("v{k}"));
    }
    d.remove(&4);
    let (by_iter, by_ref) = keys_through_views(&d);
    assert_eq!(by_iter, by_ref);
    assert_eq!(by_iter.len(), 19);
    assert!(!by_iter.contains(&4));
}

// Test: value-view containment.
// Assumes: values are not indexed, so containment scans live entries.
// Verifies: present values are found, removed and foreign values are not.
#[test]
fn value_view_contains_scans_live_entries() {
    let mut d = sample();
    d.remove(&3);
    let values = d.value_collection();
    assert!(values.contains(&"v4".to_string()));
    assert!(!values.contains(&"v3".to_string()));
    assert!(!values.contains(&"v99".to_string()));
    assert!(values.contains_all(&["v0".to_string(), "v49".to_string()]));
    assert!(!values.contains_all(&["v0".to_string(), "v3".to_string()]));
}

// Test: order-independent set hash of key and entry views.
// Assumes: the hash is a wrapping sum of element hashes under one BuildHasher.
// Verifies: equal contents agree across insertion order and capacity; a changed value does not.
#[test]
fn set_hash_ignores_layout() {
    let build = BuildHasherDefault::<DefaultHasher>::default();
    let a = sample();
    let mut b: Dictionary<u32, String> = Dictionary::with_capacity_and_load_factor(256, 0.5).unwrap();
    for k in (0..50u32).rev() {
        b.insert(k, format!("v{k}"));
    }
    assert_ne!(a.capacity(), b.capacity());
    assert_eq!(a.key_set().set_hash(&build), b.key_set().set_hash(&build));
    assert_eq!(a.entry_set().set_hash(&build), b.entry_set().set_hash(&build));

    b.insert(7, "changed".into());
    assert_eq!(a.key_set().set_hash(&build), b.key_set().set_hash(&build));
    assert_ne!(a.entry_set().set_hash(&build), b.entry_set().set_hash(&build));

    let empty: Dictionary<u32, String> = Dictionary::new();
    assert_eq!(empty.key_set().set_hash(&build), 0);
}
