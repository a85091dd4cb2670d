#![cfg(test)]

// Property tests for Dictionary kept inside the crate so they can check the
// occupied count and minimum capacity, which are not public.

use crate::config::DictionaryConfig;
use crate::dictionary::Dictionary;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

// Owned label that can be looked up as `&str`; the derived `Hash` hashes
// the inner string, so borrowed and owned lookups land in the same slot.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Label(String);

impl std::borrow::Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Steps name keys by position in a generated label pool, so a failing case
// shrinks toward fewer labels, lower positions and shorter step lists.
#[derive(Clone, Debug)]
enum Step {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    // Raw string, which may or may not be in the pool.
    Contains(String),
    Mutate(usize, i32),
    // Walk the key view with a cursor and remove every n-th key visited.
    CursorRemove(usize),
    Clear,
    Iterate,
}

fn label_at(labels: &[String], at: usize) -> Label {
    Label(labels[at].clone())
}

fn arb_steps() -> impl Strategy<Value = (Vec<String>, Vec<Step>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=40).prop_flat_map(|labels| {
        let at = 0..labels.len();
        let lookup = prop_oneof![
            proptest::sample::select(labels.clone()),
            "[a-z]{0,5}",
        ];
        let step = prop_oneof![
            6 => (at.clone(), any::<i32>()).prop_map(|(i, v)| Step::Insert(i, v)),
            4 => at.clone().prop_map(Step::Remove),
            2 => at.clone().prop_map(Step::Get),
            1 => lookup.prop_map(Step::Contains),
            1 => (at.clone(), any::<i32>()).prop_map(|(i, d)| Step::Mutate(i, d)),
            1 => (1usize..4).prop_map(Step::CursorRemove),
            1 => Just(Step::Clear),
            1 => Just(Step::Iterate),
        ];
        proptest::collection::vec(step, 1..120).prop_map(move |steps| (labels.clone(), steps))
    })
}

fn check_structure<S>(sut: &Dictionary<Label, i32, S>) -> Result<(), TestCaseError> {
    prop_assert!(sut.len() <= sut.occupied());
    prop_assert!(sut.occupied() <= sut.capacity());
    prop_assert!(sut.capacity() >= sut.min_capacity());
    let ratio = sut.occupied() as f64 / sut.capacity() as f64;
    prop_assert!(
        ratio <= sut.load_factor() || sut.capacity() == sut.min_capacity(),
        "occupancy {} above load factor {} at capacity {}",
        ratio,
        sut.load_factor(),
        sut.capacity()
    );
    Ok(())
}

fn run_scenario<S>(
    mut sut: Dictionary<Label, i32, S>,
    labels: Vec<String>,
    steps: Vec<Step>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashMap<Label, i32> = HashMap::new();
    for step in steps {
        match step {
            Step::Insert(i, v) => {
                let k = label_at(&labels, i);
                prop_assert_eq!(sut.insert(k.clone(), v), model.insert(k, v));
            }
            Step::Remove(i) => {
                let k = label_at(&labels, i);
                prop_assert_eq!(sut.remove(&k), model.remove(&k));
                prop_assert!(!sut.contains_key(&k));
            }
            Step::Get(i) => {
                let k = label_at(&labels, i);
                prop_assert_eq!(sut.get(&k), model.get(&k));
            }
            Step::Contains(s) => {
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains_key(s.as_str()), has_model);
                prop_assert_eq!(sut.key_set().contains(s.as_str()), has_model);
            }
            Step::Mutate(i, d) => {
                let k = label_at(&labels, i);
                match (sut.get_mut(&k), model.get_mut(&k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "get_mut presence differs for {:?}", k),
                }
            }
            Step::CursorRemove(n) => {
                let mut removed = Vec::new();
                {
                    let mut keys = sut.key_set_mut();
                    let mut cursor = keys.cursor();
                    let mut visited = 0usize;
                    while cursor.has_next() {
                        let _ = cursor.next().map_err(|e| TestCaseError::fail(e.to_string()))?;
                        visited += 1;
                        if visited % n == 0 {
                            let (k, v) = cursor
                                .remove()
                                .map_err(|e| TestCaseError::fail(e.to_string()))?;
                            removed.push((k, v));
                        }
                    }
                }
                for (k, v) in removed {
                    prop_assert_eq!(model.remove(&k), Some(v));
                    prop_assert!(!sut.contains_key(&k));
                }
            }
            Step::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), sut.min_capacity());
            }
            Step::Iterate => {
                let s_keys: BTreeSet<_> = sut.key_set().iter().cloned().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
                let entries = sut.entry_set();
                prop_assert_eq!(entries.iter().len(), model.len());
                for (k, v) in &model {
                    prop_assert!(entries.contains_entry(k, v));
                }
            }
        }

        // Checked after every step.
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.iter().count(), model.len());
        check_structure(&sut)?;
    }
    Ok(())
}

// Random step sequences checked against std::collections::HashMap:
// - `insert`/`remove`/`get` return what the model returns.
// - Cursor removal hands back the owned entry and makes it invisible.
// - `len` parity, and len <= occupied <= capacity after every op.
// - Occupancy stays within the load factor unless at minimum capacity.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((labels, steps) in arb_steps()) {
        run_scenario(Dictionary::new(), labels, steps)?;
    }

    #[test]
    fn prop_state_machine_small_tables(
        (labels, steps) in arb_steps(),
        capacity in 1usize..6,
        load_factor in 0.2f64..0.95,
    ) {
        let cfg = DictionaryConfig::new().initial_capacity(capacity).load_factor(load_factor);
        let sut: Dictionary<Label, i32> = Dictionary::with_config(cfg).unwrap();
        run_scenario(sut, labels, steps)?;
    }
}

// Every key hashes to 0, so all keys share one probe chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Same checks with a single probe chain: tombstones sit between live keys
// on almost every lookup.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((labels, steps) in arb_steps()) {
        run_scenario(Dictionary::with_hasher(ConstBuildHasher), labels, steps)?;
    }
}
