//! Fixed-slot entry store.
//!
//! A separate-chaining table keyed by variable name. The slot count is chosen
//! at construction and never changes; chains grow instead. Every call takes
//! the precomputed name hash so one operation hashes its name exactly once.
//!
//! Values are released through [`Metric::release`] when the store is dropped,
//! which is the single teardown path for every entity kind.

use crate::error::{Result, VarzError};
use crate::metric::Metric;

/// One stored variable.
#[derive(Debug)]
pub struct Entry<V> {
    name: String,
    name_hash: u64,
    value: V,
}

impl<V> Entry<V> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Always `hash_name(self.name())`; set once at insert.
    pub fn name_hash(&self) -> u64 {
        self.name_hash
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    fn matches(&self, name: &str, name_hash: u64) -> bool {
        self.name_hash == name_hash && self.name == name
    }
}

#[derive(Debug)]
pub struct Store<V: Metric> {
    slots: Vec<Vec<Entry<V>>>,
    total_entries: usize,
}

impl<V: Metric> Store<V> {
    /// `num_slots` of zero is treated as one.
    pub fn new(num_slots: usize) -> Self {
        let num_slots = num_slots.max(1);
        let mut slots = Vec::with_capacity(num_slots);
        slots.resize_with(num_slots, Vec::new);
        Self {
            slots,
            total_entries: 0,
        }
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.total_entries
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries == 0
    }

    fn slot_index(&self, name_hash: u64) -> usize {
        (name_hash % self.slots.len() as u64) as usize
    }

    pub fn get(&self, name: &str, name_hash: u64) -> Option<&V> {
        let idx = self.slot_index(name_hash);
        self.slots[idx]
            .iter()
            .find(|e| e.matches(name, name_hash))
            .map(|e| &e.value)
    }

    pub fn get_mut(&mut self, name: &str, name_hash: u64) -> Option<&mut V> {
        let idx = self.slot_index(name_hash);
        self.slots[idx]
            .iter_mut()
            .find(|e| e.matches(name, name_hash))
            .map(|e| &mut e.value)
    }

    /// Insert a new entry. The name must not already be present.
    pub fn add(&mut self, name: &str, name_hash: u64, value: V) -> Result<&mut V> {
        let idx = self.slot_index(name_hash);
        let slot = &mut self.slots[idx];
        if slot.iter().any(|e| e.matches(name, name_hash)) {
            return Err(VarzError::DuplicateEntry(name.to_string()));
        }
        slot.push(Entry {
            name: name.to_string(),
            name_hash,
            value,
        });
        self.total_entries += 1;
        let pos = slot.len() - 1;
        Ok(&mut slot[pos].value)
    }

    /// Lookup, inserting `init()` when the name is absent.
    pub fn get_or_add_with<F>(&mut self, name: &str, name_hash: u64, init: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let idx = self.slot_index(name_hash);
        let slot = &mut self.slots[idx];
        let pos = match slot.iter().position(|e| e.matches(name, name_hash)) {
            Some(pos) => pos,
            None => {
                slot.push(Entry {
                    name: name.to_string(),
                    name_hash,
                    value: init(),
                });
                self.total_entries += 1;
                slot.len() - 1
            }
        };
        &mut slot[pos].value
    }

    /// Call `f` once per entry: slot order, then insertion order within a slot.
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(&Entry<V>),
    {
        for e in self.iter() {
            f(e);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<V>> {
        self.slots.iter().flat_map(|slot| slot.iter())
    }
}

impl<V: Metric> Drop for Store<V> {
    fn drop(&mut self) {
        for slot in &mut self.slots {
            for e in slot.iter_mut() {
                e.value.release();
            }
        }
    }
}
