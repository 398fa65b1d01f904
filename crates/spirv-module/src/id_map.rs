//! Sparse id-to-data maps.
//!
//! SPIR-V ids are shared by every kind of definition, so a per-kind table
//! only has entries for some of them. `IdMap` is a Vec of optional slots
//! indexed by the id word, giving O(1) lookups without hashing.

use core::marker::PhantomData;

use crate::id::EntityRef;

/// Sparse map from entity to data.
///
/// # Type Safety
///
/// `IdMap` is generic over the key type, so a map keyed by `Id` cannot be
/// indexed with any other entity.
#[derive(Debug, Clone)]
pub struct IdMap<K: EntityRef, V> {
    slots: Vec<Option<V>>,
    len: usize,
    _phantom: PhantomData<K>,
}

impl<K: EntityRef, V> IdMap<K, V> {
    /// Create a new empty map
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
            _phantom: PhantomData,
        }
    }

    /// Insert a value for `key`, returning the previous value if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = key.index();
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        let old = self.slots[index].replace(value);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// Get a value by key
    pub fn get(&self, key: K) -> Option<&V> {
        self.slots.get(key.index()).and_then(Option::as_ref)
    }

    /// Get a mutable value by key
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slots.get_mut(key.index()).and_then(Option::as_mut)
    }

    /// Whether `key` has a value
    pub fn contains_key(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over occupied entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (K::from_index(i), v)))
    }
}

impl<K: EntityRef, V> Default for IdMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Id;

    #[test]
    fn test_id_map_sparse_insert() {
        let mut map: IdMap<Id, &str> = IdMap::new();
        assert!(map.insert(Id::new(7), "seven").is_none());
        assert!(map.insert(Id::new(2), "two").is_none());

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(Id::new(7)), Some(&"seven"));
        assert_eq!(map.get(Id::new(3)), None);
        assert_eq!(map.get(Id::new(100)), None);
    }

    #[test]
    fn test_id_map_replace_keeps_len() {
        let mut map: IdMap<Id, i32> = IdMap::new();
        map.insert(Id::new(1), 10);
        assert_eq!(map.insert(Id::new(1), 20), Some(10));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(Id::new(1)), Some(&20));
    }

    #[test]
    fn test_id_map_iteration_order() {
        let mut map: IdMap<Id, i32> = IdMap::new();
        map.insert(Id::new(5), 50);
        map.insert(Id::new(1), 10);

        let items: Vec<_> = map.iter().map(|(k, v)| (k.word(), *v)).collect();
        assert_eq!(items, vec![(1, 10), (5, 50)]);
    }

    #[test]
    fn test_id_map_get_mut() {
        let mut map: IdMap<Id, i32> = IdMap::default();
        assert!(map.is_empty());
        map.insert(Id::new(3), 1);
        if let Some(v) = map.get_mut(Id::new(3)) {
            *v = 42;
        }
        assert!(map.contains_key(Id::new(3)));
        assert_eq!(map.get(Id::new(3)), Some(&42));
    }
}
