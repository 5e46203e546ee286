//! Insertion-ordered multimap with ASCII case-insensitive string keys.
//!
//! Values carry their own key (see [`Keyed`]). Groups are kept in the order
//! their key was first seen, values within a group in the order they were
//! added, and lookups go through a hash index instead of a linear scan.

use std::collections::HashMap;

/// A value that knows the key it is grouped under.
pub trait Keyed {
    /// Returns the grouping key. Compared ASCII case-insensitively.
    fn key(&self) -> &str;
}

/// One group of values sharing a key.
#[derive(Debug, Clone)]
pub struct Group<V> {
    key: String,
    values: Vec<V>,
}

impl<V> Group<V> {
    /// Key as first inserted (original case).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn values(&self) -> &[V] {
        &self.values
    }
}

/// Ordered multimap keyed by [`Keyed::key`].
#[derive(Debug, Clone)]
pub struct OrderedMultimap<V> {
    groups: Vec<Group<V>>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedMultimap<V> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: Keyed> OrderedMultimap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the group for its key, creating the group at the end
    /// of iteration order if the key has not been seen.
    pub fn add(&mut self, value: V) {
        let folded = value.key().to_ascii_uppercase();
        if let Some(&slot) = self.index.get(&folded) {
            self.groups[slot].values.push(value);
            return;
        }

        self.index.insert(folded, self.groups.len());
        self.groups.push(Group {
            key: value.key().to_string(),
            values: vec![value],
        });
    }
}

impl<V> OrderedMultimap<V> {
    /// Returns all values under `key` in insertion order, or an empty slice.
    #[must_use]
    pub fn get(&self, key: &str) -> &[V] {
        match self.index.get(&key.to_ascii_uppercase()) {
            Some(&slot) => &self.groups[slot].values,
            None => &[],
        }
    }

    /// Returns the first value under `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&V> {
        self.get(key).first()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(&key.to_ascii_uppercase())
    }

    /// Iterates groups in first-insertion order.
    pub fn groups(&self) -> impl Iterator<Item = &Group<V>> {
        self.groups.iter()
    }

    /// Iterates every value, group by group.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.groups.iter().flat_map(|group| group.values.iter())
    }

    /// Number of values across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.values.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl<V: PartialEq> PartialEq for OrderedMultimap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.groups.len() == other.groups.len()
            && self.groups.iter().zip(&other.groups).all(|(a, b)| {
                a.key.eq_ignore_ascii_case(&b.key) && a.values == b.values
            })
    }
}

impl<V: Eq> Eq for OrderedMultimap<V> {}

impl<V: Keyed> FromIterator<V> for OrderedMultimap<V> {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V: Keyed> Extend<V> for OrderedMultimap<V> {
    fn extend<T: IntoIterator<Item = V>>(&mut self, iter: T) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<'a, V> IntoIterator for &'a OrderedMultimap<V> {
    type Item = &'a Group<V>;
    type IntoIter = std::slice::Iter<'a, Group<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Entry(&'static str, u32);

    impl Keyed for Entry {
        fn key(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn groups_follow_first_insertion() {
        let map: OrderedMultimap<Entry> = [
            Entry("b", 1),
            Entry("a", 2),
            Entry("B", 3),
            Entry("c", 4),
            Entry("a", 5),
        ]
        .into_iter()
        .collect();

        let keys: Vec<&str> = map.groups().map(Group::key).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(map.get("b"), &[Entry("b", 1), Entry("B", 3)]);
        assert_eq!(map.get("A"), &[Entry("a", 2), Entry("a", 5)]);
        assert_eq!(map.len(), 5);
        assert_eq!(map.group_count(), 3);
    }

    #[test]
    fn unseen_key_is_empty() {
        let map: OrderedMultimap<Entry> = std::iter::once(Entry("x", 1)).collect();
        assert!(map.get("y").is_empty());
        assert!(map.first("y").is_none());
        assert!(!map.contains("y"));
        assert!(map.contains("X"));
    }

    #[test]
    fn groups_are_restartable() {
        let map: OrderedMultimap<Entry> = [Entry("a", 1), Entry("b", 2)].into_iter().collect();
        let first: Vec<_> = map.groups().map(Group::key).collect();
        let second: Vec<_> = map.groups().map(Group::key).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn values_flatten_by_group() {
        let map: OrderedMultimap<Entry> = [Entry("a", 1), Entry("b", 2), Entry("a", 3)]
            .into_iter()
            .collect();
        let values: Vec<u32> = map.values().map(|e| e.1).collect();
        assert_eq!(values, vec![1, 3, 2]);
    }

    #[test]
    fn equality_is_ordered_and_case_insensitive() {
        let left: OrderedMultimap<Entry> = [Entry("a", 1), Entry("b", 2)].into_iter().collect();
        let upper: OrderedMultimap<Entry> = [Entry("A", 1), Entry("B", 2)].into_iter().collect();
        let swapped: OrderedMultimap<Entry> = [Entry("b", 2), Entry("a", 1)].into_iter().collect();

        // Entry itself compares the key, so case-folded keys only match on the group level.
        assert_ne!(left, upper);
        assert_ne!(left, swapped);
        assert_eq!(left, left.clone());
    }

    #[test]
    fn empty_map() {
        let map: OrderedMultimap<Entry> = OrderedMultimap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.groups().count(), 0);
    }
}
