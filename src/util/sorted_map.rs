use std::borrow::Borrow;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::sync::Arc;

/// An ordered map with persistent updates.
///
/// `insert` and `remove` return new maps instead of mutating the receiver.
/// The backing tree is behind an `Arc`, so cloning a map, or keeping an old
/// version alive after an update, is a pointer copy.
#[derive(Clone, Debug)]
pub struct SortedMap<K: Ord, V> {
    entries: Arc<BTreeMap<K, V>>,
}

impl<K: Ord + Clone, V: Clone> SortedMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(BTreeMap::new()),
        }
    }

    /// Returns a new map containing `key` bound to `value`.
    pub fn insert(&self, key: K, value: V) -> Self {
        let mut entries = (*self.entries).clone();
        entries.insert(key, value);
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Returns a new map without `key`. Returns a clone of the receiver when
    /// the key is absent.
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.entries.contains_key(key) {
            return self.clone();
        }
        let mut entries = (*self.entries).clone();
        entries.remove(key);
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// In-order traversal over `(key, value)` pairs.
    pub fn iter(&self) -> btree_map::Iter<'_, K, V> {
        self.entries.iter()
    }
}

impl<K: Ord + Clone, V: Clone> Default for SortedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> FromIterator<(K, V)> for SortedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl<K: Ord, V: PartialEq> PartialEq for SortedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_returns_new_map() {
        let empty: SortedMap<String, i64> = SortedMap::new();
        let one = empty.insert("a".to_string(), 1);
        assert!(empty.is_empty());
        assert_eq!(one.get("a"), Some(&1));
    }

    #[test]
    fn remove_leaves_receiver_untouched() {
        let map: SortedMap<String, i64> =
            [("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect();
        let removed = map.remove("a");
        assert_eq!(map.len(), 2);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed.get("b"), Some(&2));
    }

    #[test]
    fn remove_of_missing_key_is_identity() {
        let map: SortedMap<String, i64> = [("a".to_string(), 1)].into_iter().collect();
        assert_eq!(map.remove("zzz"), map);
    }

    #[test]
    fn iterates_in_key_order() {
        let map: SortedMap<String, i64> = [
            ("b".to_string(), 2),
            ("a".to_string(), 1),
            ("c".to_string(), 3),
        ]
        .into_iter()
        .collect();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }
}
