//! Hashed collections used for symbol tables and binder side tables.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;

/// Insertion-ordered map with Fx hashing.
///
/// Symbol tables only need unique keys, but iterating in declaration order
/// keeps diagnostics and test expectations deterministic.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Insertion-ordered set with Fx hashing.
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_map_keeps_insertion_order() {
        let mut map: FxIndexMap<&str, u32> = FxIndexMap::default();
        map.insert("c", 3);
        map.insert("a", 1);
        map.insert("b", 2);
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_index_set_dedups() {
        let mut set: FxIndexSet<&str> = FxIndexSet::default();
        assert!(set.insert("__extends"));
        assert!(!set.insert("__extends"));
        assert_eq!(set.len(), 1);
    }
}
