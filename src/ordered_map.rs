//! The operation contract shared by every map in this crate.

use std::collections::BTreeMap;

/// An ordered key-value container with upsert, erase and lookup.
///
/// Every engine in this crate implements it, and so does `BTreeMap`, which makes the standard
/// library map usable as a reference when comparing engines.
///
/// # Examples
///
/// ```
/// use red_black_maps::llrb_tree::LlrbMap;
/// use red_black_maps::rb_tree::RbMap;
/// use red_black_maps::OrderedMap;
///
/// fn exercise<M: OrderedMap<u32, u32>>(map: &mut M) {
///     map.insert(1, 1);
///     map.insert(1, 2);
///     assert_eq!(map.find(&1), Some(2));
///     map.erase(&1);
///     map.erase(&1);
///     assert_eq!(map.find(&1), None);
/// }
///
/// exercise(&mut LlrbMap::new());
/// exercise(&mut RbMap::new());
/// ```
pub trait OrderedMap<T, U> {
    /// Inserts a mapping, overwriting the value if the key is already present.
    fn insert(&mut self, key: T, value: U);

    /// Removes the mapping for `key`. Absent keys are ignored.
    fn erase(&mut self, key: &T);

    /// Returns a copy of the value mapped to `key`, or `None` if the key is absent.
    fn find(&self, key: &T) -> Option<U>;
}

impl<T, U> OrderedMap<T, U> for BTreeMap<T, U>
where
    T: Ord,
    U: Clone,
{
    fn insert(&mut self, key: T, value: U) {
        BTreeMap::insert(self, key, value);
    }

    fn erase(&mut self, key: &T) {
        self.remove(key);
    }

    fn find(&self, key: &T) -> Option<U> {
        self.get(key).cloned()
    }
}
