use crate::arena::Slot;
use crate::color::Color;
use crate::entry::Entry;
use crate::ordered_map::OrderedMap;
use crate::rb_tree::tree::Tree;
use crate::validate::{self, Error, Stats, TreeView};
use std::borrow::Borrow;
use std::fmt::Debug;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a classical red black tree.
///
/// Nodes live in an arena owned by the map and refer to their children and parent by slot, so
/// insertions and removals can walk back up the tree without recursion. After an insertion the
/// tree is repaired by recoloring and at most two rotations; after a removal by at most three
/// rotations.
///
/// # Examples
///
/// ```
/// use red_black_maps::rb_tree::RbMap;
///
/// let mut map = RbMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct RbMap<T, U> {
    tree: Tree<T, U>,
}

impl<T, U> RbMap<T, U> {
    /// Constructs a new, empty `RbMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::rb_tree::RbMap;
    ///
    /// let map: RbMap<u32, u32> = RbMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty `RbMap<T, U>` whose node arena can hold `capacity` entries before
    /// it reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::rb_tree::RbMap;
    ///
    /// let map: RbMap<u32, u32> = RbMap::with_capacity(1024);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        RbMap {
            tree: Tree::with_capacity(capacity),
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its value is
    /// replaced in place and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::rb_tree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some(1));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<U>
    where
        T: Ord,
    {
        self.tree.insert(key, value)
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::rb_tree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let ret = self.tree.remove(key).map(Entry::into_pair);
        if ret.is_none() {
            trace!("rb remove: key not present");
        }
        ret
    }

    /// Checks if a key exists in the map.
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.find(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::rb_tree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.get(key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::rb_tree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.get_mut(key).map(|entry| &mut entry.value)
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.tree.arena.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.arena.is_empty()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::rb_tree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        let released = self.tree.clear();
        debug!("rb clear: released {} nodes", released);
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        validate::height(&self.tree)
    }

    /// Checks every red black invariant of the underlying tree, including the consistency of
    /// parent links, and returns its shape. Intended for tests; no other operation calls it.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::rb_tree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// for key in 0..100 {
    ///     map.insert(key, key);
    /// }
    /// let stats = map.validate().unwrap();
    /// assert_eq!(stats.len, 100);
    /// assert!(stats.height <= 14);
    /// ```
    pub fn validate(&self) -> validate::Result<Stats>
    where
        T: Ord,
    {
        let stats = validate::check(&self.tree, false, self.len())?;
        check_parent_links(&self.tree)?;
        Ok(stats)
    }

    /// Validates the tree and panics with a dump of its shape if any invariant is broken.
    pub fn assert_valid(&self)
    where
        T: Ord + Debug,
        U: Debug,
    {
        if let Err(err) = self.validate() {
            error!(
                "rb invariant violated: {}\n{}",
                err,
                self.dump_dot(|key| format!("{:?}", key), |value| format!("{:?}", value)),
            );
            panic!("Error: {}", err);
        }
    }

    /// Renders the tree as a graphviz `digraph` using the given key and value formatters. Edges
    /// into red nodes are marked red.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::rb_tree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    ///
    /// let dot = map.dump_dot(|key| key.to_string(), |value| value.to_string());
    /// assert!(dot.starts_with("digraph RBTree {"));
    /// assert!(dot.contains("\"1: 10\" -> \"2: 20\" [color = red];"));
    /// ```
    pub fn dump_dot<F, G>(&self, key_fmt: F, value_fmt: G) -> String
    where
        F: Fn(&T) -> String,
        G: Fn(&U) -> String,
    {
        validate::dump_dot(&self.tree, "RBTree", key_fmt, value_fmt)
    }
}

fn check_parent_links<T, U>(tree: &Tree<T, U>) -> validate::Result<()> {
    let mut stack = match tree.root {
        Some(root) if tree.arena[root].parent.is_some() => {
            return Err(Error::BrokenParentLink { depth: 0 })
        },
        Some(root) => vec![(root, 0)],
        None => return Ok(()),
    };
    while let Some((slot, depth)) = stack.pop() {
        let node = &tree.arena[slot];
        for child in node.left.into_iter().chain(node.right) {
            if tree.arena[child].parent != Some(slot) {
                return Err(Error::BrokenParentLink { depth: depth + 1 });
            }
            stack.push((child, depth + 1));
        }
    }
    Ok(())
}

impl<T, U> TreeView<T, U> for Tree<T, U> {
    type Link = Slot;

    fn root(&self) -> Option<Slot> {
        self.root
    }

    fn left(&self, link: Slot) -> Option<Slot> {
        self.arena[link].left
    }

    fn right(&self, link: Slot) -> Option<Slot> {
        self.arena[link].right
    }

    fn color(&self, link: Slot) -> Color {
        self.arena[link].color
    }

    fn entry(&self, link: Slot) -> &Entry<T, U> {
        &self.arena[link].entry
    }
}

impl<T, U> OrderedMap<T, U> for RbMap<T, U>
where
    T: Ord,
    U: Clone,
{
    fn insert(&mut self, key: T, value: U) {
        RbMap::insert(self, key, value);
    }

    fn erase(&mut self, key: &T) {
        self.remove(key);
    }

    fn find(&self, key: &T) -> Option<U> {
        self.get(key).cloned()
    }
}

impl<T, U> Default for RbMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, U, V> Index<&'a V> for RbMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for RbMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod tests {
    use super::RbMap;
    use crate::color::Color;
    use crate::validate::Error;

    fn in_order<T, U>(map: &RbMap<T, U>) -> Vec<(&T, &U)> {
        let arena = &map.tree.arena;
        let mut ret = Vec::new();
        let mut stack = Vec::new();
        let mut curr = map.tree.root;
        while curr.is_some() || !stack.is_empty() {
            while let Some(slot) = curr {
                stack.push(slot);
                curr = arena[slot].left;
            }
            if let Some(slot) = stack.pop() {
                ret.push((&arena[slot].entry.key, &arena[slot].entry.value));
                curr = arena[slot].right;
            }
        }
        ret
    }

    #[test]
    fn test_len_empty() {
        let map: RbMap<u32, u32> = RbMap::new();
        assert_eq!(map.len(), 0);
        assert_eq!(map.height(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: RbMap<u32, u32> = RbMap::new();
        assert!(map.is_empty());
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_insert() {
        let mut map = RbMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
        map.assert_valid();
    }

    #[test]
    fn test_insert_replace() {
        let mut map = RbMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert_eq!(map.insert(1, 3), Some(1));
        assert_eq!(map.get(&1), Some(&3));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut map = RbMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
        assert!(map.is_empty());
    }

    #[test]
    fn test_remove_missing() {
        let mut map = RbMap::new();
        assert_eq!(map.remove(&1), None);
        for key in 0..10 {
            map.insert(key * 2, key);
        }
        assert_eq!(map.remove(&7), None);
        assert_eq!(map.remove(&100), None);
        assert_eq!(map.len(), 10);
        map.assert_valid();
    }

    #[test]
    fn test_remove_single_node_then_reinsert() {
        let mut map = RbMap::new();
        map.insert(1, 1);
        map.remove(&1);
        assert_eq!(map.tree.root, None);
        map.insert(2, 2);
        map.insert(3, 3);
        map.assert_valid();
        assert_eq!(in_order(&map), vec![(&2, &2), (&3, &3)]);
    }

    #[test]
    fn test_remove_node_with_two_children() {
        let mut map = RbMap::new();
        for &key in &[2, 1, 3] {
            map.insert(key, key * 10);
        }
        assert_eq!(map.remove(&2), Some((2, 20)));
        assert_eq!(map.get(&3), Some(&30));
        assert_eq!(in_order(&map), vec![(&1, &10), (&3, &30)]);
        map.assert_valid();
    }

    #[test]
    fn test_get_mut() {
        let mut map = RbMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_index() {
        let mut map = RbMap::new();
        map.insert(String::from("a"), 1);
        map[&String::from("a")] += 1;
        assert_eq!(map[&String::from("a")], 2);
    }

    #[test]
    #[should_panic]
    fn test_index_missing() {
        let map: RbMap<u32, u32> = RbMap::new();
        let _ = map[&0];
    }

    #[test]
    fn test_scenario() {
        let mut map = RbMap::new();
        for &key in &[5, 3, 8, 1, 4, 7, 9] {
            map.insert(key, key);
        }
        assert_eq!(map.get(&4), Some(&4));
        map.remove(&3);
        assert_eq!(map.get(&3), None);
        assert_eq!(
            in_order(&map).into_iter().map(|pair| *pair.0).collect::<Vec<u32>>(),
            vec![1, 4, 5, 7, 8, 9],
        );
        map.assert_valid();
    }

    #[test]
    fn test_ascending_and_descending_inserts() {
        let mut map = RbMap::new();
        for key in 0..512u32 {
            map.insert(key, key);
            map.assert_valid();
        }
        for key in (512..1023u32).rev() {
            map.insert(key, key);
            map.assert_valid();
        }
        let stats = map.validate().unwrap();
        assert_eq!(stats.len, 1023);
        assert!(stats.height <= 20);
    }

    #[test]
    fn test_remove_all_keeps_invariants() {
        let mut map = RbMap::new();
        for key in 0..256u32 {
            map.insert(key, key);
        }
        for key in (0..256u32).rev().filter(|key| key % 3 != 0) {
            assert_eq!(map.remove(&key), Some((key, key)));
            map.assert_valid();
        }
        for key in (0..256u32).filter(|key| key % 3 == 0) {
            assert_eq!(map.remove(&key), Some((key, key)));
            map.assert_valid();
        }
        assert!(map.is_empty());
        assert_eq!(map.tree.root, None);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut map = RbMap::with_capacity(4);
        for key in 0..4 {
            map.insert(key, key);
        }
        map.remove(&1);
        map.remove(&2);
        map.insert(10, 10);
        map.insert(11, 11);
        assert_eq!(map.len(), 4);
        assert!(map.tree.arena.capacity() >= 4);
        map.assert_valid();
    }

    #[test]
    fn test_clear() {
        let mut map = RbMap::new();
        for key in 0..100 {
            map.insert(key, key);
        }
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.get(&1), None);
        map.insert(1, 1);
        map.assert_valid();
    }

    #[test]
    fn test_validate_detects_red_root() {
        let mut map = RbMap::new();
        map.insert(1, 1);
        let root = map.tree.root.unwrap();
        map.tree.arena[root].color = Color::Red;
        assert_eq!(map.validate(), Err(Error::RedRoot));
    }

    #[test]
    fn test_validate_detects_consecutive_reds() {
        let mut map = RbMap::new();
        for key in 0..4 {
            map.insert(key, key);
        }
        // root 1, black right child 2, red grandchild 3
        let root = map.tree.root.unwrap();
        let right = map.tree.arena[root].right.unwrap();
        map.tree.arena[right].color = Color::Red;
        assert_eq!(map.validate(), Err(Error::ConsecutiveReds { depth: 2 }));
    }

    #[test]
    fn test_validate_detects_broken_parent_link() {
        let mut map = RbMap::new();
        for key in 0..3 {
            map.insert(key, key);
        }
        let root = map.tree.root.unwrap();
        let left = map.tree.arena[root].left.unwrap();
        map.tree.arena[left].parent = Some(left);
        assert_eq!(map.validate(), Err(Error::BrokenParentLink { depth: 1 }));
    }

    #[test]
    fn test_dump_dot() {
        let mut map = RbMap::new();
        map.insert(2, 'b');
        map.insert(1, 'a');
        map.insert(3, 'c');
        let dot = map.dump_dot(|key| key.to_string(), |value| value.to_string());
        assert_eq!(
            dot,
            "digraph RBTree {\n\
             \"2: b\";\n\
             \"2: b\" -> \"1: a\" [color = red];\n\
             \"2: b\" -> \"3: c\" [color = red];\n\
             \"1: a\";\n\
             \"3: c\";\n\
             }\n",
        );
    }
}
