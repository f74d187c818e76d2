use crate::color::Color;
use crate::entry::Entry;
use crate::llrb_tree::node::Node;
use crate::llrb_tree::tree::{self, Tree};
use crate::ordered_map::OrderedMap;
use crate::validate::{self, Stats, TreeView};
use std::borrow::Borrow;
use std::fmt::Debug;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a left-leaning red black tree.
///
/// A left-leaning red black tree is a red black tree in which red links only ever lean left, so
/// that every 3-node of the corresponding 2-3 tree has a single shape. Insertions and removals
/// make one recursive pass down the tree and repair the invariants on the way back up, which
/// bounds the height by `2 * log2(n + 1)`.
///
/// # Examples
///
/// ```
/// use red_black_maps::llrb_tree::LlrbMap;
///
/// let mut map = LlrbMap::new();
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
pub struct LlrbMap<T, U> {
    tree: Tree<T, U>,
    len: usize,
}

impl<T, U> LlrbMap<T, U> {
    /// Constructs a new, empty `LlrbMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::llrb_tree::LlrbMap;
    ///
    /// let map: LlrbMap<u32, u32> = LlrbMap::new();
    /// ```
    pub fn new() -> Self {
        LlrbMap { tree: None, len: 0 }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its value is
    /// replaced in place and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some(1));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<U>
    where
        T: Ord,
    {
        let ret = tree::insert(&mut self.tree, key, value);
        tree::blacken_root(&mut self.tree);
        if ret.is_none() {
            self.len += 1;
        }
        ret
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None` and leave the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        if tree::get(&self.tree, key).is_none() {
            trace!("llrb remove: key not present");
            return None;
        }

        tree::fix_root(&mut self.tree);
        let entry = tree::remove(&mut self.tree, key);
        tree::blacken_root(&mut self.tree);
        self.len -= 1;
        Some(entry.into_pair())
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get_mut(&mut self.tree, key).map(|entry| &mut entry.value)
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the map, removing all values. Nodes are released iteratively.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        let released = tree::release(&mut self.tree);
        debug!("llrb clear: released {} nodes", released);
        self.len = 0;
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        validate::height(&Shape(&self.tree))
    }

    /// Checks every left-leaning red black invariant of the underlying tree and returns its
    /// shape. Intended for tests; no other operation calls it.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// for key in 0..7 {
    ///     map.insert(key, key);
    /// }
    /// let stats = map.validate().unwrap();
    /// assert_eq!(stats.len, 7);
    /// assert_eq!(stats.black_height, 3);
    /// ```
    pub fn validate(&self) -> validate::Result<Stats>
    where
        T: Ord,
    {
        validate::check(&Shape(&self.tree), true, self.len)
    }

    /// Validates the tree and panics with a dump of its shape if any invariant is broken.
    pub fn assert_valid(&self)
    where
        T: Ord + Debug,
        U: Debug,
    {
        if let Err(err) = self.validate() {
            error!(
                "llrb invariant violated: {}\n{}",
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
    /// use red_black_maps::llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    ///
    /// let dot = map.dump_dot(|key| key.to_string(), |value| value.to_string());
    /// assert!(dot.starts_with("digraph LLRB {"));
    /// assert!(dot.contains("\"2: 20\" -> \"1: 10\" [color = red];"));
    /// ```
    pub fn dump_dot<F, G>(&self, key_fmt: F, value_fmt: G) -> String
    where
        F: Fn(&T) -> String,
        G: Fn(&U) -> String,
    {
        validate::dump_dot(&Shape(&self.tree), "LLRB", key_fmt, value_fmt)
    }
}

struct Shape<'a, T, U>(&'a Tree<T, U>);

impl<'a, T, U> TreeView<T, U> for Shape<'a, T, U> {
    type Link = &'a Node<T, U>;

    fn root(&self) -> Option<Self::Link> {
        self.0.as_ref().map(|node| &**node)
    }

    fn left(&self, link: Self::Link) -> Option<Self::Link> {
        link.left.as_ref().map(|node| &**node)
    }

    fn right(&self, link: Self::Link) -> Option<Self::Link> {
        link.right.as_ref().map(|node| &**node)
    }

    fn color(&self, link: Self::Link) -> Color {
        link.color
    }

    fn entry(&self, link: Self::Link) -> &Entry<T, U> {
        &link.entry
    }
}

impl<T, U> OrderedMap<T, U> for LlrbMap<T, U>
where
    T: Ord,
    U: Clone,
{
    fn insert(&mut self, key: T, value: U) {
        LlrbMap::insert(self, key, value);
    }

    fn erase(&mut self, key: &T) {
        self.remove(key);
    }

    fn find(&self, key: &T) -> Option<U> {
        self.get(key).cloned()
    }
}

impl<T, U> Drop for LlrbMap<T, U> {
    fn drop(&mut self) {
        tree::release(&mut self.tree);
    }
}

impl<T, U> Default for LlrbMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, U, V> Index<&'a V> for LlrbMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for LlrbMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}
