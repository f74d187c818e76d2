use crate::arena::{Arena, Slot};
use crate::color::Color;
use crate::entry::Entry;
use crate::rb_tree::node::{Direction, Node};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

/// Arena-backed red black tree with parent links. Absent links are `None` and count as black.
pub struct Tree<T, U> {
    pub arena: Arena<Node<T, U>>,
    pub root: Option<Slot>,
}

impl<T, U> Tree<T, U> {
    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub fn is_red(&self, link: Option<Slot>) -> bool {
        match link {
            Some(slot) => self.arena[slot].color.is_red(),
            None => false,
        }
    }

    fn child(&self, slot: Slot, dir: Direction) -> Option<Slot> {
        self.arena[slot].child(dir)
    }

    fn set_color(&mut self, slot: Slot, color: Color) {
        self.arena[slot].color = color;
    }

    // side of `parent` that holds `link`; an empty link is found on the first empty side
    fn side_of(&self, parent: Slot, link: Option<Slot>) -> Direction {
        if self.arena[parent].left == link {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    // points the link of `parent` that held `old` at `new`; with no parent, `new` becomes the root
    fn replace_child(&mut self, parent: Option<Slot>, old: Slot, new: Option<Slot>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(parent, Some(old));
                *self.arena[parent].child_mut(side) = new;
            },
        }
    }

    /// Rotates the subtree rooted at `x` towards `dir`: the child of `x` on the opposite side
    /// takes its place and `x` becomes that child's `dir` child. Colors are left untouched.
    pub fn rotate(&mut self, x: Slot, dir: Direction) -> Slot {
        let opposite = dir.opposite();
        let y = self
            .child(x, opposite)
            .expect("Expected rotated child node to be `Some`.");

        let inner = self.child(y, dir);
        *self.arena[x].child_mut(opposite) = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(x);
        }

        let parent = self.arena[x].parent;
        self.arena[y].parent = parent;
        self.replace_child(parent, x, Some(y));

        *self.arena[y].child_mut(dir) = Some(x);
        self.arena[x].parent = Some(y);
        y
    }

    // replaces the subtree rooted at `old` with the subtree rooted at `new`
    fn transplant(&mut self, old: Slot, new: Option<Slot>) {
        let parent = self.arena[old].parent;
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    fn min(&self, mut slot: Slot) -> Slot {
        while let Some(left) = self.arena[slot].left {
            slot = left;
        }
        slot
    }

    pub fn find<V>(&self, key: &V) -> Option<Slot>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(slot) = curr {
            match key.cmp(self.arena[slot].entry.key.borrow()) {
                Ordering::Less => curr = self.arena[slot].left,
                Ordering::Greater => curr = self.arena[slot].right,
                Ordering::Equal => return Some(slot),
            }
        }
        None
    }

    pub fn get<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.find(key).map(|slot| &self.arena[slot].entry)
    }

    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        match self.find(key) {
            Some(slot) => Some(&mut self.arena[slot].entry),
            None => None,
        }
    }

    pub fn insert(&mut self, key: T, value: U) -> Option<U>
    where
        T: Ord,
    {
        let mut parent = None;
        let mut side = Direction::Left;
        let mut curr = self.root;
        while let Some(slot) = curr {
            side = match key.cmp(&self.arena[slot].entry.key) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => {
                    return Some(mem::replace(&mut self.arena[slot].entry.value, value));
                },
            };
            parent = Some(slot);
            curr = self.child(slot, side);
        }

        let slot = self.arena.allocate(Node::new(key, value, parent));
        match parent {
            Some(parent) => *self.arena[parent].child_mut(side) = Some(slot),
            None => self.root = Some(slot),
        }
        self.insert_fixup(slot);
        None
    }

    // invariant: `z` is red and the only possible violation is `z` and its parent both being red
    fn insert_fixup(&mut self, mut z: Slot) {
        loop {
            let parent = match self.arena[z].parent {
                Some(parent) if self.arena[parent].color.is_red() => parent,
                _ => break,
            };
            // a red node is never the root, so a red parent has a parent
            let grandparent = self.arena[parent]
                .parent
                .expect("Expected red node to have a parent.");
            let side = self.side_of(grandparent, Some(parent));
            let uncle = self.child(grandparent, side.opposite());

            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                if let Some(uncle) = uncle {
                    self.set_color(uncle, Color::Black);
                }
                self.set_color(grandparent, Color::Red);
                z = grandparent;
            } else {
                let mut parent = parent;
                if self.child(parent, side.opposite()) == Some(z) {
                    self.rotate(parent, side);
                    mem::swap(&mut z, &mut parent);
                }
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate(grandparent, side.opposite());
            }
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    pub fn remove<V>(&mut self, key: &V) -> Option<Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let target = self.find(key)?;

        if self.root == Some(target)
            && self.arena[target].left.is_none()
            && self.arena[target].right.is_none()
        {
            self.root = None;
            return Some(self.arena.free(target).entry);
        }

        // the node that is physically unlinked has at most one child
        let spliced = match (self.arena[target].left, self.arena[target].right) {
            (Some(_), Some(right)) => self.min(right),
            _ => target,
        };
        let child = self.arena[spliced].left.or(self.arena[spliced].right);
        let parent = self.arena[spliced].parent;
        let color = self.arena[spliced].color;

        self.transplant(spliced, child);
        let mut node = self.arena.free(spliced);
        if spliced != target {
            mem::swap(&mut self.arena[target].entry, &mut node.entry);
        }

        if color == Color::Black {
            self.remove_fixup(child, parent);
        }
        Some(node.entry)
    }

    // invariant: `x` carries an extra black; `parent` is its parent, tracked separately because
    // `x` may be an empty link
    fn remove_fixup(&mut self, mut x: Option<Slot>, mut parent: Option<Slot>) {
        while x != self.root && !self.is_red(x) {
            let p = match parent {
                Some(p) => p,
                None => break,
            };
            let side = self.side_of(p, x);
            let opposite = side.opposite();
            // the side without the extra black has black-height of at least one
            let mut w = self
                .child(p, opposite)
                .expect("Expected sibling node to be `Some`.");

            if self.arena[w].color.is_red() {
                self.set_color(w, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                w = self
                    .child(p, opposite)
                    .expect("Expected sibling node to be `Some`.");
            }

            if !self.is_red(self.child(w, side)) && !self.is_red(self.child(w, opposite)) {
                self.set_color(w, Color::Red);
                x = Some(p);
                parent = self.arena[p].parent;
                continue;
            }

            if !self.is_red(self.child(w, opposite)) {
                if let Some(near) = self.child(w, side) {
                    self.set_color(near, Color::Black);
                }
                self.set_color(w, Color::Red);
                self.rotate(w, opposite);
                w = self
                    .child(p, opposite)
                    .expect("Expected sibling node to be `Some`.");
            }

            let parent_color = self.arena[p].color;
            self.set_color(w, parent_color);
            self.set_color(p, Color::Black);
            if let Some(far) = self.child(w, opposite) {
                self.set_color(far, Color::Black);
            }
            self.rotate(p, side);
            x = self.root;
            parent = None;
        }

        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }

    pub fn clear(&mut self) -> usize {
        let released = self.arena.len();
        self.arena.clear();
        self.root = None;
        released
    }
}
