use crate::color::Color;
use crate::entry::Entry;
use crate::llrb_tree::node::Node;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

pub type Tree<T, U> = Option<Box<Node<T, U>>>;

pub fn is_red<T, U>(tree: &Tree<T, U>) -> bool {
    match tree {
        None => false,
        Some(ref node) => node.color.is_red(),
    }
}

// true if descending into `tree` would leave the search path without a red link
fn needs_red<T, U>(tree: &Tree<T, U>) -> bool {
    match tree {
        Some(ref node) => !node.color.is_red() && !is_red(&node.left),
        None => false,
    }
}

pub fn insert<T, U>(tree: &mut Tree<T, U>, key: T, value: U) -> Option<U>
where
    T: Ord,
{
    let node = match tree {
        Some(ref mut node) => node,
        None => {
            *tree = Some(Box::new(Node::new(key, value)));
            return None;
        },
    };

    let ret = match key.cmp(&node.entry.key) {
        Ordering::Less => insert(&mut node.left, key, value),
        Ordering::Greater => insert(&mut node.right, key, value),
        Ordering::Equal => return Some(mem::replace(&mut node.entry.value, value)),
    };

    if is_red(&node.right) && !is_red(&node.left) {
        node.rotate_left();
    }
    if node.is_left_left_red() {
        node.rotate_right();
    }
    if is_red(&node.left) && is_red(&node.right) {
        node.flip_colors();
    }

    ret
}

// precondition: the tree is non-empty and its root or the root's left child is red
fn remove_min<T, U>(tree: &mut Tree<T, U>) -> Box<Node<T, U>> {
    if let Some(ref mut node) = tree {
        if node.left.is_some() {
            if needs_red(&node.left) {
                node.move_red_left();
            }
            let ret = remove_min(&mut node.left);
            node.fix_up();
            return ret;
        }
    }

    let mut node = tree.take().expect("Expected a non-empty tree.");
    *tree = node.right.take();
    node
}

// precondition: `key` exists in the tree, and the root or one of its children is red
pub fn remove<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> Entry<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut node = tree.take().expect("Expected the key to exist in the tree.");

    let ret = if key < node.entry.key.borrow() {
        if needs_red(&node.left) {
            node.move_red_left();
        }
        remove(&mut node.left, key)
    } else {
        if is_red(&node.left) {
            node.rotate_right();
        }

        if key == node.entry.key.borrow() && node.right.is_none() {
            return node.entry;
        }

        if needs_red(&node.right) {
            node.move_red_right();
        }

        if key == node.entry.key.borrow() {
            let successor = remove_min(&mut node.right);
            mem::replace(&mut node.entry, successor.entry)
        } else {
            remove(&mut node.right, key)
        }
    };

    node.fix_up();
    *tree = Some(node);
    ret
}

pub fn get<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    while let Some(ref node) = curr {
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return Some(&node.entry),
        }
    }
    None
}

pub fn get_mut<'a, T, U, V>(tree: &'a mut Tree<T, U>, key: &V) -> Option<&'a mut Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_mut().and_then(|node| {
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => get_mut(&mut node.left, key),
            Ordering::Greater => get_mut(&mut node.right, key),
            Ordering::Equal => Some(&mut node.entry),
        }
    })
}

/// Prepares the root for a removal: a root with two black children is turned red so the descent
/// starts with a red link.
pub fn fix_root<T, U>(tree: &mut Tree<T, U>) {
    if let Some(ref mut node) = tree {
        if !is_red(&node.left) && !is_red(&node.right) {
            node.color = Color::Red;
        }
    }
}

pub fn blacken_root<T, U>(tree: &mut Tree<T, U>) {
    if let Some(ref mut node) = tree {
        node.color = Color::Black;
    }
}

/// Releases every node of `tree` without recursing, returning how many were released.
pub fn release<T, U>(tree: &mut Tree<T, U>) -> usize {
    let mut count = 0;
    let mut stack: Vec<Box<Node<T, U>>> = tree.take().into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
        count += 1;
    }
    count
}
