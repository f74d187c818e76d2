use crate::color::Color;
use crate::entry::Entry;
use crate::llrb_tree::tree::{self, Tree};
use std::mem;

/// A node of a left-leaning red black tree. Each node exclusively owns its two subtrees.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub color: Color,
    pub left: Tree<T, U>,
    pub right: Tree<T, U>,
}

impl<T, U> Node<T, U> {
    /// New nodes are red so that linking one in never changes a black-height.
    pub fn new(key: T, value: U) -> Self {
        Node {
            entry: Entry { key, value },
            color: Color::Red,
            left: None,
            right: None,
        }
    }

    pub fn flip_colors(&mut self) {
        self.color = self.color.flip();
        if let Some(ref mut child) = self.left {
            child.color = child.color.flip();
        }
        if let Some(ref mut child) = self.right {
            child.color = child.color.flip();
        }
    }

    // precondition: the right child is red
    pub fn rotate_left(&mut self) {
        let mut child = self
            .right
            .take()
            .expect("Expected right child node to be `Some`.");
        self.right = child.left.take();
        mem::swap(&mut *child, self);
        self.color = child.color;
        child.color = Color::Red;
        self.left = Some(child);
    }

    // precondition: the left child is red
    pub fn rotate_right(&mut self) {
        let mut child = self
            .left
            .take()
            .expect("Expected left child node to be `Some`.");
        self.left = child.right.take();
        mem::swap(&mut *child, self);
        self.color = child.color;
        child.color = Color::Red;
        self.right = Some(child);
    }

    pub fn is_left_left_red(&self) -> bool {
        match self.left {
            Some(ref child) => child.color.is_red() && tree::is_red(&child.left),
            None => false,
        }
    }

    /// Restores the left-leaning invariants of this subtree after one of its children changed.
    pub fn fix_up(&mut self) {
        if tree::is_red(&self.right) {
            self.rotate_left();
        }
        if self.is_left_left_red() {
            self.rotate_right();
        }
        if tree::is_red(&self.left) && tree::is_red(&self.right) {
            self.flip_colors();
        }
    }

    // precondition: the node is red, its left child and left grandchild are black
    // postcondition: the left child or one of its children is red
    pub fn move_red_left(&mut self) {
        self.flip_colors();
        let borrow_from_right = match self.right {
            Some(ref child) => tree::is_red(&child.left),
            None => false,
        };
        if borrow_from_right {
            if let Some(ref mut child) = self.right {
                child.rotate_right();
            }
            self.rotate_left();
            self.flip_colors();
        }
    }

    // precondition: the node is red, its right child and right child's left child are black
    // postcondition: the right child or one of its children is red
    pub fn move_red_right(&mut self) {
        self.flip_colors();
        if self.is_left_left_red() {
            self.rotate_right();
            self.flip_colors();
        }
    }
}
