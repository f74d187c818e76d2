use crate::arena::Slot;
use crate::color::Color;
use crate::entry::Entry;

/// A side of a binary tree node. The fixup routines are written once for one side and run for
/// the mirror case by passing the opposite direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A struct representing a node of a classical red black tree. Links are arena slots, and `None`
/// stands for the empty leaf, which is always black.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub color: Color,
    pub parent: Option<Slot>,
    pub left: Option<Slot>,
    pub right: Option<Slot>,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U, parent: Option<Slot>) -> Self {
        Node {
            entry: Entry { key, value },
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn child(&self, dir: Direction) -> Option<Slot> {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, dir: Direction) -> &mut Option<Slot> {
        match dir {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Node};
    use crate::arena::Arena;

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_child_mut() {
        let mut arena = Arena::new();
        let slot = arena.allocate(0);
        let mut node: Node<u32, u32> = Node::new(1, 1, None);

        *node.child_mut(Direction::Right) = Some(slot);

        assert_eq!(node.right, Some(slot));
        assert_eq!(node.child(Direction::Right), Some(slot));
        assert_eq!(node.child(Direction::Left), None);
    }
}
