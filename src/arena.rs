//! Single-type node store addressed by copyable handles.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object stored in an `Arena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Slot(usize);

enum Block<T> {
    Occupied(T),
    Vacant(Option<Slot>),
}

/// A growable store for objects of a single type.
///
/// Objects are addressed by `Slot` handles instead of references so that structures with back
/// links (such as parent pointers) can be expressed without shared ownership. Freed slots are
/// threaded onto a free list and handed out again by later allocations. All objects are dropped
/// when the arena is cleared or dropped.
///
/// # Examples
///
/// ```
/// use red_black_maps::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct Arena<T> {
    head: Option<Slot>,
    blocks: Vec<Block<T>>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty `Arena<T>` with room for `capacity` objects before it has to
    /// grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::with_capacity(1024);
    /// assert!(arena.capacity() >= 1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            head: None,
            blocks: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Stores an object in the arena and returns its slot. Vacant slots are reused before the
    /// arena grows.
    pub fn allocate(&mut self, value: T) -> Slot {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Slot(self.blocks.len() - 1)
            },
            Some(slot) => {
                let vacant_block = mem::replace(&mut self.blocks[slot.0], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next) => {
                        self.head = next;
                        slot
                    },
                    Block::Occupied(_) => panic!("Error: free list points at an occupied block."),
                }
            },
        }
    }

    /// Removes an object from the arena and returns it. The slot becomes vacant.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of bounds or already vacant.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_maps::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn free(&mut self, slot: Slot) -> T {
        if slot.0 >= self.blocks.len() {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(&mut self.blocks[slot.0], Block::Vacant(self.head));
        match old_block {
            Block::Vacant(next) => {
                self.blocks[slot.0] = Block::Vacant(next);
                panic!("Error: attempting to free vacant block.")
            },
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(slot);
                value
            },
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the slot is out of
    /// bounds or vacant.
    pub fn get(&self, slot: Slot) -> Option<&T> {
        match self.blocks.get(slot.0) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the slot is out of
    /// bounds or vacant.
    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        match self.blocks.get_mut(slot.0) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of objects the arena can hold without growing.
    pub fn capacity(&self) -> usize {
        self.blocks.capacity()
    }

    /// Drops every object in the arena and forgets all slots.
    pub fn clear(&mut self) {
        self.head = None;
        self.blocks.clear();
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Slot> for Arena<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &Self::Output {
        self.get(slot).expect("Error: slot out of bounds.")
    }
}

impl<T> IndexMut<Slot> for Arena<T> {
    fn index_mut(&mut self, slot: Slot) -> &mut Self::Output {
        self.get_mut(slot).expect("Error: slot out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, Slot};

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: Arena<u32> = Arena::new();
        arena.free(Slot(0));
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = Arena::new();
        let slot = arena.allocate(0);
        arena.free(slot);
        arena.free(slot);
    }

    #[test]
    fn test_allocate() {
        let mut arena = Arena::new();
        assert_eq!(arena.allocate(0), Slot(0));
        assert_eq!(arena.allocate(0), Slot(1));
        assert_eq!(arena.allocate(0), Slot(2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_slot() {
        let mut arena = Arena::new();
        let first = arena.allocate(0);
        let second = arena.allocate(1);
        assert_eq!(arena.free(first), 0);
        assert_eq!(arena.free(second), 1);
        assert!(arena.is_empty());

        assert_eq!(arena.allocate(2), second);
        assert_eq!(arena.allocate(3), first);
        assert_eq!(arena.allocate(4), Slot(2));
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = Arena::new();
        let slot = arena.allocate(0);
        arena.free(slot);
        assert_eq!(arena.get(slot), None);
        assert_eq!(arena.get_mut(slot), None);
        assert_eq!(arena.get(Slot(7)), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = Arena::new();
        let slot = arena.allocate(0);
        *arena.get_mut(slot).unwrap() = 1;
        assert_eq!(arena.get(slot), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::with_capacity(16);
        for i in 0..10 {
            arena.allocate(i);
        }
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.allocate(0), Slot(0));
    }
}
