//! Classical red black tree with parent links, stored in an arena and rebalanced bottom-up.

mod map;
mod node;
mod tree;

pub use self::map::RbMap;
