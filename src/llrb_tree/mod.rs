//! Left-leaning red black tree: a red black tree whose red links always lean left, rebalanced
//! top-down in a single recursive pass.

mod map;
mod node;
mod tree;

pub use self::map::LlrbMap;
