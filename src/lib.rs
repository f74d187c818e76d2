//! Ordered key-value maps backed by self-balancing red black trees.
//!
//! Two engines share one contract ([`OrderedMap`]):
//!
//! - [`llrb_tree::LlrbMap`] is a left-leaning red black tree that rebalances on the way back up
//!   a single recursive descent.
//! - [`rb_tree::RbMap`] is a classical red black tree whose nodes live in an arena and carry
//!   parent links, repaired by bottom-up fixup loops.
//!
//! Both can be checked against the red black invariants with `validate`, which is meant for
//! tests and is never called on the mutation path.

#[macro_use]
extern crate log;

mod color;
mod entry;
pub mod arena;
pub mod llrb_tree;
pub mod ordered_map;
pub mod rb_tree;
pub mod validate;

pub use crate::color::Color;
pub use crate::ordered_map::OrderedMap;
