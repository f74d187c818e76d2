//! Invariant checking and graph rendering shared by both tree engines.
//!
//! The checks here are for tests and debugging only. No mutating operation calls them.

use crate::color::Color;
use crate::entry::Entry;
use std::error;
use std::fmt;
use std::result;

/// A violated tree invariant. `depth` counts edges from the root to the offending node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    RedRoot,
    OutOfOrder { depth: usize },
    ConsecutiveReds { depth: usize },
    RedRightChild { depth: usize },
    UnbalancedBlacks { expected: usize, found: usize },
    LengthMismatch { expected: usize, found: usize },
    BrokenParentLink { depth: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::RedRoot => write!(f, "root node must be black"),
            Error::OutOfOrder { depth } => write!(f, "key out of order at depth {}", depth),
            Error::ConsecutiveReds { depth } => write!(f, "consecutive reds at depth {}", depth),
            Error::RedRightChild { depth } => {
                write!(f, "red right child below depth {}", depth)
            },
            Error::UnbalancedBlacks { expected, found } => {
                write!(f, "unbalanced blacks: expected {}, found {}", expected, found)
            },
            Error::LengthMismatch { expected, found } => {
                write!(f, "length mismatch: expected {}, found {}", expected, found)
            },
            Error::BrokenParentLink { depth } => {
                write!(f, "broken parent link at depth {}", depth)
            },
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Shape of a tree that passed validation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of reachable nodes.
    pub len: usize,
    /// Number of nodes on the longest root-to-leaf path.
    pub height: usize,
    /// Number of black nodes on every root-to-leaf path.
    pub black_height: usize,
}

/// Read-only structural view of a binary tree, used to run the same checks and rendering over
/// both node representations.
pub trait TreeView<T, U> {
    type Link: Copy;

    fn root(&self) -> Option<Self::Link>;

    fn left(&self, link: Self::Link) -> Option<Self::Link>;

    fn right(&self, link: Self::Link) -> Option<Self::Link>;

    fn color(&self, link: Self::Link) -> Color;

    fn entry(&self, link: Self::Link) -> &Entry<T, U>;

    fn is_red(&self, link: Option<Self::Link>) -> bool {
        link.map_or(false, |link| self.color(link).is_red())
    }
}

struct Frame<'a, T, U, L> {
    link: L,
    depth: usize,
    blacks: usize,
    lower: Option<&'a Entry<T, U>>,
    upper: Option<&'a Entry<T, U>>,
}

/// Checks the red black invariants of `view`: black root, binary search tree order, no red node
/// with a red child, and the same number of black nodes on every path to an empty link. When
/// `left_leaning` is set, red right children are rejected as well. `expected_len` is compared
/// against the number of reachable nodes.
pub fn check<T, U, V>(view: &V, left_leaning: bool, expected_len: usize) -> Result<Stats>
where
    T: Ord,
    V: TreeView<T, U>,
{
    let root = match view.root() {
        Some(root) => root,
        None if expected_len == 0 => return Ok(Stats::default()),
        None => {
            return Err(Error::LengthMismatch {
                expected: expected_len,
                found: 0,
            })
        },
    };
    if view.color(root).is_red() {
        return Err(Error::RedRoot);
    }

    let mut black_height = 0;
    let mut curr = Some(root);
    while let Some(link) = curr {
        if !view.color(link).is_red() {
            black_height += 1;
        }
        curr = view.left(link);
    }

    let mut stats = Stats {
        len: 0,
        height: 0,
        black_height,
    };
    let mut stack = vec![Frame {
        link: root,
        depth: 0,
        blacks: 0,
        lower: None,
        upper: None,
    }];

    while let Some(frame) = stack.pop() {
        let Frame {
            link,
            depth,
            mut blacks,
            lower,
            upper,
        } = frame;
        let entry = view.entry(link);
        let red = view.color(link).is_red();

        stats.len += 1;
        stats.height = stats.height.max(depth + 1);

        let below_lower = lower.map_or(false, |lower| entry <= lower);
        let above_upper = upper.map_or(false, |upper| entry >= upper);
        if below_lower || above_upper {
            return Err(Error::OutOfOrder { depth });
        }
        if !red {
            blacks += 1;
        }

        let left = view.left(link);
        let right = view.right(link);
        if red && (view.is_red(left) || view.is_red(right)) {
            return Err(Error::ConsecutiveReds { depth: depth + 1 });
        }
        if left_leaning && view.is_red(right) {
            return Err(Error::RedRightChild { depth });
        }

        for (child, lower, upper) in [(left, lower, Some(entry)), (right, Some(entry), upper)] {
            match child {
                Some(child) => stack.push(Frame {
                    link: child,
                    depth: depth + 1,
                    blacks,
                    lower,
                    upper,
                }),
                None if blacks != black_height => {
                    return Err(Error::UnbalancedBlacks {
                        expected: black_height,
                        found: blacks,
                    })
                },
                None => {},
            }
        }
    }

    if stats.len != expected_len {
        return Err(Error::LengthMismatch {
            expected: expected_len,
            found: stats.len,
        });
    }
    Ok(stats)
}

/// Returns the number of nodes on the longest root-to-leaf path of `view`.
pub fn height<T, U, V>(view: &V) -> usize
where
    V: TreeView<T, U>,
{
    let mut height = 0;
    let mut stack: Vec<(V::Link, usize)> = view.root().into_iter().map(|root| (root, 1)).collect();
    while let Some((link, depth)) = stack.pop() {
        height = height.max(depth);
        stack.extend(view.left(link).map(|child| (child, depth + 1)));
        stack.extend(view.right(link).map(|child| (child, depth + 1)));
    }
    height
}

/// Renders `view` as a graphviz `digraph`. Nodes are labelled `"key: value"` and edges into red
/// nodes are drawn red.
pub fn dump_dot<T, U, V, F, G>(view: &V, name: &str, key_fmt: F, value_fmt: G) -> String
where
    V: TreeView<T, U>,
    F: Fn(&T) -> String,
    G: Fn(&U) -> String,
{
    let label = |link: V::Link| {
        let entry = view.entry(link);
        format!("\"{}: {}\"", key_fmt(&entry.key), value_fmt(&entry.value))
    };

    let mut ret = format!("digraph {} {{\n", name);
    let mut stack: Vec<V::Link> = view.root().into_iter().collect();
    while let Some(link) = stack.pop() {
        ret.push_str(&format!("{};\n", label(link)));
        for child in view.left(link).into_iter().chain(view.right(link)) {
            let attributes = match view.color(child) {
                Color::Red => " [color = red]",
                Color::Black => "",
            };
            ret.push_str(&format!("{} -> {}{};\n", label(link), label(child), attributes));
        }
        stack.extend(view.right(link));
        stack.extend(view.left(link));
    }
    ret.push_str("}\n");
    ret
}
