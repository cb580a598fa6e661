//! Box layout over a tree of styled nodes: Flexbox, CSS Grid and block flow.
//!
//! Nodes live in a [`LayoutTree`] arena and are addressed by [`NodeId`]. After building the tree,
//! call [`LayoutTree::compute_layout`] on a root and read each node's [`Layout`] back. Results
//! are cached per node; mutating a node marks it and its ancestors dirty so that only the
//! affected part of the tree is recomputed on the next pass.
//!
//! ```
//! use trellis_layout::LayoutTree;
//! use trellis_style::{Dimension, Style};
//! use trellis_types::{AvailableSpace, Size};
//!
//! let mut tree = LayoutTree::new();
//! let child = tree.new_leaf(Style {
//!     size: Size::new(Dimension::Length(100.0), Dimension::Length(50.0)),
//!     ..Style::default()
//! });
//! let root = tree.new_with_children(Style::default(), &[child]).unwrap();
//! tree.compute_layout(root, Size::new(AvailableSpace::Definite(300.0), AvailableSpace::MaxContent)).unwrap();
//!
//! assert_eq!(tree.layout(child).unwrap().size, Size::new(100.0, 50.0));
//! ```

pub(crate) mod algorithms;
pub(crate) mod cache;
pub mod config;
pub mod error;
pub(crate) mod interface;
pub mod measure;
pub mod node;
pub mod perf;
pub mod tree;

pub use self::config::LayoutConfig;
pub use self::error::{LayoutError, LayoutResult};
pub use self::measure::{Measure, MeasureFunc};
pub use self::node::{Layout, NodeId};
pub use self::perf::{DebugProfiler, NoOpProfiler, Profiler};
pub use self::tree::LayoutTree;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tree_test;
