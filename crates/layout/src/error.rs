use crate::node::NodeId;
use thiserror::Error;

/// Errors returned by fallible [`LayoutTree`](crate::LayoutTree) operations.
///
/// Every operation validates its ids and indices up front, so an `Err` always means the tree was
/// left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Index {child_index} is out of bounds for node {parent:?} with {child_count} children.")]
    ChildIndexOutOfBounds {
        parent: NodeId,
        child_index: usize,
        child_count: usize,
    },
    #[error("Parent node {0:?} is not in the tree.")]
    InvalidParentNode(NodeId),
    #[error("Child node {0:?} is not in the tree.")]
    InvalidChildNode(NodeId),
    #[error("Node {0:?} is not in the tree.")]
    InvalidInputNode(NodeId),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
