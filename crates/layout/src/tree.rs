//! The node arena and its public operations.

use crate::algorithms;
use crate::config::LayoutConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::measure::MeasureFunc;
use crate::node::{Layout, NodeData, NodeId};
use crate::perf::{NoOpProfiler, Profiler};
use slotmap::SlotMap;
use std::fmt::Write;
use std::sync::Arc;
use trellis_style::Style;
use trellis_types::{AvailableSpace, Size};

/// Owns every node and issues the [`NodeId`]s that refer to them.
pub struct LayoutTree {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    pub(crate) config: LayoutConfig,
    pub(crate) profiler: Arc<dyn Profiler>,
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    /// Pre-allocates room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            config: LayoutConfig::default(),
            profiler: Arc::new(NoOpProfiler),
        }
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    pub fn set_profiler(&mut self, profiler: Arc<dyn Profiler>) {
        self.profiler = profiler;
    }

    pub fn enable_rounding(&mut self) {
        self.config.use_rounding = true;
    }

    pub fn disable_rounding(&mut self) {
        self.config.use_rounding = false;
    }

    /// Removes every node. All previously issued ids become invalid.
    pub fn clear(&mut self) {
        log::debug!("Clearing layout tree of {} nodes", self.nodes.len());
        self.nodes.clear();
    }

    pub fn total_node_count(&self) -> usize {
        self.nodes.len()
    }

    // --- Creation and removal ---

    pub fn new_leaf(&mut self, style: Style) -> NodeId {
        let id = self.nodes.insert(NodeData::new(style));
        log::debug!("Created leaf {:?}", id);
        id
    }

    pub fn new_leaf_with_measure(&mut self, style: Style, measure: MeasureFunc) -> NodeId {
        let mut data = NodeData::new(style);
        data.measure = Some(measure);
        let id = self.nodes.insert(data);
        log::debug!("Created measured leaf {:?}", id);
        id
    }

    /// Creates a node owning `children`. Children that already have a parent are moved.
    pub fn new_with_children(&mut self, style: Style, children: &[NodeId]) -> LayoutResult<NodeId> {
        for &child in children {
            self.check_child(child)?;
        }
        let id = self.nodes.insert(NodeData::new(style));
        for &child in children {
            self.attach(id, child, None);
        }
        log::debug!("Created {:?} with {} children", id, children.len());
        Ok(id)
    }

    /// Removes `node` from the tree and returns its now-invalid id.
    ///
    /// The node is detached from its parent, which is marked dirty. Its children stay in the
    /// tree as parentless roots.
    pub fn remove(&mut self, node: NodeId) -> LayoutResult<NodeId> {
        let data = self.nodes.remove(node).ok_or(LayoutError::InvalidInputNode(node))?;
        if let Some(parent) = data.parent {
            if let Some(parent_data) = self.nodes.get_mut(parent) {
                parent_data.children.retain(|&c| c != node);
            }
            self.mark_dirty_unchecked(parent);
        }
        for child in data.children {
            if let Some(child_data) = self.nodes.get_mut(child) {
                child_data.parent = None;
            }
        }
        log::debug!("Removed {:?}", node);
        Ok(node)
    }

    pub fn set_measure(&mut self, node: NodeId, measure: Option<MeasureFunc>) -> LayoutResult<()> {
        let data = self.nodes.get_mut(node).ok_or(LayoutError::InvalidInputNode(node))?;
        data.measure = measure;
        self.mark_dirty_unchecked(node);
        Ok(())
    }

    // --- Child list mutation ---

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> LayoutResult<()> {
        self.check_parent(parent)?;
        self.check_child(child)?;
        self.check_not_ancestor(parent, child)?;
        self.attach(parent, child, None);
        self.mark_dirty_unchecked(parent);
        log::debug!("Appended {:?} to {:?}", child, parent);
        Ok(())
    }

    /// Inserts `child` before the child currently at `child_index`. `child_index` may equal the
    /// child count, which appends.
    pub fn insert_child_at_index(&mut self, parent: NodeId, child_index: usize, child: NodeId) -> LayoutResult<()> {
        let child_count = self.check_parent(parent)?.children.len();
        if child_index > child_count {
            return Err(LayoutError::ChildIndexOutOfBounds {
                parent,
                child_index,
                child_count,
            });
        }
        self.check_child(child)?;
        self.check_not_ancestor(parent, child)?;
        self.attach(parent, child, Some(child_index));
        self.mark_dirty_unchecked(parent);
        log::debug!("Inserted {:?} into {:?} at {}", child, parent, child_index);
        Ok(())
    }

    /// Replaces the whole child list of `parent`. Previous children become parentless roots.
    pub fn set_children(&mut self, parent: NodeId, children: &[NodeId]) -> LayoutResult<()> {
        self.check_parent(parent)?;
        for &child in children {
            self.check_child(child)?;
            self.check_not_ancestor(parent, child)?;
        }

        let old = std::mem::take(&mut self.node_mut(parent).children);
        for child in old {
            if let Some(data) = self.nodes.get_mut(child) {
                data.parent = None;
            }
        }
        for &child in children {
            self.attach(parent, child, None);
        }
        self.mark_dirty_unchecked(parent);
        log::debug!("Set {} children on {:?}", children.len(), parent);
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> LayoutResult<NodeId> {
        let index = self
            .check_parent(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(LayoutError::InvalidChildNode(child))?;
        self.remove_child_at_index(parent, index)
    }

    pub fn remove_child_at_index(&mut self, parent: NodeId, child_index: usize) -> LayoutResult<NodeId> {
        self.check_index(parent, child_index)?;
        let child = self.node_mut(parent).children.remove(child_index);
        if let Some(data) = self.nodes.get_mut(child) {
            data.parent = None;
        }
        self.mark_dirty_unchecked(parent);
        log::debug!("Removed child {:?} from {:?}", child, parent);
        Ok(child)
    }

    /// Swaps the child at `child_index` for `new_child` and returns the old child, now parentless.
    pub fn replace_child_at_index(
        &mut self,
        parent: NodeId,
        child_index: usize,
        new_child: NodeId,
    ) -> LayoutResult<NodeId> {
        self.check_index(parent, child_index)?;
        self.check_child(new_child)?;
        self.check_not_ancestor(parent, new_child)?;

        let old_child = self.node(parent).children[child_index];
        if old_child == new_child {
            return Ok(old_child);
        }
        self.detach(new_child);
        // detaching may have shifted the target if new_child was an earlier sibling
        let index = self
            .node(parent)
            .children
            .iter()
            .position(|&c| c == old_child)
            .unwrap_or(child_index);
        self.node_mut(parent).children[index] = new_child;
        self.node_mut(new_child).parent = Some(parent);
        if let Some(data) = self.nodes.get_mut(old_child) {
            data.parent = None;
        }
        self.mark_dirty_unchecked(parent);
        Ok(old_child)
    }

    // --- Read accessors ---

    pub fn child_at_index(&self, parent: NodeId, child_index: usize) -> LayoutResult<NodeId> {
        self.check_index(parent, child_index)?;
        Ok(self.node(parent).children[child_index])
    }

    pub fn child_count(&self, parent: NodeId) -> LayoutResult<usize> {
        Ok(self.check_parent(parent)?.children.len())
    }

    pub fn children(&self, parent: NodeId) -> LayoutResult<&[NodeId]> {
        Ok(&self.check_parent(parent)?.children)
    }

    /// The parent of `node`, or `None` for roots and invalid ids.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|data| data.parent)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    // --- Style, layout and dirty state ---

    pub fn set_style(&mut self, node: NodeId, style: Style) -> LayoutResult<()> {
        self.nodes.get_mut(node).ok_or(LayoutError::InvalidInputNode(node))?.style = style;
        self.mark_dirty_unchecked(node);
        Ok(())
    }

    pub fn style(&self, node: NodeId) -> LayoutResult<&Style> {
        Ok(&self.get(node)?.style)
    }

    /// The last computed layout, rounded if rounding was enabled at the time.
    pub fn layout(&self, node: NodeId) -> LayoutResult<&Layout> {
        Ok(&self.get(node)?.final_layout)
    }

    pub fn unrounded_layout(&self, node: NodeId) -> LayoutResult<&Layout> {
        Ok(&self.get(node)?.unrounded_layout)
    }

    /// Marks `node` and every ancestor as needing layout.
    pub fn mark_dirty(&mut self, node: NodeId) -> LayoutResult<()> {
        self.get(node)?;
        self.mark_dirty_unchecked(node);
        Ok(())
    }

    pub fn dirty(&self, node: NodeId) -> LayoutResult<bool> {
        Ok(self.get(node)?.is_dirty)
    }

    /// Lays out the subtree rooted at `root` within `available_space`.
    pub fn compute_layout(&mut self, root: NodeId, available_space: Size<AvailableSpace>) -> LayoutResult<()> {
        self.get(root)?;
        log::debug!("Computing layout for {:?} in {:?}", root, available_space);

        #[cfg(feature = "profiling")]
        let start = instant::Instant::now();

        let use_rounding = self.config.use_rounding;
        algorithms::compute_root_layout(self, root, available_space);
        algorithms::rounding::round_layout(self, root, use_rounding);

        #[cfg(feature = "profiling")]
        self.profiler.record("compute_layout", start.elapsed());

        log::debug!("Finished layout for {:?}: {:?}", root, self.node(root).final_layout);
        Ok(())
    }

    /// Logs the computed layout of a subtree at `info` level, one indented line per node.
    pub fn print_tree(&self, root: NodeId) -> LayoutResult<()> {
        self.get(root)?;
        let mut out = String::new();
        self.write_node(&mut out, root, 0);
        log::info!("Layout tree:\n{}", out);
        Ok(())
    }

    fn write_node(&self, out: &mut String, node: NodeId, depth: usize) {
        let Some(data) = self.nodes.get(node) else {
            return;
        };
        let layout = data.final_layout;
        let _ = writeln!(
            out,
            "{:indent$}{:?} [x: {} y: {} w: {} h: {}] {:?}",
            "",
            data.style.display,
            layout.location.x,
            layout.location.y,
            layout.size.width,
            layout.size.height,
            node,
            indent = depth * 2,
        );
        for &child in &data.children {
            self.write_node(out, child, depth + 1);
        }
    }

    // --- Internal helpers ---

    fn get(&self, node: NodeId) -> LayoutResult<&NodeData> {
        self.nodes.get(node).ok_or(LayoutError::InvalidInputNode(node))
    }

    fn check_parent(&self, parent: NodeId) -> LayoutResult<&NodeData> {
        self.nodes.get(parent).ok_or(LayoutError::InvalidParentNode(parent))
    }

    fn check_child(&self, child: NodeId) -> LayoutResult<()> {
        if self.nodes.contains_key(child) {
            Ok(())
        } else {
            Err(LayoutError::InvalidChildNode(child))
        }
    }

    fn check_index(&self, parent: NodeId, child_index: usize) -> LayoutResult<()> {
        let child_count = self.check_parent(parent)?.children.len();
        if child_index >= child_count {
            return Err(LayoutError::ChildIndexOutOfBounds {
                parent,
                child_index,
                child_count,
            });
        }
        Ok(())
    }

    /// Rejects making `child` a descendant of itself.
    fn check_not_ancestor(&self, parent: NodeId, child: NodeId) -> LayoutResult<()> {
        let mut current = Some(parent);
        while let Some(node) = current {
            if node == child {
                return Err(LayoutError::InvalidChildNode(child));
            }
            current = self.nodes.get(node).and_then(|data| data.parent);
        }
        Ok(())
    }

    /// Unlinks `child` from its current parent, if any.
    fn detach(&mut self, child: NodeId) {
        let Some(old_parent) = self.nodes.get_mut(child).and_then(|data| data.parent.take()) else {
            return;
        };
        if let Some(data) = self.nodes.get_mut(old_parent) {
            data.children.retain(|&c| c != child);
        }
        self.mark_dirty_unchecked(old_parent);
    }

    /// Moves `child` under `parent` at `index` (clamped), or at the end.
    ///
    /// `index` refers to the child list before the move, so a child moving later among its own
    /// siblings lands before the same sibling it was aimed at.
    fn attach(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        let previous = self.node(parent).children.iter().position(|&c| c == child);
        self.detach(child);
        let children = &mut self.node_mut(parent).children;
        match index {
            Some(index) => {
                let index = match previous {
                    Some(position) if position < index => index - 1,
                    _ => index,
                };
                children.insert(index.min(children.len()), child)
            }
            None => children.push(child),
        }
        self.node_mut(child).parent = Some(parent);
    }

    pub(crate) fn mark_dirty_unchecked(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(data) = self.nodes.get_mut(id) else {
                break;
            };
            data.mark_dirty();
            current = data.parent;
        }
    }

    /// Callers must have validated `node`.
    pub(crate) fn node(&self, node: NodeId) -> &NodeData {
        &self.nodes[node]
    }

    pub(crate) fn node_mut(&mut self, node: NodeId) -> &mut NodeData {
        &mut self.nodes[node]
    }
}
