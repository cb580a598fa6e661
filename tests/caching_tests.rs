mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{TestResult, bounds, init_logger, leaves, sized, text};
use trellis::prelude::*;

/// A fixed-size measure that counts its invocations.
fn counting(calls: Arc<AtomicUsize>) -> MeasureFunc {
    Box::new(move |known: Size<Option<f32>>, _available: Size<AvailableSpace>| {
        calls.fetch_add(1, Ordering::SeqCst);
        Size::new(known.width.unwrap_or(100.0), known.height.unwrap_or(10.0))
    })
}

#[test]
fn a_clean_tree_is_served_from_the_cache() -> TestResult {
    init_logger();
    let profiler = Arc::new(DebugProfiler::new());
    let mut tree = LayoutTree::new();
    tree.set_profiler(profiler.clone());

    let calls = Arc::new(AtomicUsize::new(0));
    let leaf = tree.new_leaf_with_measure(Style::default(), counting(calls.clone()));
    let column = tree.new_with_children(Style::default(), &[leaf])?;
    let root = tree.new_with_children(sized(400.0, 300.0), &[column])?;

    tree.compute_layout(root, Size::MAX_CONTENT)?;
    let first_pass = calls.load(Ordering::SeqCst);
    assert!(first_pass > 0);

    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(calls.load(Ordering::SeqCst), first_pass);
    assert!(profiler.hits() > 0);
    profiler.log_summary();
    Ok(())
}

#[test]
fn dirtying_one_subtree_leaves_siblings_cached() -> TestResult {
    let mut tree = LayoutTree::new();
    let changed_calls = Arc::new(AtomicUsize::new(0));
    let untouched_calls = Arc::new(AtomicUsize::new(0));
    let changed = tree.new_leaf_with_measure(Style::default(), counting(changed_calls.clone()));
    let untouched = tree.new_leaf_with_measure(Style::default(), counting(untouched_calls.clone()));
    let root = tree.new_with_children(sized(400.0, 100.0), &[changed, untouched])?;

    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(bounds(&tree, changed)?, (0.0, 0.0, 100.0, 100.0));
    assert_eq!(bounds(&tree, untouched)?, (100.0, 0.0, 100.0, 100.0));
    let untouched_before = untouched_calls.load(Ordering::SeqCst);
    let changed_before = changed_calls.load(Ordering::SeqCst);

    tree.set_style(
        changed,
        Style {
            flex_grow: 1.0,
            ..Style::default()
        },
    )?;
    assert!(tree.dirty(root)?);
    assert!(!tree.dirty(untouched)?);

    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(bounds(&tree, changed)?, (0.0, 0.0, 300.0, 100.0));
    assert_eq!(bounds(&tree, untouched)?, (300.0, 0.0, 100.0, 100.0));
    assert!(changed_calls.load(Ordering::SeqCst) > changed_before);
    assert_eq!(untouched_calls.load(Ordering::SeqCst), untouched_before);
    Ok(())
}

#[test]
fn new_available_space_recomputes_without_dirtying() -> TestResult {
    let mut tree = LayoutTree::new();
    let child = tree.new_leaf(Style::default());
    let root = tree.new_with_children(
        Style {
            display: Display::Block,
            ..Style::default()
        },
        &[child],
    )?;

    tree.compute_layout(root, Size::definite(200.0, 100.0))?;
    assert_eq!(bounds(&tree, child)?.2, 200.0);

    tree.compute_layout(root, Size::definite(500.0, 100.0))?;
    assert_eq!(bounds(&tree, child)?.2, 500.0);
    assert!(!tree.dirty(root)?);
    Ok(())
}

#[test]
fn replacing_a_measure_function_invalidates_the_leaf() -> TestResult {
    let mut tree = LayoutTree::new();
    let leaf = tree.new_leaf_with_measure(Style::default(), counting(Arc::new(AtomicUsize::new(0))));
    let root = tree.new_with_children(
        Style {
            align_items: Some(AlignItems::FlexStart),
            ..sized(400.0, 100.0)
        },
        &[leaf],
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(bounds(&tree, leaf)?, (0.0, 0.0, 100.0, 10.0));

    let wider: MeasureFunc = Box::new(|_known: Size<Option<f32>>, _available: Size<AvailableSpace>| Size::new(150.0, 30.0));
    tree.set_measure(leaf, Some(wider))?;
    assert!(tree.dirty(root)?);
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(bounds(&tree, leaf)?, (0.0, 0.0, 150.0, 30.0));
    Ok(())
}

/// `(order, x, y, width, height)` as raw bits, so that equality is bit-for-bit.
type Snapshot = (u32, [u32; 4]);

fn snapshot(layout: &Layout) -> Snapshot {
    let values = [layout.location.x, layout.location.y, layout.size.width, layout.size.height];
    (layout.order, values.map(f32::to_bits))
}

fn snapshot_tree(tree: &LayoutTree, root: NodeId) -> Result<Vec<(NodeId, Snapshot, Snapshot)>, LayoutError> {
    let mut pending = vec![root];
    let mut snapshots = Vec::new();
    while let Some(node) = pending.pop() {
        snapshots.push((node, snapshot(tree.layout(node)?), snapshot(tree.unrounded_layout(node)?)));
        pending.extend_from_slice(tree.children(node)?);
    }
    Ok(snapshots)
}

/// A flex column holding a grid, a padded block and a wrapping flex row.
fn mixed_tree(tree: &mut LayoutTree) -> Result<NodeId, LayoutError> {
    let mut cells = leaves(tree, 2, &sized(33.3, 12.7));
    cells.push(tree.new_leaf_with_measure(Style::default(), text(90.0, 9.5)));
    let grid = tree.new_with_children(
        Style {
            display: Display::Grid,
            grid_template_columns: vec![fr(1.0), length(47.5), auto()],
            gap: Size::new(length(3.3), length(1.1)),
            ..Style::default()
        },
        &cells,
    )?;

    let mut stacked = leaves(
        tree,
        2,
        &Style {
            size: Size::new(percent(0.45), length(10.2)),
            margin: Rect::new(auto(), auto(), length(2.5), length(4.0)),
            ..Style::default()
        },
    );
    stacked.push(tree.new_leaf(Style {
        position: Position::Absolute,
        inset: Rect::new(auto(), length(1.5), length(0.7), auto()),
        ..sized(5.5, 5.5)
    }));
    let block = tree.new_with_children(
        Style {
            display: Display::Block,
            padding: Rect::new(length(3.7), length(1.2), percent(0.05), zero()),
            border: Rect::new(length(1.0), length(1.0), length(1.0), length(1.0)),
            ..Style::default()
        },
        &stacked,
    )?;

    let mut wrapped = leaves(
        tree,
        3,
        &Style {
            flex_grow: 1.0,
            ..sized(61.1, 8.8)
        },
    );
    wrapped.push(tree.new_leaf_with_measure(Style::default(), text(140.0, 11.0)));
    let row = tree.new_with_children(
        Style {
            flex_wrap: FlexWrap::Wrap,
            align_items: Some(AlignItems::Baseline),
            justify_content: Some(JustifyContent::SpaceEvenly),
            padding: Rect::new(length(2.2), length(2.2), length(2.2), length(2.2)),
            ..Style::default()
        },
        &wrapped,
    )?;

    tree.new_with_children(
        Style {
            flex_direction: FlexDirection::Column,
            size: Size::new(length(201.7), auto()),
            gap: Size::new(zero(), length(2.1)),
            ..Style::default()
        },
        &[grid, block, row],
    )
}

#[test]
fn repeated_layout_is_bit_identical_for_every_node() -> TestResult {
    init_logger();
    for rounding in [true, false] {
        let mut tree = LayoutTree::new();
        if !rounding {
            tree.disable_rounding();
        }
        let root = mixed_tree(&mut tree)?;
        let space = Size::definite(333.3, 999.9);

        tree.compute_layout(root, space)?;
        let first = snapshot_tree(&tree, root)?;
        assert_eq!(first.len(), 14);

        tree.compute_layout(root, space)?;
        assert_eq!(snapshot_tree(&tree, root)?, first);

        // a full recompute from cold caches matches the cached pass too
        tree.mark_dirty(root)?;
        for &(node, _, _) in &first {
            tree.mark_dirty(node)?;
        }
        tree.compute_layout(root, space)?;
        assert_eq!(snapshot_tree(&tree, root)?, first);
    }
    Ok(())
}

