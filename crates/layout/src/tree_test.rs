use crate::test_utils::{assert_box, definite, init_logger, layout_of, sized};
use crate::{DebugProfiler, LayoutConfig, LayoutError, LayoutTree, Profiler};
use std::sync::Arc;
use trellis_style::helpers::{length, repeat};
use trellis_style::{
    AlignContent, AlignItems, Dimension, Display, FlexDirection, FlexWrap, GridAutoFlow, GridPlacement,
    GridTrackRepetition, LengthPercentage, LengthPercentageAuto, MaxTrackSizingFunction, MinMax,
    MinTrackSizingFunction, Overflow, Position, Style, TrackSizingFunction,
};
use trellis_types::{AvailableSpace, Line, Point, Rect, Size};

#[test]
fn single_leaf_is_placed_at_origin() {
    init_logger();
    let mut tree = LayoutTree::new();
    let leaf = tree.new_leaf(sized(100.0, 50.0));
    tree.compute_layout(leaf, definite(500.0, 500.0)).unwrap();
    assert_box(&tree, leaf, (0.0, 0.0, 100.0, 50.0));
    assert_eq!(layout_of(&tree, leaf).order, 0);
}

#[test]
fn flex_row_places_children_side_by_side() {
    init_logger();
    let mut tree = LayoutTree::new();
    let a = tree.new_leaf(sized(100.0, 100.0));
    let b = tree.new_leaf(sized(100.0, 100.0));
    let root = tree.new_with_children(sized(300.0, 100.0), &[a, b]).unwrap();

    tree.compute_layout(root, definite(300.0, 100.0)).unwrap();

    assert_box(&tree, root, (0.0, 0.0, 300.0, 100.0));
    assert_box(&tree, a, (0.0, 0.0, 100.0, 100.0));
    assert_box(&tree, b, (100.0, 0.0, 100.0, 100.0));
    assert_eq!(layout_of(&tree, b).order, 1);
}

#[test]
fn child_lists_keep_parent_links_in_step() {
    let mut tree = LayoutTree::new();
    let a = tree.new_leaf(Style::default());
    let b = tree.new_leaf(Style::default());
    let c = tree.new_leaf(Style::default());
    let root = tree.new_with_children(Style::default(), &[a, b]).unwrap();

    tree.insert_child_at_index(root, 1, c).unwrap();
    assert_eq!(tree.children(root).unwrap(), &[a, c, b]);
    assert_eq!(tree.parent(c), Some(root));

    // moving among siblings: the index names the sibling to land before
    tree.insert_child_at_index(root, 2, a).unwrap();
    assert_eq!(tree.children(root).unwrap(), &[c, a, b]);
    tree.insert_child_at_index(root, 3, c).unwrap();
    assert_eq!(tree.children(root).unwrap(), &[a, b, c]);
    tree.insert_child_at_index(root, 0, c).unwrap();
    assert_eq!(tree.children(root).unwrap(), &[c, a, b]);
    tree.insert_child_at_index(root, 1, a).unwrap();
    assert_eq!(tree.children(root).unwrap(), &[c, a, b]);
    tree.insert_child_at_index(root, 1, c).unwrap();
    assert_eq!(tree.children(root).unwrap(), &[c, a, b]);
    tree.insert_child_at_index(root, 1, b).unwrap();
    assert_eq!(tree.children(root).unwrap(), &[c, b, a]);
    tree.insert_child_at_index(root, 2, a).unwrap();
    tree.insert_child_at_index(root, 0, a).unwrap();
    tree.insert_child_at_index(root, 3, c).unwrap();
    assert_eq!(tree.children(root).unwrap(), &[a, b, c]);
    assert_eq!(tree.child_count(root).unwrap(), 3);

    let old = tree.replace_child_at_index(root, 0, b).unwrap();
    assert_eq!(old, a);
    assert_eq!(tree.children(root).unwrap(), &[b, c]);
    assert_eq!(tree.parent(a), None);

    assert_eq!(tree.remove_child(root, c).unwrap(), c);
    assert_eq!(tree.parent(c), None);
    assert_eq!(tree.child_count(root).unwrap(), 1);

    tree.set_children(root, &[c, a]).unwrap();
    assert_eq!(tree.parent(b), None);
    assert_eq!(tree.child_at_index(root, 1).unwrap(), a);

    assert_eq!(tree.remove_child_at_index(root, 0).unwrap(), c);
    assert_eq!(tree.children(root).unwrap(), &[a]);
    assert_eq!(tree.parent(c), None);
}

#[test]
fn invalid_indices_and_ids_are_reported() {
    let mut tree = LayoutTree::new();
    let child = tree.new_leaf(Style::default());
    let root = tree.new_with_children(Style::default(), &[child]).unwrap();

    assert_eq!(
        tree.child_at_index(root, 5),
        Err(LayoutError::ChildIndexOutOfBounds {
            parent: root,
            child_index: 5,
            child_count: 1,
        })
    );
    assert!(matches!(
        tree.insert_child_at_index(root, 3, child),
        Err(LayoutError::ChildIndexOutOfBounds { .. })
    ));

    let stray = tree.new_leaf(Style::default());
    tree.remove(stray).unwrap();
    assert_eq!(tree.add_child(root, stray), Err(LayoutError::InvalidChildNode(stray)));
    assert_eq!(tree.add_child(stray, child), Err(LayoutError::InvalidParentNode(stray)));
    assert_eq!(tree.layout(stray).err(), Some(LayoutError::InvalidInputNode(stray)));
    assert_eq!(
        tree.compute_layout(stray, Size::MAX_CONTENT),
        Err(LayoutError::InvalidInputNode(stray))
    );

    let invalid = Some(LayoutError::InvalidInputNode(stray));
    assert_eq!(tree.style(stray).err(), invalid);
    assert_eq!(tree.unrounded_layout(stray).err(), invalid);
    assert_eq!(tree.dirty(stray).err(), invalid);
    assert_eq!(tree.mark_dirty(stray).err(), invalid);
    assert_eq!(tree.set_style(stray, Style::default()).err(), invalid);
    assert_eq!(tree.set_measure(stray, None).err(), invalid);
    assert_eq!(tree.remove(stray).err(), invalid);
    assert_eq!(tree.children(stray).err(), Some(LayoutError::InvalidParentNode(stray)));
    assert!(!tree.contains(stray));
    assert_eq!(tree.parent(stray), None);
    // the failed calls left the live nodes untouched
    assert_eq!(tree.children(root).unwrap(), &[child]);
    assert_eq!(tree.total_node_count(), 2);
}

#[test]
fn cycles_are_rejected_without_side_effects() {
    let mut tree = LayoutTree::new();
    let leaf = tree.new_leaf(Style::default());
    let middle = tree.new_with_children(Style::default(), &[leaf]).unwrap();
    let root = tree.new_with_children(Style::default(), &[middle]).unwrap();

    assert_eq!(tree.add_child(leaf, root), Err(LayoutError::InvalidChildNode(root)));
    assert_eq!(tree.add_child(middle, middle), Err(LayoutError::InvalidChildNode(middle)));
    assert_eq!(tree.parent(root), None);
    assert_eq!(tree.children(leaf).unwrap().len(), 0);
}

#[test]
fn removing_a_node_detaches_it_and_orphans_its_children() {
    let mut tree = LayoutTree::new();
    let grandchild = tree.new_leaf(Style::default());
    let child = tree.new_with_children(Style::default(), &[grandchild]).unwrap();
    let sibling = tree.new_leaf(Style::default());
    let root = tree.new_with_children(Style::default(), &[child, sibling]).unwrap();
    tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

    tree.remove(child).unwrap();

    assert!(!tree.contains(child));
    assert_eq!(tree.children(root).unwrap(), &[sibling]);
    assert!(tree.dirty(root).unwrap());
    assert_eq!(tree.parent(grandchild), None);
    assert!(tree.contains(grandchild));
    assert_eq!(tree.total_node_count(), 3);

    // a root goes away the same way
    tree.remove(root).unwrap();
    assert_eq!(tree.parent(sibling), None);
    assert_eq!(tree.remove(root), Err(LayoutError::InvalidInputNode(root)));
}

#[test]
fn mutations_dirty_ancestors_but_not_siblings() {
    init_logger();
    let mut tree = LayoutTree::new();
    let deep = tree.new_leaf(sized(10.0, 10.0));
    let a = tree.new_with_children(Style::default(), &[deep]).unwrap();
    let b = tree.new_leaf(sized(10.0, 10.0));
    let root = tree.new_with_children(Style::default(), &[a, b]).unwrap();

    tree.compute_layout(root, definite(100.0, 100.0)).unwrap();
    for node in [deep, a, b, root] {
        assert!(!tree.dirty(node).unwrap());
    }

    tree.set_style(deep, sized(20.0, 20.0)).unwrap();
    assert!(tree.dirty(deep).unwrap());
    assert!(tree.dirty(a).unwrap());
    assert!(tree.dirty(root).unwrap());
    assert!(!tree.dirty(b).unwrap());

    tree.compute_layout(root, definite(100.0, 100.0)).unwrap();
    assert_box(&tree, deep, (0.0, 0.0, 20.0, 20.0));
    assert!(!tree.dirty(root).unwrap());
}

#[test]
fn unchanged_trees_are_served_from_cache() {
    init_logger();
    let profiler = Arc::new(DebugProfiler::new());
    let mut tree = LayoutTree::new();
    tree.set_profiler(profiler.clone());

    let text = tree.new_leaf_with_measure(
        Style::default(),
        Box::new(|known: Size<Option<f32>>, _available: Size<AvailableSpace>| {
            Size::new(known.width.unwrap_or(40.0), known.height.unwrap_or(20.0))
        }),
    );
    let root = tree.new_with_children(sized(200.0, 100.0), &[text]).unwrap();

    tree.compute_layout(root, definite(200.0, 100.0)).unwrap();
    let first = layout_of(&tree, text);
    let measured = profiler.measure_calls();
    assert!(measured > 0);
    assert_eq!(first.size, Size::new(40.0, 100.0));

    tree.compute_layout(root, definite(200.0, 100.0)).unwrap();
    assert_eq!(profiler.measure_calls(), measured);
    assert_eq!(layout_of(&tree, text), first);
    assert!(profiler.hits() > 0);

    // replacing the measure function invalidates the cached size
    tree.set_measure(
        text,
        Some(Box::new(|_: Size<Option<f32>>, _: Size<AvailableSpace>| Size::new(60.0, 10.0))),
    )
    .unwrap();
    profiler.reset();
    tree.compute_layout(root, definite(200.0, 100.0)).unwrap();
    assert!(profiler.measure_calls() > 0);
    assert_eq!(layout_of(&tree, text).size.width, 60.0);
}

#[test]
fn flex_grow_shares_free_space_by_weight() {
    let mut tree = LayoutTree::new();
    let one = tree.new_leaf(Style {
        flex_grow: 1.0,
        ..Style::default()
    });
    let two = tree.new_leaf(Style {
        flex_grow: 2.0,
        ..Style::default()
    });
    let root = tree.new_with_children(sized(300.0, 50.0), &[one, two]).unwrap();
    tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

    assert_box(&tree, one, (0.0, 0.0, 100.0, 50.0));
    assert_box(&tree, two, (100.0, 0.0, 200.0, 50.0));
}

#[test]
fn rounding_keeps_edges_aligned() {
    let mut tree = LayoutTree::new();
    let grow = || Style {
        flex_grow: 1.0,
        ..Style::default()
    };
    let children = [tree.new_leaf(grow()), tree.new_leaf(grow()), tree.new_leaf(grow())];
    let root = tree.new_with_children(sized(100.0, 10.0), &children).unwrap();
    tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

    let widths: Vec<f32> = children.iter().map(|&c| layout_of(&tree, c).size.width).collect();
    assert_eq!(widths, vec![33.0, 34.0, 33.0]);
    assert_eq!(layout_of(&tree, children[2]).location.x, 67.0);

    let unrounded = tree.unrounded_layout(children[0]).unwrap().size.width;
    assert!((unrounded - 100.0 / 3.0).abs() < 1e-4);

    let mut exact = LayoutTree::with_config(LayoutConfig { use_rounding: false });
    let child = exact.new_leaf(grow());
    let other = exact.new_leaf(grow());
    let third = exact.new_leaf(grow());
    let root = exact.new_with_children(sized(100.0, 10.0), &[child, other, third]).unwrap();
    exact.compute_layout(root, Size::MAX_CONTENT).unwrap();
    assert!((layout_of(&exact, child).size.width - 100.0 / 3.0).abs() < 1e-4);
}

#[test]
fn auto_fill_grid_wraps_the_fourth_item() {
    init_logger();
    let mut tree = LayoutTree::new();
    let cell = Style {
        size: Size::new(Dimension::Auto, Dimension::Length(50.0)),
        ..Style::default()
    };
    let cells: Vec<_> = (0..4).map(|_| tree.new_leaf(cell.clone())).collect();
    let root = tree
        .new_with_children(
            Style {
                display: Display::Grid,
                size: Size::new(Dimension::Length(350.0), Dimension::Auto),
                grid_template_columns: vec![repeat(GridTrackRepetition::AutoFill, vec![length(100.0)])],
                ..Style::default()
            },
            &cells,
        )
        .unwrap();
    tree.compute_layout(root, definite(800.0, 600.0)).unwrap();

    assert_box(&tree, root, (0.0, 0.0, 350.0, 100.0));
    assert_box(&tree, cells[0], (0.0, 0.0, 100.0, 50.0));
    assert_box(&tree, cells[2], (200.0, 0.0, 100.0, 50.0));
    assert_box(&tree, cells[3], (0.0, 50.0, 100.0, 50.0));
}

#[test]
fn block_children_stack_with_collapsed_margins() {
    let mut tree = LayoutTree::new();
    let first = tree.new_leaf(Style {
        size: Size::new(Dimension::Auto, Dimension::Length(50.0)),
        margin: Rect {
            bottom: LengthPercentageAuto::Length(20.0),
            ..Style::default().margin
        },
        ..Style::default()
    });
    let second = tree.new_leaf(Style {
        size: Size::new(Dimension::Auto, Dimension::Length(30.0)),
        margin: Rect {
            top: LengthPercentageAuto::Length(10.0),
            ..Style::default().margin
        },
        ..Style::default()
    });
    let root = tree
        .new_with_children(
            Style {
                display: Display::Block,
                size: Size::new(Dimension::Length(200.0), Dimension::Auto),
                ..Style::default()
            },
            &[first, second],
        )
        .unwrap();
    tree.compute_layout(root, definite(800.0, 600.0)).unwrap();

    assert_box(&tree, first, (0.0, 0.0, 200.0, 50.0));
    assert_box(&tree, second, (0.0, 70.0, 200.0, 30.0));
    assert_box(&tree, root, (0.0, 0.0, 200.0, 100.0));
}

#[test]
fn hidden_subtrees_get_empty_layouts() {
    let mut tree = LayoutTree::new();
    let inner = tree.new_leaf(sized(10.0, 10.0));
    let hidden = tree
        .new_with_children(
            Style {
                display: Display::None,
                ..sized(50.0, 50.0)
            },
            &[inner],
        )
        .unwrap();
    let visible = tree.new_leaf(sized(20.0, 20.0));
    let root = tree.new_with_children(sized(100.0, 100.0), &[hidden, visible]).unwrap();
    tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

    assert_box(&tree, hidden, (0.0, 0.0, 0.0, 0.0));
    assert_box(&tree, inner, (0.0, 0.0, 0.0, 0.0));
    assert_box(&tree, visible, (0.0, 0.0, 20.0, 20.0));
    assert_eq!(layout_of(&tree, visible).order, 1);
}

#[test]
fn clear_invalidates_every_id() {
    let mut tree = LayoutTree::with_capacity(4);
    let node = tree.new_leaf(Style::default());
    tree.clear();
    assert_eq!(tree.total_node_count(), 0);
    assert!(!tree.contains(node));
    let fresh = tree.new_leaf(Style::default());
    assert_ne!(fresh, node);
}

#[test]
fn print_tree_accepts_valid_roots_only() {
    init_logger();
    let mut tree = LayoutTree::new();
    let leaf = tree.new_leaf(sized(10.0, 10.0));
    let root = tree.new_with_children(Style::default(), &[leaf]).unwrap();
    tree.compute_layout(root, definite(100.0, 100.0)).unwrap();
    assert!(tree.print_tree(root).is_ok());

    tree.remove(leaf).unwrap();
    assert_eq!(tree.print_tree(leaf), Err(LayoutError::InvalidInputNode(leaf)));
}

#[test]
fn styles_read_back_exactly_as_set() {
    let mut tree = LayoutTree::new();
    let node = tree.new_leaf(Style::default());
    for dimension in [Dimension::Length(5.0), Dimension::Percent(0.5), Dimension::Auto] {
        let style = Style {
            display: Display::Grid,
            size: Size::new(dimension, dimension),
            flex_basis: dimension,
            margin: Rect::new(
                LengthPercentageAuto::Auto,
                LengthPercentageAuto::Length(1.0),
                LengthPercentageAuto::Percent(0.25),
                LengthPercentageAuto::Auto,
            ),
            grid_template_columns: vec![repeat(GridTrackRepetition::AutoFit, vec![length(10.0)])],
            aspect_ratio: Some(2.0),
            ..Style::default()
        };
        tree.set_style(node, style.clone()).unwrap();
        assert_eq!(tree.style(node).unwrap(), &style);
    }
}

#[test]
fn every_style_variant_reads_back_as_set() {
    let mut tree = LayoutTree::new();
    let node = tree.new_leaf(Style::default());
    let mut styles = Vec::new();

    for display in [Display::Block, Display::Flex, Display::Grid, Display::None] {
        styles.push(Style { display, ..Style::default() });
    }
    for position in [Position::Relative, Position::Absolute] {
        styles.push(Style { position, ..Style::default() });
    }
    for overflow in [Overflow::Visible, Overflow::Hidden, Overflow::Scroll] {
        styles.push(Style {
            overflow: Point::new(overflow, overflow),
            ..Style::default()
        });
    }
    for direction in [
        FlexDirection::Row,
        FlexDirection::Column,
        FlexDirection::RowReverse,
        FlexDirection::ColumnReverse,
    ] {
        styles.push(Style {
            flex_direction: direction,
            ..Style::default()
        });
    }
    for wrap in [FlexWrap::NoWrap, FlexWrap::Wrap, FlexWrap::WrapReverse] {
        styles.push(Style {
            flex_wrap: wrap,
            ..Style::default()
        });
    }
    for flow in [
        GridAutoFlow::Row,
        GridAutoFlow::Column,
        GridAutoFlow::RowDense,
        GridAutoFlow::ColumnDense,
    ] {
        styles.push(Style {
            grid_auto_flow: flow,
            ..Style::default()
        });
    }
    for align in [
        AlignItems::Start,
        AlignItems::End,
        AlignItems::FlexStart,
        AlignItems::FlexEnd,
        AlignItems::Center,
        AlignItems::Baseline,
        AlignItems::Stretch,
    ] {
        styles.push(Style {
            align_items: Some(align),
            align_self: Some(align),
            justify_items: Some(align),
            justify_self: Some(align),
            ..Style::default()
        });
    }
    for content in [
        AlignContent::Start,
        AlignContent::End,
        AlignContent::FlexStart,
        AlignContent::FlexEnd,
        AlignContent::Center,
        AlignContent::Stretch,
        AlignContent::SpaceBetween,
        AlignContent::SpaceEvenly,
        AlignContent::SpaceAround,
    ] {
        styles.push(Style {
            align_content: Some(content),
            justify_content: Some(content),
            ..Style::default()
        });
    }
    for placement in [GridPlacement::Auto, GridPlacement::Line(-2), GridPlacement::Span(3)] {
        styles.push(Style {
            grid_row: Line::new(placement, placement),
            grid_column: Line::new(placement, GridPlacement::Auto),
            ..Style::default()
        });
    }
    for edge in [
        LengthPercentageAuto::Length(1.0),
        LengthPercentageAuto::Percent(0.1),
        LengthPercentageAuto::Auto,
    ] {
        styles.push(Style {
            inset: Rect::new(edge, edge, edge, edge),
            margin: Rect::new(edge, edge, edge, edge),
            ..Style::default()
        });
    }
    for edge in [LengthPercentage::Length(2.0), LengthPercentage::Percent(0.2)] {
        styles.push(Style {
            padding: Rect::new(edge, edge, edge, edge),
            border: Rect::new(edge, edge, edge, edge),
            gap: Size::new(edge, edge),
            ..Style::default()
        });
    }

    let mins = [
        MinTrackSizingFunction::Fixed(LengthPercentage::Length(10.0)),
        MinTrackSizingFunction::Fixed(LengthPercentage::Percent(0.5)),
        MinTrackSizingFunction::MinContent,
        MinTrackSizingFunction::MaxContent,
        MinTrackSizingFunction::Auto,
    ];
    let maxes = [
        MaxTrackSizingFunction::Fixed(LengthPercentage::Length(10.0)),
        MaxTrackSizingFunction::MinContent,
        MaxTrackSizingFunction::MaxContent,
        MaxTrackSizingFunction::FitContent(LengthPercentage::Percent(0.5)),
        MaxTrackSizingFunction::Auto,
        MaxTrackSizingFunction::Fraction(2.0),
    ];
    let repetitions = [
        GridTrackRepetition::AutoFill,
        GridTrackRepetition::AutoFit,
        GridTrackRepetition::Count(4),
    ];
    for (index, &min) in mins.iter().enumerate() {
        for &max in &maxes {
            let track = MinMax { min, max };
            let repetition = repetitions[index % repetitions.len()];
            styles.push(Style {
                grid_template_columns: vec![
                    TrackSizingFunction::Single(track),
                    TrackSizingFunction::Repeat(repetition, vec![track, track]),
                ],
                grid_template_rows: vec![TrackSizingFunction::Single(track)],
                grid_auto_columns: vec![track],
                grid_auto_rows: vec![track, track],
                ..Style::default()
            });
        }
    }

    for style in styles {
        tree.set_style(node, style.clone()).unwrap();
        assert_eq!(tree.style(node).unwrap(), &style);
        assert!(tree.dirty(node).unwrap());
    }
}
