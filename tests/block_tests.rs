mod common;

use common::{TestResult, bounds, leaves, sized, text};
use trellis::prelude::*;

fn block(width: Dimension) -> Style {
    Style {
        display: Display::Block,
        size: Size::new(width, auto()),
        ..Style::default()
    }
}

fn tall(height: f32) -> Style {
    Style {
        size: Size::new(auto(), length(height)),
        ..Style::default()
    }
}

#[test]
fn auto_horizontal_margins_center_the_box() -> TestResult {
    let mut tree = LayoutTree::new();
    let child = tree.new_leaf(Style {
        margin: Rect::new(auto(), auto(), zero(), zero()),
        ..sized(100.0, 10.0)
    });
    let root = tree.new_with_children(block(length(300.0)), &[child])?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(bounds(&tree, child)?, (100.0, 0.0, 100.0, 10.0));
    Ok(())
}

#[test]
fn padding_and_border_inset_the_children() -> TestResult {
    let mut tree = LayoutTree::new();
    let child = tree.new_leaf(tall(20.0));
    let root = tree.new_with_children(
        Style {
            padding: Rect::new(length(10.0), length(10.0), length(10.0), length(10.0)),
            border: Rect::new(length(5.0), length(5.0), length(5.0), length(5.0)),
            ..block(length(200.0))
        },
        &[child],
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    // locations are measured from the content box
    assert_eq!(bounds(&tree, child)?, (0.0, 0.0, 170.0, 20.0));
    assert_eq!(bounds(&tree, root)?, (0.0, 0.0, 200.0, 50.0));
    Ok(())
}

#[test]
fn negative_margins_reduce_the_collapsed_gap() -> TestResult {
    let mut tree = LayoutTree::new();
    let first = tree.new_leaf(Style {
        margin: Rect::new(zero(), zero(), zero(), length(20.0)),
        ..tall(10.0)
    });
    let second = tree.new_leaf(Style {
        margin: Rect::new(zero(), zero(), length(-5.0), zero()),
        ..tall(10.0)
    });
    let root = tree.new_with_children(block(length(100.0)), &[first, second])?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(bounds(&tree, second)?, (0.0, 25.0, 100.0, 10.0));
    assert_eq!(bounds(&tree, root)?.3, 35.0);
    Ok(())
}

#[test]
fn auto_width_shrinks_to_fit_under_intrinsic_space() -> TestResult {
    let mut tree = LayoutTree::new();
    let paragraph = tree.new_leaf_with_measure(Style::default(), text(120.0, 10.0));
    let root = tree.new_with_children(block(auto()), &[paragraph])?;

    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(bounds(&tree, root)?, (0.0, 0.0, 120.0, 10.0));

    tree.compute_layout(root, Size::definite(80.0, 600.0))?;
    assert_eq!(bounds(&tree, paragraph)?, (0.0, 0.0, 80.0, 20.0));
    assert_eq!(bounds(&tree, root)?, (0.0, 0.0, 80.0, 20.0));
    Ok(())
}

#[test]
fn percentages_resolve_against_the_content_box() -> TestResult {
    let mut tree = LayoutTree::new();
    let half = tree.new_leaf(Style {
        size: Size::new(percent(0.5), length(10.0)),
        ..Style::default()
    });
    let root = tree.new_with_children(
        Style {
            padding: Rect::new(length(20.0), length(20.0), zero(), zero()),
            ..block(length(240.0))
        },
        &[half],
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(bounds(&tree, half)?, (0.0, 0.0, 100.0, 10.0));
    Ok(())
}

#[test]
fn relative_insets_shift_without_affecting_siblings() -> TestResult {
    let mut tree = LayoutTree::new();
    let shifted = tree.new_leaf(Style {
        inset: Rect::new(length(5.0), auto(), length(5.0), auto()),
        ..tall(10.0)
    });
    let next = tree.new_leaf(tall(10.0));
    let root = tree.new_with_children(block(length(100.0)), &[shifted, next])?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(bounds(&tree, shifted)?, (5.0, 5.0, 100.0, 10.0));
    assert_eq!(bounds(&tree, next)?, (0.0, 10.0, 100.0, 10.0));
    Ok(())
}

#[test]
fn flex_rows_nest_inside_blocks() -> TestResult {
    let mut tree = LayoutTree::new();
    let cells = leaves(&mut tree, 2, &sized(50.0, 50.0));
    let row = tree.new_with_children(Style::default(), &cells)?;
    let root = tree.new_with_children(block(length(300.0)), &[row])?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(bounds(&tree, row)?, (0.0, 0.0, 300.0, 50.0));
    assert_eq!(bounds(&tree, cells[1])?, (50.0, 0.0, 50.0, 50.0));
    Ok(())
}
