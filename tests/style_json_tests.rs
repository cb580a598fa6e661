mod common;

use common::{TestResult, bounds, init_logger, leaves};
use trellis::prelude::*;
use trellis::style::{StyleParseError, parse_track_list};

#[test]
fn grid_described_in_json_lays_out_like_the_builder_form() -> TestResult {
    init_logger();
    let mut style: Style = serde_json::from_value(serde_json::json!({
        "display": "grid",
        "size": { "width": { "length": 400.0 }, "height": { "length": 50.0 } },
        "gap": { "width": { "length": 0.0 }, "height": { "length": 0.0 } }
    }))?;
    style.grid_template_columns = parse_track_list("100px 1fr 3fr")?;
    assert_eq!(style.grid_template_columns, vec![length(100.0), fr(1.0), fr(3.0)]);

    let mut tree = LayoutTree::new();
    let cells = leaves(&mut tree, 3, &Style::default());
    let root = tree.new_with_children(style, &cells)?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(bounds(&tree, cells[2])?, (175.0, 0.0, 225.0, 50.0));
    Ok(())
}

#[test]
fn track_lists_accept_repeat_and_minmax() -> TestResult {
    let tracks = parse_track_list("repeat(auto-fill, minmax(100px, 1fr)) fit-content(50%) auto")?;
    assert_eq!(
        tracks,
        vec![
            repeat(GridTrackRepetition::AutoFill, vec![minmax(length(100.0), fr(1.0))]),
            fit_content(percent(0.5)).into(),
            auto(),
        ]
    );
    Ok(())
}

#[test]
fn malformed_values_are_rejected() {
    assert_eq!(
        parse_track_list("100px banana"),
        Err(StyleParseError::InvalidValue {
            kind: "track list",
            value: "100px banana".to_string(),
        })
    );
    assert!("12 apples".parse::<Dimension>().is_err());
    assert!("span".parse::<GridPlacement>().is_err());
}

#[test]
fn single_values_parse_from_css_spelling() -> TestResult {
    assert_eq!("50%".parse::<Dimension>()?, percent(0.5));
    assert_eq!(" 12px ".parse::<LengthPercentage>()?, length(12.0));
    assert_eq!("auto".parse::<LengthPercentageAuto>()?, auto());
    assert_eq!("span 2".parse::<GridPlacement>()?, span(2));
    assert_eq!("-1".parse::<GridPlacement>()?, line(-1));
    Ok(())
}

#[test]
fn styles_round_trip_through_json() -> TestResult {
    let style = Style {
        display: Display::Grid,
        grid_template_rows: parse_track_list("repeat(2, 40px) 1fr")?,
        grid_column: Line::new(line(1), span(3)),
        padding: Rect::new(length(4.0), length(4.0), percent(0.1), zero()),
        align_content: Some(AlignContent::SpaceEvenly),
        ..Style::default()
    };
    let encoded = serde_json::to_string_pretty(&style)?;
    let decoded: Style = serde_json::from_str(&encoded)?;
    assert_eq!(decoded, style);
    Ok(())
}
