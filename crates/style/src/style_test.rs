use crate::helpers::{fr, length, line, percent, span};
use crate::{
    AlignItems, Dimension, Display, FlexDirection, GridAutoFlow, GridPlacement, JustifyContent,
    LengthPercentageAuto, Style, TrackSizingFunction,
};
use trellis_types::{Line, Size};

#[test]
fn test_style_deserializes_from_camel_case_json() {
    let json = serde_json::json!({
        "display": "grid",
        "size": { "width": { "length": 200.0 }, "height": { "percent": 0.5 } },
        "justifyContent": "space-between",
        "alignItems": "center",
        "gridAutoFlow": "column-dense",
        "gridRow": { "start": { "line": 2 }, "end": { "span": 3 } },
        "gridTemplateColumns": [
            { "single": { "min": "auto", "max": { "fraction": 1.0 } } }
        ]
    });

    let style: Style = serde_json::from_value(json).expect("style json is valid");

    assert_eq!(style.display, Display::Grid);
    assert_eq!(style.size, Size::new(Dimension::Length(200.0), Dimension::Percent(0.5)));
    assert_eq!(style.justify_content, Some(JustifyContent::SpaceBetween));
    assert_eq!(style.align_items, Some(AlignItems::Center));
    assert_eq!(style.grid_auto_flow, GridAutoFlow::ColumnDense);
    assert_eq!(style.grid_row, Line::new(GridPlacement::Line(2), GridPlacement::Span(3)));
    assert_eq!(style.grid_template_columns, vec![fr::<TrackSizingFunction>(1.0)]);
    // Unspecified fields keep their defaults.
    assert_eq!(style.flex_shrink, 1.0);
    assert_eq!(style.flex_direction, FlexDirection::Row);
}

#[test]
fn test_style_survives_a_json_round_trip() {
    let style = Style {
        display: Display::Block,
        margin: trellis_types::Rect::new(length(1.0), percent(0.1), LengthPercentageAuto::Auto, length(4.0)),
        grid_column: Line::new(line(-1), span(2)),
        aspect_ratio: Some(1.5),
        ..Style::default()
    };

    let encoded = serde_json::to_string(&style).expect("serializes");
    let decoded: Style = serde_json::from_str(&encoded).expect("deserializes");
    assert_eq!(decoded, style);
}
