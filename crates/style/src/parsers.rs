//! Low-level nom parser functions for CSS-like style values.
//!
//! Every value type that has a natural CSS spelling implements `FromStr` on top of these:
//! `"10px"`, `"50%"`, `"auto"`, `"span 2"`, `"minmax(100px, 1fr)"`, `"repeat(auto-fill, 100px)"`.
//! Unitless numbers are lengths. A `fr` value in the min slot of `minmax()` is not valid CSS
//! and parses as `auto`.

use crate::dimension::{Dimension, LengthPercentage, LengthPercentageAuto};
use crate::grid::{
    GridPlacement, GridTrackRepetition, MaxTrackSizingFunction, MinMax, MinTrackSizingFunction,
    NonRepeatedTrackSizingFunction, TrackSizingFunction,
};
use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case};
use nom::character::complete::{char, i16 as parse_i16, multispace0, multispace1, u16 as parse_u16};
use nom::combinator::{all_consuming, map, opt, value};
use nom::multi::separated_list1;
use nom::number::complete::float;
use nom::sequence::{delimited, pair, preceded, separated_pair, terminated};
use nom::{IResult, Parser};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Invalid {kind} value: '{value}'")]
    InvalidValue { kind: &'static str, value: String },
}

// --- Helper Parsers ---

fn comma(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0).parse(input)
}

fn close_paren(input: &str) -> IResult<&str, char> {
    preceded(multispace0, char(')')).parse(input)
}

fn parse_px(input: &str) -> IResult<&str, f32> {
    terminated(float, opt(tag_no_case("px"))).parse(input)
}

fn parse_percent(input: &str) -> IResult<&str, f32> {
    map(terminated(float, char('%')), |value| value / 100.0).parse(input)
}

fn parse_fr(input: &str) -> IResult<&str, f32> {
    terminated(float, tag_no_case("fr")).parse(input)
}

/// Runs `parser` over the whole input, allowing surrounding whitespace.
fn parse_complete<T>(
    kind: &'static str,
    input: &str,
    parser: fn(&str) -> IResult<&str, T>,
) -> Result<T, StyleParseError> {
    all_consuming(delimited(multispace0, parser, multispace0))
        .parse(input)
        .map(|(_, value)| value)
        .map_err(|_| StyleParseError::InvalidValue {
            kind,
            value: input.to_string(),
        })
}

// --- Lengths ---

/// Parses a length (`"12"`, `"12px"`) or a percentage (`"50%"`).
pub fn parse_length_percentage(input: &str) -> IResult<&str, LengthPercentage> {
    alt((
        map(parse_percent, LengthPercentage::Percent),
        map(parse_px, LengthPercentage::Length),
    ))
    .parse(input)
}

pub fn parse_length_percentage_auto(input: &str) -> IResult<&str, LengthPercentageAuto> {
    alt((
        value(LengthPercentageAuto::Auto, tag_no_case("auto")),
        map(parse_length_percentage, LengthPercentageAuto::from),
    ))
    .parse(input)
}

pub fn parse_dimension(input: &str) -> IResult<&str, Dimension> {
    alt((
        value(Dimension::Auto, tag_no_case("auto")),
        map(parse_length_percentage, Dimension::from),
    ))
    .parse(input)
}

// --- Grid placement ---

/// Parses `"auto"`, a line number (`"3"`, `"-1"`) or `"span N"`.
pub fn parse_grid_placement(input: &str) -> IResult<&str, GridPlacement> {
    alt((
        value(GridPlacement::Auto, tag_no_case("auto")),
        map(
            preceded(pair(tag_no_case("span"), multispace1), parse_u16),
            GridPlacement::Span,
        ),
        map(parse_i16, GridPlacement::Line),
    ))
    .parse(input)
}

// --- Track sizing ---

fn parse_fit_content_argument(input: &str) -> IResult<&str, LengthPercentage> {
    delimited(
        pair(tag_no_case("fit-content("), multispace0),
        parse_length_percentage,
        close_paren,
    )
    .parse(input)
}

pub fn parse_min_track_sizing_function(input: &str) -> IResult<&str, MinTrackSizingFunction> {
    alt((
        value(MinTrackSizingFunction::MinContent, tag_no_case("min-content")),
        value(MinTrackSizingFunction::MaxContent, tag_no_case("max-content")),
        value(MinTrackSizingFunction::Auto, tag_no_case("auto")),
        map(parse_fr, |_| MinTrackSizingFunction::Auto),
        map(parse_length_percentage, MinTrackSizingFunction::Fixed),
    ))
    .parse(input)
}

pub fn parse_max_track_sizing_function(input: &str) -> IResult<&str, MaxTrackSizingFunction> {
    alt((
        value(MaxTrackSizingFunction::MinContent, tag_no_case("min-content")),
        value(MaxTrackSizingFunction::MaxContent, tag_no_case("max-content")),
        value(MaxTrackSizingFunction::Auto, tag_no_case("auto")),
        map(parse_fit_content_argument, MaxTrackSizingFunction::FitContent),
        map(parse_fr, MaxTrackSizingFunction::Fraction),
        map(parse_length_percentage, MaxTrackSizingFunction::Fixed),
    ))
    .parse(input)
}

fn parse_minmax(input: &str) -> IResult<&str, NonRepeatedTrackSizingFunction> {
    map(
        delimited(
            pair(tag_no_case("minmax("), multispace0),
            separated_pair(parse_min_track_sizing_function, comma, parse_max_track_sizing_function),
            close_paren,
        ),
        |(min, max)| MinMax { min, max },
    )
    .parse(input)
}

/// Parses a single track: a keyword, a length, a `fr` value, `minmax()` or `fit-content()`.
pub fn parse_non_repeated_track(input: &str) -> IResult<&str, NonRepeatedTrackSizingFunction> {
    alt((
        parse_minmax,
        map(parse_fit_content_argument, |limit| MinMax {
            min: MinTrackSizingFunction::Auto,
            max: MaxTrackSizingFunction::FitContent(limit),
        }),
        map(parse_fr, |flex| MinMax {
            min: MinTrackSizingFunction::Auto,
            max: MaxTrackSizingFunction::Fraction(flex),
        }),
        value(
            MinMax {
                min: MinTrackSizingFunction::MinContent,
                max: MaxTrackSizingFunction::MinContent,
            },
            tag_no_case("min-content"),
        ),
        value(
            MinMax {
                min: MinTrackSizingFunction::MaxContent,
                max: MaxTrackSizingFunction::MaxContent,
            },
            tag_no_case("max-content"),
        ),
        value(
            MinMax {
                min: MinTrackSizingFunction::Auto,
                max: MaxTrackSizingFunction::Auto,
            },
            tag_no_case("auto"),
        ),
        map(parse_length_percentage, |lp| MinMax {
            min: MinTrackSizingFunction::Fixed(lp),
            max: MaxTrackSizingFunction::Fixed(lp),
        }),
    ))
    .parse(input)
}

fn parse_repetition(input: &str) -> IResult<&str, GridTrackRepetition> {
    alt((
        value(GridTrackRepetition::AutoFill, tag_no_case("auto-fill")),
        value(GridTrackRepetition::AutoFit, tag_no_case("auto-fit")),
        map(parse_u16, GridTrackRepetition::Count),
    ))
    .parse(input)
}

fn parse_repeat(input: &str) -> IResult<&str, TrackSizingFunction> {
    map(
        delimited(
            pair(tag_no_case("repeat("), multispace0),
            separated_pair(
                parse_repetition,
                comma,
                separated_list1(multispace1, parse_non_repeated_track),
            ),
            close_paren,
        ),
        |(repetition, tracks)| TrackSizingFunction::Repeat(repetition, tracks),
    )
    .parse(input)
}

pub fn parse_track_sizing_function(input: &str) -> IResult<&str, TrackSizingFunction> {
    alt((parse_repeat, map(parse_non_repeated_track, TrackSizingFunction::Single))).parse(input)
}

fn parse_track_list_inner(input: &str) -> IResult<&str, Vec<TrackSizingFunction>> {
    separated_list1(multispace1, parse_track_sizing_function).parse(input)
}

/// Parses a whitespace separated template such as `"100px repeat(2, 1fr) auto"`.
pub fn parse_track_list(input: &str) -> Result<Vec<TrackSizingFunction>, StyleParseError> {
    parse_complete("track list", input, parse_track_list_inner)
}

// --- FromStr ---

impl FromStr for LengthPercentage {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complete("length-percentage", s, parse_length_percentage)
    }
}

impl FromStr for LengthPercentageAuto {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complete("length-percentage-auto", s, parse_length_percentage_auto)
    }
}

impl FromStr for Dimension {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complete("dimension", s, parse_dimension)
    }
}

impl FromStr for GridPlacement {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complete("grid placement", s, parse_grid_placement)
    }
}

impl FromStr for NonRepeatedTrackSizingFunction {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complete("track sizing function", s, parse_non_repeated_track)
    }
}

impl FromStr for TrackSizingFunction {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complete("track sizing function", s, parse_track_sizing_function)
    }
}
