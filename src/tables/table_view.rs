//! A representation of tables as title row and body rows of strings
//! and formatting instructions, independent of serialisation format
//! (CSV for the archive, Excel for the optional workbook).

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// No unit, e.g. for key columns
    None,
    /// Factors and ratios
    DimensionLess,
    /// Integers
    Count,
    /// The measurement unit of a family, e.g. "msec"
    Measured(&'static str),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Highlight {
    /// No special formatting, normal number display
    Neutral,
    /// Regression
    Red,
    /// Improvement
    Green,
}

impl Highlight {
    /// For values where positive means improvement.
    pub fn from_signed(value: Option<f64>) -> Self {
        match value {
            Some(x) if x > 0. => Highlight::Green,
            Some(x) if x < 0. => Highlight::Red,
            _ => Highlight::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnFormatting {
    /// Values are numbers: right-adjusted, and auto-width
    Number,
    /// Values are (potentially long) strings, left-adjusted
    String {
        /// In Excel widths. None == automatic.
        width_chars: Option<f64>,
    },
}

pub type ColumnHeader = (Cow<'static, str>, Unit, ColumnFormatting);

pub type Cell<'s> = (Cow<'s, str>, Highlight);

/// The string shown for a number; missing and NaN values are empty
/// cells.
pub fn number_string(value: Option<f64>) -> Cow<'static, str> {
    match value {
        Some(x) if !x.is_nan() => x.to_string().into(),
        _ => "".into(),
    }
}

pub fn number_cell(value: Option<f64>) -> Cell<'static> {
    (number_string(value), Highlight::Neutral)
}

/// A full table. dyn compatible.
pub trait TableView {
    /// Used as the archive entry stem and as the worksheet name.
    fn table_name(&self) -> Cow<str>;

    /// Column names and unit.
    fn table_view_header(&self) -> Vec<ColumnHeader>;

    /// The rows, each matching the columns of the header.
    fn table_view_body<'s>(&'s self) -> Box<dyn Iterator<Item = Vec<Cell<'s>>> + 's>;
}
