// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend bins produced by a [`ColorScale`](crate::ColorScale).

extern crate alloc;

use alloc::string::String;

use peniko::Color;

/// A value looked up in a color scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleValue<'a> {
    /// A numeric value.
    Number(f64),
    /// A categorical value.
    Text(&'a str),
}

impl From<f64> for ScaleValue<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<'a> From<&'a str> for ScaleValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for ScaleValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value)
    }
}

/// A numeric interval `(min, max]`.
///
/// The first bin also contains `min` itself. An open-left first bin additionally takes every
/// value below its floor, and an open-right last bin every value above its ceiling, so data
/// excluded as outliers still lands in a bin of the right polarity.
#[derive(Clone, Debug)]
pub struct NumericBin {
    /// Lower boundary.
    pub min: f64,
    /// Upper boundary.
    pub max: f64,
    /// `min` formatted for display.
    pub display_min: String,
    /// `max` formatted for display.
    pub display_max: String,
    /// Fill color.
    pub color: Color,
    /// Custom legend label.
    pub label: Option<String>,
    /// First numeric bin.
    pub is_first: bool,
    /// Data extends below `min`.
    pub is_open_left: bool,
    /// Data extends above `max`.
    pub is_open_right: bool,
}

impl NumericBin {
    /// Returns `true` if `value` falls into this bin.
    pub fn contains(&self, value: f64) -> bool {
        if self.is_open_left && value <= self.max {
            return true;
        }
        if self.is_open_right && value > self.min {
            return true;
        }
        if self.is_first && value == self.min {
            return true;
        }
        self.min < value && value <= self.max
    }

    /// The label shown in a legend.
    ///
    /// A custom label wins. Otherwise open-ended bins read `<= max` and `> min`, and closed
    /// bins `min – max`.
    pub fn text(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        if self.is_open_left {
            alloc::format!("<= {}", self.display_max)
        } else if self.is_open_right {
            alloc::format!("> {}", self.display_min)
        } else {
            alloc::format!("{} – {}", self.display_min, self.display_max)
        }
    }
}

/// One categorical value's legend entry.
#[derive(Clone, Debug)]
pub struct CategoricalBin {
    /// Position among the categorical bins.
    pub index: usize,
    /// The categorical value.
    pub value: String,
    /// Fill color.
    pub color: Color,
    /// Legend label (the value unless overridden).
    pub label: String,
    /// Hidden from the legend.
    pub is_hidden: bool,
}

impl CategoricalBin {
    /// Returns `true` if `value` is this bin's value.
    pub fn contains(&self, value: &str) -> bool {
        self.value == value
    }
}

/// A legend bin.
#[derive(Clone, Debug)]
pub enum ColorScaleBin {
    /// A numeric interval.
    Numeric(NumericBin),
    /// A categorical value.
    Categorical(CategoricalBin),
}

impl ColorScaleBin {
    /// Returns `true` if `value` falls into this bin.
    ///
    /// Numeric bins only match numbers and categorical bins only match text.
    pub fn contains(&self, value: ScaleValue<'_>) -> bool {
        match (self, value) {
            (Self::Numeric(bin), ScaleValue::Number(v)) => bin.contains(v),
            (Self::Categorical(bin), ScaleValue::Text(v)) => bin.contains(v),
            _ => false,
        }
    }

    /// Fill color.
    pub fn color(&self) -> Color {
        match self {
            Self::Numeric(bin) => bin.color,
            Self::Categorical(bin) => bin.color,
        }
    }

    /// Legend label.
    pub fn text(&self) -> String {
        match self {
            Self::Numeric(bin) => bin.text(),
            Self::Categorical(bin) => bin.label.clone(),
        }
    }

    /// Returns `true` if this bin should not be shown in a legend.
    pub fn is_hidden(&self) -> bool {
        match self {
            Self::Numeric(_) => false,
            Self::Categorical(bin) => bin.is_hidden,
        }
    }

    /// The numeric bin, if this is one.
    pub fn as_numeric(&self) -> Option<&NumericBin> {
        match self {
            Self::Numeric(bin) => Some(bin),
            Self::Categorical(_) => None,
        }
    }

    /// The categorical bin, if this is one.
    pub fn as_categorical(&self) -> Option<&CategoricalBin> {
        match self {
            Self::Numeric(_) => None,
            Self::Categorical(bin) => Some(bin),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use rstest::rstest;

    use super::*;
    use crate::color::NO_DATA_GRAY;

    fn numeric(min: f64, max: f64) -> NumericBin {
        NumericBin {
            min,
            max,
            display_min: alloc::format!("{min}"),
            display_max: alloc::format!("{max}"),
            color: NO_DATA_GRAY,
            label: None,
            is_first: false,
            is_open_left: false,
            is_open_right: false,
        }
    }

    #[rstest]
    #[case(1.0, false)]
    #[case(1.5, true)]
    #[case(2.0, true)]
    #[case(2.5, false)]
    fn closed_bin_is_half_open(#[case] value: f64, #[case] expected: bool) {
        assert_eq!(numeric(1.0, 2.0).contains(value), expected);
    }

    #[test]
    fn first_bin_includes_its_floor() {
        let bin = NumericBin {
            is_first: true,
            ..numeric(0.0, 1.0)
        };
        assert!(bin.contains(0.0));
        assert!(!bin.contains(-0.1));
    }

    #[test]
    fn open_ends_catch_outliers() {
        let left = NumericBin {
            is_first: true,
            is_open_left: true,
            ..numeric(0.0, 1.0)
        };
        assert!(left.contains(-50.0));
        assert_eq!(left.text(), "<= 1");

        let right = NumericBin {
            is_open_right: true,
            ..numeric(3.0, 4.0)
        };
        assert!(right.contains(1000.0));
        assert!(!right.contains(3.0));
        assert_eq!(right.text(), "> 3");
    }

    #[test]
    fn custom_label_wins() {
        let bin = NumericBin {
            label: Some("Low".into()),
            ..numeric(0.0, 1.0)
        };
        assert_eq!(bin.text(), "Low");
        assert_eq!(numeric(1.0, 2.0).text(), "1 – 2");
    }

    #[test]
    fn variants_only_match_their_value_kind() {
        let categorical = ColorScaleBin::Categorical(CategoricalBin {
            index: 0,
            value: "1".into(),
            color: NO_DATA_GRAY,
            label: "1".into(),
            is_hidden: false,
        });
        assert!(categorical.contains(ScaleValue::Text("1")));
        assert!(!categorical.contains(ScaleValue::Number(1.0)));

        let numeric = ColorScaleBin::Numeric(numeric(0.0, 2.0));
        assert!(numeric.contains(1.0.into()));
        assert!(!numeric.contains("1".into()));
    }
}
