// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data column a color scale reads from.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::format::NumberFormat;

/// Read-only view of a column as seen by a color scale.
///
/// Implementations are owned by the surrounding table abstraction; the color scale only
/// borrows them while it is being built.
pub trait ColorScaleColumn {
    /// Finite numeric values in ascending order (duplicates allowed).
    fn sorted_numeric_values(&self) -> &[f64];

    /// Distinct non-empty string values in ascending order.
    fn sorted_unique_categorical_values(&self) -> &[String];

    /// Formats a numeric value for legend boundaries.
    fn format_value_short(&self, value: f64) -> String;
}

/// A single cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum CoreValue {
    /// A numeric value.
    Number(f64),
    /// A string (categorical) value.
    Text(String),
}

impl From<f64> for CoreValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CoreValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for CoreValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// An owned [`ColorScaleColumn`] built from raw cell values.
#[derive(Clone, Debug, Default)]
pub struct ValueColumn {
    numeric: Vec<f64>,
    categorical: Vec<String>,
    format: NumberFormat,
}

impl ValueColumn {
    /// Builds a column from mixed values.
    ///
    /// Non-finite numbers and empty strings are discarded.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<CoreValue>,
    {
        let mut numeric = Vec::new();
        let mut categorical = Vec::new();
        for value in values {
            match value.into() {
                CoreValue::Number(n) if n.is_finite() => numeric.push(n),
                CoreValue::Number(_) => {}
                CoreValue::Text(s) if !s.is_empty() => categorical.push(s),
                CoreValue::Text(_) => {}
            }
        }
        numeric.sort_by(f64::total_cmp);
        categorical.sort();
        categorical.dedup();
        Self {
            numeric,
            categorical,
            format: NumberFormat::default(),
        }
    }

    /// Sets the number format used for legend boundaries.
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }
}

impl ColorScaleColumn for ValueColumn {
    fn sorted_numeric_values(&self) -> &[f64] {
        &self.numeric
    }

    fn sorted_unique_categorical_values(&self) -> &[String] {
        &self.categorical
    }

    fn format_value_short(&self, value: f64) -> String {
        self.format.format(value)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn splits_and_sorts_values() {
        let column = ValueColumn::from_values(vec![
            CoreValue::from(3.0),
            CoreValue::from("b"),
            CoreValue::from(f64::NAN),
            CoreValue::from(-1.0),
            CoreValue::from(""),
            CoreValue::from("a"),
            CoreValue::from("b"),
            CoreValue::from(3.0),
        ]);
        assert_eq!(column.sorted_numeric_values(), &[-1.0, 3.0, 3.0]);
        assert_eq!(column.sorted_unique_categorical_values(), &["a", "b"]);
    }

    #[test]
    fn formats_with_configured_format() {
        let column = ValueColumn::from_values([1.0_f64])
            .with_format(NumberFormat::default().with_unit("%"));
        assert_eq!(column.format_value_short(0.5), "0.5%");
    }
}
