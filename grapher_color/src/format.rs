// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Short number formatting for legend boundaries.

extern crate alloc;

use alloc::format;
use alloc::string::String;

/// Style for abbreviating large magnitudes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NumberAbbreviation {
    /// `1.2 million`, `3 billion`, `4 trillion`.
    #[default]
    Long,
    /// `12k`, `1.2M`, `3B`, `4T`.
    Short,
    /// No abbreviation.
    None,
}

/// Formatting options for [`NumberFormat::format`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    /// Maximum number of decimal places.
    pub num_decimal_places: usize,
    /// Keep trailing zeros (`1.50` instead of `1.5`).
    pub trailing_zeros: bool,
    /// Unit appended (or, for currency symbols, prepended) to the number.
    pub unit: Option<String>,
    /// Magnitude abbreviation style.
    pub abbreviation: NumberAbbreviation,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            num_decimal_places: 2,
            trailing_zeros: false,
            unit: None,
            abbreviation: NumberAbbreviation::Long,
        }
    }
}

impl NumberFormat {
    /// Sets the number of decimal places.
    pub fn with_decimal_places(mut self, places: usize) -> Self {
        self.num_decimal_places = places;
        self
    }

    /// Sets the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the abbreviation style.
    pub fn with_abbreviation(mut self, abbreviation: NumberAbbreviation) -> Self {
        self.abbreviation = abbreviation;
        self
    }

    /// Formats `value`.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return format!("{value}");
        }
        let (scaled, suffix) = self.abbreviate(value);
        let mut digits = format!("{:.*}", self.num_decimal_places, scaled);
        if !self.trailing_zeros && digits.contains('.') {
            let trimmed = digits.trim_end_matches('0').trim_end_matches('.').len();
            digits.truncate(trimmed);
        }
        if digits == "-0" {
            digits = String::from("0");
        }
        digits.push_str(suffix);

        match self.unit.as_deref() {
            None | Some("") => digits,
            Some(unit) if is_currency(unit) => {
                if let Some(rest) = digits.strip_prefix('-') {
                    format!("-{unit}{rest}")
                } else {
                    format!("{unit}{digits}")
                }
            }
            Some(unit) if unit.starts_with('%') => format!("{digits}{unit}"),
            Some(unit) => format!("{digits} {unit}"),
        }
    }

    fn abbreviate(&self, value: f64) -> (f64, &'static str) {
        let abs = value.abs();
        match self.abbreviation {
            NumberAbbreviation::None => (value, ""),
            NumberAbbreviation::Long => {
                if abs >= 1e12 {
                    (value / 1e12, " trillion")
                } else if abs >= 1e9 {
                    (value / 1e9, " billion")
                } else if abs >= 1e6 {
                    (value / 1e6, " million")
                } else {
                    (value, "")
                }
            }
            NumberAbbreviation::Short => {
                if abs >= 1e12 {
                    (value / 1e12, "T")
                } else if abs >= 1e9 {
                    (value / 1e9, "B")
                } else if abs >= 1e6 {
                    (value / 1e6, "M")
                } else if abs >= 1e3 {
                    (value / 1e3, "k")
                } else {
                    (value, "")
                }
            }
        }
    }
}

fn is_currency(unit: &str) -> bool {
    matches!(unit, "$" | "£" | "€" | "¥")
}
