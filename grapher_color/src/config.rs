// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Author overrides for a color scale.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::binning::{BinningStrategy, DEFAULT_BIN_COUNT, MAX_BIN_COUNT};

/// Sparse per-bin overrides (bin index -> value).
///
/// Bins without an entry use the computed default. Indices past the number of bins are
/// ignored by the color scale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BinOverrides {
    entries: HashMap<usize, String>,
}

impl BinOverrides {
    /// Creates an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds overrides from a positional list where `None` means "use the default".
    pub fn from_sparse<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let entries = values
            .into_iter()
            .enumerate()
            .filter_map(|(i, v)| Some((i, v?.into())))
            .collect();
        Self { entries }
    }

    /// The override for bin `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(&index).map(String::as_str)
    }

    /// Sets the override for bin `index`.
    pub fn insert(&mut self, index: usize, value: impl Into<String>) {
        self.entries.insert(index, value.into());
    }

    /// Removes the override for bin `index`.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        self.entries.remove(&index)
    }

    /// Number of bins with an override.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no bin is overridden.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Author-facing color scale settings.
///
/// Everything is optional: a default config bins numeric data with ckmeans into
/// [`DEFAULT_BIN_COUNT`] bins and colors it with the default scheme.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorScaleConfig {
    /// Registry name of the base color scheme.
    pub base_color_scheme: Option<String>,
    /// Reverse the base scheme.
    pub color_scheme_invert: bool,
    /// How numeric bin boundaries are chosen.
    pub binning_strategy: BinningStrategy,
    /// Suggested bin count for automatic strategies.
    pub binning_strategy_bin_count: Option<usize>,
    /// Lower bound of the first numeric bin.
    pub custom_numeric_min_value: Option<f64>,
    /// Bin maximums, used when the strategy is [`BinningStrategy::Manual`].
    pub custom_numeric_values: Vec<f64>,
    /// Per-bin legend labels.
    pub custom_numeric_labels: BinOverrides,
    /// Per-bin colors, only applied when `custom_numeric_colors_active` is set.
    pub custom_numeric_colors: BinOverrides,
    /// Gate for `custom_numeric_colors`.
    pub custom_numeric_colors_active: bool,
    /// Colors keyed by categorical value.
    pub custom_category_colors: HashMap<String, String>,
    /// Legend labels keyed by categorical value.
    pub custom_category_labels: HashMap<String, String>,
    /// Categorical values hidden from the legend.
    pub custom_hidden_categories: HashSet<String>,
    /// Draw numeric legend bins with equal widths (legend only).
    pub equal_size_bins: Option<bool>,
    /// Legend title.
    pub legend_description: Option<String>,
}

impl ColorScaleConfig {
    /// Sets the base color scheme.
    pub fn with_scheme(mut self, name: impl Into<String>) -> Self {
        self.base_color_scheme = Some(name.into());
        self
    }

    /// Sets the binning strategy.
    pub fn with_strategy(mut self, strategy: BinningStrategy) -> Self {
        self.binning_strategy = strategy;
        self
    }

    /// Switches to manual binning with the given bin maximums.
    pub fn with_manual_bins(mut self, maximums: impl IntoIterator<Item = f64>) -> Self {
        self.binning_strategy = BinningStrategy::Manual;
        self.custom_numeric_values = maximums.into_iter().collect();
        self
    }

    /// Sets per-bin colors and activates them.
    pub fn with_numeric_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.custom_numeric_colors = BinOverrides::from_sparse(colors);
        self.custom_numeric_colors_active = true;
        self
    }

    /// Sets a color for one categorical value.
    pub fn with_category_color(
        mut self,
        value: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        self.custom_category_colors.insert(value.into(), color.into());
        self
    }

    /// Number of bins requested from automatic strategies, at most [`MAX_BIN_COUNT`].
    pub fn bin_count(&self) -> usize {
        self.binning_strategy_bin_count
            .unwrap_or(DEFAULT_BIN_COUNT)
            .min(MAX_BIN_COUNT)
    }

    /// Number of numeric bins this config asks for.
    ///
    /// Manual binning has one bin per custom value; automatic strategies use
    /// [`Self::bin_count`].
    pub fn num_numeric_bins(&self) -> usize {
        if self.binning_strategy == BinningStrategy::Manual {
            self.custom_numeric_values.len()
        } else {
            self.bin_count()
        }
    }

    /// The custom label for numeric bin `index`.
    pub fn numeric_label_for(&self, index: usize) -> Option<&str> {
        self.custom_numeric_labels.get(index)
    }

    /// The custom color for numeric bin `index`, honoring `custom_numeric_colors_active`.
    pub fn numeric_color_for(&self, index: usize) -> Option<&str> {
        if !self.custom_numeric_colors_active {
            return None;
        }
        self.custom_numeric_colors.get(index)
    }

    /// The custom color for a categorical value.
    pub fn category_color_for(&self, value: &str) -> Option<&str> {
        self.custom_category_colors.get(value).map(String::as_str)
    }

    /// The custom legend label for a categorical value.
    pub fn category_label_for(&self, value: &str) -> Option<&str> {
        self.custom_category_labels.get(value).map(String::as_str)
    }

    /// Whether a categorical value is hidden from the legend.
    pub fn is_category_hidden(&self, value: &str) -> bool {
        self.custom_hidden_categories.contains(value)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn defaults() {
        let config = ColorScaleConfig::default();
        assert_eq!(config.binning_strategy, BinningStrategy::Ckmeans);
        assert_eq!(config.bin_count(), DEFAULT_BIN_COUNT);
        assert_eq!(config.num_numeric_bins(), DEFAULT_BIN_COUNT);
        assert!(!config.color_scheme_invert);
        assert!(config.custom_numeric_values.is_empty());
    }

    #[test]
    fn bin_count_is_clamped() {
        let config = ColorScaleConfig {
            binning_strategy_bin_count: Some(usize::MAX),
            ..ColorScaleConfig::default()
        };
        assert_eq!(config.bin_count(), MAX_BIN_COUNT);
        assert_eq!(config.num_numeric_bins(), MAX_BIN_COUNT);
    }

    #[test]
    fn manual_bin_count_follows_custom_values() {
        let config = ColorScaleConfig::default().with_manual_bins([1.0, 2.0, 3.0]);
        assert_eq!(config.num_numeric_bins(), 3);
    }

    #[test]
    fn sparse_overrides_fall_back_past_the_end() {
        let overrides = BinOverrides::from_sparse(vec![Some("a"), None, Some("c")]);
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get(0), Some("a"));
        assert_eq!(overrides.get(1), None);
        assert_eq!(overrides.get(2), Some("c"));
        assert_eq!(overrides.get(99), None);
    }

    #[test]
    fn numeric_colors_need_activation() {
        let mut config = ColorScaleConfig::default().with_numeric_colors([Some("#123456")]);
        assert_eq!(config.numeric_color_for(0), Some("#123456"));
        config.custom_numeric_colors_active = false;
        assert_eq!(config.numeric_color_for(0), None);
    }

    #[test]
    fn category_lookups() {
        let mut config = ColorScaleConfig::default().with_category_color("Asia", "red");
        config.custom_hidden_categories.insert("Europe".into());
        assert_eq!(config.category_color_for("Asia"), Some("red"));
        assert_eq!(config.category_color_for("Africa"), None);
        assert!(config.is_category_hidden("Europe"));
        assert!(!config.is_category_hidden("Asia"));
    }
}
