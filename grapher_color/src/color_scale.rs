// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The color scale engine.
//!
//! A [`ColorScaleSpec`] pairs a [`ColorScaleConfig`] with engine options; instantiating it
//! against a column computes the legend bins once. The resulting [`ColorScale`] is immutable:
//! rebuild it when the column or the config changes.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;

use crate::bin::{CategoricalBin, ColorScaleBin, NumericBin, ScaleValue};
use crate::binning::{BinningStrategy, CKMEANS_MAX_SAMPLE_SIZE, bin_maximums};
use crate::color::{NO_DATA_GRAY, parse_css_color};
use crate::column::ColorScaleColumn;
use crate::config::ColorScaleConfig;
use crate::scheme::{ColorScheme, DEFAULT_COLOR_SCHEME};
use crate::stats::{count_distinct_sorted, mean, round_sig_fig, sample_deviation};

/// Categorical value of the synthetic "no data" bin.
pub const NO_DATA_LABEL: &str = "No data";

/// Values further than this many standard deviations from the mean are outliers.
const OUTLIER_DEVIATIONS: f64 = 2.0;

/// Specification for a color scale (config + engine options, no data yet).
#[derive(Clone, Copy, Debug)]
pub struct ColorScaleSpec<'a> {
    /// Author overrides.
    pub config: &'a ColorScaleConfig,
    /// Append a "No data" categorical bin when the column has no such value.
    pub has_no_data_bin: bool,
    /// Scheme used when the config names none (or an unknown one).
    pub default_color_scheme: &'a str,
    /// Color of the "No data" bin unless the config overrides it.
    pub default_no_data_color: Color,
}

impl<'a> ColorScaleSpec<'a> {
    /// Creates a spec with default engine options.
    pub fn new(config: &'a ColorScaleConfig) -> Self {
        Self {
            config,
            has_no_data_bin: false,
            default_color_scheme: DEFAULT_COLOR_SCHEME,
            default_no_data_color: NO_DATA_GRAY,
        }
    }

    /// Enables or disables the synthetic "No data" bin.
    pub fn with_no_data_bin(mut self, enabled: bool) -> Self {
        self.has_no_data_bin = enabled;
        self
    }

    /// Sets the fallback color scheme.
    pub fn with_default_color_scheme(mut self, name: &'a str) -> Self {
        self.default_color_scheme = name;
        self
    }

    /// Sets the fallback "No data" color.
    pub fn with_default_no_data_color(mut self, color: Color) -> Self {
        self.default_no_data_color = color;
        self
    }

    /// Computes the legend bins for `column`.
    pub fn instantiate<C: ColorScaleColumn + ?Sized>(&self, column: &C) -> ColorScale {
        let config = self.config;
        let sorted = column.sorted_numeric_values();

        let filtered = without_outliers(sorted);
        let min_bin_value = config
            .custom_numeric_min_value
            .unwrap_or_else(|| auto_min_bin_value(&filtered));
        let bin_values: Vec<f64> = filtered
            .iter()
            .copied()
            .filter(|v| *v > min_bin_value)
            .collect();
        let bucket_maximums = self.bucket_maximums(&bin_values, min_bin_value);

        let scheme = ColorScheme::get_or_default(
            config.base_color_scheme.as_deref(),
            self.default_color_scheme,
        );
        let categories = column.sorted_unique_categorical_values();
        let base_colors = scheme.colors(
            bucket_maximums.len() + categories.len(),
            config.color_scheme_invert,
        );
        let no_data_color = config
            .category_color_for(NO_DATA_LABEL)
            .and_then(parse_override)
            .unwrap_or(self.default_no_data_color);

        let mut legend_bins = Vec::with_capacity(bucket_maximums.len() + categories.len() + 1);

        let data_min = sorted.first().copied();
        let data_max = sorted.last().copied();
        let last = bucket_maximums.len().saturating_sub(1);
        let mut min = min_bin_value;
        for (i, &max) in bucket_maximums.iter().enumerate() {
            let color = config
                .numeric_color_for(i)
                .and_then(parse_override)
                .or_else(|| base_colors.get(i).copied())
                .unwrap_or(NO_DATA_GRAY);
            legend_bins.push(ColorScaleBin::Numeric(NumericBin {
                min,
                max,
                display_min: column.format_value_short(min),
                display_max: column.format_value_short(max),
                color,
                label: config.numeric_label_for(i).map(String::from),
                is_first: i == 0,
                is_open_left: i == 0 && data_min.is_some_and(|d| d < min),
                is_open_right: i == last && data_max.is_some_and(|d| d > max),
            }));
            min = max;
        }

        let has_no_data_value = categories.iter().any(|c| c == NO_DATA_LABEL);
        let synthetic_no_data =
            (self.has_no_data_bin && !has_no_data_value).then_some(NO_DATA_LABEL);
        let categorical_values = categories
            .iter()
            .map(String::as_str)
            .chain(synthetic_no_data);
        for (index, value) in categorical_values.enumerate() {
            let color = if value == NO_DATA_LABEL {
                no_data_color
            } else {
                config
                    .category_color_for(value)
                    .and_then(parse_override)
                    .or_else(|| base_colors.get(bucket_maximums.len() + index).copied())
                    .unwrap_or(NO_DATA_GRAY)
            };
            legend_bins.push(ColorScaleBin::Categorical(CategoricalBin {
                index,
                value: value.into(),
                color,
                label: config.category_label_for(value).unwrap_or(value).into(),
                is_hidden: config.is_category_hidden(value),
            }));
        }

        ColorScale {
            legend_bins,
            num_numeric_bins: bucket_maximums.len(),
            bucket_maximums,
            min_bin_value,
            no_data_color,
            scheme,
            legend_description: config.legend_description.clone(),
            is_color_scheme_inverted: config.color_scheme_invert,
        }
    }

    fn bucket_maximums(&self, bin_values: &[f64], min_bin_value: f64) -> Vec<f64> {
        let config = self.config;
        match config.binning_strategy {
            BinningStrategy::Manual => {
                let mut maximums = config.custom_numeric_values.clone();
                maximums.resize(config.num_numeric_bins(), 0.0);
                maximums
            }
            strategy => {
                let strategy = if strategy == BinningStrategy::Ckmeans
                    && bin_values.len() >= CKMEANS_MAX_SAMPLE_SIZE
                {
                    log::debug!(
                        "{} values exceed the ckmeans sample limit, binning by equal interval",
                        bin_values.len()
                    );
                    BinningStrategy::EqualInterval
                } else {
                    strategy
                };
                bin_maximums(strategy, bin_values, config.bin_count(), Some(min_bin_value))
            }
        }
    }
}

fn parse_override(s: &str) -> Option<Color> {
    parse_css_color(s)
        .inspect_err(|err| log::debug!("{err}, using the computed color"))
        .ok()
}

/// Drops values more than [`OUTLIER_DEVIATIONS`] standard deviations from the mean.
///
/// The full sample is kept when filtering would leave fewer than two distinct values while the
/// sample itself has spread.
fn without_outliers(sorted: &[f64]) -> Vec<f64> {
    let (Some(mean), Some(deviation)) = (mean(sorted), sample_deviation(sorted)) else {
        return sorted.to_vec();
    };
    let threshold = OUTLIER_DEVIATIONS * deviation;
    let kept: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|v| (v - mean).abs() <= threshold)
        .collect();
    if count_distinct_sorted(&kept) < 2 && count_distinct_sorted(sorted) >= 2 {
        log::trace!("outlier filtering would collapse the sample, keeping outliers");
        return sorted.to_vec();
    }
    kept
}

fn auto_min_bin_value(filtered: &[f64]) -> f64 {
    filtered
        .first()
        .map_or(0.0, |&min| round_sig_fig(min.min(0.0), 1))
}

/// A color scale computed for one column.
#[derive(Clone, Debug)]
pub struct ColorScale {
    legend_bins: Vec<ColorScaleBin>,
    num_numeric_bins: usize,
    bucket_maximums: Vec<f64>,
    min_bin_value: f64,
    no_data_color: Color,
    scheme: &'static ColorScheme,
    legend_description: Option<String>,
    is_color_scheme_inverted: bool,
}

impl ColorScale {
    /// All bins: numeric bins in ascending order, then categorical bins.
    pub fn legend_bins(&self) -> &[ColorScaleBin] {
        &self.legend_bins
    }

    /// The numeric bins, ascending.
    pub fn numeric_legend_bins(&self) -> impl Iterator<Item = &NumericBin> + '_ {
        self.legend_bins[..self.num_numeric_bins]
            .iter()
            .filter_map(ColorScaleBin::as_numeric)
    }

    /// The categorical bins, in column order with "No data" last.
    pub fn categorical_legend_bins(&self) -> impl Iterator<Item = &CategoricalBin> + '_ {
        self.legend_bins[self.num_numeric_bins..]
            .iter()
            .filter_map(ColorScaleBin::as_categorical)
    }

    /// The first bin containing `value`.
    pub fn get_bin_for_value(&self, value: ScaleValue<'_>) -> Option<&ColorScaleBin> {
        self.legend_bins.iter().find(|bin| bin.contains(value))
    }

    /// The color for `value`; a missing value gets the "No data" color.
    ///
    /// Returns `None` when no bin contains `value`.
    pub fn get_color(&self, value: Option<ScaleValue<'_>>) -> Option<Color> {
        match value {
            None => Some(self.no_data_color),
            Some(value) => self.get_bin_for_value(value).map(ColorScaleBin::color),
        }
    }

    /// Upper boundaries of the numeric bins.
    pub fn bucket_maximums(&self) -> &[f64] {
        &self.bucket_maximums
    }

    /// Lower boundary of the first numeric bin.
    pub fn min_bin_value(&self) -> f64 {
        self.min_bin_value
    }

    /// Color used for missing values.
    pub fn no_data_color(&self) -> Color {
        self.no_data_color
    }

    /// The color scheme the base colors came from.
    pub fn color_scheme(&self) -> &'static ColorScheme {
        self.scheme
    }

    /// Legend title.
    pub fn legend_description(&self) -> Option<&str> {
        self.legend_description.as_deref()
    }

    /// Whether base colors run in reverse.
    pub fn is_color_scheme_inverted(&self) -> bool {
        self.is_color_scheme_inverted
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::color::to_hex;
    use crate::column::{CoreValue, ValueColumn};

    fn hexes(colors: impl IntoIterator<Item = Color>) -> Vec<String> {
        colors.into_iter().map(to_hex).collect()
    }

    fn numbers(values: &[f64]) -> ValueColumn {
        ValueColumn::from_values(values.iter().copied())
    }

    fn one_to_ten() -> Vec<f64> {
        (1..=10).map(f64::from).collect()
    }

    #[test]
    fn manual_bins_use_custom_colors() {
        let config = ColorScaleConfig::default()
            .with_manual_bins([1.0, 2.0, 3.0])
            .with_numeric_colors([Some("#182f4d"), Some("#3b4c61"), Some("#5875a6")]);
        let scale = ColorScaleSpec::new(&config).instantiate(&numbers(&[0.9, 1.1, 2.1, 3.1]));

        let colors = [0.9, 1.1, 2.1, 3.1]
            .into_iter()
            .map(|v| scale.get_color(Some(v.into())).unwrap());
        assert_eq!(hexes(colors), ["#182f4d", "#3b4c61", "#5875a6", "#5875a6"]);
        assert_eq!(scale.bucket_maximums(), &[1.0, 2.0, 3.0]);
        assert_eq!(scale.min_bin_value(), 0.0);

        let bins: Vec<_> = scale.numeric_legend_bins().collect();
        assert!(bins[0].is_first && !bins[0].is_open_left);
        assert!(bins[2].is_open_right);
    }

    #[test]
    fn inactive_custom_colors_are_ignored() {
        let mut config = ColorScaleConfig::default()
            .with_manual_bins([1.0, 2.0])
            .with_numeric_colors([Some("#182f4d"), Some("#3b4c61")]);
        config.custom_numeric_colors_active = false;
        let scale = ColorScaleSpec::new(&config).instantiate(&numbers(&[0.5, 1.5]));
        let expected = ColorScheme::get(DEFAULT_COLOR_SCHEME).unwrap().colors(2, false);
        assert_eq!(
            hexes(scale.numeric_legend_bins().map(|b| b.color)),
            hexes(expected)
        );
    }

    #[test]
    fn invalid_custom_color_falls_back_to_scheme() {
        let config = ColorScaleConfig::default()
            .with_manual_bins([1.0, 2.0])
            .with_numeric_colors([Some("not a color"), None]);
        let scale = ColorScaleSpec::new(&config).instantiate(&numbers(&[0.5, 1.5]));
        let expected = ColorScheme::get(DEFAULT_COLOR_SCHEME).unwrap().colors(2, false);
        assert_eq!(
            hexes(scale.numeric_legend_bins().map(|b| b.color)),
            hexes(expected)
        );
    }

    #[test]
    fn outlier_does_not_change_bins() {
        let config = ColorScaleConfig::default();
        let plain = ColorScaleSpec::new(&config).instantiate(&numbers(&one_to_ten()));

        let mut values = one_to_ten();
        values.push(1000.0);
        let with_outlier = ColorScaleSpec::new(&config).instantiate(&numbers(&values));

        assert_eq!(plain.bucket_maximums(), with_outlier.bucket_maximums());
        assert_eq!(
            plain.numeric_legend_bins().count(),
            with_outlier.numeric_legend_bins().count()
        );
        let last = with_outlier.numeric_legend_bins().last().unwrap();
        assert!(last.is_open_right);
        assert_eq!(
            to_hex(with_outlier.get_color(Some(1000.0.into())).unwrap()),
            to_hex(last.color)
        );
    }

    #[test]
    fn collapsing_outlier_filter_keeps_outliers() {
        let mut values = vec![5.0; 10];
        values.push(100.0);
        let config = ColorScaleConfig::default();
        let scale = ColorScaleSpec::new(&config).instantiate(&numbers(&values));
        assert_eq!(scale.bucket_maximums(), &[5.0, 100.0]);
    }

    #[test]
    fn custom_min_value_opens_first_bin() {
        let mut config = ColorScaleConfig::default().with_manual_bins([3.0, 6.0]);
        config.custom_numeric_min_value = Some(2.0);
        let scale = ColorScaleSpec::new(&config).instantiate(&numbers(&[0.5, 2.5, 5.0]));
        let first = scale.numeric_legend_bins().next().unwrap();
        assert_eq!(first.min, 2.0);
        assert!(first.is_open_left);
        assert!(matches!(
            scale.get_bin_for_value(ScaleValue::Number(0.5)),
            Some(ColorScaleBin::Numeric(bin)) if bin.max == 3.0
        ));
    }

    #[test]
    fn negative_data_lowers_min_bin_value() {
        let config = ColorScaleConfig::default().with_strategy(BinningStrategy::EqualInterval);
        let scale = ColorScaleSpec::new(&config).instantiate(&numbers(&[-23.0, -5.0, 4.0, 10.0]));
        assert_eq!(scale.min_bin_value(), -20.0);
    }

    #[test]
    fn large_samples_skip_ckmeans() {
        let values: Vec<f64> = (1..=10_000).map(f64::from).collect();
        assert_eq!(values.len(), CKMEANS_MAX_SAMPLE_SIZE);
        let config = ColorScaleConfig::default();
        let scale = ColorScaleSpec::new(&config).instantiate(&numbers(&values));
        assert_eq!(
            scale.bucket_maximums(),
            &[2000.0, 4000.0, 6000.0, 8000.0, 10000.0]
        );
    }

    #[test]
    fn categorical_colors_follow_numeric_slots() {
        let mut values: Vec<CoreValue> = one_to_ten().into_iter().map(CoreValue::from).collect();
        values.push("b".into());
        values.push("a".into());
        let column = ValueColumn::from_values(values);
        let config = ColorScaleConfig::default().with_scheme("Blues");
        let scale = ColorScaleSpec::new(&config).instantiate(&column);

        let buckets = scale.bucket_maximums().len();
        let base = ColorScheme::get("Blues").unwrap().colors(buckets + 2, false);
        let categorical: Vec<_> = scale.categorical_legend_bins().collect();
        assert_eq!(categorical.len(), 2);
        assert_eq!(categorical[0].value, "a");
        assert_eq!(categorical[1].index, 1);
        assert_eq!(
            hexes(categorical.iter().map(|b| b.color)),
            hexes(base[buckets..].iter().copied())
        );
        assert_eq!(
            to_hex(scale.get_color(Some("b".into())).unwrap()),
            to_hex(base[buckets + 1])
        );
    }

    #[test]
    fn no_data_bin_is_appended_last() {
        let column = ValueColumn::from_values(["Asia", "Europe"]);
        let config = ColorScaleConfig::default().with_category_color("Asia", "#ff0000");
        let scale = ColorScaleSpec::new(&config)
            .with_no_data_bin(true)
            .instantiate(&column);

        let values: Vec<_> = scale
            .categorical_legend_bins()
            .map(|b| b.value.as_str())
            .collect();
        assert_eq!(values, ["Asia", "Europe", NO_DATA_LABEL]);
        let no_data = scale.categorical_legend_bins().last().unwrap();
        assert_eq!(to_hex(no_data.color), "#6e7581");
        assert_eq!(to_hex(scale.get_color(None).unwrap()), "#6e7581");
        assert_eq!(
            to_hex(scale.get_color(Some("Asia".into())).unwrap()),
            "#ff0000"
        );
    }

    #[test]
    fn no_data_color_can_be_overridden() {
        let column = ValueColumn::from_values(["Asia"]);
        let config = ColorScaleConfig::default().with_category_color(NO_DATA_LABEL, "#000000");
        let scale = ColorScaleSpec::new(&config)
            .with_no_data_bin(true)
            .instantiate(&column);
        assert_eq!(to_hex(scale.no_data_color()), "#000000");
        assert_eq!(
            to_hex(scale.get_color(Some(NO_DATA_LABEL.into())).unwrap()),
            "#000000"
        );
    }

    #[test]
    fn hidden_and_relabelled_categories() {
        let column = ValueColumn::from_values(["Asia", "Europe"]);
        let mut config = ColorScaleConfig::default();
        config.custom_hidden_categories.insert("Europe".into());
        config
            .custom_category_labels
            .insert("Asia".into(), "Asian countries".into());
        let scale = ColorScaleSpec::new(&config).instantiate(&column);
        let bins: Vec<_> = scale.categorical_legend_bins().collect();
        assert_eq!(bins[0].label, "Asian countries");
        assert!(!bins[0].is_hidden);
        assert_eq!(bins[1].label, "Europe");
        assert!(bins[1].is_hidden);
    }

    #[test]
    fn unknown_scheme_uses_default() {
        let column = numbers(&one_to_ten());
        let unknown = ColorScaleConfig::default().with_scheme("NoSuchScheme");
        let default = ColorScaleConfig::default();
        let a = ColorScaleSpec::new(&unknown).instantiate(&column);
        let b = ColorScaleSpec::new(&default).instantiate(&column);
        assert_eq!(a.color_scheme().name, DEFAULT_COLOR_SCHEME);
        assert_eq!(
            hexes(a.legend_bins().iter().map(ColorScaleBin::color)),
            hexes(b.legend_bins().iter().map(ColorScaleBin::color))
        );
    }

    #[test]
    fn invert_reverses_base_colors() {
        let column = numbers(&one_to_ten());
        let forward = ColorScaleConfig::default();
        let mut inverted = ColorScaleConfig::default();
        inverted.color_scheme_invert = true;
        let a = ColorScaleSpec::new(&forward).instantiate(&column);
        let b = ColorScaleSpec::new(&inverted).instantiate(&column);
        assert!(b.is_color_scheme_inverted());

        let mut forward_colors = hexes(a.numeric_legend_bins().map(|bin| bin.color));
        forward_colors.reverse();
        assert_eq!(forward_colors, hexes(b.numeric_legend_bins().map(|bin| bin.color)));
    }

    #[test]
    fn oversized_bin_count_is_clamped() {
        let mut config = ColorScaleConfig::default().with_strategy(BinningStrategy::EqualInterval);
        config.binning_strategy_bin_count = Some(usize::MAX);
        let scale = ColorScaleSpec::new(&config).instantiate(&numbers(&one_to_ten()));
        assert!(!scale.bucket_maximums().is_empty());
        assert!(scale.bucket_maximums().len() <= crate::binning::MAX_BIN_COUNT);
        assert!(scale.get_color(Some(5.0.into())).is_some());
    }

    #[test]
    fn empty_column_has_no_bins() {
        let config = ColorScaleConfig::default();
        let scale = ColorScaleSpec::new(&config).instantiate(&ValueColumn::default());
        assert!(scale.legend_bins().is_empty());
        assert!(scale.get_color(Some(5.0.into())).is_none());
        assert_eq!(to_hex(scale.get_color(None).unwrap()), "#6e7581");
    }

    #[test]
    fn legend_description_is_carried() {
        let mut config = ColorScaleConfig::default();
        config.legend_description = Some("Share of population".into());
        let scale = ColorScaleSpec::new(&config).instantiate(&ValueColumn::default());
        assert_eq!(scale.legend_description(), Some("Share of population"));
    }
}
