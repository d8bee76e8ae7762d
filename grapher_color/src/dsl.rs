// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact text encoding of color scale overrides, as stored on columns.
//!
//! Bin overrides are written as `value,color,label` entries joined by `;`. Trailing empty
//! components are omitted, and everything after the second comma belongs to the label:
//!
//! ```text
//! 10,#f7fbff;20,,Twenty;30,#08306b,Thirty, or more
//! ```

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::binning::BinningStrategy;
use crate::config::{BinOverrides, ColorScaleConfig};

const BIN_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = ',';

/// The persisted (column-level) form of a [`ColorScaleConfig`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnColorScale {
    /// Base color scheme name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale_scheme: Option<String>,
    /// Reverse the base scheme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale_invert: Option<bool>,
    /// Binning strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale_binning_strategy: Option<BinningStrategy>,
    /// Bin count for automatic strategies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale_binning_strategy_bin_count: Option<usize>,
    /// Equal-width legend bins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale_equal_size_bins: Option<bool>,
    /// Legend title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale_legend_description: Option<String>,
    /// Lower bound of the first numeric bin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale_numeric_min_value: Option<f64>,
    /// Numeric bin entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale_numeric_bins: Option<String>,
    /// Categorical bin entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale_categorical_bins: Option<String>,
}

struct BinEntry<'a> {
    value: &'a str,
    color: Option<&'a str>,
    label: Option<&'a str>,
}

fn parse_entries(encoded: Option<&str>) -> impl Iterator<Item = BinEntry<'_>> {
    encoded
        .into_iter()
        .flat_map(|s| s.split(BIN_SEPARATOR))
        .filter_map(|entry| {
            let mut parts = entry.splitn(3, FIELD_SEPARATOR);
            let value = parts.next().unwrap_or_default();
            if value.trim().is_empty() {
                log::trace!("skipping color scale bin without a value: `{entry}`");
                return None;
            }
            Some(BinEntry {
                value,
                color: parts.next().and_then(non_empty),
                label: parts.next().and_then(non_empty),
            })
        })
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

fn encode_entry(value: &str, color: Option<&str>, label: Option<&str>) -> String {
    match (color, label) {
        (None, None) => String::from(value),
        (Some(color), None) => format!("{value}{FIELD_SEPARATOR}{color}"),
        (color, Some(label)) => format!(
            "{value}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{label}",
            color.unwrap_or_default()
        ),
    }
}

fn join_entries(entries: Vec<String>) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push(BIN_SEPARATOR);
        }
        out.push_str(entry);
    }
    Some(out)
}

impl ColorScaleConfig {
    /// Builds a config from its persisted form.
    ///
    /// Parsing is forgiving: entries without a value, and numeric entries whose value is not a
    /// finite number, are dropped. Returns `None` when nothing was set, so "no override" can
    /// be told apart from "override with defaults".
    pub fn from_dsl(scale: &ColumnColorScale) -> Option<Self> {
        let mut config = Self::default();
        let mut any = false;

        if let Some(scheme) = &scale.color_scale_scheme {
            config.base_color_scheme = Some(scheme.clone());
            any = true;
        }
        if scale.color_scale_invert == Some(true) {
            config.color_scheme_invert = true;
            any = true;
        }
        if let Some(strategy) = scale.color_scale_binning_strategy {
            config.binning_strategy = strategy;
            any |= strategy != BinningStrategy::default();
        }
        if let Some(count) = scale.color_scale_binning_strategy_bin_count {
            config.binning_strategy_bin_count = Some(count);
            any = true;
        }
        if let Some(equal) = scale.color_scale_equal_size_bins {
            config.equal_size_bins = Some(equal);
            any = true;
        }
        if let Some(description) = &scale.color_scale_legend_description {
            config.legend_description = Some(description.clone());
            any = true;
        }
        if let Some(min) = scale.color_scale_numeric_min_value {
            config.custom_numeric_min_value = Some(min);
            any = true;
        }

        let mut labels = BinOverrides::new();
        let mut colors = BinOverrides::new();
        for entry in parse_entries(scale.color_scale_numeric_bins.as_deref()) {
            let value = match entry.value.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    log::debug!("dropping numeric color scale bin `{}`", entry.value);
                    continue;
                }
            };
            let index = config.custom_numeric_values.len();
            config.custom_numeric_values.push(value);
            if let Some(color) = entry.color {
                colors.insert(index, color);
            }
            if let Some(label) = entry.label {
                labels.insert(index, label);
            }
        }
        if !config.custom_numeric_values.is_empty() {
            any = true;
        }
        config.custom_numeric_colors_active = !colors.is_empty();
        config.custom_numeric_colors = colors;
        config.custom_numeric_labels = labels;

        for entry in parse_entries(scale.color_scale_categorical_bins.as_deref()) {
            if let Some(color) = entry.color {
                config
                    .custom_category_colors
                    .insert(entry.value.into(), color.into());
                any = true;
            }
            if let Some(label) = entry.label {
                config
                    .custom_category_labels
                    .insert(entry.value.into(), label.into());
                any = true;
            }
        }

        any.then_some(config)
    }

    /// Encodes this config into its persisted form.
    ///
    /// Fields at their default value are left out. Numeric colors are only written while
    /// `custom_numeric_colors_active` is set; hidden categories are not part of the encoding.
    ///
    /// Entries are written without escaping: category values must not contain `,` or `;`, and
    /// labels must not contain `;`, or the record will not parse back to the same config.
    pub fn to_dsl(&self) -> ColumnColorScale {
        let numeric_entries = self
            .custom_numeric_values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                encode_entry(
                    &format!("{value}"),
                    self.numeric_color_for(i),
                    self.numeric_label_for(i),
                )
            })
            .collect();

        let mut categories: Vec<&String> = self
            .custom_category_colors
            .keys()
            .chain(self.custom_category_labels.keys())
            .collect();
        categories.sort();
        categories.dedup();
        let categorical_entries = categories
            .into_iter()
            .map(|value| {
                encode_entry(
                    value,
                    self.category_color_for(value),
                    self.category_label_for(value),
                )
            })
            .collect();

        ColumnColorScale {
            color_scale_scheme: self.base_color_scheme.clone(),
            color_scale_invert: self.color_scheme_invert.then_some(true),
            color_scale_binning_strategy: (self.binning_strategy != BinningStrategy::default())
                .then_some(self.binning_strategy),
            color_scale_binning_strategy_bin_count: self.binning_strategy_bin_count,
            color_scale_equal_size_bins: self.equal_size_bins,
            color_scale_legend_description: self.legend_description.clone(),
            color_scale_numeric_min_value: self.custom_numeric_min_value,
            color_scale_numeric_bins: join_entries(numeric_entries),
            color_scale_categorical_bins: join_entries(categorical_entries),
        }
    }
}
