// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Groups entity observations into series and stacks them.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use grapher_color::{
    ColorScaleConfig, ColorScaleSpec, CoreValue, LegendItem, NO_DATA_GRAY, ScaleValue,
    ValueColumn,
};
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use peniko::Color;

use crate::table::{EntityTable, Time};

/// Color scheme used for series when the color scale config names none.
pub const DEFAULT_SERIES_SCHEME: &str = "Dark2";

/// Reasons a stacked bar chart cannot be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StackedBarError {
    /// The table declares no dimension to plot.
    #[error("Missing variable")]
    MissingDimension,
    /// No selected entity has a plottable value on the timeline.
    #[error("No matching data")]
    NoMatchingData,
}

/// One stacked point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackedValue {
    /// Timeline position.
    pub x: Time,
    /// Own height.
    pub y: f64,
    /// Cumulative height of the series below.
    pub y_offset: f64,
    /// Synthesized to fill a gap in the data.
    pub is_fake: bool,
}

impl StackedValue {
    /// Top of this segment.
    pub fn y_end(&self) -> f64 {
        self.y + self.y_offset
    }
}

/// One entity+dimension series.
#[derive(Clone, Debug)]
pub struct StackedSeries {
    /// `"{entity}_{dimension}"`.
    pub key: String,
    /// Display name; also the value the series color is looked up by.
    pub label: String,
    /// Fill color.
    pub color: Color,
    /// One value per timeline point.
    pub values: Vec<StackedValue>,
}

/// Output of [`StackedBarTransform::stacked_series`].
///
/// Series run bottom-up; all of them share `timeline`.
#[derive(Clone, Debug)]
pub struct StackedBars {
    /// Stacked series, bottom first.
    pub series: Vec<StackedSeries>,
    /// Timeline points that survived empty-column removal.
    pub timeline: Vec<Time>,
}

impl StackedBars {
    /// First and last timeline points, if any.
    pub fn x_domain(&self) -> Option<(Time, Time)> {
        Some((*self.timeline.first()?, *self.timeline.last()?))
    }

    /// `(0, tallest stack)`.
    pub fn y_domain(&self) -> (f64, f64) {
        let max = self
            .series
            .iter()
            .flat_map(|s| s.values.iter())
            .map(StackedValue::y_end)
            .fold(0.0, f64::max);
        (0.0, max)
    }

    /// Legend rows, top of the stack first.
    pub fn legend_items(&self) -> Vec<LegendItem> {
        self.series
            .iter()
            .rev()
            .map(|s| LegendItem::solid(s.label.clone(), s.color))
            .collect()
    }
}

/// A stacked bar transform over selected entities.
#[derive(Clone, Debug)]
pub struct StackedBarTransform {
    /// Selected entities, in selection order.
    pub selection: Vec<String>,
    /// Timeline points. Sorted and deduplicated before use.
    pub timeline: Vec<Time>,
    /// Overrides for series colors, keyed by series label.
    pub color_scale: ColorScaleConfig,
    /// Scheme used when `color_scale` names none.
    pub default_scheme: String,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct GroupKey {
    selection: usize,
    dimension: usize,
}

impl StackedBarTransform {
    /// Creates a transform with default colors.
    pub fn new<I, S>(selection: I, timeline: impl IntoIterator<Item = Time>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut timeline: Vec<Time> = timeline.into_iter().collect();
        timeline.sort_unstable();
        timeline.dedup();
        Self {
            selection: selection.into_iter().map(Into::into).collect(),
            timeline,
            color_scale: ColorScaleConfig::default(),
            default_scheme: DEFAULT_SERIES_SCHEME.into(),
        }
    }

    /// Sets the series color overrides.
    pub fn with_color_scale(mut self, config: ColorScaleConfig) -> Self {
        self.color_scale = config;
        self
    }

    /// Sets the fallback scheme.
    pub fn with_default_scheme(mut self, name: impl Into<String>) -> Self {
        self.default_scheme = name.into();
        self
    }

    /// Why `table` cannot be drawn, if it cannot.
    pub fn fail_message(&self, table: &EntityTable) -> Option<String> {
        self.stacked_series(table).err().map(|e| e.to_string())
    }

    /// Groups, gap-fills, colors and stacks the selected entities' series.
    ///
    /// Series stack bottom-up in selection order, then in declared dimension order, so the
    /// last selected entity ends up on top.
    ///
    /// Rows are skipped when their entity is not selected, their value is missing, not a
    /// number or negative, or their time is not on the timeline. When a series has several
    /// rows for one time, the first wins.
    pub fn stacked_series(&self, table: &EntityTable) -> Result<StackedBars, StackedBarError> {
        if table.dimensions.is_empty() {
            return Err(StackedBarError::MissingDimension);
        }

        let selection_index: HashMap<&str, usize> = self
            .selection
            .iter()
            .enumerate()
            .map(|(i, e)| (e.as_str(), i))
            .collect();

        let mut timeline = self.timeline.clone();
        timeline.sort_unstable();
        timeline.dedup();

        let mut groups: HashMap<GroupKey, Vec<Option<f64>>> = HashMap::new();
        for row in &table.rows {
            let Some(&selection) = selection_index.get(row.entity.as_str()) else {
                continue;
            };
            let Some(dimension) = table.dimension_index(&row.dimension) else {
                continue;
            };
            let value = match row.value {
                Some(CoreValue::Number(v)) if v.is_finite() && v >= 0.0 => v,
                _ => {
                    log::trace!(
                        "skipping {} {} at {}: not a non-negative number",
                        row.entity,
                        row.dimension,
                        row.time
                    );
                    continue;
                }
            };
            let Ok(slot) = timeline.binary_search(&row.time) else {
                continue;
            };
            let key = GroupKey {
                selection,
                dimension,
            };
            let values = match groups.entry(key) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => e.insert(alloc::vec![None; timeline.len()]),
            };
            if values[slot].is_some() {
                log::debug!(
                    "duplicate value for {} {} at {}, keeping the first",
                    row.entity,
                    row.dimension,
                    row.time
                );
                continue;
            }
            values[slot] = Some(value);
        }

        if groups.is_empty() {
            return Err(StackedBarError::NoMatchingData);
        }

        let mut ordered: Vec<(GroupKey, Vec<Option<f64>>)> = groups.into_iter().collect();
        ordered.sort_unstable_by_key(|(key, _)| *key);

        let single_dimension = table.dimensions.len() == 1;
        let names: Vec<(String, String)> = ordered
            .iter()
            .map(|(key, _)| {
                let entity = &self.selection[key.selection];
                let dimension = &table.dimensions[key.dimension];
                let label = if single_dimension {
                    entity.clone()
                } else {
                    format!("{entity} - {dimension}")
                };
                (format!("{entity}_{dimension}"), label)
            })
            .collect();

        let labels = ValueColumn::from_values(names.iter().map(|(_, label)| label.as_str()));
        let scale = ColorScaleSpec::new(&self.color_scale)
            .with_default_color_scheme(&self.default_scheme)
            .instantiate(&labels);

        let mut series: Vec<StackedSeries> = Vec::with_capacity(ordered.len());
        for ((_, raw), (key, label)) in ordered.into_iter().zip(names) {
            let color = scale
                .get_color(Some(ScaleValue::Text(&label)))
                .unwrap_or(NO_DATA_GRAY);
            let values = timeline
                .iter()
                .zip(raw)
                .map(|(&x, y)| StackedValue {
                    x,
                    y: y.unwrap_or(0.0),
                    y_offset: 0.0,
                    is_fake: y.is_none(),
                })
                .collect();
            series.push(StackedSeries {
                key,
                label,
                color,
                values,
            });
        }

        stack(&mut series);
        let timeline = remove_empty_columns(&mut series, &timeline);
        Ok(StackedBars { series, timeline })
    }
}

/// Sets each series' offsets to the running top of the series below it.
fn stack(series: &mut [StackedSeries]) {
    for i in 1..series.len() {
        let (below, rest) = series.split_at_mut(i);
        let prev = &below[i - 1];
        for (value, under) in rest[0].values.iter_mut().zip(&prev.values) {
            value.y_offset = under.y_end();
        }
    }
}

/// Drops timeline points where the whole stack is zero, from every series at once.
fn remove_empty_columns(series: &mut [StackedSeries], timeline: &[Time]) -> Vec<Time> {
    let Some(top) = series.last() else {
        return timeline.to_vec();
    };
    let keep: Vec<bool> = top.values.iter().map(|v| v.y_end() != 0.0).collect();
    for s in series.iter_mut() {
        let mut i = 0;
        s.values.retain(|_| {
            let k = keep[i];
            i += 1;
            k
        });
    }
    timeline
        .iter()
        .zip(&keep)
        .filter_map(|(&t, &k)| k.then_some(t))
        .collect()
}
