// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend item generation.
//!
//! Painting is left to the caller; this module only decides which swatches a legend shows,
//! in which order, and with which labels.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;

use crate::color_scale::ColorScale;

/// A legend row: a color swatch with a label.
#[derive(Clone, Debug)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch color.
    pub color: Color,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// One item per visible legend bin, in bin order.
pub fn legend_items(scale: &ColorScale) -> Vec<LegendItem> {
    scale
        .legend_bins()
        .iter()
        .filter(|bin| !bin.is_hidden())
        .map(|bin| LegendItem::solid(bin.text(), bin.color()))
        .collect()
}
