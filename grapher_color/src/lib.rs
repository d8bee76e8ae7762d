// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color scales for Grapher charts.
//!
//! This crate turns a data column plus author overrides into legend bins:
//! - **Binning strategies** choose numeric bin boundaries (equal interval, quantiles, ckmeans).
//! - **Configuration** holds the overrides and round-trips through the compact column encoding.
//! - **The color scale** excludes outliers, merges overrides with computed defaults, and maps
//!   values to colors.
//!
//! Rendering is out of scope; [`legend_items`] is the hand-off point to a legend painter.

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod bin;
mod binning;
mod ckmeans;
mod color;
mod color_scale;
mod column;
mod config;
mod dsl;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod legend;
mod scheme;
mod stats;

pub use bin::{CategoricalBin, ColorScaleBin, NumericBin, ScaleValue};
pub use binning::{
    BinningStrategy, CKMEANS_MAX_SAMPLE_SIZE, DEFAULT_BIN_COUNT, MAX_BIN_COUNT,
    ParseBinningStrategyError, bin_maximums,
};
pub use color::{NO_DATA_GRAY, ParseColorError, parse_css_color, to_hex};
pub use color_scale::{ColorScale, ColorScaleSpec, NO_DATA_LABEL};
pub use column::{ColorScaleColumn, CoreValue, ValueColumn};
pub use config::{BinOverrides, ColorScaleConfig};
pub use dsl::ColumnColorScale;
pub use format::{NumberAbbreviation, NumberFormat};
pub use legend::{LegendItem, legend_items};
pub use scheme::{ColorScheme, ColorSchemeKind, DEFAULT_COLOR_SCHEME};
pub use stats::round_sig_fig;
