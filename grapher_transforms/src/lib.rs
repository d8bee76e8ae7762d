// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series transforms for Grapher charts.
//!
//! This crate provides:
//! - an owned long-format table of per-entity, per-time observations, and
//! - a stacked bar transform that groups the selected entities into series, fills gaps,
//!   colors each series through a `grapher_color` color scale and stacks them bottom-up.
//!
//! Everything is a full recompute over an immutable table; callers rerun the transform when
//! the table, selection or timeline changes.

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod stacked_bar;
mod table;

pub use stacked_bar::{
    DEFAULT_SERIES_SCHEME, StackedBarError, StackedBarTransform, StackedBars, StackedSeries,
    StackedValue,
};
pub use table::{EntityRow, EntityTable, EntityTableError, Time};
