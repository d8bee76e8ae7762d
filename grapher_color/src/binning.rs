// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Automatic binning strategies.
//!
//! Each strategy turns an ascending numeric sample into a list of bin maximums (upper
//! boundaries). The lower boundary of the first bin is supplied separately by the color scale.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ckmeans::ckmeans;
use crate::stats::{quantile_sorted, round_sig_fig};

/// Bin count used by automatic strategies when none is configured.
pub const DEFAULT_BIN_COUNT: usize = 5;

/// Largest bin count any strategy is run with; larger requests are clamped.
pub const MAX_BIN_COUNT: usize = 100;

/// Largest sample the ckmeans strategy is run on.
///
/// Ckmeans allocates `bin_count * sample_size` tables; larger samples fall back to
/// [`BinningStrategy::EqualInterval`].
pub const CKMEANS_MAX_SAMPLE_SIZE: usize = 10_000;

/// How numeric bin boundaries are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinningStrategy {
    /// Equal-width bins starting at the minimum bin value.
    EqualInterval,
    /// Bins holding (roughly) equal numbers of values.
    Quantiles,
    /// Natural breaks from optimal one-dimensional k-means clustering.
    #[default]
    Ckmeans,
    /// Boundaries are taken verbatim from configuration.
    Manual,
}

impl BinningStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::EqualInterval,
        Self::Quantiles,
        Self::Ckmeans,
        Self::Manual,
    ];

    /// The persisted name of this strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EqualInterval => "equalInterval",
            Self::Quantiles => "quantiles",
            Self::Ckmeans => "ckmeans",
            Self::Manual => "manual",
        }
    }

    /// Returns `true` for strategies that derive boundaries from the data.
    pub fn is_automatic(self) -> bool {
        !matches!(self, Self::Manual)
    }
}

impl fmt::Display for BinningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`BinningStrategy`] name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown binning strategy `{0}`")]
pub struct ParseBinningStrategyError(pub String);

impl FromStr for BinningStrategy {
    type Err = ParseBinningStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ParseBinningStrategyError(s.into()))
    }
}

/// Computes bin maximums for an ascending sample.
///
/// - `sorted` must be ascending; `bin_count` is the requested number of bins.
/// - When `min_value` is given, boundaries at or below it are dropped so that the first bin
///   never has zero width. Equal-interval steps also start from it (from `0` when absent).
/// - Duplicate boundaries are removed. An empty sample or `bin_count == 0` yields no
///   boundaries.
/// - `bin_count` is clamped to [`MAX_BIN_COUNT`].
///
/// [`BinningStrategy::Manual`] takes its boundaries from configuration, so here it behaves like
/// the equal-interval fallback. Ckmeans is run regardless of sample size; callers apply
/// [`CKMEANS_MAX_SAMPLE_SIZE`] themselves.
pub fn bin_maximums(
    strategy: BinningStrategy,
    sorted: &[f64],
    bin_count: usize,
    min_value: Option<f64>,
) -> Vec<f64> {
    if sorted.is_empty() || bin_count == 0 {
        return Vec::new();
    }
    let bin_count = bin_count.min(MAX_BIN_COUNT);

    let raw: Vec<Option<f64>> = match strategy {
        BinningStrategy::Quantiles => (1..=bin_count)
            .map(|k| quantile_sorted(sorted, k as f64 / bin_count as f64))
            .collect(),
        BinningStrategy::Ckmeans => ckmeans(sorted, bin_count)
            .into_iter()
            .map(|cluster| cluster.last().copied())
            .collect(),
        BinningStrategy::EqualInterval | BinningStrategy::Manual => {
            equal_interval(sorted, bin_count, min_value.unwrap_or(0.0))
        }
    };

    let mut out: Vec<f64> = Vec::with_capacity(raw.len());
    for v in raw.into_iter().flatten() {
        if min_value.is_some_and(|min| v <= min) {
            continue;
        }
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

fn equal_interval(sorted: &[f64], bin_count: usize, min_value: f64) -> Vec<Option<f64>> {
    let Some(&max) = sorted.last() else {
        return Vec::new();
    };
    let step = round_sig_fig((max - min_value) / bin_count as f64, 1);
    (1..=bin_count)
        .map(|n| Some(min_value + n as f64 * step))
        .collect()
}
