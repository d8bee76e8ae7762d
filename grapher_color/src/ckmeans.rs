// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optimal one-dimensional k-means ("natural breaks") clustering.
//!
//! This is the Ckmeans.1d.dp dynamic program: `cost[k][i]` is the minimal within-cluster sum
//! of squared deviations when the first `i + 1` values are split into `k + 1` clusters. Each
//! row is filled with a divide-and-conquer pass that exploits the monotonicity of the optimal
//! split points, giving `O(k * n * log n)` time and `O(k * n)` memory.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::stats::count_distinct_sorted;

/// Splits an ascending slice into at most `n_clusters` contiguous clusters.
///
/// Returns the clusters as subslices of `sorted`, in ascending order. Clusters that the
/// dynamic program leaves empty are skipped, so the result may be shorter than
/// `n_clusters`. An empty input or `n_clusters == 0` yields no clusters.
pub(crate) fn ckmeans(sorted: &[f64], n_clusters: usize) -> Vec<&[f64]> {
    let n = sorted.len();
    if n == 0 || n_clusters == 0 {
        return Vec::new();
    }
    let n_clusters = n_clusters.min(n);
    if n_clusters == 1 || count_distinct_sorted(sorted) == 1 {
        return vec![sorted];
    }

    let mut tables = Tables::new(sorted, n_clusters);
    tables.fill();

    let mut clusters: Vec<&[f64]> = Vec::with_capacity(n_clusters);
    let mut right = n - 1;
    let mut done = false;
    for cluster in (0..n_clusters).rev() {
        if done {
            break;
        }
        let left = tables.backtrack[cluster][right];
        if left <= right {
            clusters.push(&sorted[left..=right]);
        }
        if cluster > 0 {
            if left == 0 {
                done = true;
            } else {
                right = left - 1;
            }
        }
    }
    clusters.reverse();
    clusters
}

struct Tables {
    cost: Vec<Vec<f64>>,
    backtrack: Vec<Vec<usize>>,
    sum_x: Vec<f64>,
    sum_x_sq: Vec<f64>,
}

impl Tables {
    fn new(sorted: &[f64], n_clusters: usize) -> Self {
        let n = sorted.len();
        // Shifting by the median keeps the running sums small, which limits cancellation.
        let shift = sorted[n / 2];
        let mut sum_x = Vec::with_capacity(n);
        let mut sum_x_sq = Vec::with_capacity(n);
        let mut acc = 0.0;
        let mut acc_sq = 0.0;
        for &v in sorted {
            let shifted = v - shift;
            acc += shifted;
            acc_sq += shifted * shifted;
            sum_x.push(acc);
            sum_x_sq.push(acc_sq);
        }
        Self {
            cost: vec![vec![0.0; n]; n_clusters],
            backtrack: vec![vec![0; n]; n_clusters],
            sum_x,
            sum_x_sq,
        }
    }

    fn n(&self) -> usize {
        self.sum_x.len()
    }

    /// Sum of squared deviations of `sorted[j..=i]` from its mean.
    fn ssq(&self, j: usize, i: usize) -> f64 {
        let s = if j > 0 {
            let count = (i - j + 1) as f64;
            let mu = (self.sum_x[i] - self.sum_x[j - 1]) / count;
            self.sum_x_sq[i] - self.sum_x_sq[j - 1] - count * mu * mu
        } else {
            self.sum_x_sq[i] - self.sum_x[i] * self.sum_x[i] / (i + 1) as f64
        };
        if s < 0.0 { 0.0 } else { s }
    }

    fn fill(&mut self) {
        let n = self.n();
        for i in 0..n {
            self.cost[0][i] = self.ssq(0, i);
            self.backtrack[0][i] = 0;
        }
        let k = self.cost.len();
        for cluster in 1..k {
            let i_min = if cluster < k - 1 { cluster } else { n - 1 };
            self.fill_column(i_min, n - 1, cluster);
        }
    }

    fn fill_column(&mut self, i_min: usize, i_max: usize, cluster: usize) {
        if i_min > i_max {
            return;
        }
        let n = self.n();
        let i = (i_min + i_max) / 2;

        self.cost[cluster][i] = self.cost[cluster - 1][i - 1];
        self.backtrack[cluster][i] = i;

        let mut j_low = cluster;
        if i_min > cluster {
            j_low = j_low.max(self.backtrack[cluster][i_min - 1]);
        }
        j_low = j_low.max(self.backtrack[cluster - 1][i]);

        let mut j_high = i - 1;
        if i_max < n - 1 {
            j_high = j_high.min(self.backtrack[cluster][i_max + 1]);
        }

        let mut j = j_high;
        while j >= j_low {
            let s_ji = self.ssq(j, i);
            if s_ji + self.cost[cluster - 1][j_low - 1] >= self.cost[cluster][i] {
                break;
            }

            let s_jlow = self.ssq(j_low, i) + self.cost[cluster - 1][j_low - 1];
            if s_jlow < self.cost[cluster][i] {
                self.cost[cluster][i] = s_jlow;
                self.backtrack[cluster][i] = j_low;
            }
            j_low += 1;

            let s_j = s_ji + self.cost[cluster - 1][j - 1];
            if s_j < self.cost[cluster][i] {
                self.cost[cluster][i] = s_j;
                self.backtrack[cluster][i] = j;
            }

            if j == 0 {
                break;
            }
            j -= 1;
        }

        if i > i_min {
            self.fill_column(i_min, i - 1, cluster);
        }
        if i < i_max {
            self.fill_column(i + 1, i_max, cluster);
        }
    }
}
