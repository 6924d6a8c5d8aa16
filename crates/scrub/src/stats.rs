//! Descriptive statistics used by the cleaning stages.

use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// First and third quartiles of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
}

impl Quartiles {
    /// Compute quartiles with linear interpolation. `None` for an empty sample.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Some(Self {
            q1: quantile_sorted(&sorted, 0.25)?,
            q3: quantile_sorted(&sorted, 0.75)?,
        })
    }

    /// Calculate the interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Inclusive acceptance range `[Q1 - k*IQR, Q3 + k*IQR]`.
    pub fn bounds(&self, multiplier: f64) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - multiplier * iqr, self.q3 + multiplier * iqr)
    }

    /// Check if a value is an outlier using the IQR method.
    pub fn is_outlier_iqr(&self, value: f64, multiplier: f64) -> bool {
        let (lower, upper) = self.bounds(multiplier);
        value < lower || value > upper
    }
}

/// Quantile of an ascending sample using linear interpolation between the
/// two closest ranks (`(n - 1) * q` positioning).
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Arithmetic mean. `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Most frequent value; among equally frequent values the one seen first wins.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<(T, usize)> = None;
    for (value, count) in value_counts(values) {
        match &best {
            Some((_, best_count)) if *best_count >= count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

/// Frequency of each distinct value, in first-seen order.
pub fn value_counts<T, I>(values: I) -> IndexMap<T, usize>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let mut counts = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}
