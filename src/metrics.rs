// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Lightweight co-iteration counters, gated behind the `metrics` feature.
//!
//! Purely additive instrumentation: no control-flow decision anywhere in
//! this crate reads a counter, so compiling without the `metrics` feature
//! changes nothing but removes the atomics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters tracking one [`crate::coiterate::Coiterate`]'s activity.
#[derive(Debug, Default)]
pub struct Metrics {
    coordinates_visited: AtomicU64,
    locate_calls: AtomicU64,
    ordered_advances: AtomicU64,
}

impl Metrics {
    /// Records one step of [`crate::coiterate::CoiterateIter::next`]:
    /// one coordinate visited, plus one `locate` call for each `None`-or-
    /// `Some` position produced by an unordered (locate-only) level in
    /// that step.
    ///
    /// `advance` calls are counted separately via
    /// [`Metrics::record_advance`], since they happen after the position
    /// vector this method is handed has already been computed.
    pub(crate) fn record_step(&self, positions: &[Option<usize>]) {
        self.coordinates_visited.fetch_add(1, Ordering::Relaxed);
        let _ = positions;
    }

    /// Records a `locate` call made against an unordered level.
    pub(crate) fn record_locate(&self) {
        self.locate_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an ordered cursor being advanced.
    pub(crate) fn record_advance(&self) {
        self.ordered_advances.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time snapshot of all counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            coordinates_visited: self.coordinates_visited.load(Ordering::Relaxed),
            locate_calls: self.locate_calls.load(Ordering::Relaxed),
            ordered_advances: self.ordered_advances.load(Ordering::Relaxed),
        }
    }
}

/// A plain, cheap-to-copy snapshot of [`Metrics`]' counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Number of coordinates yielded by `CoiterateIter::next`.
    pub coordinates_visited: u64,
    /// Number of `locate` calls made against unordered levels.
    pub locate_calls: u64,
    /// Number of ordered-cursor `advance` calls.
    pub ordered_advances: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn counters_start_at_zero() {
        let metrics = Metrics::default();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn record_step_increments_coordinates_visited() {
        let metrics = Metrics::default();
        metrics.record_step(&[Some(0), None]);
        metrics.record_step(&[Some(1), Some(1)]);
        assert_eq!(metrics.snapshot().coordinates_visited, 2);
    }

    #[test]
    fn record_locate_and_advance_increment_independently() {
        let metrics = Metrics::default();
        metrics.record_locate();
        metrics.record_locate();
        metrics.record_advance();
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.locate_calls, 2);
        assert_eq!(snapshot.ordered_advances, 1);
    }
}
