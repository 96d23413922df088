// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Co-iteration: the multi-level synchronized iterator driven by a
//! compile-time boolean merge predicate `F`.

pub mod predicate;

pub use predicate::{Closure, Expr, MergePredicate};

use crate::capabilities::{coordinate_position, coordinate_value, locate_position, LevelCursor};
use crate::error::{Error, Result};
use crate::levels::Level;

#[cfg(feature = "metrics")]
use crate::metrics::Metrics;

/// Construction-time options for a [`Coiterate`].
///
/// A small, explicit bundle of choices made once at construction, not a
/// runtime-tunable scheduler — the same shape as `fjall-rs`'s `*::Options`
/// construction structs (e.g. `flush::Options`).
#[derive(Debug, Clone, Copy)]
pub struct CoiterateOptions {
    /// Whether to check predicate legality at construction. Defaults to
    /// `true`. Disabling this is an escape hatch
    /// for callers (such as a merge-lattice planner) that already prove
    /// legality out of band; it never changes iteration semantics, only
    /// which failures are caught early versus left as the caller's
    /// responsibility.
    pub check_legality: bool,
}

impl Default for CoiterateOptions {
    fn default() -> Self {
        Self {
            check_legality: true,
        }
    }
}

/// A multi-level, synchronized iterator over a tuple of levels, driven by
/// a boolean merge predicate `F`.
///
/// Borrows its levels and predicate, so its lifetime must not exceed
/// theirs.
pub struct Coiterate<'a, P: MergePredicate> {
    levels: Vec<&'a Level>,
    predicate: P,
    #[cfg(feature = "metrics")]
    metrics: Metrics,
}

impl<'a, P: MergePredicate> Coiterate<'a, P> {
    /// Constructs a co-iterator over `levels` driven by `predicate`, using
    /// default options (legality checking on).
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] if the levels disagree on size,
    /// [`Error::NoOrderedLevel`] if none of them is `ordered`,
    /// [`Error::MissingLocate`] if an unordered level lacks `locate`, or
    /// [`Error::IllegalPredicate`] if `predicate` is not legal (would
    /// require visiting an unordered level's coordinate that no ordered
    /// co-participant has actually produced).
    pub fn new(levels: Vec<&'a Level>, predicate: P) -> Result<Self> {
        Self::with_options(levels, predicate, CoiterateOptions::default())
    }

    /// Constructs a co-iterator, as [`Coiterate::new`], with explicit
    /// [`CoiterateOptions`].
    ///
    /// # Errors
    ///
    /// See [`Coiterate::new`].
    pub fn with_options(
        levels: Vec<&'a Level>,
        predicate: P,
        options: CoiterateOptions,
    ) -> Result<Self> {
        check_well_formed(&levels, &predicate, options)?;

        log::debug!(
            "constructed coiterator over {} levels (legality checked: {})",
            levels.len(),
            options.check_legality
        );

        Ok(Self {
            levels,
            predicate,
            #[cfg(feature = "metrics")]
            metrics: Metrics::default(),
        })
    }

    /// Number of levels being co-iterated.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.levels.len()
    }

    /// Returns a snapshot of this co-iterator's metrics, if the `metrics`
    /// feature is enabled.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn metrics(&self) -> crate::metrics::MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Obtains a scoped iteration over the given parent context: a shared
    /// coordinate prefix `parent_coords` and one parent position per
    /// co-iterated level, `parent_positions` (same length and order as the
    /// levels passed to [`Coiterate::new`]).
    ///
    /// # Panics
    ///
    /// Panics (a programming error) if `parent_positions` does not have
    /// exactly [`Coiterate::arity`] elements.
    pub fn iter<'c>(
        &'c self,
        parent_coords: &[usize],
        parent_positions: &[usize],
    ) -> CoiterateIter<'a, 'c, P> {
        assert_eq!(
            parent_positions.len(),
            self.levels.len(),
            "parent_positions must have one entry per co-iterated level"
        );

        let cursors = self
            .levels
            .iter()
            .zip(parent_positions)
            .map(|(level, &pos)| make_cursor(level, parent_coords, pos))
            .collect();

        CoiterateIter {
            coiterate: self,
            cursors,
        }
    }
}

fn check_well_formed<P: MergePredicate>(
    levels: &[&Level],
    predicate: &P,
    options: CoiterateOptions,
) -> Result<()> {
    // Rule 1: all sizes equal.
    if let Some((&first, rest)) = levels.split_first() {
        let expected = first.size();
        for (index, level) in rest.iter().enumerate() {
            let actual = level.size();
            if actual != expected {
                return Err(Error::SizeMismatch {
                    expected,
                    actual,
                    index: index + 1,
                });
            }
        }
    }

    // Rule 2: at least one ordered level.
    if !levels.iter().any(|l| l.ordered()) {
        return Err(Error::NoOrderedLevel);
    }

    // Rule 3: every level is ordered or exposes locate.
    for (index, level) in levels.iter().enumerate() {
        if !level.ordered() && !level.has_locate() {
            return Err(Error::MissingLocate { index });
        }
    }

    // Rule 4: predicate legality.
    if options.check_legality {
        let ordered: Vec<bool> = levels.iter().map(|l| l.ordered()).collect();
        if !predicate_is_legal(&ordered, predicate) {
            return Err(Error::IllegalPredicate);
        }
    }

    Ok(())
}

/// Enumerates the `2^u` assignments that set each `ordered` level's bit to
/// `false` and range each unordered level's bit over `{false, true}`, and
/// checks that `predicate` evaluates to `false` for every one of them — a
/// predicate is legal only if it never demands an unordered level's
/// coordinate without at least one ordered level also being present at
/// that coordinate. `u` is the number of unordered levels, so this is a
/// small fold in practice (a handful of levels per co-iteration).
fn predicate_is_legal<P: MergePredicate>(ordered: &[bool], predicate: &P) -> bool {
    let unordered_indices: Vec<usize> = ordered
        .iter()
        .enumerate()
        .filter(|(_, &is_ordered)| !is_ordered)
        .map(|(i, _)| i)
        .collect();

    let n = ordered.len();
    let assignments = 1u32 << unordered_indices.len();

    for mask in 0..assignments {
        let mut present = vec![false; n];
        for (bit, &level_index) in unordered_indices.iter().enumerate() {
            present[level_index] = (mask >> bit) & 1 == 1;
        }
        if predicate.eval(&present) {
            return false;
        }
    }

    true
}

fn make_cursor<'a>(level: &'a Level, parent_coords: &[usize], parent_pos: usize) -> Cursor<'a> {
    match level {
        Level::Dense(l) => Cursor::Dense(coordinate_value::Cursor::new(
            l.iter_helper(parent_coords, parent_pos),
        )),
        Level::Range(l) => Cursor::Range(coordinate_value::Cursor::new(
            l.iter_helper(parent_coords, parent_pos),
        )),
        Level::Compressed(l) => Cursor::Compressed(coordinate_position::Cursor::new(
            l.iter_helper(parent_coords, parent_pos),
        )),
        Level::Singleton(l) => Cursor::Singleton(coordinate_position::Cursor::new(
            l.iter_helper(parent_coords, parent_pos),
        )),
        Level::Offset(l) => Cursor::Offset(coordinate_position::Cursor::new(
            l.iter_helper(parent_coords, parent_pos),
        )),
        Level::Hashed(l) => Cursor::Hashed(locate_position::Cursor::new(l, parent_pos)),
    }
}

/// A per-level cursor, as one of the closed set of concrete cursor types
/// backing [`Level`]'s six variants.
enum Cursor<'a> {
    Dense(coordinate_value::Cursor<crate::levels::dense::DenseIter>),
    Range(coordinate_value::Cursor<crate::levels::range::RangeIter>),
    Compressed(coordinate_position::Cursor<crate::levels::compressed::CompressedIter<'a>>),
    Singleton(coordinate_position::Cursor<crate::levels::singleton::SingletonIter>),
    Offset(coordinate_position::Cursor<crate::levels::offset::OffsetIter>),
    Hashed(locate_position::Cursor<'a>),
}

impl LevelCursor for Cursor<'_> {
    fn ordered(&self) -> bool {
        match self {
            Self::Dense(c) => c.ordered(),
            Self::Range(c) => c.ordered(),
            Self::Compressed(c) => c.ordered(),
            Self::Singleton(c) => c.ordered(),
            Self::Offset(c) => c.ordered(),
            Self::Hashed(c) => c.ordered(),
        }
    }

    fn current(&self) -> Option<usize> {
        match self {
            Self::Dense(c) => c.current(),
            Self::Range(c) => c.current(),
            Self::Compressed(c) => c.current(),
            Self::Singleton(c) => c.current(),
            Self::Offset(c) => c.current(),
            Self::Hashed(c) => c.current(),
        }
    }

    fn current_pos(&self) -> Option<usize> {
        match self {
            Self::Dense(c) => c.current_pos(),
            Self::Range(c) => c.current_pos(),
            Self::Compressed(c) => c.current_pos(),
            Self::Singleton(c) => c.current_pos(),
            Self::Offset(c) => c.current_pos(),
            Self::Hashed(c) => c.current_pos(),
        }
    }

    fn advance(&mut self) {
        match self {
            Self::Dense(c) => c.advance(),
            Self::Range(c) => c.advance(),
            Self::Compressed(c) => c.advance(),
            Self::Singleton(c) => c.advance(),
            Self::Offset(c) => c.advance(),
            Self::Hashed(c) => c.advance(),
        }
    }

    fn locate(&self, coordinate: usize) -> Option<usize> {
        match self {
            Self::Hashed(c) => c.locate(coordinate),
            _ => None,
        }
    }
}

/// A forward-only iterator yielding `(coordinate, positions)` pairs.
///
/// `positions[k]` is `Some(position)` iff the `k`-th co-iterated level
/// stores the yielded coordinate under its parent context, `None`
/// otherwise.
pub struct CoiterateIter<'a, 'c, P: MergePredicate> {
    coiterate: &'c Coiterate<'a, P>,
    cursors: Vec<Cursor<'a>>,
}

impl<P: MergePredicate> Iterator for CoiterateIter<'_, '_, P> {
    type Item = (usize, Vec<Option<usize>>);

    fn next(&mut self) -> Option<Self::Item> {
        // Step 1: i* is the minimum current coordinate among ordered
        // levels that have not reached their end. If none remain, every
        // ordered level has exhausted its run and co-iteration ends.
        let i_star = self
            .cursors
            .iter()
            .filter(|c| c.ordered())
            .filter_map(LevelCursor::current)
            .min()?;

        // Step 2: compute output positions.
        let positions: Vec<Option<usize>> = self
            .cursors
            .iter()
            .map(|c| {
                if c.ordered() {
                    if c.current() == Some(i_star) {
                        c.current_pos()
                    } else {
                        None
                    }
                } else {
                    #[cfg(feature = "metrics")]
                    self.coiterate.metrics.record_locate();
                    c.locate(i_star)
                }
            })
            .collect();

        // Step 4: advance every ordered cursor whose current coordinate
        // equals i*. Unordered cursors are never advanced.
        for cursor in &mut self.cursors {
            if cursor.ordered() && cursor.current() == Some(i_star) {
                cursor.advance();
                #[cfg(feature = "metrics")]
                self.coiterate.metrics.record_advance();
            }
        }

        log::trace!("coiteration visited coordinate {i_star}");
        #[cfg(feature = "metrics")]
        self.coiterate.metrics.record_step(&positions);
        #[cfg(not(feature = "metrics"))]
        let _ = self.coiterate;

        Some((i_star, positions))
    }
}
