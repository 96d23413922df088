// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Errors that can occur while constructing a [`crate::coiterate::Coiterate`]
/// or a [`crate::tensor::Tensor`].
///
/// Per the engine's error taxonomy, only construction-time ("configuration")
/// failures are represented here. Programming errors (out-of-bounds access,
/// advancing an iterator past its end, mutating a level with live iterators)
/// are not recoverable conditions and remain panics/debug assertions.
/// Absence of a coordinate is never an error — it is the "no-value" sentinel
/// (`None`) returned from `locate` and from co-iteration position slots.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two or more co-iterated levels disagree on their logical size.
    #[error("level sizes should be same")]
    SizeMismatch {
        /// Size of the first level in the co-iteration.
        expected: usize,
        /// Size of the offending level.
        actual: usize,
        /// Index (within the co-iterated tuple) of the offending level.
        index: usize,
    },

    /// None of the co-iterated levels is `ordered`.
    #[error("coiteration requires at least one ordered level")]
    NoOrderedLevel,

    /// A level that is not `ordered` also does not expose `locate`.
    #[error("unordered level must provide locate")]
    MissingLocate {
        /// Index (within the co-iterated tuple) of the offending level.
        index: usize,
    },

    /// The merge predicate `F` evaluates to `true` for some assignment that
    /// sets every `ordered` level's bit to `false`, which would let an
    /// unordered level's `locate` call influence which coordinates are
    /// visited on its own (a disjunctive role no level can fulfil, since
    /// none of its coordinates are ever forced by an ordered co-participant).
    #[error("predicate is not valid under unordered-level assignments")]
    IllegalPredicate,

    /// A [`crate::tensor::Tensor`]'s declared `dtype` does not match the
    /// element type of the value buffer it was constructed with.
    #[error("value buffer dtype does not match declared dtype")]
    DataTypeMismatch,
}

/// The crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
