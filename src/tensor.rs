// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! [`Tensor`]: a thin aggregate binding a level chain to a value buffer.

use crate::error::{Error, Result};
use crate::levels::Level;
use crate::value::{DataType, Scalar, ValueBuffer};

/// A sparse tensor: an ordered chain of levels plus the value buffer its
/// deepest level's positions index into.
///
/// Construction is the only place `Tensor` can fail — configuration errors
/// abort construction; every other operation is infallible and expresses
/// absence as `None`.
#[derive(Debug, Clone)]
pub struct Tensor {
    levels: Vec<Level>,
    values: ValueBuffer,
    dtype: DataType,
}

impl Tensor {
    /// Binds `levels` to `values`, declaring `dtype` as the tensor's
    /// element type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataTypeMismatch`] if `values.dtype()` disagrees
    /// with `dtype`.
    pub fn new(levels: Vec<Level>, values: ValueBuffer, dtype: DataType) -> Result<Self> {
        if values.dtype() != dtype {
            return Err(Error::DataTypeMismatch);
        }

        log::debug!(
            "constructed tensor: {} levels, {} stored values, dtype {dtype}",
            levels.len(),
            values.len()
        );

        Ok(Self {
            levels,
            values,
            dtype,
        })
    }

    /// The chain length.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.levels.len()
    }

    /// The tuple of per-level logical sizes.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        self.levels.iter().map(Level::size).collect()
    }

    /// The value-buffer element type.
    #[must_use]
    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    /// The level chain, by shared reference.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The level chain, by mutable reference.
    ///
    /// Mutating a level here (e.g. via its `append_*`/`insert_*` protocol)
    /// invalidates outstanding iterators or co-iterators over it; the
    /// borrow checker enforces that no such iterator is alive across the
    /// call.
    pub fn levels_mut(&mut self) -> &mut [Level] {
        &mut self.levels
    }

    /// The value buffer, by shared reference.
    #[must_use]
    pub fn values(&self) -> &ValueBuffer {
        &self.values
    }

    /// The value buffer, by mutable reference.
    pub fn values_mut(&mut self) -> &mut ValueBuffer {
        &mut self.values
    }

    /// Random element access at a coordinate tuple: traverses the chain,
    /// resolving each level's coordinate into the next position via
    /// `locate` or a coordinate-scan. Absence at any level short-circuits
    /// to `None` for the whole access.
    ///
    /// # Panics
    ///
    /// Panics if `coords.len() != self.ndim()`.
    #[must_use]
    pub fn get(&self, coords: &[usize]) -> Option<Scalar> {
        assert_eq!(
            coords.len(),
            self.ndim(),
            "coordinate tuple must have one entry per level"
        );

        let mut pos = 0usize;
        for (i, level) in self.levels.iter().enumerate() {
            pos = level.lookup(&coords[..i], pos, coords[i])?;
        }

        self.values.get(pos)
    }
}
