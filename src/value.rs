// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! The value buffer backing a [`crate::tensor::Tensor`]'s deepest level, and
//! the declared element [`DataType`] it must agree with.

/// The element type a [`crate::tensor::Tensor`]'s value buffer declares.
///
/// A small closed set, matched the same way `fjall-rs` matches its own
/// closed `CompressionType`/`ValueType` enums rather than via a generic
/// type parameter — a tensor's dtype is a runtime property (it comes from
/// wherever the tensor was built, not from the call site constructing it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// `bool`.
    Bool,
    /// `i64`.
    I64,
    /// `u64`.
    U64,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        };
        write!(f, "{name}")
    }
}

/// A tensor's value buffer: one value per stored position at the deepest
/// level, tagged with the [`DataType`] its elements were built from.
///
/// Represented as a set of typed `Vec`s behind one enum, rather than
/// `Vec<Box<dyn Any>>` or a generic `Tensor<T>`, so a tensor's dtype stays
/// a runtime property while still giving typed accessors once the caller
/// has checked `dtype()`.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueBuffer {
    /// See [`DataType::Bool`].
    Bool(Vec<bool>),
    /// See [`DataType::I64`].
    I64(Vec<i64>),
    /// See [`DataType::U64`].
    U64(Vec<u64>),
    /// See [`DataType::F32`].
    F32(Vec<f32>),
    /// See [`DataType::F64`].
    F64(Vec<f64>),
}

impl ValueBuffer {
    /// The [`DataType`] this buffer's elements were built with.
    #[must_use]
    pub fn dtype(&self) -> DataType {
        match self {
            Self::Bool(_) => DataType::Bool,
            Self::I64(_) => DataType::I64,
            Self::U64(_) => DataType::U64,
            Self::F32(_) => DataType::F32,
            Self::F64(_) => DataType::F64,
        }
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Bool(v) => v.len(),
            Self::I64(v) => v.len(),
            Self::U64(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    /// Whether the buffer holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the value stored at `position`, boxed as a [`Scalar`], or
    /// `None` if `position` is out of range.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<Scalar> {
        match self {
            Self::Bool(v) => v.get(position).copied().map(Scalar::Bool),
            Self::I64(v) => v.get(position).copied().map(Scalar::I64),
            Self::U64(v) => v.get(position).copied().map(Scalar::U64),
            Self::F32(v) => v.get(position).copied().map(Scalar::F32),
            Self::F64(v) => v.get(position).copied().map(Scalar::F64),
        }
    }
}

/// A single value read back out of a [`ValueBuffer`] by
/// [`crate::tensor::Tensor::get`], tagged with the [`DataType`] it came
/// from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// See [`DataType::Bool`].
    Bool(bool),
    /// See [`DataType::I64`].
    I64(i64),
    /// See [`DataType::U64`].
    U64(u64),
    /// See [`DataType::F32`].
    F32(f32),
    /// See [`DataType::F64`].
    F64(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn dtype_matches_variant() {
        assert_eq!(ValueBuffer::F64(vec![1.0, 2.0]).dtype(), DataType::F64);
        assert_eq!(ValueBuffer::Bool(vec![true]).dtype(), DataType::Bool);
    }

    #[test]
    fn len_and_is_empty() {
        let buf = ValueBuffer::I64(vec![1, 2, 3]);
        assert_eq!(buf.len(), 3);
        assert!(!buf.is_empty());
        assert!(ValueBuffer::U64(vec![]).is_empty());
    }

    #[test]
    fn display_prints_lowercase_type_name() {
        assert_eq!(DataType::F32.to_string(), "f32");
        assert_eq!(DataType::Bool.to_string(), "bool");
    }

    #[test]
    fn get_reads_back_scalars_and_respects_bounds() {
        let buf = ValueBuffer::F64(vec![1.5, 2.5]);
        assert_eq!(buf.get(0), Some(Scalar::F64(1.5)));
        assert_eq!(buf.get(2), None);
    }
}
