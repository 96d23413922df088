// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A sparse tensor storage and co-iteration engine.
//!
//! The core abstraction is the *level*: a single mode's storage, exposed
//! through one of six formats ([`levels::Dense`], [`levels::Compressed`],
//! [`levels::Singleton`], [`levels::Hashed`], [`levels::Offset`],
//! [`levels::Range`]), each carrying a fixed set of compile-time properties
//! ([`property::LevelProperties`]). A chain of levels plus a value buffer
//! forms a [`tensor::Tensor`]. [`coiterate::Coiterate`] drives synchronized
//! iteration across a tuple of levels according to a boolean merge
//! predicate ([`coiterate::MergePredicate`]), the primitive a tensor-algebra
//! compiler builds on to fuse sparse operations without materializing
//! intermediate results.
//!
//! This crate has no wire protocol, no on-disk format, and no scheduler —
//! its entire surface is the library API documented on the modules below.

pub mod capabilities;
pub mod coiterate;
pub mod container;
pub mod error;
pub mod levels;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod property;
pub mod tensor;
pub mod value;

pub use error::{Error, Result};
