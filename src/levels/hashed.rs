// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::container::MapLike;
use crate::property::LevelProperties;
use std::collections::HashMap;
use xxhash_rust::xxh3::Xxh3Builder;

/// A hashed level: one `coordinate -> position` map per parent position.
///
/// Unordered — iteration order over a hash map is not guaranteed, so this
/// format's only reliable access path is [`Hashed::locate`]. Co-iteration
/// never walks a hashed level's own enumeration; it only calls `locate` at
/// coordinates already forced by an `ordered` co-participant.
///
/// Uses [`Xxh3Builder`] in place of the standard library's default SipHash
/// hasher as the default map, the same way `fjall-rs` swaps in
/// `xxhash_rust::xxh3::Xxh3Builder` for its own segment-id sets
/// (`compaction/fifo.rs`). Generic over the map role `M`, so the per-parent
/// maps can be backed by any [`MapLike<usize, usize>`].
#[derive(Debug, Clone, Default)]
pub struct Hashed<M = HashMap<usize, usize, Xxh3Builder>>
where
    M: MapLike<usize, usize>,
{
    maps: Vec<M>,
}

impl<M> Hashed<M>
where
    M: MapLike<usize, usize>,
{
    /// Constructs a hashed level directly from one map per parent position.
    #[must_use]
    pub fn new(maps: Vec<M>) -> Self {
        Self { maps }
    }

    /// Number of parent-position slots.
    #[must_use]
    pub fn size(&self) -> usize {
        self.maps.len()
    }

    /// Looks up the position of `coordinate` under `parent_pos`, or `None`
    /// if that coordinate is not stored there.
    #[must_use]
    pub fn locate(&self, parent_pos: usize, coordinate: usize) -> Option<usize> {
        self.maps.get(parent_pos)?.find(&coordinate).copied()
    }

    // --- insert protocol ---

    /// Sizes per-parent slots for `prev_level_size` parent positions.
    pub fn insert_init(&mut self, prev_level_size: usize)
    where
        M: Default,
    {
        self.maps = (0..prev_level_size).map(|_| M::default()).collect();
    }

    /// Registers a `(coordinate -> position)` binding under `parent_pos`.
    pub fn insert_coord(&mut self, parent_pos: usize, position: usize, coordinate: usize) {
        self.maps[parent_pos].insert(coordinate, position);
    }
}

impl Hashed<HashMap<usize, usize, Xxh3Builder>> {
    /// Returns an (unordered) iterator of the `(coordinate, position)`
    /// pairs stored under `parent_pos`. Provided for completeness and
    /// testing; co-iteration uses [`Hashed::locate`] exclusively. Only
    /// available on the default `HashMap`-backed map, since [`MapLike`]
    /// does not expose iteration for arbitrary map roles.
    pub fn iter_helper(&self, _parent_coords: &[usize], parent_pos: usize) -> HashedIter<'_> {
        HashedIter {
            inner: self.maps.get(parent_pos).map(HashMap::iter),
        }
    }
}

impl<M> LevelProperties for Hashed<M>
where
    M: MapLike<usize, usize>,
{
    const FULL: bool = false;
    const ORDERED: bool = false;
    const UNIQUE: bool = true;
    const BRANCHLESS: bool = false;
    const COMPACT: bool = false;
    const HAS_LOCATE: bool = true;
}

/// Unordered iterator over a [`Hashed`] level's `(coordinate, position)`
/// pairs for a single parent position.
pub struct HashedIter<'a> {
    inner: Option<std::collections::hash_map::Iter<'a, usize, usize>>,
}

impl Iterator for HashedIter<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next().map(|(&c, &p)| (c, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn map_of(pairs: &[(usize, usize)]) -> HashMap<usize, usize, Xxh3Builder> {
        pairs.iter().copied().collect::<HashMap<_, _, _>>()
    }

    #[test]
    fn hashed_locate_round_trip() {
        let level = Hashed::new(vec![map_of(&[(0, 1), (1, 2), (2, 5)])]);
        assert_eq!(level.locate(0, 0), Some(1));
        assert_eq!(level.locate(0, 1), Some(2));
        assert_eq!(level.locate(0, 3), None);
    }

    #[test]
    fn hashed_locate_missing_parent() {
        let level = Hashed::new(vec![map_of(&[(0, 1)])]);
        assert_eq!(level.locate(5, 0), None);
    }

    #[test]
    fn hashed_insert_protocol_matches_direct_construction() {
        let direct = Hashed::new(vec![map_of(&[(0, 1), (1, 2), (2, 5)])]);

        let mut built: Hashed = Hashed::default();
        built.insert_init(1);
        for (coord, pos) in [(0usize, 1usize), (1, 2), (2, 5)] {
            built.insert_coord(0, pos, coord);
        }

        for coord in 0..3 {
            assert_eq!(direct.locate(0, coord), built.locate(0, coord));
        }
    }
}
