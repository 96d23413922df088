// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Scenario-level coverage of the co-iteration engine, one test per
//! concrete scenario worked through end to end, plus the boundary
//! behaviors around them.

use std::collections::HashMap;
use test_log::test;
use xsparse::coiterate::{Coiterate, CoiterateOptions, Expr};
use xsparse::error::Error;
use xsparse::levels::{Compressed, Dense, Hashed, Level};
use xxhash_rust::xxh3::Xxh3Builder;

fn dense(size: usize) -> Level {
    Dense::new(size).into()
}

fn hashed(pairs: &[(usize, usize)]) -> Level {
    let map: HashMap<usize, usize, Xxh3Builder> = pairs.iter().copied().collect();
    Hashed::new(vec![map]).into()
}

/// Two dense levels conjoined: every coordinate in range is visited, both
/// positions always present.
#[test]
fn dense_and_dense_conjunction_visits_every_coordinate() {
    let a = dense(5);
    let b = dense(5);

    let co = Coiterate::new(vec![&a, &b], Expr::conjunction(2)).unwrap();
    let visited: Vec<_> = co.iter(&[], &[0, 0]).collect();

    assert_eq!(visited.len(), 5);
    for (i, (coord, positions)) in visited.into_iter().enumerate() {
        assert_eq!(coord, i);
        assert_eq!(positions, vec![Some(i), Some(i)]);
    }
}

/// Three dense levels under `(a & b) | c`: every coordinate is visited
/// (because `c` alone already satisfies the predicate), but `a`/`b`'s
/// positions only matter jointly.
#[test]
fn three_dense_mixed_conjunction_disjunction() {
    let a = dense(5);
    let b = dense(5);
    let c = dense(5);

    let f = (Expr::var(0) & Expr::var(1)) | Expr::var(2);
    let co = Coiterate::new(vec![&a, &b, &c], f).unwrap();
    let visited: Vec<_> = co.iter(&[], &[0, 0, 0]).collect();

    assert_eq!(visited.len(), 5);
    for (coord, positions) in visited {
        assert_eq!(positions, vec![Some(coord), Some(coord), Some(coord)]);
    }
}

/// Two CSR-compressed rows conjoined under a shared conjunction, checked
/// against the exact intersection worked out by hand.
#[test]
fn csr_union_matches_scenario_exactly() {
    let a: Level = Compressed::new(vec![0, 2, 5, 9], vec![20, 50, 30, 40, 70, 10, 60, 80, 90]).into();
    let b: Level = Compressed::new(vec![0, 4, 4, 9], vec![20, 22, 30, 50, 5, 10, 60, 80, 99]).into();

    let co = Coiterate::new(vec![&a, &b], Expr::conjunction(2)).unwrap();

    let row0: Vec<_> = co.iter(&[0], &[0, 0]).map(|(c, _)| c).collect();
    assert_eq!(row0, vec![20, 30, 50]);

    let row1: Vec<_> = co.iter(&[1], &[2, 4]).collect();
    assert!(row1.is_empty(), "row 1 yields nothing");

    let row2: Vec<_> = co.iter(&[2], &[5, 5]).map(|(c, _)| c).collect();
    assert_eq!(row2, vec![10, 60, 80]);
}

/// A dense level conjoined with a hashed level: only `locate` calls at
/// coordinates already produced by the dense level are ever made.
#[test]
fn dense_and_hashed_conjunction_only_locates_forced_coordinates() {
    let a = dense(5);
    let b = hashed(&[(0, 1), (1, 2), (2, 5)]);

    let co = Coiterate::new(vec![&a, &b], Expr::conjunction(2)).unwrap();
    let visited: Vec<_> = co.iter(&[], &[0, 0]).collect();

    assert_eq!(
        visited,
        vec![
            (0, vec![Some(0), Some(1)]),
            (1, vec![Some(1), Some(2)]),
            (2, vec![Some(2), Some(5)]),
            (3, vec![Some(3), None]),
            (4, vec![Some(4), None]),
        ]
    );
}

/// A `Compressed` level built via its append protocol co-iterates
/// identically to one constructed directly from raw arrays.
#[test]
fn build_then_iterate_equivalence_for_compressed() {
    let direct: Level = Compressed::new(vec![0, 3], vec![1, 3, 7]).into();

    let mut built = Compressed::default();
    built.append_init(1);
    built.append_edges(0, 0, 3);
    for c in [1, 3, 7] {
        built.append_coord(c);
    }
    built.append_finalize(1);
    let built: Level = built.into();

    let other = dense(10);

    let co_direct = Coiterate::new(vec![&direct, &other], Expr::conjunction(2)).unwrap();
    let co_built = Coiterate::new(vec![&built, &other], Expr::conjunction(2)).unwrap();

    let visited_direct: Vec<_> = co_direct.iter(&[], &[0, 0]).collect();
    let visited_built: Vec<_> = co_built.iter(&[], &[0, 0]).collect();
    assert_eq!(visited_direct, visited_built);
}

/// `F = a | b` over `(Dense, Hashed)` is illegal: the assignment that sets
/// the ordered level's bit to `false` and the hashed level's bit to `true`
/// still makes `F` true, letting an unordered level drive visitation on
/// its own.
#[test]
fn illegal_disjunctive_predicate_over_unordered_level_is_rejected() {
    let a = dense(5);
    let b = hashed(&[(0, 0)]);

    let f = Expr::var(0) | Expr::var(1);
    let err = Coiterate::new(vec![&a, &b], f).unwrap_err();
    assert_eq!(err, Error::IllegalPredicate);
}

/// A single ordered level co-iterated "against itself" reproduces its own
/// enumeration exactly.
#[test]
fn single_ordered_level_reproduces_its_enumeration() {
    let a = dense(4);
    let co = Coiterate::new(vec![&a], Expr::var(0)).unwrap();
    let visited: Vec<_> = co.iter(&[], &[0]).collect();
    assert_eq!(
        visited,
        vec![
            (0, vec![Some(0)]),
            (1, vec![Some(1)]),
            (2, vec![Some(2)]),
            (3, vec![Some(3)]),
        ]
    );
}

/// Co-iterating two empty levels yields nothing.
#[test]
fn empty_levels_yield_empty_coiteration() {
    let a = dense(0);
    let b = dense(0);
    let co = Coiterate::new(vec![&a, &b], Expr::conjunction(2)).unwrap();
    assert_eq!(co.iter(&[], &[0, 0]).count(), 0);
}

/// Nested co-iteration: row-level co-iteration over two CSR tensors feeds
/// its position tuples as the parent context for a column-level
/// co-iteration one level down.
#[test]
fn nested_csr_intersection_across_two_levels() {
    let row_a: Level = Dense::new(2).into();
    let row_b: Level = Dense::new(2).into();
    let col_a: Level = Compressed::new(vec![0, 2, 3], vec![0, 1, 1]).into();
    let col_b: Level = Compressed::new(vec![0, 1, 3], vec![1, 0, 1]).into();

    let row_co = Coiterate::new(vec![&row_a, &row_b], Expr::conjunction(2)).unwrap();
    let col_co = Coiterate::new(vec![&col_a, &col_b], Expr::conjunction(2)).unwrap();

    let mut all_rows = Vec::new();
    for (row, positions) in row_co.iter(&[], &[0, 0]) {
        let parent_positions = [positions[0].unwrap(), positions[1].unwrap()];
        let cols: Vec<_> = col_co
            .iter(&[row], &parent_positions)
            .map(|(c, _)| c)
            .collect();
        all_rows.push((row, cols));
    }

    assert_eq!(all_rows, vec![(0, vec![1]), (1, vec![1])]);
}

/// Disabling legality checking via [`CoiterateOptions`] lets an otherwise
/// illegal predicate through construction.
#[test]
fn legality_check_can_be_opted_out_of() {
    let a = dense(5);
    let b = hashed(&[(0, 0)]);
    let f = Expr::var(0) | Expr::var(1);

    let co = Coiterate::with_options(
        vec![&a, &b],
        f,
        CoiterateOptions {
            check_legality: false,
        },
    );
    assert!(co.is_ok());
}

/// Levels of mismatched size are rejected before any iteration is
/// possible.
#[test]
fn size_mismatch_is_rejected_at_construction() {
    let a = dense(5);
    let b = dense(6);
    let err = Coiterate::new(vec![&a, &b], Expr::conjunction(2)).unwrap_err();
    assert_eq!(
        err,
        Error::SizeMismatch {
            expected: 5,
            actual: 6,
            index: 1,
        }
    );
}
