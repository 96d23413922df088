#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use xsparse::levels::Compressed;

#[derive(Debug, Arbitrary)]
struct Input {
    /// Row lengths, each clamped to a small range so runs stay useful
    /// instead of degenerating into a single giant row.
    row_lengths: Vec<u8>,
    /// Raw coordinate pool drawn from as each row is built; sorted and
    /// deduplicated per row to keep the fixture `ordered`/`unique`, which
    /// `Compressed` requires.
    coordinate_pool: Vec<u16>,
}

fuzz_target!(|input: Input| {
    if input.row_lengths.is_empty() || input.row_lengths.len() > 64 {
        return;
    }

    let mut pool = input.coordinate_pool.iter().map(|&c| usize::from(c));
    let rows: Vec<Vec<usize>> = input
        .row_lengths
        .iter()
        .map(|&len| {
            let len = usize::from(len) % 8;
            let mut row: Vec<usize> = (&mut pool).take(len).collect();
            row.sort_unstable();
            row.dedup();
            row
        })
        .collect();

    let mut positions = vec![0usize];
    let mut coordinates = Vec::new();
    for row in &rows {
        coordinates.extend_from_slice(row);
        positions.push(coordinates.len());
    }
    let direct = Compressed::new(positions, coordinates.clone());

    let mut built = Compressed::default();
    built.append_init(rows.len());
    let mut cursor = 0;
    for (parent_pos, row) in rows.iter().enumerate() {
        built.append_edges(parent_pos, cursor, cursor + row.len());
        cursor += row.len();
    }
    for &coord in &coordinates {
        built.append_coord(coord);
    }
    built.append_finalize(rows.len());

    for parent_pos in 0..rows.len() {
        let direct_row: Vec<_> = direct.iter_helper(&[], parent_pos).collect();
        let built_row: Vec<_> = built.iter_helper(&[], parent_pos).collect();
        assert_eq!(direct_row, built_row);
    }
});
