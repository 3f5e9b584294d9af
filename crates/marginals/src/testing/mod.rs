//! Seeded synthetic data for tests and benchmarks.

use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::data::{Column, Table, TableBuilder};

/// Levels of the `size` column produced by [`mixed_table`].
pub const SIZE_LEVELS: [&str; 4] = ["XS", "S", "M", "L"];

/// Labels of the `color` column produced by [`mixed_table`].
pub const COLORS: [&str; 5] = ["blue", "green", "orange", "purple", "red"];

/// Table with one column of every type.
///
/// - `x`: continuous, uniform in `[min, max]`
/// - `z`: integer, uniform in `1..=20`
/// - `size`: ordered over [`SIZE_LEVELS`]
/// - `color`: nominal over [`COLORS`]
pub fn mixed_table(n_rows: usize, seed: u64, min: f64, max: f64) -> Table {
    assert!(max >= min);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let width = max - min;

    let x: Vec<f64> = (0..n_rows).map(|_| min + rng.gen::<f64>() * width).collect();
    let z: Vec<i64> = (0..n_rows).map(|_| rng.gen_range(1..=20)).collect();
    let size: Vec<&str> = (0..n_rows)
        .map(|_| SIZE_LEVELS[rng.gen_range(0..SIZE_LEVELS.len())])
        .collect();
    let color: Vec<&str> = (0..n_rows)
        .map(|_| COLORS[rng.gen_range(0..COLORS.len())])
        .collect();

    TableBuilder::new()
        .add_continuous("x", x)
        .add_integer("z", z)
        .add_column(
            "size",
            Column::ordered(SIZE_LEVELS, size).expect("labels are drawn from the levels"),
        )
        .add_nominal("color", color)
        .build()
        .expect("columns have equal length")
}
