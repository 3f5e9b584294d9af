//! Grid construction primitives.
//!
//! - [`uniform_grid`]: representative values for one typed column
//! - [`uniform_grid_columns`] / [`uniform_grid_table`]: the same, column-wise
//!   over a table
//! - [`expand`]: Cartesian product of two tables
//! - [`expand_all`]: full factorial of named value sequences
//! - [`sample_without_replacement`]: seeded index sampling
//!
//! Every function that samples takes an explicit `rand::Rng`, so results are
//! reproducible from a seed.

mod diagnostics;
mod expand;
mod sampling;
mod uniform;

pub use diagnostics::{Diagnosed, GridWarning};
pub use expand::{expand, expand_all};
pub use sampling::sample_without_replacement;
pub use uniform::{uniform_grid, uniform_grid_columns, uniform_grid_table};

pub(crate) use uniform::uniform_grid_lens;
