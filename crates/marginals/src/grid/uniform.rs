//! Per-type uniform grids.
//!
//! [`uniform_grid`] picks representative values for one column. The rule
//! depends on the column's [`FeatureType`](crate::data::FeatureType):
//!
//! | Type | `length_out >= available` | `length_out < available` |
//! |------|---------------------------|--------------------------|
//! | Continuous | `length_out` evenly spaced values on `[min, max]` | same |
//! | Integer | dense run `min..=max` when `length_out > max - min` | evenly spaced, rounded |
//! | Ordered | every present level, in level order | integer rule on level ranks |
//! | Nominal | every distinct value, sorted | sorted random subset + advisory |
//!
//! Missing values never contribute to ranges or distinct sets.

use std::collections::BTreeSet;
use std::sync::Arc;

use ndarray::Array1;
use rand::Rng;

use super::diagnostics::{Diagnosed, GridWarning};
use super::expand::expand_all;
use super::sampling::sample_without_replacement;
use crate::data::{Column, OrderedColumn, Table};
use crate::error::DesignError;

/// Build a grid of at most `length_out` representative values for `column`.
///
/// The output has the same type as the input (ordered columns keep their full
/// level list). `rng` is only consumed for nominal columns whose cardinality
/// exceeds `length_out`.
///
/// # Errors
///
/// - [`DesignError::InvalidLengthOut`] if `length_out == 0`
/// - [`DesignError::AllMissing`] if the column has no non-missing values
///
/// # Example
///
/// ```
/// use marginals::data::Column;
/// use marginals::grid::uniform_grid;
/// use rand::SeedableRng;
/// use rand_xoshiro::Xoshiro256PlusPlus;
///
/// let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
/// let z = Column::integer(1..=5);
/// let grid = uniform_grid(&z, 10, &mut rng).unwrap().into_inner();
///
/// assert_eq!(grid, Column::integer(1..=5));
/// ```
pub fn uniform_grid<R: Rng + ?Sized>(
    column: &Column,
    length_out: usize,
    rng: &mut R,
) -> Result<Diagnosed<Column>, DesignError> {
    if length_out == 0 {
        return Err(DesignError::InvalidLengthOut(length_out));
    }

    match column {
        Column::Continuous(values) => {
            continuous_grid(values, length_out).map(|g| Diagnosed::clean(Column::Continuous(g)))
        }
        Column::Integer(values) => {
            let (lo, hi) = integer_range(values)?;
            Ok(Diagnosed::clean(Column::integer(integer_grid(
                lo, hi, length_out,
            ))))
        }
        Column::Ordered(ordered) => {
            ordered_grid(ordered, length_out).map(|g| Diagnosed::clean(Column::Ordered(g)))
        }
        Column::Nominal(values) => nominal_grid(values, length_out, rng),
    }
}

/// Grid every column of `table` independently with the same `length_out`.
///
/// Grids may have different lengths; a nominal column is capped at its
/// cardinality while a continuous one always has `length_out` values. Each
/// advisory names its column and is logged with `tracing::warn!`.
///
/// # Errors
///
/// Same as [`uniform_grid`], with the column name filled in for
/// [`DesignError::AllMissing`].
pub fn uniform_grid_columns<R: Rng + ?Sized>(
    table: &Table,
    length_out: usize,
    rng: &mut R,
) -> Result<Diagnosed<Vec<(String, Column)>>, DesignError> {
    let mut columns = Vec::with_capacity(table.n_columns());
    let mut warnings = Vec::new();

    for (name, column) in table.iter() {
        let grid = uniform_grid(column, length_out, rng).map_err(|e| name_missing(e, name))?;
        for warning in grid.warnings {
            tracing::warn!(column = name, %warning, "grid resolution below cardinality");
            warnings.push(warning.with_column(name));
        }
        columns.push((name.to_string(), grid.value));
    }

    Ok(Diagnosed {
        value: columns,
        warnings,
    })
}

/// Number of values [`uniform_grid`] would produce for each column of
/// `table`, read from column ranges and distinct counts without building any
/// grid or drawing randomness.
///
/// # Errors
///
/// Same as [`uniform_grid_columns`].
pub(crate) fn uniform_grid_lens(table: &Table, length_out: usize) -> Result<Vec<usize>, DesignError> {
    table
        .iter()
        .map(|(name, column)| uniform_grid_len(column, length_out).map_err(|e| name_missing(e, name)))
        .collect()
}

fn uniform_grid_len(column: &Column, length_out: usize) -> Result<usize, DesignError> {
    if length_out == 0 {
        return Err(DesignError::InvalidLengthOut(length_out));
    }

    match column {
        Column::Continuous(values) => {
            if values.iter().all(|v| v.is_nan()) {
                return Err(DesignError::AllMissing { column: None });
            }
            Ok(length_out)
        }
        Column::Integer(values) => {
            let (lo, hi) = integer_range(values)?;
            let range = hi.abs_diff(lo);
            if length_out as u64 > range {
                Ok(range as usize + 1)
            } else {
                Ok(length_out)
            }
        }
        Column::Ordered(ordered) => Ok(present_codes(ordered)?.len().min(length_out)),
        Column::Nominal(values) => Ok(distinct_labels(values)?.len().min(length_out)),
    }
}

fn name_missing(err: DesignError, name: &str) -> DesignError {
    match err {
        DesignError::AllMissing { .. } => DesignError::AllMissing {
            column: Some(name.to_string()),
        },
        other => other,
    }
}

/// Grid every column of `table` and combine the grids by full factorial
/// expansion.
///
/// The result has one row per combination, so its row count is the product
/// of the per-column grid lengths (up to `length_out^n_columns`).
pub fn uniform_grid_table<R: Rng + ?Sized>(
    table: &Table,
    length_out: usize,
    rng: &mut R,
) -> Result<Diagnosed<Table>, DesignError> {
    let Diagnosed { value, warnings } = uniform_grid_columns(table, length_out, rng)?;
    Ok(Diagnosed {
        value: expand_all(value)?,
        warnings,
    })
}

// =============================================================================
// Per-type rules
// =============================================================================

fn continuous_grid(values: &Array1<f64>, length_out: usize) -> Result<Array1<f64>, DesignError> {
    let (lo, hi) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(DesignError::AllMissing { column: None })?;

    Ok(linspace(lo, hi, length_out))
}

/// Evenly spaced values with exact endpoints; `n == 1` yields `[lo]`.
fn linspace(lo: f64, hi: f64, n: usize) -> Array1<f64> {
    let mut grid = Array1::linspace(lo, hi, n);
    if n > 1 {
        grid[n - 1] = hi;
    }
    grid
}

fn integer_range(values: &Array1<Option<i64>>) -> Result<(i64, i64), DesignError> {
    let lo = values.iter().flatten().min();
    let hi = values.iter().flatten().max();
    match (lo, hi) {
        (Some(&lo), Some(&hi)) => Ok((lo, hi)),
        _ => Err(DesignError::AllMissing { column: None }),
    }
}

/// Integer grid over `[lo, hi]`.
///
/// Once `length_out` exceeds the range every integer is returned. Otherwise
/// evenly spaced points are rounded half to even; duplicates are kept.
fn integer_grid(lo: i64, hi: i64, length_out: usize) -> Vec<i64> {
    let range = hi.abs_diff(lo);
    if length_out as u64 > range {
        return (lo..=hi).collect();
    }
    linspace(lo as f64, hi as f64, length_out)
        .iter()
        .map(|v| v.round_ties_even() as i64)
        .collect()
}

/// Codes of the levels that occur, in level order.
fn present_codes(ordered: &OrderedColumn) -> Result<Vec<u32>, DesignError> {
    let present: Vec<u32> = ordered
        .codes()
        .iter()
        .flatten()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if present.is_empty() {
        return Err(DesignError::AllMissing { column: None });
    }
    Ok(present)
}

/// Sorted distinct non-missing labels.
fn distinct_labels(values: &Array1<Option<String>>) -> Result<Vec<&str>, DesignError> {
    let distinct: Vec<&str> = values
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if distinct.is_empty() {
        return Err(DesignError::AllMissing { column: None });
    }
    Ok(distinct)
}

fn ordered_grid(ordered: &OrderedColumn, length_out: usize) -> Result<OrderedColumn, DesignError> {
    let present = present_codes(ordered)?;

    let codes: Array1<Option<u32>> = if length_out >= present.len() {
        present.iter().map(|&c| Some(c)).collect()
    } else {
        // Ranks 1..=k stand in for the present levels.
        integer_grid(1, present.len() as i64, length_out)
            .into_iter()
            .map(|rank| Some(present[(rank - 1) as usize]))
            .collect()
    };

    Ok(OrderedColumn::from_codes(
        Arc::clone(ordered.shared_levels()),
        codes,
    ))
}

fn nominal_grid<R: Rng + ?Sized>(
    values: &Array1<Option<String>>,
    length_out: usize,
    rng: &mut R,
) -> Result<Diagnosed<Column>, DesignError> {
    let distinct = distinct_labels(values)?;

    if length_out >= distinct.len() {
        return Ok(Diagnosed::clean(Column::nominal(distinct)));
    }

    let picked = sample_without_replacement(distinct.len(), length_out, rng);
    Ok(Diagnosed {
        value: Column::nominal(picked.into_iter().map(|i| distinct[i])),
        warnings: vec![GridWarning::ResolutionBelowCardinality {
            column: None,
            requested: length_out,
            distinct: distinct.len(),
        }],
    })
}
