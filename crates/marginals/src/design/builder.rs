//! Design construction.
//!
//! A design pairs a grid over the variables of interest with background rows
//! drawn from the data:
//!
//! 1. **Grid**: the full factorial of explicit points, the full factorial of
//!    per-variable uniform grids, or a random row sample of the variables.
//! 2. **Background**: explicit row indices or a random row sample.
//! 3. **Combine**: background rows restricted to the remaining columns are
//!    cross joined with the grid. When the variables cover every column there
//!    is nothing to integrate over and the grid is the design.
//!
//! All validation runs before any sampling.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::config::DesignConfig;
use crate::data::{Column, Table};
use crate::error::DesignError;
use crate::grid::{
    expand, expand_all, sample_without_replacement, uniform_grid_columns, uniform_grid_lens,
    Diagnosed, GridWarning,
};

/// A constructed design, ready to be passed to a prediction function.
#[derive(Debug, Clone, PartialEq)]
pub struct Design {
    table: Table,
    grid: Table,
    background_rows: Vec<usize>,
    warnings: Vec<GridWarning>,
}

impl Design {
    /// The design table.
    ///
    /// Columns: the non-variable columns in data order, then the variables.
    /// When the variables cover every column, this is the grid itself.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The grid over the variables of interest.
    pub fn grid(&self) -> &Table {
        &self.grid
    }

    /// Number of rows in the design.
    pub fn n_rows(&self) -> usize {
        self.table.n_rows()
    }

    /// Number of grid rows.
    pub fn n_grid_rows(&self) -> usize {
        self.grid.n_rows()
    }

    /// Data row indices used as background, empty when the grid covers every
    /// column.
    pub fn background_rows(&self) -> &[usize] {
        &self.background_rows
    }

    /// Grid row that design row `row` evaluates.
    ///
    /// Background rows are the outer loop of the expansion, so grid rows
    /// repeat every [`n_grid_rows`](Self::n_grid_rows) design rows.
    #[inline]
    pub fn grid_index(&self, row: usize) -> usize {
        row % self.grid.n_rows()
    }

    /// Advisories raised while building the grid.
    pub fn warnings(&self) -> &[GridWarning] {
        &self.warnings
    }
}

/// Build a design, seeding the random source from `config.seed`.
///
/// # Errors
///
/// See [`build_design_with_rng`].
///
/// # Example
///
/// ```
/// use marginals::data::Table;
/// use marginals::design::{build_design, DesignConfig};
///
/// let data = Table::builder()
///     .add_integer("z", [1, 2, 3, 4, 5])
///     .add_continuous("w", vec![0.1, 0.2, 0.3, 0.4, 0.5])
///     .build()
///     .unwrap();
///
/// let config = DesignConfig::builder()
///     .vars(["z"])
///     .grid_size(10)
///     .sample_size(5)
///     .build()
///     .unwrap();
///
/// let design = build_design(&data, &config).unwrap();
/// assert_eq!(design.n_grid_rows(), 5);
/// assert_eq!(design.n_rows(), 25);
/// ```
pub fn build_design(data: &Table, config: &DesignConfig) -> Result<Design, DesignError> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);
    build_design_with_rng(data, config, &mut rng)
}

/// Build a design drawing randomness from `rng`.
///
/// # Errors
///
/// Returns [`DesignError`] if:
/// - `config` is invalid (see [`DesignConfigBuilder::build`](super::DesignConfigBuilder::build))
/// - a variable is not a column of `data`
/// - `data` has fewer rows than `int_points` (or `sample_size`), or an
///   `int_points` index is out of range
/// - a points sequence does not match its column's type or levels
/// - the design would exceed `config.max_rows`
/// - a variable has no non-missing values to grid
pub fn build_design_with_rng<R: Rng + ?Sized>(
    data: &Table,
    config: &DesignConfig,
    rng: &mut R,
) -> Result<Design, DesignError> {
    config.validate()?;
    validate_against_data(data, config)?;

    let covers_all = config.vars.len() == data.n_columns();
    let n_background = if covers_all {
        1
    } else {
        match &config.int_points {
            Some(rows) => rows.len(),
            None => config.sample_size.min(data.n_rows()),
        }
    };

    let Diagnosed {
        value: grid,
        warnings,
    } = resolve_grid(data, config, n_background, rng)?;

    if covers_all {
        tracing::debug!(grid_rows = grid.n_rows(), "variables cover all columns, design is the grid");
        return Ok(Design {
            table: grid.clone(),
            grid,
            background_rows: Vec::new(),
            warnings,
        });
    }

    let background_rows = match &config.int_points {
        Some(rows) => rows.clone(),
        None => sample_without_replacement(data.n_rows(), config.sample_size, rng),
    };

    let complement: Vec<&str> = data
        .names()
        .filter(|name| !config.vars.iter().any(|v| v == name))
        .collect();
    let background = data.select(&complement)?.take_rows(&background_rows)?;
    let table = expand(&background, &grid)?;

    tracing::debug!(
        grid_rows = grid.n_rows(),
        background_rows = background_rows.len(),
        design_rows = table.n_rows(),
        "built design"
    );

    Ok(Design {
        table,
        grid,
        background_rows,
        warnings,
    })
}

fn validate_against_data(data: &Table, config: &DesignConfig) -> Result<(), DesignError> {
    if let Some(var) = config.vars.iter().find(|v| !data.contains(v)) {
        return Err(DesignError::UnknownVar { name: var.clone() });
    }

    let n_rows = data.n_rows();
    let required = match &config.int_points {
        Some(rows) => rows.len(),
        None => config.sample_size,
    };
    if n_rows < required {
        return Err(DesignError::InsufficientRows {
            required,
            available: n_rows,
        });
    }
    if let Some(&index) = config.int_points.iter().flatten().find(|&&i| i >= n_rows) {
        return Err(DesignError::RowIndexOutOfBounds { index, n_rows });
    }

    if let Some(points) = &config.points {
        for (name, values) in points.iter() {
            if let Some(column) = data.column(name) {
                check_points_type(name, column, values)?;
            }
        }
    }

    Ok(())
}

fn check_points_type(name: &str, column: &Column, values: &Column) -> Result<(), DesignError> {
    let (expected, got) = (column.feature_type(), values.feature_type());
    if expected != got {
        return Err(DesignError::PointsTypeMismatch {
            name: name.to_string(),
            expected,
            got,
        });
    }
    if let (Column::Ordered(data), Column::Ordered(points)) = (column, values) {
        if data.levels() != points.levels() {
            return Err(DesignError::PointsLevelMismatch {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Reject designs above the row ceiling before they are materialised.
fn check_rows(
    factors: impl IntoIterator<Item = usize>,
    limit: usize,
) -> Result<(), DesignError> {
    let rows = factors
        .into_iter()
        .try_fold(1u128, |acc, n| acc.checked_mul(n as u128))
        .unwrap_or(u128::MAX);
    if rows > limit as u128 {
        return Err(DesignError::TooManyRows { rows, limit });
    }
    Ok(())
}

fn resolve_grid<R: Rng + ?Sized>(
    data: &Table,
    config: &DesignConfig,
    n_background: usize,
    rng: &mut R,
) -> Result<Diagnosed<Table>, DesignError> {
    if let Some(points) = &config.points {
        let columns = config
            .vars
            .iter()
            .map(|var| {
                points
                    .get(var)
                    .map(|values| (var.clone(), values.clone()))
                    .ok_or_else(|| DesignError::PointsMismatch {
                        missing: vec![var.clone()],
                        extra: Vec::new(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        check_rows(
            columns
                .iter()
                .map(|(_, c)| c.len())
                .chain([n_background]),
            config.max_rows,
        )?;
        return Ok(Diagnosed::clean(expand_all(columns)?));
    }

    let selected = data.select(&config.vars)?;

    if config.uniform {
        let lens = uniform_grid_lens(&selected, config.grid_size)?;
        check_rows(lens.into_iter().chain([n_background]), config.max_rows)?;
        let Diagnosed { value, warnings } =
            uniform_grid_columns(&selected, config.grid_size, rng)?;
        return Ok(Diagnosed {
            value: expand_all(value)?,
            warnings,
        });
    }

    let n_grid = config.grid_size.min(data.n_rows());
    check_rows([n_grid, n_background], config.max_rows)?;
    let rows = sample_without_replacement(data.n_rows(), config.grid_size, rng);
    Ok(Diagnosed::clean(selected.take_rows(&rows)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{TableBuilder, Value};
    use crate::design::{GridPoints, DEFAULT_MAX_ROWS};

    fn data() -> Table {
        TableBuilder::new()
            .add_integer("z", [1, 2, 3, 4, 5])
            .add_continuous("x", vec![0.0, 2.5, 5.0, 7.5, 10.0])
            .add_nominal("c", ["a", "b", "a", "c", "b"])
            .build()
            .unwrap()
    }

    #[test]
    fn integer_scenario_has_25_rows() {
        let config = DesignConfig::builder()
            .vars(["z"])
            .grid_size(10)
            .sample_size(5)
            .build()
            .unwrap();
        let design = build_design(&data(), &config).unwrap();

        assert_eq!(design.grid().column("z"), Some(&Column::integer(1..=5)));
        assert_eq!(design.n_grid_rows(), 5);
        assert_eq!(design.background_rows(), &[0, 1, 2, 3, 4]);
        assert_eq!(design.n_rows(), 25);
        assert_eq!(
            design.table().names().collect::<Vec<_>>(),
            vec!["x", "c", "z"]
        );
    }

    #[test]
    fn grid_repeats_within_each_background_row() {
        let config = DesignConfig::builder()
            .vars(["z"])
            .grid_size(10)
            .sample_size(2)
            .build()
            .unwrap();
        let design = build_design(&data(), &config).unwrap();
        let table = design.table();

        for row in 0..design.n_rows() {
            let g = design.grid_index(row);
            assert_eq!(table.column("z").unwrap().get(row), Value::Integer(g as i64 + 1));
        }
    }

    #[test]
    fn covering_all_columns_returns_grid() {
        let config = DesignConfig::builder()
            .vars(["z", "x", "c"])
            .grid_size(2)
            .sample_size(5)
            .build()
            .unwrap();
        let design = build_design(&data(), &config).unwrap();

        assert_eq!(design.table(), design.grid());
        assert!(design.background_rows().is_empty());
        // z: 1, 5; x: 0, 10; c: all 3 levels sampled down to 2
        assert_eq!(design.n_rows(), 8);
        assert_eq!(design.warnings().len(), 1);
    }

    #[test]
    fn explicit_points_are_full_factorial() {
        let points = GridPoints::new()
            .with("z", Column::integer([1, 3, 5]))
            .with("c", Column::nominal(["a", "b", "z"]));
        let config = DesignConfig::builder()
            .vars(["z", "c"])
            .uniform(true)
            .points(points)
            .int_points(vec![4])
            .build()
            .unwrap();
        let design = build_design(&data(), &config).unwrap();

        assert_eq!(design.n_grid_rows(), 9);
        assert_eq!(design.n_rows(), 9);
        assert_eq!(design.table().row(0)[0], Value::Continuous(10.0));
    }

    #[test]
    fn int_points_select_background() {
        let config = DesignConfig::builder()
            .vars(["x"])
            .grid_size(3)
            .int_points(vec![1, 1, 3])
            .build()
            .unwrap();
        let design = build_design(&data(), &config).unwrap();
        assert_eq!(design.background_rows(), &[1, 1, 3]);
        assert_eq!(design.n_rows(), 9);
        assert_eq!(design.table().column("z").unwrap().get(3), Value::Integer(2));
        assert_eq!(design.table().column("z").unwrap().get(6), Value::Integer(4));
    }

    #[test]
    fn non_uniform_grid_samples_rows() {
        let config = DesignConfig::builder()
            .vars(["z", "x"])
            .uniform(false)
            .grid_size(3)
            .sample_size(2)
            .build()
            .unwrap();
        let design = build_design(&data(), &config).unwrap();
        let grid = design.grid();

        assert_eq!(grid.n_rows(), 3);
        // each sampled grid row is an observed (z, x) pair
        for r in 0..grid.n_rows() {
            let row = grid.row(r);
            match row.as_slice() {
                [Value::Integer(z), Value::Continuous(x)] => {
                    assert_eq!(*x, (*z - 1) as f64 * 2.5)
                }
                other => panic!("unexpected row {:?}", other),
            }
        }
        assert_eq!(design.n_rows(), 6);
    }

    #[test]
    fn seeded_designs_are_reproducible() {
        let config = DesignConfig::builder()
            .vars(["c"])
            .grid_size(2)
            .sample_size(3)
            .build()
            .unwrap();
        let a = build_design(&data(), &config).unwrap();
        let b = build_design(&data(), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_var() {
        let config = DesignConfig::builder()
            .vars(["nope"])
            .build()
            .unwrap();
        assert_eq!(
            build_design(&data(), &config),
            Err(DesignError::UnknownVar {
                name: "nope".to_string()
            })
        );
    }

    #[test]
    fn too_few_rows_for_sample() {
        let config = DesignConfig::builder()
            .vars(["z"])
            .sample_size(6)
            .build()
            .unwrap();
        assert!(matches!(
            build_design(&data(), &config),
            Err(DesignError::InsufficientRows {
                required: 6,
                available: 5
            })
        ));
    }

    #[test]
    fn too_few_rows_for_int_points() {
        let config = DesignConfig::builder()
            .vars(["z"])
            .int_points(vec![0, 1, 2, 3, 4, 0])
            .build()
            .unwrap();
        assert!(matches!(
            build_design(&data(), &config),
            Err(DesignError::InsufficientRows { required: 6, .. })
        ));
    }

    #[test]
    fn int_points_out_of_bounds() {
        let config = DesignConfig::builder()
            .vars(["z"])
            .int_points(vec![5])
            .build()
            .unwrap();
        assert_eq!(
            build_design(&data(), &config),
            Err(DesignError::RowIndexOutOfBounds { index: 5, n_rows: 5 })
        );
    }

    #[test]
    fn points_type_mismatch() {
        let config = DesignConfig::builder()
            .vars(["z"])
            .sample_size(5)
            .points(GridPoints::new().with("z", Column::continuous(vec![1.0])))
            .build()
            .unwrap();
        assert!(matches!(
            build_design(&data(), &config),
            Err(DesignError::PointsTypeMismatch { .. })
        ));
    }

    #[test]
    fn points_level_mismatch() {
        let data = TableBuilder::new()
            .add_column("s", Column::ordered(["S", "M", "L"], ["S", "L"]).unwrap())
            .add_integer("z", [1, 2])
            .build()
            .unwrap();
        let config = DesignConfig::builder()
            .vars(["s"])
            .sample_size(1)
            .points(GridPoints::new().with("s", Column::ordered(["S", "L"], ["L"]).unwrap()))
            .build()
            .unwrap();
        assert!(matches!(
            build_design(&data, &config),
            Err(DesignError::PointsLevelMismatch { .. })
        ));
    }

    #[test]
    fn row_ceiling_is_enforced() {
        let config = DesignConfig::builder()
            .vars(["x"])
            .grid_size(100)
            .sample_size(5)
            .max_rows(499)
            .build()
            .unwrap();
        assert_eq!(
            build_design(&data(), &config),
            Err(DesignError::TooManyRows {
                rows: 500,
                limit: 499
            })
        );
    }

    #[test]
    fn huge_grid_size_is_rejected_before_allocation() {
        let config = DesignConfig::builder()
            .vars(["x"])
            .grid_size(usize::MAX / 4)
            .sample_size(5)
            .build()
            .unwrap();
        assert_eq!(
            build_design(&data(), &config),
            Err(DesignError::TooManyRows {
                rows: (usize::MAX / 4) as u128 * 5,
                limit: DEFAULT_MAX_ROWS,
            })
        );
    }

    #[test]
    fn huge_grid_size_is_capped_by_data_for_discrete_columns() {
        let config = DesignConfig::builder()
            .vars(["z", "c"])
            .grid_size(usize::MAX / 4)
            .sample_size(5)
            .build()
            .unwrap();
        let design = build_design(&data(), &config).unwrap();
        // z: dense 1..=5, c: all 3 labels
        assert_eq!(design.n_grid_rows(), 15);
        assert_eq!(design.n_rows(), 75);
    }

    #[test]
    fn rejected_design_draws_no_randomness() {
        let config = DesignConfig::builder()
            .vars(["c"])
            .grid_size(2)
            .sample_size(5)
            .max_rows(9)
            .build()
            .unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let before = rng.clone();

        assert_eq!(
            build_design_with_rng(&data(), &config, &mut rng),
            Err(DesignError::TooManyRows { rows: 10, limit: 9 })
        );
        assert_eq!(rng, before);
    }
}