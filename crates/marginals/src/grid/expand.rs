//! Cartesian expansion of tables.

use crate::data::{Column, Table};
use crate::error::DesignError;

/// Cross join `x` and `y`.
///
/// Every row of `x` is paired with every row of `y`: output row
/// `i * y.n_rows() + j` is row `i` of `x` followed by row `j` of `y`. The
/// columns are those of `x` followed by those of `y`. No rows are merged, so
/// the output always has `x.n_rows() * y.n_rows()` rows.
///
/// # Errors
///
/// - [`DesignError::EmptyTable`] if either table has no rows
/// - [`DesignError::DuplicateColumn`] if the tables share a column name
/// - [`DesignError::TooManyRows`] if the row count overflows `usize`
///
/// # Example
///
/// ```
/// use marginals::data::Table;
/// use marginals::grid::expand;
///
/// let x = Table::builder().add_integer("a", [1, 2]).build().unwrap();
/// let y = Table::builder().add_nominal("b", ["u", "v", "w"]).build().unwrap();
///
/// let xy = expand(&x, &y).unwrap();
/// assert_eq!(xy.n_rows(), 6);
/// assert_eq!(xy.n_columns(), 2);
/// ```
pub fn expand(x: &Table, y: &Table) -> Result<Table, DesignError> {
    require_rows(x, "x")?;
    require_rows(y, "y")?;

    if let Some(name) = y.names().find(|name| x.contains(name)) {
        return Err(DesignError::DuplicateColumn {
            name: name.to_string(),
        });
    }

    let (nx, ny) = (x.n_rows(), y.n_rows());
    let n_rows = nx.checked_mul(ny).ok_or(DesignError::TooManyRows {
        rows: nx as u128 * ny as u128,
        limit: usize::MAX,
    })?;

    let mut outer = Vec::with_capacity(n_rows);
    let mut inner = Vec::with_capacity(n_rows);
    for i in 0..nx {
        outer.extend(std::iter::repeat(i).take(ny));
        inner.extend(0..ny);
    }

    let columns = x
        .iter()
        .map(|(name, col)| (name, col.take(&outer)))
        .chain(y.iter().map(|(name, col)| (name, col.take(&inner))));

    Ok(Table::from_columns(columns)?)
}

/// Full factorial of named value sequences.
///
/// Folds [`expand`] from left to right, so the first sequence varies slowest
/// and the last varies fastest.
///
/// # Errors
///
/// [`DesignError::EmptyTable`] if `columns` is empty or any sequence has no
/// values, [`DesignError::DuplicateColumn`] on repeated names.
pub fn expand_all(columns: Vec<(String, Column)>) -> Result<Table, DesignError> {
    let mut tables = columns
        .into_iter()
        .map(|(name, col)| Table::from_columns([(name, col)]));

    let first = tables.next().ok_or(DesignError::EmptyTable {
        side: "x",
        n_rows: 0,
        n_columns: 0,
    })??;
    require_rows(&first, "x")?;

    tables.try_fold(first, |acc, next| expand(&acc, &next?))
}

fn require_rows(table: &Table, side: &'static str) -> Result<(), DesignError> {
    if table.n_rows() == 0 || table.n_columns() == 0 {
        return Err(DesignError::EmptyTable {
            side,
            n_rows: table.n_rows(),
            n_columns: table.n_columns(),
        });
    }
    Ok(())
}
