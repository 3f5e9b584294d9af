//! Table container and builder.
//!
//! This module provides [`Table`] and [`TableBuilder`].

use std::collections::HashSet;

use super::column::{Column, Value};
use super::error::TableError;
use super::schema::{FeatureMeta, FeatureType, TableSchema};

/// An ordered set of named, typed columns of equal length.
///
/// Tables are immutable values: every operation returns a new table and the
/// source is never modified. Row `i` across all columns is one observation.
///
/// # Example
///
/// ```
/// use marginals::data::Table;
///
/// let table = Table::builder()
///     .add_continuous("x", vec![0.5, 1.5, 2.5])
///     .add_integer("z", [1, 2, 3])
///     .add_nominal("color", ["red", "blue", "red"])
///     .build()
///     .unwrap();
///
/// assert_eq!(table.n_rows(), 3);
/// assert_eq!(table.n_columns(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    schema: TableSchema,
    n_rows: usize,
}

impl Table {
    /// Create a builder.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Create a table from `(name, column)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`TableBuilder::build`].
    pub fn from_columns<S: Into<String>>(
        columns: impl IntoIterator<Item = (S, Column)>,
    ) -> Result<Self, TableError> {
        columns
            .into_iter()
            .fold(TableBuilder::new(), |b, (name, col)| b.add_column(name, col))
            .build()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schema.names()
    }

    /// Returns true if a column with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.schema.contains(name)
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.schema.feature_index(name).map(|i| &self.columns[i])
    }

    /// Type of a column by name.
    pub fn feature_type(&self, name: &str) -> Option<FeatureType> {
        self.schema.feature_type(name)
    }

    /// Iterate over `(name, column)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.schema.names().zip(self.columns.iter())
    }

    /// Cells of row `index`, in column order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.n_rows()`.
    pub fn row(&self, index: usize) -> Vec<Value<'_>> {
        self.columns.iter().map(|c| c.get(index)).collect()
    }

    // =========================================================================
    // Derived tables
    // =========================================================================

    /// Project onto the named columns, in the given order.
    ///
    /// # Errors
    ///
    /// Fails if a name is unknown, repeated, or `names` is empty.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table, TableError> {
        let mut builder = TableBuilder::new();
        for name in names {
            let name = name.as_ref();
            let column = self.column(name).ok_or_else(|| TableError::UnknownColumn {
                name: name.to_string(),
            })?;
            builder = builder.add_column(name, column.clone());
        }
        builder.build()
    }

    /// Gather rows by index into a new table with the same columns.
    ///
    /// # Errors
    ///
    /// Fails with [`TableError::RowOutOfBounds`] if an index is out of range.
    pub fn take_rows(&self, indices: &[usize]) -> Result<Table, TableError> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.n_rows) {
            return Err(TableError::RowOutOfBounds {
                index,
                n_rows: self.n_rows,
            });
        }
        Ok(Table {
            columns: self.columns.iter().map(|c| c.take(indices)).collect(),
            schema: self.schema.clone(),
            n_rows: indices.len(),
        })
    }
}

/// Builder for table construction.
///
/// # Example
///
/// ```
/// use marginals::data::{Column, FeatureType, TableBuilder};
///
/// let table = TableBuilder::new()
///     .add_column("size", Column::ordered(["S", "M", "L"], ["M", "L"]).unwrap())
///     .add_continuous("weight", vec![1.0, 2.0])
///     .build()
///     .unwrap();
///
/// assert_eq!(table.feature_type("size"), Some(FeatureType::Ordered));
/// ```
#[derive(Debug, Default)]
pub struct TableBuilder {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl TableBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column of any type.
    pub fn add_column(mut self, name: impl Into<String>, column: Column) -> Self {
        self.names.push(name.into());
        self.columns.push(column);
        self
    }

    /// Add a continuous column.
    pub fn add_continuous(self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.add_column(name, Column::continuous(values))
    }

    /// Add an integer column.
    pub fn add_integer(self, name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        self.add_column(name, Column::integer(values))
    }

    /// Add a nominal column.
    pub fn add_nominal<V: Into<String>>(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.add_column(name, Column::nominal(values))
    }

    /// Build the table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if:
    /// - No columns were added
    /// - Two columns share a name
    /// - Columns have different lengths
    pub fn build(self) -> Result<Table, TableError> {
        if self.columns.is_empty() {
            return Err(TableError::EmptyColumns);
        }

        let mut seen = HashSet::with_capacity(self.names.len());
        for name in &self.names {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn { name: name.clone() });
            }
        }

        let n_rows = self.columns[0].len();
        for (name, col) in self.names.iter().zip(&self.columns) {
            if col.len() != n_rows {
                return Err(TableError::ShapeMismatch {
                    column: name.clone(),
                    expected: n_rows,
                    got: col.len(),
                });
            }
        }

        let schema = TableSchema::from_features(
            self.names
                .into_iter()
                .zip(&self.columns)
                .map(|(name, col)| FeatureMeta::new(name, col.feature_type()))
                .collect(),
        );

        Ok(Table {
            columns: self.columns,
            schema,
            n_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::builder()
            .add_continuous("x", vec![1.0, 2.0, 3.0])
            .add_integer("z", [10, 20, 30])
            .add_nominal("c", ["a", "b", "a"])
            .build()
            .unwrap()
    }

    #[test]
    fn builder_basic() {
        let table = sample_table();
        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.n_columns(), 3);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["x", "z", "c"]);
        assert_eq!(table.feature_type("c"), Some(FeatureType::Nominal));
    }

    #[test]
    fn builder_empty_error() {
        assert!(matches!(
            TableBuilder::new().build(),
            Err(TableError::EmptyColumns)
        ));
    }

    #[test]
    fn builder_duplicate_error() {
        let result = TableBuilder::new()
            .add_integer("a", [1])
            .add_integer("a", [2])
            .build();
        assert!(matches!(result, Err(TableError::DuplicateColumn { .. })));
    }

    #[test]
    fn builder_shape_mismatch_error() {
        let result = TableBuilder::new()
            .add_integer("a", [1, 2])
            .add_integer("b", [2])
            .build();
        assert!(matches!(result, Err(TableError::ShapeMismatch { .. })));
    }

    #[test]
    fn zero_row_table_is_allowed() {
        let table = TableBuilder::new()
            .add_continuous("x", vec![])
            .build()
            .unwrap();
        assert_eq!(table.n_rows(), 0);
    }

    #[test]
    fn select_reorders_columns() {
        let table = sample_table().select(&["c", "x"]).unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["c", "x"]);
        assert_eq!(table.row(1), vec![Value::Nominal("b"), Value::Continuous(2.0)]);
    }

    #[test]
    fn select_unknown_column_error() {
        let result = sample_table().select(&["nope"]);
        assert!(matches!(result, Err(TableError::UnknownColumn { .. })));
    }

    #[test]
    fn take_rows_gathers() {
        let table = sample_table().take_rows(&[2, 0]).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.row(0)[1], Value::Integer(30));
        assert_eq!(table.row(1)[1], Value::Integer(10));
    }

    #[test]
    fn take_rows_out_of_bounds() {
        let result = sample_table().take_rows(&[3]);
        assert_eq!(
            result,
            Err(TableError::RowOutOfBounds { index: 3, n_rows: 3 })
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn table_is_send_sync() {
        assert_send_sync::<Table>();
        assert_send_sync::<TableBuilder>();
    }
}
