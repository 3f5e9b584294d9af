//! Table construction errors.

/// Errors raised while constructing columns and tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("a table needs at least one column")]
    EmptyColumns,

    #[error("duplicate column name '{name}'")]
    DuplicateColumn { name: String },

    #[error("column '{column}' has {got} rows, expected {expected}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        got: usize,
    },

    #[error("duplicate level '{level}' in ordered column")]
    DuplicateLevel { level: String },

    #[error("value '{value}' is not one of the declared levels")]
    UnknownLevel { value: String },

    #[error("no column named '{name}'")]
    UnknownColumn { name: String },

    #[error("row index {index} out of bounds for {n_rows} rows")]
    RowOutOfBounds { index: usize, n_rows: usize },
}
