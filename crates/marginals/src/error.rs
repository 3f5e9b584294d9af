//! Errors raised by grid, expansion and design construction.
//!
//! Every variant is an invalid-argument failure: the inputs are malformed or
//! inconsistent. Nothing here is transient, so nothing is retried.

use crate::data::{FeatureType, TableError};

/// Errors from [`uniform_grid`](crate::grid::uniform_grid),
/// [`expand`](crate::grid::expand) and
/// [`build_design`](crate::design::build_design).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DesignError {
    #[error("length_out must be at least 1, got {0}")]
    InvalidLengthOut(usize),

    #[error(
        "column '{}' has no non-missing values to build a grid from",
        .column.as_deref().unwrap_or("<unnamed>")
    )]
    AllMissing { column: Option<String> },

    #[error("cannot expand an empty table ({side} has {n_rows} rows and {n_columns} columns)")]
    EmptyTable {
        side: &'static str,
        n_rows: usize,
        n_columns: usize,
    },

    #[error("column '{name}' appears on both sides of the expansion")]
    DuplicateColumn { name: String },

    #[error("at least one variable of interest is required")]
    EmptyVars,

    #[error("variable '{name}' is listed more than once")]
    DuplicateVar { name: String },

    #[error("variable '{name}' is not a column of the data")]
    UnknownVar { name: String },

    #[error("grid_size must be at least 1 when no points are given")]
    InvalidGridSize,

    #[error("sample_size must be at least 1 when no int_points are given")]
    InvalidSampleSize,

    #[error("int_points must name at least one row")]
    EmptyIntPoints,

    #[error("data has {available} rows, at least {required} are required")]
    InsufficientRows { required: usize, available: usize },

    #[error("row index {index} out of bounds for {n_rows} rows")]
    RowIndexOutOfBounds { index: usize, n_rows: usize },

    #[error("points must name exactly the variables of interest (missing: {missing:?}, extra: {extra:?})")]
    PointsMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },

    #[error("points for '{name}' are empty")]
    EmptyPoints { name: String },

    #[error("points for '{name}' are {got}, but the column is {expected}")]
    PointsTypeMismatch {
        name: String,
        expected: FeatureType,
        got: FeatureType,
    },

    #[error("points for ordered column '{name}' use different levels than the data")]
    PointsLevelMismatch { name: String },

    #[error("design would have {rows} rows, above the limit of {limit}")]
    TooManyRows { rows: u128, limit: usize },

    #[error("predict returned {got} values for a design of {expected} rows")]
    PredictionLengthMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Table(#[from] TableError),
}
