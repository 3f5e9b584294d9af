//! Monte-Carlo marginal predictions.
//!
//! A marginal prediction at a grid point is the aggregate (usually the mean)
//! of a model's predictions over background rows, with the variables of
//! interest held at the grid point. The model and the aggregate are opaque
//! closures; this module only builds the design and groups predictions.

use ndarray::Array1;

use crate::data::Table;
use crate::design::{build_design, DesignConfig};
use crate::error::DesignError;
use crate::grid::GridWarning;

/// Aggregated predictions, one per grid row.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginalPrediction {
    grid: Table,
    values: Array1<f64>,
    warnings: Vec<GridWarning>,
}

impl MarginalPrediction {
    /// Grid points, one row per value.
    pub fn grid(&self) -> &Table {
        &self.grid
    }

    /// Aggregated prediction per grid row.
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Advisories raised while building the grid.
    pub fn warnings(&self) -> &[GridWarning] {
        &self.warnings
    }
}

/// Build a design, predict on it, and aggregate per grid point.
///
/// `predict` receives the whole design table and must return one value per
/// design row. Predictions of design rows that share a grid row are passed to
/// `aggregate` in background order.
///
/// # Errors
///
/// Any [`DesignError`] from [`build_design`], or
/// [`DesignError::PredictionLengthMismatch`] if `predict` returns the wrong
/// number of values.
///
/// # Example
///
/// ```
/// use marginals::data::{Table, Value};
/// use marginals::design::DesignConfig;
/// use marginals::explainability::{marginal_prediction, mean};
///
/// let data = Table::builder()
///     .add_continuous("x", vec![0.0, 1.0, 2.0])
///     .add_continuous("w", vec![1.0, 2.0, 3.0])
///     .build()
///     .unwrap();
/// let config = DesignConfig::builder()
///     .vars(["x"])
///     .grid_size(2)
///     .sample_size(3)
///     .build()
///     .unwrap();
///
/// // model: x + w
/// let predict = |design: &Table| -> Vec<f64> {
///     (0..design.n_rows())
///         .map(|r| match design.row(r).as_slice() {
///             [Value::Continuous(w), Value::Continuous(x)] => x + w,
///             _ => f64::NAN,
///         })
///         .collect()
/// };
///
/// let pd = marginal_prediction(&data, &config, predict, mean).unwrap();
/// assert_eq!(pd.values().to_vec(), vec![2.0, 4.0]);
/// ```
pub fn marginal_prediction<P, A>(
    data: &Table,
    config: &DesignConfig,
    predict: P,
    aggregate: A,
) -> Result<MarginalPrediction, DesignError>
where
    P: FnOnce(&Table) -> Vec<f64>,
    A: Fn(&[f64]) -> f64,
{
    let design = build_design(data, config)?;
    let predictions = predict(design.table());
    if predictions.len() != design.n_rows() {
        return Err(DesignError::PredictionLengthMismatch {
            expected: design.n_rows(),
            got: predictions.len(),
        });
    }

    let n_grid = design.n_grid_rows();
    let mut groups: Vec<Vec<f64>> = vec![Vec::with_capacity(predictions.len() / n_grid); n_grid];
    for (row, &value) in predictions.iter().enumerate() {
        groups[design.grid_index(row)].push(value);
    }
    let values = groups.iter().map(|g| aggregate(g)).collect();

    Ok(MarginalPrediction {
        grid: design.grid().clone(),
        values,
        warnings: design.warnings().to_vec(),
    })
}

// =============================================================================
// Aggregates
// =============================================================================

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (denominator `n - 1`). `NaN` for fewer than two values.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}
