//! Design configuration with builder pattern.
//!
//! [`DesignConfig`] gathers every knob of [`build_design`](super::build_design)
//! and uses the `bon` crate for builder generation with validation.
//!
//! # Example
//!
//! ```
//! use marginals::design::DesignConfig;
//!
//! // Grid of 20 points over "x", integrated over 50 background rows
//! let config = DesignConfig::builder()
//!     .vars(["x"])
//!     .grid_size(20)
//!     .sample_size(50)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.uniform);
//! assert_eq!(config.seed, 42);
//! ```

use std::collections::HashSet;

use bon::Builder;

use super::points::GridPoints;
use crate::error::DesignError;

/// Default ceiling on the number of design rows.
pub const DEFAULT_MAX_ROWS: usize = 10_000_000;

/// Configuration for design construction.
///
/// # Structure
///
/// - **Variables**: `vars`, the columns held at grid values
/// - **Grid**: `grid_size`, `uniform`, or explicit `points`
/// - **Background**: `sample_size`, or explicit `int_points`
/// - **Safety**: `max_rows`
/// - **Reproducibility**: `seed`
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct DesignConfig {
    /// Variables of interest. Must be non-empty and distinct.
    #[builder(with = |vars: impl IntoIterator<Item = impl Into<String>>| {
        vars.into_iter().map(Into::into).collect()
    })]
    pub vars: Vec<String>,

    // === Grid ===
    /// Grid resolution per variable. Ignored when `points` is set. Default: 10.
    #[builder(default = 10)]
    pub grid_size: usize,

    /// Use a per-type uniform grid (`true`) or a random row sample of the
    /// variables (`false`). Ignored when `points` is set. Default: `true`.
    #[builder(default = true)]
    pub uniform: bool,

    /// Explicit candidate values per variable; the grid is their full
    /// factorial.
    pub points: Option<GridPoints>,

    // === Background ===
    /// Number of background rows to integrate over. Ignored when
    /// `int_points` is set. Default: 10.
    #[builder(default = 10)]
    pub sample_size: usize,

    /// Explicit 0-based background row indices. Repeats are allowed.
    pub int_points: Option<Vec<usize>>,

    // === Safety ===
    /// Upper bound on design rows. Default: [`DEFAULT_MAX_ROWS`].
    #[builder(default = DEFAULT_MAX_ROWS)]
    pub max_rows: usize,

    // === Reproducibility ===
    /// Random seed. Default: 42.
    #[builder(default = 42)]
    pub seed: u64,
}

/// Custom finishing function that validates the config.
impl<S: design_config_builder::IsComplete> DesignConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError`] if:
    /// - `vars` is empty or repeats a name
    /// - `grid_size == 0` without `points`
    /// - `sample_size == 0` without `int_points`, or `int_points` is empty
    /// - `points` does not name exactly `vars`, or a sequence is empty
    pub fn build(self) -> Result<DesignConfig, DesignError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl DesignConfig {
    /// Checks that do not depend on the data.
    pub(crate) fn validate(&self) -> Result<(), DesignError> {
        if self.vars.is_empty() {
            return Err(DesignError::EmptyVars);
        }

        let mut seen = HashSet::with_capacity(self.vars.len());
        for var in &self.vars {
            if !seen.insert(var.as_str()) {
                return Err(DesignError::DuplicateVar { name: var.clone() });
            }
        }

        match &self.points {
            Some(points) => self.validate_points(points, &seen)?,
            None if self.grid_size == 0 => return Err(DesignError::InvalidGridSize),
            None => {}
        }

        match &self.int_points {
            Some(rows) if rows.is_empty() => return Err(DesignError::EmptyIntPoints),
            Some(_) => {}
            None if self.sample_size == 0 => return Err(DesignError::InvalidSampleSize),
            None => {}
        }

        Ok(())
    }

    fn validate_points(&self, points: &GridPoints, vars: &HashSet<&str>) -> Result<(), DesignError> {
        let missing: Vec<String> = self
            .vars
            .iter()
            .filter(|v| points.get(v).is_none())
            .cloned()
            .collect();
        let extra: Vec<String> = points
            .names()
            .filter(|n| !vars.contains(n))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() || !extra.is_empty() {
            return Err(DesignError::PointsMismatch { missing, extra });
        }

        if let Some((name, _)) = points.iter().find(|(_, values)| values.is_empty()) {
            return Err(DesignError::EmptyPoints {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Returns true if the grid comes from `points`.
    pub fn has_points(&self) -> bool {
        self.points.is_some()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;

    #[test]
    fn defaults() {
        let config = DesignConfig::builder().vars(["x"]).build().unwrap();
        assert_eq!(config.vars, vec!["x".to_string()]);
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.sample_size, 10);
        assert!(config.uniform);
        assert!(!config.has_points());
        assert_eq!(config.max_rows, DEFAULT_MAX_ROWS);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn empty_vars() {
        let result = DesignConfig::builder().vars(Vec::<String>::new()).build();
        assert!(matches!(result, Err(DesignError::EmptyVars)));
    }

    #[test]
    fn duplicate_vars() {
        let result = DesignConfig::builder().vars(["x", "y", "x"]).build();
        assert_eq!(
            result.unwrap_err(),
            DesignError::DuplicateVar {
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn zero_grid_size_without_points() {
        let result = DesignConfig::builder().vars(["x"]).grid_size(0).build();
        assert!(matches!(result, Err(DesignError::InvalidGridSize)));
    }

    #[test]
    fn zero_grid_size_with_points_is_fine() {
        let result = DesignConfig::builder()
            .vars(["x"])
            .grid_size(0)
            .points(GridPoints::new().with("x", Column::continuous(vec![1.0])))
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn zero_sample_size_without_int_points() {
        let result = DesignConfig::builder().vars(["x"]).sample_size(0).build();
        assert!(matches!(result, Err(DesignError::InvalidSampleSize)));
    }

    #[test]
    fn zero_sample_size_with_int_points_is_fine() {
        let result = DesignConfig::builder()
            .vars(["x"])
            .sample_size(0)
            .int_points(vec![0, 2])
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn empty_int_points() {
        let result = DesignConfig::builder()
            .vars(["x"])
            .int_points(vec![])
            .build();
        assert!(matches!(result, Err(DesignError::EmptyIntPoints)));
    }

    #[test]
    fn points_must_match_vars() {
        let result = DesignConfig::builder()
            .vars(["x", "y"])
            .points(
                GridPoints::new()
                    .with("x", Column::continuous(vec![1.0]))
                    .with("z", Column::continuous(vec![1.0])),
            )
            .build();
        assert_eq!(
            result.unwrap_err(),
            DesignError::PointsMismatch {
                missing: vec!["y".to_string()],
                extra: vec!["z".to_string()],
            }
        );
    }

    #[test]
    fn points_must_be_non_empty() {
        let result = DesignConfig::builder()
            .vars(["x"])
            .points(GridPoints::new().with("x", Column::continuous(Vec::new())))
            .build();
        assert!(matches!(result, Err(DesignError::EmptyPoints { .. })));
    }
}
