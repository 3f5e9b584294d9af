//! marginals: evaluation designs for Monte-Carlo marginal predictions.
//!
//! A marginal (partial-dependence style) prediction fixes some variables at
//! grid values and averages a model's output over the rest of the data. This
//! crate builds the table of evaluation points; the model and the aggregate
//! are supplied by the caller.
//!
//! # Key Types
//!
//! - [`Table`] / [`Column`] - Typed tabular data with an explicit schema
//! - [`DesignConfig`] - Configuration builder
//! - [`Design`] - The evaluation table with its grid and background rows
//! - [`DesignError`] / [`GridWarning`] - Fatal errors and non-fatal advisories
//!
//! # Building a Design
//!
//! Use `DesignConfig::builder()` to configure, then [`build_design`].
//! Lower-level pieces live in [`grid`]: [`grid::uniform_grid`] for one
//! column and [`grid::expand`] for Cartesian products.
//!
//! # Reproducibility
//!
//! All sampling draws from an explicit random source. [`build_design`] seeds
//! one from `DesignConfig::seed`; [`design::build_design_with_rng`] accepts
//! any `rand::Rng`.

pub mod data;
pub mod design;
pub mod error;
pub mod explainability;
pub mod grid;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Data types
pub use data::{Column, FeatureType, Table, TableBuilder, TableError, Value};

// Design construction
pub use design::{build_design, Design, DesignConfig, GridPoints};

// Errors and advisories
pub use error::DesignError;
pub use grid::{Diagnosed, GridWarning};

// Marginal predictions
pub use explainability::{marginal_prediction, MarginalPrediction};
