//! Model explanation on top of designs.
//!
//! - [`marginal_prediction`]: partial-dependence style marginal predictions
//! - [`mean`], [`variance`]: ready-made aggregates

mod marginal;

pub use marginal::{marginal_prediction, mean, variance, MarginalPrediction};
