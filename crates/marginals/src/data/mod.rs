//! Typed tabular data.
//!
//! # Key Types
//!
//! - [`Table`]: ordered named columns of equal length
//! - [`TableBuilder`]: validating builder for tables
//! - [`Column`]: one typed column, the variant is its [`FeatureType`]
//! - [`TableSchema`]: column names and declared types
//!
//! # Missing Values
//!
//! Continuous columns use `f64::NAN`; integer, ordered and nominal columns use
//! `None`. Grid construction skips missing values when computing ranges and
//! distinct sets.

mod column;
mod error;
mod schema;
mod table;

pub use column::{Column, OrderedColumn, Value};
pub use error::TableError;
pub use schema::{FeatureMeta, FeatureType, TableSchema};
pub use table::{Table, TableBuilder};
