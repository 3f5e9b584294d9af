//! Column type definitions.
//!
//! This module defines the schema types that describe table structure.

use std::collections::HashMap;
use std::fmt;

/// Semantic column types.
///
/// The type decides how a column is gridded: continuous columns get an evenly
/// spaced grid, integer columns a rounded or dense run, ordered columns a
/// spacing-preserving subset of their levels, and nominal columns their
/// distinct values (or a random subset of them).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FeatureType {
    /// Continuous numeric column.
    ///
    /// Missing values: `f64::NAN`
    #[default]
    Continuous,

    /// Discrete integer column.
    ///
    /// Missing values: `None`
    Integer,

    /// Ordered categorical column with an explicit level order.
    ///
    /// Missing values: `None`
    Ordered,

    /// Unordered categorical or free text column.
    ///
    /// Missing values: `None`
    Nominal,
}

impl FeatureType {
    /// Short lowercase name, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::Continuous => "continuous",
            FeatureType::Integer => "integer",
            FeatureType::Ordered => "ordered",
            FeatureType::Nominal => "nominal",
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a single column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureMeta {
    /// Column name.
    pub name: String,

    /// Column type.
    pub feature_type: FeatureType,
}

impl FeatureMeta {
    /// Create metadata for a named column.
    pub fn new(name: impl Into<String>, feature_type: FeatureType) -> Self {
        Self {
            name: name.into(),
            feature_type,
        }
    }
}

/// Schema describing the table structure.
///
/// Column names are unique; [`TableBuilder`](super::TableBuilder) enforces this
/// before a schema is created.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableSchema {
    /// Per-column metadata, in table order.
    features: Vec<FeatureMeta>,

    /// Column name → index mapping.
    name_index: HashMap<String, usize>,
}

impl TableSchema {
    /// Create a schema with the given column metadata.
    pub fn from_features(features: Vec<FeatureMeta>) -> Self {
        let name_index = features
            .iter()
            .enumerate()
            .map(|(i, meta)| (meta.name.clone(), i))
            .collect();
        Self {
            features,
            name_index,
        }
    }

    /// Get column index by name.
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    /// Get the type of a column by name.
    pub fn feature_type(&self, name: &str) -> Option<FeatureType> {
        self.feature_index(name)
            .map(|i| self.features[i].feature_type)
    }

    /// Returns true if a column with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// Column names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|m| m.name.as_str())
    }
}
