//! Typed column storage.
//!
//! A [`Column`] is one of four variants, one per [`FeatureType`]. The variant is
//! the declared semantic type; nothing inspects values to guess it.

use std::collections::HashSet;
use std::sync::Arc;

use ndarray::{Array1, Axis};

use super::error::TableError;
use super::schema::FeatureType;

/// Single typed column.
///
/// Missing values are `f64::NAN` for continuous columns and `None` for every
/// other variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Continuous numeric values.
    Continuous(Array1<f64>),

    /// Discrete integer values.
    Integer(Array1<Option<i64>>),

    /// Ordered categorical values.
    Ordered(OrderedColumn),

    /// Unordered categorical or text values.
    Nominal(Array1<Option<String>>),
}

/// Ordered categorical storage: a level list plus codes into it.
///
/// The position of a level in `levels` defines its rank. Levels are shared
/// between a column and every column derived from it by row selection.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedColumn {
    levels: Arc<[String]>,
    codes: Array1<Option<u32>>,
}

impl OrderedColumn {
    /// Create from levels and codes.
    ///
    /// # Panics
    ///
    /// Debug-asserts that every code indexes into `levels`.
    pub(crate) fn from_codes(levels: Arc<[String]>, codes: Array1<Option<u32>>) -> Self {
        debug_assert!(codes
            .iter()
            .flatten()
            .all(|&c| (c as usize) < levels.len()));
        Self { levels, codes }
    }

    /// Declared levels, lowest rank first.
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Shared handle to the level list.
    pub(crate) fn shared_levels(&self) -> &Arc<[String]> {
        &self.levels
    }

    /// Level codes, `None` for missing.
    pub fn codes(&self) -> &Array1<Option<u32>> {
        &self.codes
    }

    /// Level label at row `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.codes[index].map(|c| self.levels[c as usize].as_str())
    }
}

/// Borrowed view of a single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Continuous(f64),
    Integer(i64),
    Ordered(&'a str),
    Nominal(&'a str),
    Missing,
}

impl Column {
    /// Create a continuous column. Use `f64::NAN` for missing entries.
    pub fn continuous(values: impl Into<Array1<f64>>) -> Self {
        Self::Continuous(values.into())
    }

    /// Create an integer column without missing values.
    pub fn integer(values: impl IntoIterator<Item = i64>) -> Self {
        Self::Integer(values.into_iter().map(Some).collect())
    }

    /// Create an integer column where `None` marks a missing entry.
    pub fn integer_opt(values: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self::Integer(values.into_iter().collect())
    }

    /// Create an ordered column from declared levels and labels.
    ///
    /// # Errors
    ///
    /// Fails if `levels` contains duplicates or a label is not a level.
    pub fn ordered<L, V>(
        levels: impl IntoIterator<Item = L>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self, TableError>
    where
        L: Into<String>,
        V: AsRef<str>,
    {
        Self::ordered_opt(levels, values.into_iter().map(Some))
    }

    /// Create an ordered column where `None` marks a missing entry.
    ///
    /// # Errors
    ///
    /// Fails if `levels` contains duplicates or a label is not a level.
    pub fn ordered_opt<L, V>(
        levels: impl IntoIterator<Item = L>,
        values: impl IntoIterator<Item = Option<V>>,
    ) -> Result<Self, TableError>
    where
        L: Into<String>,
        V: AsRef<str>,
    {
        let levels: Vec<String> = levels.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(levels.len());
        for level in &levels {
            if !seen.insert(level.as_str()) {
                return Err(TableError::DuplicateLevel {
                    level: level.clone(),
                });
            }
        }

        let codes = values
            .into_iter()
            .map(|value| match value {
                None => Ok(None),
                Some(v) => levels
                    .iter()
                    .position(|l| l == v.as_ref())
                    .map(|p| Some(p as u32))
                    .ok_or_else(|| TableError::UnknownLevel {
                        value: v.as_ref().to_string(),
                    }),
            })
            .collect::<Result<Array1<_>, _>>()?;

        Ok(Self::Ordered(OrderedColumn::from_codes(levels.into(), codes)))
    }

    /// Create a nominal column without missing values.
    pub fn nominal<V: Into<String>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::Nominal(values.into_iter().map(|v| Some(v.into())).collect())
    }

    /// Create a nominal column where `None` marks a missing entry.
    pub fn nominal_opt<V: Into<String>>(values: impl IntoIterator<Item = Option<V>>) -> Self {
        Self::Nominal(values.into_iter().map(|v| v.map(Into::into)).collect())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Column::Continuous(v) => v.len(),
            Column::Integer(v) => v.len(),
            Column::Ordered(o) => o.codes.len(),
            Column::Nominal(v) => v.len(),
        }
    }

    /// Returns true if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declared semantic type.
    pub fn feature_type(&self) -> FeatureType {
        match self {
            Column::Continuous(_) => FeatureType::Continuous,
            Column::Integer(_) => FeatureType::Integer,
            Column::Ordered(_) => FeatureType::Ordered,
            Column::Nominal(_) => FeatureType::Nominal,
        }
    }

    /// Cell at row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Value<'_> {
        match self {
            Column::Continuous(v) if v[index].is_nan() => Value::Missing,
            Column::Continuous(v) => Value::Continuous(v[index]),
            Column::Integer(v) => v[index].map_or(Value::Missing, Value::Integer),
            Column::Ordered(o) => o.label(index).map_or(Value::Missing, Value::Ordered),
            Column::Nominal(v) => v[index]
                .as_deref()
                .map_or(Value::Missing, Value::Nominal),
        }
    }

    /// Returns true if row `index` is missing.
    pub fn is_missing(&self, index: usize) -> bool {
        matches!(self.get(index), Value::Missing)
    }

    /// Gather rows by index into a new column of the same type.
    ///
    /// Indices may repeat and appear in any order.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Continuous(v) => Column::Continuous(v.select(Axis(0), indices)),
            Column::Integer(v) => Column::Integer(v.select(Axis(0), indices)),
            Column::Ordered(o) => Column::Ordered(OrderedColumn::from_codes(
                Arc::clone(&o.levels),
                o.codes.select(Axis(0), indices),
            )),
            Column::Nominal(v) => Column::Nominal(v.select(Axis(0), indices)),
        }
    }

    /// Continuous values, if this is a continuous column.
    pub fn as_continuous(&self) -> Option<&Array1<f64>> {
        match self {
            Column::Continuous(v) => Some(v),
            _ => None,
        }
    }

    /// Integer values, if this is an integer column.
    pub fn as_integer(&self) -> Option<&Array1<Option<i64>>> {
        match self {
            Column::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// Ordered storage, if this is an ordered column.
    pub fn as_ordered(&self) -> Option<&OrderedColumn> {
        match self {
            Column::Ordered(o) => Some(o),
            _ => None,
        }
    }

    /// Nominal values, if this is a nominal column.
    pub fn as_nominal(&self) -> Option<&Array1<Option<String>>> {
        match self {
            Column::Nominal(v) => Some(v),
            _ => None,
        }
    }

    /// Iterate over all cells.
    pub fn values(&self) -> impl Iterator<Item = Value<'_>> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}
