//! User-supplied grid points.

use crate::data::Column;

/// Explicit candidate values per variable of interest.
///
/// The design grid is the full factorial of these sequences. Each sequence is
/// a [`Column`] so it carries the same type information as the data.
///
/// # Example
///
/// ```
/// use marginals::data::Column;
/// use marginals::design::GridPoints;
///
/// let points = GridPoints::new()
///     .with("x", Column::continuous(vec![0.0, 0.5, 1.0]))
///     .with("color", Column::nominal(["red", "blue"]));
///
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.n_combinations(), 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridPoints {
    entries: Vec<(String, Column)>,
}

impl GridPoints {
    /// Create an empty set of points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate values for `name`, replacing earlier ones.
    pub fn with(mut self, name: impl Into<String>, values: Column) -> Self {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = values,
            None => self.entries.push((name, values)),
        }
        self
    }

    /// Candidate values for `name`.
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Variable names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rows in the full factorial, saturating at `u128::MAX`.
    pub fn n_combinations(&self) -> u128 {
        self.entries
            .iter()
            .map(|(_, c)| c.len() as u128)
            .try_fold(1u128, |acc, n| acc.checked_mul(n))
            .unwrap_or(u128::MAX)
    }

    /// Iterate over `(name, values)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c))
    }
}

impl<S: Into<String>> FromIterator<(S, Column)> for GridPoints {
    fn from_iter<I: IntoIterator<Item = (S, Column)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(GridPoints::new(), |points, (name, values)| points.with(name, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_replaces_existing() {
        let points = GridPoints::new()
            .with("a", Column::integer([1]))
            .with("a", Column::integer([1, 2]));
        assert_eq!(points.len(), 1);
        assert_eq!(points.get("a").map(Column::len), Some(2));
    }

    #[test]
    fn from_iterator_keeps_order() {
        let points: GridPoints = [
            ("b", Column::integer([1, 2])),
            ("a", Column::nominal(["x"])),
        ]
        .into_iter()
        .collect();
        assert_eq!(points.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(points.n_combinations(), 2);
    }

    #[test]
    fn empty_points_have_one_combination() {
        assert_eq!(GridPoints::new().n_combinations(), 1);
    }
}
