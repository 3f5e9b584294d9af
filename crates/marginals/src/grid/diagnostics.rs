//! Non-fatal advisories raised while building grids.

/// Advisory attached to a successful result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridWarning {
    /// A nominal column has more distinct values than the requested
    /// resolution, so a random subset of them was used.
    #[error(
        "{}requested resolution {requested} is below cardinality {distinct}, using a random subset",
        .column.as_ref().map(|name| format!("column '{name}': ")).unwrap_or_default()
    )]
    ResolutionBelowCardinality {
        /// Column name, when the grid was built from a named column.
        column: Option<String>,
        requested: usize,
        distinct: usize,
    },
}

impl GridWarning {
    /// Attach a column name.
    pub(crate) fn with_column(self, name: &str) -> Self {
        match self {
            Self::ResolutionBelowCardinality {
                requested,
                distinct,
                ..
            } => Self::ResolutionBelowCardinality {
                column: Some(name.to_string()),
                requested,
                distinct,
            },
        }
    }
}

/// A value together with the advisories raised while computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosed<T> {
    pub value: T,
    pub warnings: Vec<GridWarning>,
}

impl<T> Diagnosed<T> {
    /// Wrap a value with no advisories.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Returns true if no advisory was raised.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_column() {
        let warning = GridWarning::ResolutionBelowCardinality {
            column: None,
            requested: 2,
            distinct: 5,
        }
        .with_column("color");
        assert_eq!(
            warning.to_string(),
            "column 'color': requested resolution 2 is below cardinality 5, using a random subset"
        );
    }

    #[test]
    fn display_without_column() {
        let warning = GridWarning::ResolutionBelowCardinality {
            column: None,
            requested: 3,
            distinct: 4,
        };
        assert_eq!(
            warning.to_string(),
            "requested resolution 3 is below cardinality 4, using a random subset"
        );
    }
}
