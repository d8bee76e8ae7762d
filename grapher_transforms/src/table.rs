// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned per-entity, per-time table used as input to the transforms.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use grapher_color::CoreValue;

/// A point on the shared timeline (a year, or a day offset).
pub type Time = i32;

/// Errors returned when building an [`EntityTable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityTableError {
    /// A row references a dimension the table does not declare.
    #[error("unknown dimension `{0}`")]
    UnknownDimension(String),
}

/// One observation: an entity's value for one dimension at one time.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRow {
    /// Entity name (a country, a region, ...).
    pub entity: String,
    /// Name of the dimension (variable) the value belongs to.
    pub dimension: String,
    /// Time of the observation.
    pub time: Time,
    /// The value; `None` when missing.
    pub value: Option<CoreValue>,
}

/// A long-format table of entity observations.
///
/// Rows are kept in insertion order; every row's dimension is one of `dimensions`.
#[derive(Debug, Clone, Default)]
pub struct EntityTable {
    /// Declared dimensions, in chart order.
    pub dimensions: Vec<String>,
    /// Observations.
    pub rows: Vec<EntityRow>,
}

impl EntityTable {
    /// Create an empty table with the given dimensions.
    pub fn new<I, S>(dimensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dimensions: dimensions.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Returns the position of a dimension, if declared.
    pub fn dimension_index(&self, dimension: &str) -> Option<usize> {
        self.dimensions.iter().position(|d| d == dimension)
    }

    /// Appends an observation.
    pub fn push(
        &mut self,
        entity: impl Into<String>,
        dimension: &str,
        time: Time,
        value: Option<CoreValue>,
    ) -> Result<(), EntityTableError> {
        if self.dimension_index(dimension).is_none() {
            return Err(EntityTableError::UnknownDimension(dimension.into()));
        }
        self.rows.push(EntityRow {
            entity: entity.into(),
            dimension: dimension.into(),
            time,
            value,
        });
        Ok(())
    }

    /// Builder form of [`Self::push`].
    pub fn with_row(
        mut self,
        entity: impl Into<String>,
        dimension: &str,
        time: Time,
        value: impl Into<CoreValue>,
    ) -> Result<Self, EntityTableError> {
        self.push(entity, dimension, time, Some(value.into()))?;
        Ok(self)
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn rows_must_use_declared_dimensions() {
        let mut table = EntityTable::new(["gdp"]);
        assert_eq!(table.push("France", "gdp", 2000, Some(1.0.into())), Ok(()));
        assert_eq!(
            table.push("France", "population", 2000, Some(1.0.into())),
            Err(EntityTableError::UnknownDimension("population".into()))
        );
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.dimension_index("gdp"), Some(0));
    }

    #[test]
    fn builder_appends_in_order() {
        let table = EntityTable::new(["gdp"])
            .with_row("France", "gdp", 2000, 1.0)
            .and_then(|t| t.with_row("Spain", "gdp", 2000, "n/a"))
            .unwrap();
        assert_eq!(table.rows[1].entity, "Spain");
        assert_eq!(table.rows[1].value, Some(CoreValue::from("n/a")));
    }
}
