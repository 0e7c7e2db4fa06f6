use crate::{Column, ValidationError, Value, ValueMap};
use indexmap::{IndexMap, map::IntoValues};

/// Validates candidate values against the columns of a described table.
#[derive(Default, Debug, Clone)]
pub struct Validator {
    columns: IndexMap<String, Column>,
}

impl Validator {
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        columns.into_iter().collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Columns in describe order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Validate `value` for the column `name`.
    ///
    /// A column the table does not have is a schema mismatch, it is still returned as an
    /// `UnknownColumn` error value like the other validation failures.
    pub fn validate(&self, name: &str, value: &Value) -> Result<(), ValidationError> {
        match self.columns.get(name) {
            Some(column) => column.validate(value),
            None => Err(ValidationError::unknown_column(name)),
        }
    }

    /// Validate every entry of `row`, collecting the failures in row order.
    pub fn validate_row(&self, row: &ValueMap) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<_> = row
            .iter()
            .filter_map(|(name, value)| self.validate(name, value).err())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl FromIterator<Column> for Validator {
    fn from_iter<T: IntoIterator<Item = Column>>(iter: T) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|v| (v.name().to_owned(), v))
                .collect(),
        }
    }
}

impl IntoIterator for Validator {
    type Item = Column;
    type IntoIter = IntoValues<String, Column>;
    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_values()
    }
}
