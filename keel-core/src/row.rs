use crate::{Error, Result, Value};
use std::{borrow::Cow, sync::Arc};

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(names: RowNames, values: Row) -> Self {
        Self {
            labels: names,
            values,
        }
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .map(|i| &self.values()[i])
    }

    /// Text of a column, `None` when the column is missing or `NULL`.
    pub fn get_text(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.get_column(name)? {
            Value::Null => None,
            v => Some(v.as_text()),
        }
    }

    pub fn require_text(&self, name: &str) -> Result<Cow<'_, str>> {
        self.get_text(name).ok_or_else(|| {
            let error = Error::msg(format!(
                "Column `{}` is missing from the row (columns: {})",
                name,
                self.labels.join(", ")
            ));
            log::error!("{:#}", error);
            error
        })
    }

    /// Unsigned integer of a column, accepting integer values and their text form.
    pub fn get_u32(&self, name: &str) -> Option<u32> {
        match self.get_column(name)? {
            Value::Int8(v) => u32::try_from(*v).ok(),
            Value::Int16(v) => u32::try_from(*v).ok(),
            Value::Int32(v) => u32::try_from(*v).ok(),
            Value::Int64(v) => u32::try_from(*v).ok(),
            Value::UInt8(v) => Some(*v as u32),
            Value::UInt16(v) => Some(*v as u32),
            Value::UInt32(v) => Some(*v),
            Value::UInt64(v) => u32::try_from(*v).ok(),
            Value::Varchar(v) => atoi::atoi::<u32>(v.trim().as_bytes()),
            _ => None,
        }
    }
}
