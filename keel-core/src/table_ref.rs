use std::fmt::{self, Display};

/// Possibly schema qualified table name, as given to `describe`.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    pub schema: Option<String>,
    pub name: String,
}

impl TableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    /// Splits `schema<divider>table` on the first divider.
    pub fn parse(value: &str, divider: char) -> Self {
        match value.split_once(divider) {
            Some((schema, name)) => Self::with_schema(schema, name),
            None => Self::new(value),
        }
    }

    pub fn schema_or<'s>(&'s self, default: &'s str) -> &'s str {
        self.schema.as_deref().unwrap_or(default)
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{}.", schema)?;
        }
        f.write_str(&self.name)
    }
}
