use crate::{Result, RowLabeled, Type, ValidationError, Value, normalize_type};

/// Normalized introspection record of a single column, before type resolution.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub column_name: String,
    /// Lowercase native type without parameters (`varchar`, `character varying`).
    pub data_type: String,
    /// Full native type as reported by the database (`varchar(255)`).
    pub column_type: String,
    pub is_nullable: bool,
    /// Default expression, verbatim.
    pub column_default: Option<String>,
    pub character_maximum_length: Option<u32>,
    pub datetime_precision: Option<u32>,
    /// Allowed values of `enum` and `set` columns.
    pub enumeration_values: Option<Vec<String>>,
    pub auto_increment: bool,
}

impl ColumnDefinition {
    pub fn new(column_name: impl Into<String>, column_type: impl Into<String>) -> Self {
        let column_type = column_type.into();
        Self {
            column_name: column_name.into(),
            data_type: normalize_type(&column_type),
            column_type,
            ..Default::default()
        }
    }

    pub fn nullable(mut self, value: bool) -> Self {
        self.is_nullable = value;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.column_default = Some(value.into());
        self
    }

    pub fn max_length(mut self, value: u32) -> Self {
        self.character_maximum_length = Some(value);
        self
    }

    pub fn precision(mut self, value: u32) -> Self {
        self.datetime_precision = Some(value);
        self
    }

    pub fn enumeration<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.enumeration_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn auto_increment(mut self, value: bool) -> Self {
        self.auto_increment = value;
        self
    }

    /// Builds the definition from an `INFORMATION_SCHEMA.COLUMNS` row.
    pub fn from_information_schema(row: &RowLabeled) -> Result<Self> {
        let data_type = row.require_text("data_type")?;
        Ok(Self {
            column_name: row.require_text("column_name")?.into_owned(),
            data_type: normalize_type(&data_type),
            column_type: data_type.into_owned(),
            is_nullable: row
                .get_text("is_nullable")
                .is_some_and(|v| is_affirmative(&v)),
            column_default: row.get_text("column_default").map(|v| v.into_owned()),
            character_maximum_length: row.get_u32("character_maximum_length"),
            datetime_precision: row.get_u32("datetime_precision"),
            enumeration_values: None,
            auto_increment: false,
        })
    }
}

/// `YES`, `Y`, `TRUE` or `1`, the forms databases use for flags in introspection rows.
pub fn is_affirmative(value: &str) -> bool {
    let value = value.trim();
    ["yes", "y", "true", "1"]
        .iter()
        .any(|v| v.eq_ignore_ascii_case(value))
}

/// Schema fact about a column of a described table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    column_type: Type,
    nullable: bool,
    has_default: bool,
    definition: ColumnDefinition,
}

impl Column {
    pub fn new(definition: ColumnDefinition, column_type: Type) -> Self {
        Self {
            name: definition.column_name.clone(),
            column_type,
            nullable: definition.is_nullable,
            has_default: definition.column_default.is_some() || definition.auto_increment,
            definition,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> &Type {
        &self.column_type
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// The database fills the column when no value is given (default expression or auto increment).
    pub fn has_default(&self) -> bool {
        self.has_default
    }

    pub fn default_expression(&self) -> Option<&str> {
        self.definition.column_default.as_deref()
    }

    pub fn definition(&self) -> &ColumnDefinition {
        &self.definition
    }

    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if value.is_null() {
            return if self.nullable || self.has_default {
                Ok(())
            } else {
                Err(ValidationError::not_nullable(&self.name))
            };
        }
        self.column_type
            .validate(value)
            .map_err(|e| ValidationError::not_valid(&self.name, &e))
    }
}
