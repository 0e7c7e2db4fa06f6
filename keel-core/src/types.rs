use crate::{ColumnDefinition, DialectOptions, ValidationError, Value, parse};
use std::{
    borrow::Cow,
    fmt::{self, Debug},
    sync::Arc,
};

/// Built-in type variant, the target of the per-dialect native type tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Integer,
    Number,
    VarChar,
    Text,
    DateTime,
    Time,
    Boolean,
    Json,
    Enum,
    Set,
}

/// Allowed values of an `Enum` or `Set` column, in declaration order.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct AllowedValues(Arc<[String]>);

impl AllowedValues {
    pub fn new<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Application defined column type, produced by a registered `TypeFactory`.
pub trait CustomType: Debug + Send + Sync {
    fn name(&self) -> &str;
    fn validate(&self, value: &Value) -> Result<(), ValidationError>;
}

/// Resolved type of a column.
#[derive(Debug, Clone)]
pub enum Type {
    Integer,
    Number,
    VarChar {
        max_length: Option<u32>,
    },
    Text,
    DateTime {
        precision: Option<u32>,
    },
    Time {
        precision: Option<u32>,
    },
    Boolean {
        true_token: Cow<'static, str>,
        false_token: Cow<'static, str>,
    },
    Json,
    Enum(AllowedValues),
    Set(AllowedValues),
    Custom(Arc<dyn CustomType>),
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::VarChar { max_length: l }, Self::VarChar { max_length: r }) => l == r,
            (Self::DateTime { precision: l }, Self::DateTime { precision: r }) => l == r,
            (Self::Time { precision: l }, Self::Time { precision: r }) => l == r,
            (
                Self::Boolean {
                    true_token: l_true,
                    false_token: l_false,
                },
                Self::Boolean {
                    true_token: r_true,
                    false_token: r_false,
                },
            ) => l_true == r_true && l_false == r_false,
            (Self::Enum(l), Self::Enum(r)) => l == r,
            (Self::Set(l), Self::Set(r)) => l == r,
            (Self::Custom(l), Self::Custom(r)) => {
                Arc::as_ptr(l) as *const () == Arc::as_ptr(r) as *const ()
            }
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Type {
    pub fn custom(value: impl CustomType + 'static) -> Self {
        Type::Custom(Arc::new(value))
    }

    /// Boolean type using the true/false tokens of the dialect.
    pub fn boolean(options: &DialectOptions) -> Self {
        Type::Boolean {
            true_token: options.boolean_true.clone(),
            false_token: options.boolean_false.clone(),
        }
    }

    /// Built-in variant, `None` for custom types.
    pub fn kind(&self) -> Option<TypeKind> {
        Some(match self {
            Type::Integer => TypeKind::Integer,
            Type::Number => TypeKind::Number,
            Type::VarChar { .. } => TypeKind::VarChar,
            Type::Text => TypeKind::Text,
            Type::DateTime { .. } => TypeKind::DateTime,
            Type::Time { .. } => TypeKind::Time,
            Type::Boolean { .. } => TypeKind::Boolean,
            Type::Json => TypeKind::Json,
            Type::Enum(..) => TypeKind::Enum,
            Type::Set(..) => TypeKind::Set,
            Type::Custom(..) => return None,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Type::Integer => "integer",
            Type::Number => "number",
            Type::VarChar { .. } => "varchar",
            Type::Text => "text",
            Type::DateTime { .. } => "datetime",
            Type::Time { .. } => "time",
            Type::Boolean { .. } => "boolean",
            Type::Json => "json",
            Type::Enum(..) => "enum",
            Type::Set(..) => "set",
            Type::Custom(custom) => custom.name(),
        }
    }

    /// Built-in factory consulted after the registered types.
    ///
    /// It recognizes the definitions that need no native type table: enumerations carrying their
    /// allowed values and the boolean type.
    pub fn from_definition(
        definition: &ColumnDefinition,
        options: &DialectOptions,
    ) -> Option<Type> {
        match definition.data_type.as_str() {
            "enum" | "set" if definition.enumeration_values.is_some() => {
                let kind = if definition.data_type == "enum" {
                    TypeKind::Enum
                } else {
                    TypeKind::Set
                };
                Some(Type::from_kind(kind, definition, options))
            }
            "boolean" | "bool" => Some(Type::boolean(options)),
            _ => None,
        }
    }

    /// Builds the variant `kind`, taking its constraints from the column definition.
    pub fn from_kind(
        kind: TypeKind,
        definition: &ColumnDefinition,
        options: &DialectOptions,
    ) -> Type {
        let allowed =
            || AllowedValues::new(definition.enumeration_values.iter().flatten().cloned());
        match kind {
            TypeKind::Integer => Type::Integer,
            TypeKind::Number => Type::Number,
            TypeKind::VarChar => Type::VarChar {
                max_length: definition.character_maximum_length,
            },
            TypeKind::Text => Type::Text,
            TypeKind::DateTime => Type::DateTime {
                precision: definition.datetime_precision,
            },
            TypeKind::Time => Type::Time {
                precision: definition.datetime_precision,
            },
            TypeKind::Boolean => Type::boolean(options),
            TypeKind::Json => Type::Json,
            TypeKind::Enum => Type::Enum(allowed()),
            TypeKind::Set => Type::Set(allowed()),
        }
    }

    /// Checks a non null value. Nullability is a property of the column, so `Null` passes here,
    /// and so does a raw SQL expression, evaluated by the database only.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if matches!(value, Value::Null | Value::Raw(..)) {
            return Ok(());
        }
        match self {
            Type::Integer => validate_integer(value),
            Type::Number => validate_number(value),
            Type::VarChar { max_length } => {
                let Value::Varchar(text) = value else {
                    return Err(ValidationError::no_string(value));
                };
                match max_length {
                    Some(max) if text.chars().count() > *max as usize => {
                        Err(ValidationError::too_long(text, *max))
                    }
                    _ => Ok(()),
                }
            }
            Type::Text => match value {
                Value::Varchar(..) => Ok(()),
                _ => Err(ValidationError::no_string(value)),
            },
            Type::DateTime { .. } => match value {
                Value::Date(..) | Value::Timestamp(..) | Value::TimestampWithTimezone(..) => Ok(()),
                Value::Varchar(v) if parse::is_date_time(v) => Ok(()),
                _ => Err(ValidationError::no_date_time(value)),
            },
            Type::Time { .. } => match value {
                Value::Time(..) => Ok(()),
                Value::Varchar(v) if parse::parse_time_of_day(v).is_ok() => Ok(()),
                _ => Err(ValidationError::no_time(value)),
            },
            Type::Boolean {
                true_token,
                false_token,
            } => match value {
                Value::Boolean(..) => Ok(()),
                v if v.is_integer() || matches!(v, Value::Varchar(..)) => {
                    let text = v.as_text();
                    if text == *true_token || text == *false_token {
                        Ok(())
                    } else {
                        Err(ValidationError::no_boolean(value))
                    }
                }
                _ => Err(ValidationError::no_boolean(value)),
            },
            Type::Json => match value {
                Value::Varchar(v) => serde_json::from_str::<serde_json::Value>(v)
                    .map(|_| ())
                    .map_err(|_| ValidationError::invalid_json(value)),
                Value::Blob(..) => Err(ValidationError::invalid_json(value)),
                Value::Float32(v) if !v.is_finite() => Err(ValidationError::invalid_json(value)),
                Value::Float64(v) if !v.is_finite() => Err(ValidationError::invalid_json(value)),
                _ => Ok(()),
            },
            Type::Enum(allowed) => {
                let Value::Varchar(text) = value else {
                    return Err(ValidationError::no_string(value));
                };
                if allowed.contains(text) {
                    Ok(())
                } else {
                    Err(ValidationError::not_allowed(text, "enum"))
                }
            }
            Type::Set(allowed) => {
                let Value::Varchar(text) = value else {
                    return Err(ValidationError::no_string(value));
                };
                if text.is_empty() {
                    return Ok(());
                }
                match text.split(',').find(|v| !allowed.contains(v)) {
                    Some(token) => Err(ValidationError::not_allowed(token, "set")),
                    None => Ok(()),
                }
            }
            Type::Custom(custom) => custom.validate(value),
        }
    }
}

fn validate_integer(value: &Value) -> Result<(), ValidationError> {
    let valid = match value {
        v if v.is_integer() => true,
        Value::Float32(v) => v.is_finite() && v.fract() == 0.0,
        Value::Float64(v) => v.is_finite() && v.fract() == 0.0,
        Value::Decimal(v) => v.fract().is_zero(),
        Value::Varchar(v) => {
            let v = v.trim();
            let digits = v.strip_prefix(['-', '+']).unwrap_or(v);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::no_number(value))
    }
}

fn validate_number(value: &Value) -> Result<(), ValidationError> {
    let valid = match value {
        v if v.is_integer() => true,
        Value::Float32(v) => v.is_finite(),
        Value::Float64(v) => v.is_finite(),
        Value::Decimal(..) => true,
        Value::Varchar(v) => fast_float::parse::<f64, _>(v.trim()).is_ok_and(f64::is_finite),
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::no_number(value))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
