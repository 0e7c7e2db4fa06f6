use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::borrow::Cow;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Candidate value handed to the validator and to the statement builders.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    Varchar(String),
    Blob(Box<[u8]>),
    Date(Date),
    Time(Time),
    Timestamp(PrimitiveDateTime),
    TimestampWithTimezone(OffsetDateTime),
    Uuid(Uuid),
    Json(serde_json::Value),
    /// SQL expression written verbatim (e.g. `names.foo` or `NOW()`).
    Raw(String),
}

/// Column name to value map, iterated in insertion order.
pub type ValueMap = IndexMap<Cow<'static, str>, Value>;

/// Raw SQL expression, never escaped.
pub fn raw(expression: impl Into<String>) -> Value {
    Value::Raw(expression.into())
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Value::Int8(..)
                | Value::Int16(..)
                | Value::Int32(..)
                | Value::Int64(..)
                | Value::UInt8(..)
                | Value::UInt16(..)
                | Value::UInt32(..)
                | Value::UInt64(..)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Varchar(v) | Value::Raw(v) => Some(v),
            _ => None,
        }
    }

    /// Name of the value kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(..) => "boolean",
            Value::Int8(..)
            | Value::Int16(..)
            | Value::Int32(..)
            | Value::Int64(..)
            | Value::UInt8(..)
            | Value::UInt16(..)
            | Value::UInt32(..)
            | Value::UInt64(..) => "integer",
            Value::Float32(..) | Value::Float64(..) => "double",
            Value::Decimal(..) => "decimal",
            Value::Varchar(..) => "string",
            Value::Blob(..) => "blob",
            Value::Date(..) => "date",
            Value::Time(..) => "time",
            Value::Timestamp(..) | Value::TimestampWithTimezone(..) => "timestamp",
            Value::Uuid(..) => "uuid",
            Value::Json(..) => "json",
            Value::Raw(..) => "expression",
        }
    }

    /// Plain text rendering (no SQL quoting), used for error messages and for reading
    /// introspection rows.
    pub fn as_text(&self) -> Cow<'_, str> {
        macro_rules! integer {
            ($v:expr) => {
                Cow::Owned(itoa::Buffer::new().format($v).to_owned())
            };
        }
        match self {
            Value::Null => Cow::Borrowed("null"),
            Value::Boolean(v) => Cow::Borrowed(["false", "true"][*v as usize]),
            Value::Int8(v) => integer!(*v),
            Value::Int16(v) => integer!(*v),
            Value::Int32(v) => integer!(*v),
            Value::Int64(v) => integer!(*v),
            Value::UInt8(v) => integer!(*v),
            Value::UInt16(v) => integer!(*v),
            Value::UInt32(v) => integer!(*v),
            Value::UInt64(v) => integer!(*v),
            Value::Float32(v) => Cow::Owned(v.to_string()),
            Value::Float64(v) => Cow::Owned(v.to_string()),
            Value::Decimal(v) => Cow::Owned(v.to_string()),
            Value::Varchar(v) | Value::Raw(v) => Cow::Borrowed(v),
            Value::Blob(v) => Cow::Owned(hex::encode_upper(v)),
            Value::Date(v) => Cow::Owned(v.to_string()),
            Value::Time(v) => Cow::Owned(v.to_string()),
            Value::Timestamp(v) => Cow::Owned(v.to_string()),
            Value::TimestampWithTimezone(v) => Cow::Owned(v.to_string()),
            Value::Uuid(v) => Cow::Owned(v.to_string()),
            Value::Json(v) => Cow::Owned(v.to_string()),
        }
    }
}

macro_rules! impl_from_value {
    ($source:ty, $into:path) => {
        impl From<$source> for Value {
            fn from(value: $source) -> Self {
                $into(value)
            }
        }
    };
}

impl_from_value!(bool, Value::Boolean);
impl_from_value!(i8, Value::Int8);
impl_from_value!(i16, Value::Int16);
impl_from_value!(i32, Value::Int32);
impl_from_value!(i64, Value::Int64);
impl_from_value!(u8, Value::UInt8);
impl_from_value!(u16, Value::UInt16);
impl_from_value!(u32, Value::UInt32);
impl_from_value!(u64, Value::UInt64);
impl_from_value!(f32, Value::Float32);
impl_from_value!(f64, Value::Float64);
impl_from_value!(Decimal, Value::Decimal);
impl_from_value!(String, Value::Varchar);
impl_from_value!(Box<[u8]>, Value::Blob);
impl_from_value!(Date, Value::Date);
impl_from_value!(Time, Value::Time);
impl_from_value!(PrimitiveDateTime, Value::Timestamp);
impl_from_value!(OffsetDateTime, Value::TimestampWithTimezone);
impl_from_value!(Uuid, Value::Uuid);
impl_from_value!(serde_json::Value, Value::Json);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(value.to_owned())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(value: Cow<'_, str>) -> Self {
        Value::Varchar(value.into_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
