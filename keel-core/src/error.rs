use crate::Value;
use std::fmt::{self, Display};

/// Kind of a recoverable validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoNumber,
    NoBoolean,
    NoString,
    NoDateTime,
    NoTime,
    NotAllowed,
    TooLong,
    InvalidJson,
    NotNullable,
    /// Wraps the error of a column type, naming the column.
    NotValid,
    /// The column is not part of the described table (schema mismatch).
    UnknownColumn,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NoNumber => "NO_NUMBER",
            ErrorKind::NoBoolean => "NO_BOOLEAN",
            ErrorKind::NoString => "NO_STRING",
            ErrorKind::NoDateTime => "NO_DATETIME",
            ErrorKind::NoTime => "NO_TIME",
            ErrorKind::NotAllowed => "NOT_ALLOWED",
            ErrorKind::TooLong => "TOO_LONG",
            ErrorKind::InvalidJson => "INVALID_JSON",
            ErrorKind::NotNullable => "NOT_NULLABLE",
            ErrorKind::NotValid => "NOT_VALID",
            ErrorKind::UnknownColumn => "UNKNOWN_COLUMN",
        }
    }

    /// Message template, `{name}` marks a placeholder.
    pub fn template(&self) -> &'static str {
        match self {
            ErrorKind::NoNumber => "{value} is not numeric",
            ErrorKind::NoBoolean => "{value} can not be converted to boolean",
            ErrorKind::NoString => "{type} is not a valid string",
            ErrorKind::NoDateTime => "{value} is not a valid date or date time expression",
            ErrorKind::NoTime => "{value} is not a valid time expression",
            ErrorKind::NotAllowed => "{value} is not allowed by this {type}",
            ErrorKind::TooLong => "{value} is too long (max: {max})",
            ErrorKind::InvalidJson => "{value} is not valid json",
            ErrorKind::NotNullable => "{column} does not allow null values",
            ErrorKind::NotValid => "Value not valid for {column} (Caused by: {previous})",
            ErrorKind::UnknownColumn => "Unknown column {column}",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Recoverable error returned (never raised) by type and column validation.
///
/// The message is rendered once, when the error is built. A `NotValid` error keeps only the
/// rendered message of its cause under the `previous` parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    kind: ErrorKind,
    params: Vec<(&'static str, String)>,
    message: String,
}

impl ValidationError {
    pub fn new(
        kind: ErrorKind,
        params: impl IntoIterator<Item = (&'static str, String)>,
    ) -> Self {
        let params: Vec<_> = params.into_iter().collect();
        let message = render_template(kind.template(), &params);
        Self {
            kind,
            params,
            message,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Value of a template parameter, if the error carries it.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find_map(|(k, v)| (*k == name).then_some(v.as_str()))
    }

    /// Column name for `NotNullable`, `NotValid` and `UnknownColumn`.
    pub fn column(&self) -> Option<&str> {
        self.param("column")
    }

    /// Rendered message of the cause of a `NotValid` error.
    pub fn previous(&self) -> Option<&str> {
        self.param("previous")
    }

    pub fn no_number(value: &Value) -> Self {
        Self::new(ErrorKind::NoNumber, [("value", value.as_text().into_owned())])
    }

    pub fn no_boolean(value: &Value) -> Self {
        Self::new(ErrorKind::NoBoolean, [("value", value.as_text().into_owned())])
    }

    pub fn no_string(value: &Value) -> Self {
        Self::new(ErrorKind::NoString, [("type", value.type_name().to_owned())])
    }

    pub fn no_date_time(value: &Value) -> Self {
        Self::new(ErrorKind::NoDateTime, [("value", value.as_text().into_owned())])
    }

    pub fn no_time(value: &Value) -> Self {
        Self::new(ErrorKind::NoTime, [("value", value.as_text().into_owned())])
    }

    pub fn not_allowed(value: &str, type_name: &str) -> Self {
        Self::new(
            ErrorKind::NotAllowed,
            [("value", value.to_owned()), ("type", type_name.to_owned())],
        )
    }

    pub fn too_long(value: &str, max: u32) -> Self {
        Self::new(
            ErrorKind::TooLong,
            [("value", value.to_owned()), ("max", max.to_string())],
        )
    }

    pub fn invalid_json(value: &Value) -> Self {
        Self::new(ErrorKind::InvalidJson, [("value", value.as_text().into_owned())])
    }

    pub fn not_nullable(column: &str) -> Self {
        Self::new(ErrorKind::NotNullable, [("column", column.to_owned())])
    }

    pub fn not_valid(column: &str, cause: &ValidationError) -> Self {
        Self::new(
            ErrorKind::NotValid,
            [
                ("column", column.to_owned()),
                ("previous", cause.message.clone()),
            ],
        )
    }

    pub fn unknown_column(column: &str) -> Self {
        Self::new(ErrorKind::UnknownColumn, [("column", column.to_owned())])
    }
}

/// Replaces each `{name}` with its parameter. Unknown placeholders stay as they are.
pub fn render_template(template: &str, params: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };
        let name = &tail[1..end];
        match params.iter().find(|(k, _)| *k == name) {
            Some((_, v)) => out.push_str(v),
            None => out.push_str(&tail[..=end]),
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}
