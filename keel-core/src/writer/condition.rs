use crate::Value;
use std::borrow::Cow;

/// Entry of a WHERE list.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column = value` shorthand, `column IS NULL` for a null value. The column is escaped as an
    /// identifier, so `examples.id` renders as `"examples"."id"`. Use [`Condition::Raw`] to keep
    /// a qualified column unquoted, as in `examples.id = 42`.
    Eq(Cow<'static, str>, Value),
    /// SQL fragment written verbatim, it may start with its own `AND` / `OR`.
    Raw(Cow<'static, str>),
}

impl Condition {
    pub fn eq(column: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Condition::Eq(column.into(), value.into())
    }

    pub fn raw(fragment: impl Into<Cow<'static, str>>) -> Self {
        Condition::Raw(fragment.into())
    }

    /// The fragment starts with its own `AND` / `OR` operator.
    pub fn has_operator(&self) -> bool {
        let Condition::Raw(fragment) = self else {
            return false;
        };
        let fragment = fragment.trim_start();
        ["AND", "OR"].iter().any(|op| {
            fragment
                .get(..op.len())
                .is_some_and(|v| v.eq_ignore_ascii_case(op))
                && fragment[op.len()..]
                    .chars()
                    .next()
                    .is_none_or(|c| c.is_whitespace() || c == '(')
        })
    }
}

impl From<&'static str> for Condition {
    fn from(value: &'static str) -> Self {
        Condition::Raw(value.into())
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        Condition::Raw(value.into())
    }
}

impl<V: Into<Value>> From<(&'static str, V)> for Condition {
    fn from((column, value): (&'static str, V)) -> Self {
        Condition::Eq(column.into(), value.into())
    }
}

impl<V: Into<Value>> From<(String, V)> for Condition {
    fn from((column, value): (String, V)) -> Self {
        Condition::Eq(column.into(), value.into())
    }
}
