use crate::{Error, Result};
use std::borrow::Cow;

/// Dialect configuration: identifier quoting and boolean literal tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectOptions {
    /// Character wrapping each identifier part.
    pub quoting_character: char,
    /// Separator between schema, table and column parts of an identifier.
    pub identifier_divider: char,
    /// Literal written for `true`, and accepted by `Boolean` columns.
    pub boolean_true: Cow<'static, str>,
    /// Literal written for `false`, and accepted by `Boolean` columns.
    pub boolean_false: Cow<'static, str>,
}

impl DialectOptions {
    pub const fn new(
        quoting_character: char,
        boolean_true: &'static str,
        boolean_false: &'static str,
    ) -> Self {
        Self {
            quoting_character,
            identifier_divider: '.',
            boolean_true: Cow::Borrowed(boolean_true),
            boolean_false: Cow::Borrowed(boolean_false),
        }
    }

    pub fn with_quoting_character(mut self, value: char) -> Self {
        self.quoting_character = value;
        self
    }

    pub fn with_identifier_divider(mut self, value: char) -> Self {
        self.identifier_divider = value;
        self
    }

    pub fn with_boolean_tokens(
        mut self,
        boolean_true: impl Into<Cow<'static, str>>,
        boolean_false: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.boolean_true = boolean_true.into();
        self.boolean_false = boolean_false.into();
        self
    }

    /// Sets an option by its configuration key.
    ///
    /// Returns `Ok(false)` when `key` is not a dialect option, so that callers can pass every
    /// parameter of a connection string through it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        let single_char = || {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(Error::msg(format!(
                    "Option `{}` expects a single character, got `{}`",
                    key, value
                ))),
            }
        };
        match key {
            "quoting_character" => self.quoting_character = single_char()?,
            "identifier_divider" => self.identifier_divider = single_char()?,
            "boolean_true" => self.boolean_true = Cow::Owned(value.to_owned()),
            "boolean_false" => self.boolean_false = Cow::Owned(value.to_owned()),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Default for DialectOptions {
    fn default() -> Self {
        Self::new('"', "1", "0")
    }
}
