use crate::{consume_while, truncate_long};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// Inner join parsed from a `JOIN <table> ON <condition>` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinClause {
    /// Joined table, verbatim, including its alias when present.
    pub table: String,
    /// Join condition, verbatim.
    pub on: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JoinParseError {
    #[error("Expected a JOIN clause, found `{0}`")]
    MissingJoin(String),
    #[error("Only inner joins are supported, found a {0} join")]
    NotInner(String),
    #[error("The join clause does not name a table")]
    MissingTable,
    #[error("The join on {0} has no ON clause")]
    MissingOn(String),
    #[error("The join on {0} has an empty ON condition")]
    MissingCondition(String),
}

const NOT_INNER: &[&str] = &["LEFT", "RIGHT", "FULL", "OUTER", "CROSS", "NATURAL"];

fn skip_whitespace(input: &mut &str) -> bool {
    !consume_while(input, char::is_whitespace).is_empty()
}

fn keyword<'s>(input: &mut &'s str) -> &'s str {
    consume_while(input, |c| c.is_ascii_alphabetic())
}

fn peek_keyword(input: &str) -> &str {
    let mut input = input;
    let word = keyword(&mut input);
    // Part of a longer token like `on_table` or `ONE.x`
    if input.starts_with(|c: char| !c.is_whitespace()) {
        return "";
    }
    word
}

/// Table reference made of plain and quoted segments: `"my schema".t`, `` `t` ``.
fn table_token<'s>(input: &mut &'s str) -> &'s str {
    let start = *input;
    loop {
        match input.chars().next() {
            Some(quote @ ('"' | '`')) => {
                let mut chars = input.char_indices().skip(1).peekable();
                let mut end = input.len();
                while let Some((i, c)) = chars.next() {
                    if c == quote {
                        if chars.peek().is_some_and(|(_, c)| *c == quote) {
                            chars.next();
                            continue;
                        }
                        end = i + c.len_utf8();
                        break;
                    }
                }
                *input = &input[end..];
            }
            Some(c) if !c.is_whitespace() => {
                consume_while(input, |c| !c.is_whitespace() && c != '"' && c != '`');
            }
            _ => break,
        }
    }
    &start[..start.len() - input.len()]
}

impl JoinClause {
    pub fn new(table: impl Into<String>, on: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            on: on.into(),
        }
    }

    /// Parses `[INNER] JOIN <table> [[AS] <alias>] ON <condition>`.
    ///
    /// Keywords are case insensitive and the condition extends to the end of the input, line
    /// breaks included.
    pub fn parse(clause: &str) -> Result<Self, JoinParseError> {
        let mut input = clause.trim();
        let first = keyword(&mut input);
        if NOT_INNER.iter().any(|v| v.eq_ignore_ascii_case(first)) {
            return Err(JoinParseError::NotInner(first.to_ascii_uppercase()));
        }
        let join = if first.eq_ignore_ascii_case("INNER") {
            skip_whitespace(&mut input);
            keyword(&mut input)
        } else {
            first
        };
        if !join.eq_ignore_ascii_case("JOIN") {
            return Err(JoinParseError::MissingJoin(format!(
                "{}",
                truncate_long!(clause.trim())
            )));
        }
        if !skip_whitespace(&mut input) {
            return Err(JoinParseError::MissingTable);
        }
        let table_start = input;
        let table = table_token(&mut input);
        if table.is_empty() || table.eq_ignore_ascii_case("ON") {
            return Err(JoinParseError::MissingTable);
        }
        let mut table_end = input;
        skip_whitespace(&mut input);
        let next = peek_keyword(input);
        if next.eq_ignore_ascii_case("AS") {
            keyword(&mut input);
            skip_whitespace(&mut input);
            if table_token(&mut input).is_empty() {
                return Err(JoinParseError::MissingTable);
            }
            table_end = input;
            skip_whitespace(&mut input);
        } else if !next.eq_ignore_ascii_case("ON") && !input.is_empty() {
            table_token(&mut input);
            table_end = input;
            skip_whitespace(&mut input);
        }
        let table = &table_start[..table_start.len() - table_end.len()];
        if !peek_keyword(input).eq_ignore_ascii_case("ON") {
            return Err(JoinParseError::MissingOn(table.to_owned()));
        }
        keyword(&mut input);
        let on = input.trim();
        if on.is_empty() {
            return Err(JoinParseError::MissingCondition(table.to_owned()));
        }
        Ok(Self::new(table, on))
    }
}

impl FromStr for JoinClause {
    type Err = JoinParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JOIN {} ON {}", self.table, self.on)
    }
}
