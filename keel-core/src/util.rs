pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut first = true;
    for v in values {
        if !first {
            out.push_str(separator);
        }
        first = false;
        f(out, v);
    }
}

/// Splits off the longest prefix of `input` whose chars satisfy `predicate`.
pub fn consume_while<'s>(input: &mut &'s str, mut predicate: impl FnMut(char) -> bool) -> &'s str {
    let len = input
        .char_indices()
        .find(|(_, c)| !predicate(*c))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    let (result, rest) = input.split_at(len);
    *input = rest;
    result
}

/// Lowercase native type token without its parameters: `INT(11) UNSIGNED` → `int`.
pub fn normalize_type(native: &str) -> String {
    let end = native.find('(').filter(|i| *i > 0).unwrap_or(native.len());
    native[..end].trim().to_ascii_lowercase()
}

/// Text between the first `(` and the last `)`: `varchar(255)` → `255`.
pub fn extract_parenthesis(native: &str) -> Option<&str> {
    let start = native.find('(')?;
    let end = native.rfind(')')?;
    (end > start).then(|| native[start + 1..end].trim())
}

/// Splits a quoted, comma separated list: `'a','b''s'` → `["a", "b's"]`.
pub fn parse_enumeration_values(list: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut chars = list.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\'' {
            continue;
        }
        let mut value = String::new();
        while let Some(c) = chars.next() {
            match c {
                '\'' if chars.peek() == Some(&'\'') => {
                    chars.next();
                    value.push('\'');
                }
                '\'' => break,
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        value.push(escaped);
                    }
                }
                _ => value.push(c),
            }
        }
        result.push(value);
    }
    result
}

/// Largest char boundary of `value` not after `max`.
pub fn floor_char_boundary(value: &str, max: usize) -> usize {
    if max >= value.len() {
        return value.len();
    }
    (0..=max).rev().find(|i| value.is_char_boundary(*i)).unwrap_or(0)
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            &$query[..$crate::floor_char_boundary(&$query, 497)].trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}
