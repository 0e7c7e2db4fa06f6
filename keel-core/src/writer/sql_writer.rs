use crate::{Value, writer::Context};
use std::fmt::Write;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($this:ident, $context:ident, $out:ident, $value:expr) => {{
        if $value.is_finite() {
            let mut buffer = ryu::Buffer::new();
            $out.push_str(buffer.format($value));
        } else {
            $this.write_value_non_finite($context, $out, $value as f64);
        }
    }};
}

/// Dialect printer rendering identifiers and values into SQL text.
pub trait SqlWriter: Send + Sync {
    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(
        &self,
        _context: &mut Context,
        out: &mut String,
        value: &str,
        search: char,
        replace: &str,
    ) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote a single identifier part, doubling inner quotes.
    fn write_identifier_part(&self, context: &mut Context, out: &mut String, value: &str) {
        let quote = context.options.quoting_character;
        let doubled: String = [quote, quote].iter().collect();
        out.push(quote);
        self.write_escaped(context, out, value, quote, &doubled);
        out.push(quote);
    }

    /// Quote a possibly qualified identifier: `schema.table` → `"schema"."table"`.
    fn write_identifier_quoted(&self, context: &mut Context, out: &mut String, value: &str) {
        let divider = context.options.identifier_divider;
        let mut first = true;
        for part in value.split(divider) {
            if !first {
                out.push(divider);
            }
            first = false;
            self.write_identifier_part(context, out, part);
        }
    }

    /// Render a concrete value (including proper quoting / escaping).
    fn write_value(&self, context: &mut Context, out: &mut String, value: &Value) {
        match value {
            Value::Null => self.write_value_none(context, out),
            Value::Boolean(v) => self.write_value_bool(context, out, *v),
            Value::Int8(v) => write_integer!(out, *v),
            Value::Int16(v) => write_integer!(out, *v),
            Value::Int32(v) => write_integer!(out, *v),
            Value::Int64(v) => write_integer!(out, *v),
            Value::UInt8(v) => write_integer!(out, *v),
            Value::UInt16(v) => write_integer!(out, *v),
            Value::UInt32(v) => write_integer!(out, *v),
            Value::UInt64(v) => write_integer!(out, *v),
            Value::Float32(v) => write_float!(self, context, out, *v),
            Value::Float64(v) => write_float!(self, context, out, *v),
            Value::Decimal(v) => drop(write!(out, "{}", v)),
            Value::Varchar(v) => self.write_value_string(context, out, v),
            Value::Blob(v) => self.write_value_blob(context, out, v.as_ref()),
            Value::Date(v) => self.write_value_date(context, out, v, false),
            Value::Time(v) => self.write_value_time(context, out, v, false),
            Value::Timestamp(v) => self.write_value_timestamp(context, out, v),
            Value::TimestampWithTimezone(v) => self.write_value_timestamptz(context, out, v),
            Value::Uuid(v) => drop(write!(out, "'{}'", v)),
            Value::Json(v) => self.write_value_json(context, out, v),
            Value::Raw(v) => out.push_str(v),
        };
    }

    /// Render NULL literal.
    fn write_value_none(&self, _context: &mut Context, out: &mut String) {
        out.push_str("NULL");
    }

    /// Render boolean literal using the tokens of the dialect.
    fn write_value_bool(&self, context: &mut Context, out: &mut String, value: bool) {
        let token: &str = if value {
            &context.options.boolean_true
        } else {
            &context.options.boolean_false
        };
        out.push_str(token);
    }

    /// Render infinity and NaN as the quoted text most databases cast back to a float.
    fn write_value_non_finite(&self, context: &mut Context, out: &mut String, value: f64) {
        let text = if value.is_nan() {
            "NaN"
        } else if value.is_sign_negative() {
            "-Infinity"
        } else {
            "Infinity"
        };
        self.write_value_string(context, out, text);
    }

    /// Render and escape a string literal using single quotes.
    fn write_value_string(&self, context: &mut Context, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(context, out, value, '\'', "''");
        out.push('\'');
    }

    /// Render a blob literal as hexadecimal string.
    fn write_value_blob(&self, _context: &mut Context, out: &mut String, value: &[u8]) {
        out.push_str("X'");
        out.push_str(&hex::encode_upper(value));
        out.push('\'');
    }

    /// Render a DATE literal (optionally as part of TIMESTAMP composition).
    fn write_value_date(
        &self,
        _context: &mut Context,
        out: &mut String,
        value: &Date,
        timestamp: bool,
    ) {
        let b = if timestamp { "" } else { "'" };
        let _ = write!(
            out,
            "{b}{:04}-{:02}-{:02}{b}",
            value.year(),
            value.month() as u8,
            value.day()
        );
    }

    /// Render a TIME literal (optionally as part of TIMESTAMP composition).
    fn write_value_time(
        &self,
        _context: &mut Context,
        out: &mut String,
        value: &Time,
        timestamp: bool,
    ) {
        let b = if timestamp { "" } else { "'" };
        let _ = write!(
            out,
            "{b}{:02}:{:02}:{:02}",
            value.hour(),
            value.minute(),
            value.second(),
        );
        let mut subsecond = value.nanosecond();
        if subsecond != 0 {
            let mut width = 9;
            while subsecond % 10 == 0 {
                subsecond /= 10;
                width -= 1;
            }
            let _ = write!(out, ".{:0width$}", subsecond);
        }
        out.push_str(b);
    }

    /// Render a TIMESTAMP literal.
    fn write_value_timestamp(
        &self,
        context: &mut Context,
        out: &mut String,
        value: &PrimitiveDateTime,
    ) {
        out.push('\'');
        self.write_value_date(context, out, &value.date(), true);
        out.push('T');
        self.write_value_time(context, out, &value.time(), true);
        out.push('\'');
    }

    /// Render a TIMESTAMPTZ literal, normalized to UTC.
    fn write_value_timestamptz(
        &self,
        context: &mut Context,
        out: &mut String,
        value: &OffsetDateTime,
    ) {
        let date_time = value.to_offset(UtcOffset::UTC);
        out.push('\'');
        self.write_value_date(context, out, &date_time.date(), true);
        out.push('T');
        self.write_value_time(context, out, &date_time.time(), true);
        out.push_str("Z'");
    }

    /// Render a JSON document as string literal.
    fn write_value_json(&self, context: &mut Context, out: &mut String, value: &serde_json::Value) {
        self.write_value_string(context, out, &value.to_string());
    }
}

/// Fallback generic SQL writer, ANSI quoting and escaping.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {}
