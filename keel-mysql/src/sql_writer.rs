use keel_core::{SqlWriter, writer::Context};
use std::fmt::Write;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// MySQL printer: backslash escaped strings and space separated date times.
#[derive(Default, Debug, Clone, Copy)]
pub struct MySQLSqlWriter {}

impl MySQLSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for MySQLSqlWriter {
    fn write_value_non_finite(&self, _context: &mut Context, out: &mut String, value: f64) {
        if value.is_nan() {
            out.push_str("NULL");
            return;
        }
        if value.is_sign_negative() {
            out.push('-');
        }
        out.push_str("1.0e+10000");
    }

    fn write_value_string(&self, _context: &mut Context, out: &mut String, value: &str) {
        out.push('\'');
        let mut position = 0;
        for (i, c) in value.char_indices() {
            let replace = match c {
                '\\' => "\\\\",
                '\'' => "\\'",
                '\0' => "\\0",
                '\n' => "\\n",
                '\r' => "\\r",
                '\x1a' => "\\Z",
                _ => continue,
            };
            out.push_str(&value[position..i]);
            out.push_str(replace);
            position = i + 1;
        }
        out.push_str(&value[position..]);
        out.push('\'');
    }

    fn write_value_timestamp(
        &self,
        context: &mut Context,
        out: &mut String,
        value: &PrimitiveDateTime,
    ) {
        out.push('\'');
        self.write_value_date(context, out, &value.date(), true);
        let _ = write!(
            out,
            " {:02}:{:02}:{:02}",
            value.hour(),
            value.minute(),
            value.second()
        );
        if value.microsecond() != 0 {
            let _ = write!(out, ".{:06}", value.microsecond());
        }
        out.push('\'');
    }

    fn write_value_timestamptz(
        &self,
        context: &mut Context,
        out: &mut String,
        value: &OffsetDateTime,
    ) {
        let value = value.to_offset(UtcOffset::UTC);
        self.write_value_timestamp(
            context,
            out,
            &PrimitiveDateTime::new(value.date(), value.time()),
        );
    }
}
