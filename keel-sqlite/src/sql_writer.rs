use keel_core::{SqlWriter, writer::Context};

#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteSqlWriter {}

impl SqliteSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for SqliteSqlWriter {
    /// Out of range literals parse to infinity, NaN is stored as NULL anyway.
    fn write_value_non_finite(&self, _context: &mut Context, out: &mut String, value: f64) {
        out.push_str(if value.is_nan() {
            "NULL"
        } else if value.is_sign_negative() {
            "-9e999"
        } else {
            "9e999"
        });
    }
}
