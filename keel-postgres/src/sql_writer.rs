use keel_core::{SqlWriter, writer::Context};

#[derive(Default, Debug, Clone, Copy)]
pub struct PostgresSqlWriter {}

impl PostgresSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for PostgresSqlWriter {
    /// Bytea hex format: `'\x0a1b'`.
    fn write_value_blob(&self, _context: &mut Context, out: &mut String, value: &[u8]) {
        out.push_str("'\\x");
        out.push_str(&hex::encode(value));
        out.push('\'');
    }
}
