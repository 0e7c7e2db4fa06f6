mod dialect;
mod sql_writer;

pub use dialect::*;
pub use sql_writer::*;
