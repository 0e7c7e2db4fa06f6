mod condition;
mod context;
mod sql_writer;
pub mod statement;

pub use condition::*;
pub use context::*;
pub use sql_writer::*;
