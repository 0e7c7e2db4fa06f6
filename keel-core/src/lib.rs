mod column;
mod dialect;
mod error;
mod executor;
mod join;
mod options;
mod parse;
mod registry;
mod row;
mod table_ref;
mod types;
mod util;
mod validator;
mod value;
pub mod writer;

pub use ::anyhow::Context;
pub use column::*;
pub use dialect::*;
pub use error::*;
pub use executor::*;
pub use join::*;
pub use options::*;
pub use parse::*;
pub use registry::*;
pub use row::*;
pub use table_ref::*;
pub use types::*;
pub use util::*;
pub use validator::*;
pub use value::*;
pub use writer::{Condition, GenericSqlWriter, SqlWriter};
pub mod stream {
    pub use ::futures::stream::*;
}

pub type Result<T, E = Error> = anyhow::Result<T, E>;
pub type Error = anyhow::Error;
