mod factory;

pub use factory::*;
pub use keel_core::*;
pub use keel_mysql::{MySQLDialect, MySQLSqlWriter};
pub use keel_postgres::{PostgresDialect, PostgresSqlWriter};
pub use keel_sqlite::{SqliteDialect, SqliteSqlWriter};
