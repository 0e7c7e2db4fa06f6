use crate::{
    Context, Dialect, DialectOptions, GenericDialect, MySQLDialect, PostgresDialect, Result,
    SqliteDialect, truncate_long,
};
use url::Url;

type Build = fn(DialectOptions) -> Box<dyn Dialect>;

fn mysql(options: DialectOptions) -> Box<dyn Dialect> {
    Box::new(MySQLDialect::with_options(options))
}

fn postgres(options: DialectOptions) -> Box<dyn Dialect> {
    Box::new(PostgresDialect::with_options(options))
}

fn sqlite(options: DialectOptions) -> Box<dyn Dialect> {
    Box::new(SqliteDialect::with_options(options))
}

fn generic(options: DialectOptions) -> Box<dyn Dialect> {
    Box::new(GenericDialect::with_options(options))
}

/// Dialect for a connection url, picked from its scheme.
///
/// `mysql` and `mariadb` map to MySQL, `postgres` and `postgresql` to Postgres, `sqlite` to
/// SQLite and any other scheme to the generic dialect. Query parameters naming a dialect option
/// (`quoting_character`, `identifier_divider`, `boolean_true`, `boolean_false`) override its
/// default, the other ones are left to the connection layer.
pub fn dialect_from_url(url: &str) -> Result<Box<dyn Dialect>> {
    let context = || format!("While selecting the dialect for `{}`", truncate_long!(url));
    let parsed = Url::parse(url).with_context(context)?;
    let scheme = parsed.scheme().to_ascii_lowercase();
    let (mut options, build) = match scheme.as_str() {
        "mysql" | "mariadb" => (MySQLDialect::DEFAULT_OPTIONS, mysql as Build),
        "postgres" | "postgresql" => (PostgresDialect::DEFAULT_OPTIONS, postgres as Build),
        "sqlite" => (SqliteDialect::DEFAULT_OPTIONS, sqlite as Build),
        _ => {
            log::debug!(
                "No dedicated dialect for the scheme `{}`, using the generic one",
                scheme
            );
            (GenericDialect::DEFAULT_OPTIONS, generic as Build)
        }
    };
    for (key, value) in parsed.query_pairs() {
        if let Err(e) = options.set(&key, &value) {
            let error = e.context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
    }
    Ok(build(options))
}
