use crate::PostgresSqlWriter;
use keel_core::{
    ColumnDefinition, Dialect, DialectOptions, Result, RowLabeled, SqlWriter, TableName,
    TypeKind, TypeRegistry, ValueMap, write_information_schema_query,
    writer::{Condition, Context, Fragment, statement},
};

static POSTGRES_TYPES: &[(&str, TypeKind)] = &[
    ("smallint", TypeKind::Integer),
    ("integer", TypeKind::Integer),
    ("bigint", TypeKind::Integer),
    ("smallserial", TypeKind::Integer),
    ("serial", TypeKind::Integer),
    ("bigserial", TypeKind::Integer),
    ("numeric", TypeKind::Number),
    ("decimal", TypeKind::Number),
    ("real", TypeKind::Number),
    ("double precision", TypeKind::Number),
    ("money", TypeKind::Number),
    ("character varying", TypeKind::VarChar),
    ("character", TypeKind::VarChar),
    ("varchar", TypeKind::VarChar),
    ("char", TypeKind::VarChar),
    ("text", TypeKind::Text),
    ("date", TypeKind::DateTime),
    ("timestamp", TypeKind::DateTime),
    ("timestamp without time zone", TypeKind::DateTime),
    ("timestamp with time zone", TypeKind::DateTime),
    ("time", TypeKind::Time),
    ("time without time zone", TypeKind::Time),
    ("time with time zone", TypeKind::Time),
    ("boolean", TypeKind::Boolean),
    ("json", TypeKind::Json),
    ("jsonb", TypeKind::Json),
];

/// PostgreSQL. Updates involving other tables are written as `UPDATE ... FROM`.
#[derive(Debug)]
pub struct PostgresDialect {
    writer: PostgresSqlWriter,
    registry: TypeRegistry,
    options: DialectOptions,
}

impl PostgresDialect {
    pub const DEFAULT_OPTIONS: DialectOptions = DialectOptions::new('"', "true", "false");
    /// Schema of the tables described without one.
    pub const DEFAULT_SCHEMA: &'static str = "public";

    pub fn new() -> Self {
        Self::with_options(Self::DEFAULT_OPTIONS)
    }

    pub fn with_options(options: DialectOptions) -> Self {
        Self {
            writer: PostgresSqlWriter::new(),
            registry: TypeRegistry::new(),
            options,
        }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn sql_writer(&self) -> &dyn SqlWriter {
        &self.writer
    }

    fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    fn options(&self) -> &DialectOptions {
        &self.options
    }

    fn type_mapping(&self) -> &'static [(&'static str, TypeKind)] {
        POSTGRES_TYPES
    }

    fn write_describe_query(&self, out: &mut String, table: &TableName) {
        let mut context = Context::new(Fragment::None, &self.options);
        write_information_schema_query(
            &self.writer,
            &mut context,
            out,
            &table.name,
            Some(table.schema_or(Self::DEFAULT_SCHEMA)),
        );
    }

    fn column_definitions(&self, rows: Vec<RowLabeled>) -> Result<Vec<ColumnDefinition>> {
        rows.iter()
            .map(|row| {
                let mut definition = ColumnDefinition::from_information_schema(row)?;
                // Serial columns
                definition.auto_increment = definition
                    .column_default
                    .as_deref()
                    .is_some_and(|v| v.trim_start().starts_with("nextval("));
                Ok(definition)
            })
            .collect()
    }

    /// UPDATE, `UPDATE t SET ... FROM <joined table>` when joins are given. The first join must be
    /// an inner join with an ON clause.
    fn update(
        &self,
        table: &str,
        conditions: &[Condition],
        updates: &ValueMap,
        joins: &[&str],
    ) -> Result<String> {
        let mut out = String::new();
        let mut context = Context::new(Fragment::None, &self.options);
        statement::write_update_from(
            &self.writer,
            &mut context,
            &mut out,
            table,
            joins,
            conditions,
            updates,
        )?;
        Ok(out)
    }
}
