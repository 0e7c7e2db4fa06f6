use crate::SqliteSqlWriter;
use keel_core::{
    ColumnDefinition, Dialect, DialectOptions, Result, RowLabeled, SqlWriter, TableName,
    TypeKind, TypeRegistry, Value, ValueMap, extract_parenthesis, normalize_type,
    writer::{Condition, Context, Fragment, statement},
};

static SQLITE_TYPES: &[(&str, TypeKind)] = &[
    ("integer", TypeKind::Integer),
    ("int", TypeKind::Integer),
    ("tinyint", TypeKind::Integer),
    ("smallint", TypeKind::Integer),
    ("mediumint", TypeKind::Integer),
    ("bigint", TypeKind::Integer),
    ("real", TypeKind::Number),
    ("double", TypeKind::Number),
    ("float", TypeKind::Number),
    ("numeric", TypeKind::Number),
    ("decimal", TypeKind::Number),
    ("varchar", TypeKind::VarChar),
    ("character", TypeKind::VarChar),
    ("char", TypeKind::VarChar),
    ("text", TypeKind::Text),
    ("clob", TypeKind::Text),
    ("datetime", TypeKind::DateTime),
    ("date", TypeKind::DateTime),
    ("timestamp", TypeKind::DateTime),
    ("time", TypeKind::Time),
    ("boolean", TypeKind::Boolean),
    ("json", TypeKind::Json),
];

/// SQLite. Composite membership tests use a `VALUES` list and joined updates `UPDATE ... FROM`.
#[derive(Debug)]
pub struct SqliteDialect {
    writer: SqliteSqlWriter,
    registry: TypeRegistry,
    options: DialectOptions,
}

impl SqliteDialect {
    pub const DEFAULT_OPTIONS: DialectOptions = DialectOptions::new('"', "1", "0");

    pub fn new() -> Self {
        Self::with_options(Self::DEFAULT_OPTIONS)
    }

    pub fn with_options(options: DialectOptions) -> Self {
        Self {
            writer: SqliteSqlWriter::new(),
            registry: TypeRegistry::new(),
            options,
        }
    }
}

impl Default for SqliteDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
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
        SQLITE_TYPES
    }

    fn write_describe_query(&self, out: &mut String, table: &TableName) {
        let mut context = Context::new(Fragment::None, &self.options);
        out.push_str("PRAGMA ");
        if let Some(schema) = &table.schema {
            self.writer.write_identifier_part(&mut context, out, schema);
            out.push('.');
        }
        out.push_str("table_info(");
        self.writer
            .write_identifier_part(&mut context, out, &table.name);
        out.push(')');
    }

    fn column_definitions(&self, rows: Vec<RowLabeled>) -> Result<Vec<ColumnDefinition>> {
        let primary_key = rows
            .iter()
            .filter(|row| row.get_u32("pk").is_some_and(|v| v > 0))
            .count();
        rows.iter()
            .map(|row| {
                let column_type = row.get_text("type").unwrap_or_default();
                let data_type = normalize_type(&column_type);
                let mut definition = ColumnDefinition {
                    column_name: row.require_text("name")?.into_owned(),
                    column_type: column_type.to_string(),
                    is_nullable: row.get_u32("notnull") == Some(0),
                    column_default: row.get_text("dflt_value").map(|v| v.into_owned()),
                    ..Default::default()
                };
                if matches!(data_type.as_str(), "varchar" | "character" | "char") {
                    definition.character_maximum_length =
                        extract_parenthesis(&column_type).and_then(|v| v.parse().ok());
                }
                // A single INTEGER primary key is an alias of the rowid
                definition.auto_increment = primary_key == 1
                    && data_type == "integer"
                    && row.get_u32("pk").is_some_and(|v| v > 0);
                definition.data_type = data_type;
                Ok(definition)
            })
            .collect()
    }

    /// UPDATE, `UPDATE t SET ... FROM <joined table>` when joins are given.
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

    /// Composite membership test on a `VALUES` list: `(a,b) IN (VALUES (1,2),(3,4))`.
    fn composite_in(&self, columns: &[&str], values: &[Vec<Value>], inverse: bool) -> String {
        let mut out = String::new();
        let mut context = Context::new(Fragment::None, &self.options);
        statement::write_composite_in(
            &self.writer,
            &mut context,
            &mut out,
            columns,
            values,
            inverse,
            true,
        );
        out
    }
}
