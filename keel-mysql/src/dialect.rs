use crate::MySQLSqlWriter;
use keel_core::{
    ColumnDefinition, Dialect, DialectOptions, Result, RowLabeled, SqlWriter, TableName,
    TypeKind, TypeRegistry, ValueMap, extract_parenthesis, is_affirmative, normalize_type,
    parse_enumeration_values,
    writer::{Condition, Context, Fragment, statement},
};

static MYSQL_TYPES: &[(&str, TypeKind)] = &[
    ("tinyint", TypeKind::Integer),
    ("smallint", TypeKind::Integer),
    ("mediumint", TypeKind::Integer),
    ("int", TypeKind::Integer),
    ("integer", TypeKind::Integer),
    ("bigint", TypeKind::Integer),
    ("decimal", TypeKind::Number),
    ("numeric", TypeKind::Number),
    ("float", TypeKind::Number),
    ("double", TypeKind::Number),
    ("real", TypeKind::Number),
    ("varchar", TypeKind::VarChar),
    ("char", TypeKind::VarChar),
    ("text", TypeKind::Text),
    ("tinytext", TypeKind::Text),
    ("mediumtext", TypeKind::Text),
    ("longtext", TypeKind::Text),
    ("datetime", TypeKind::DateTime),
    ("date", TypeKind::DateTime),
    ("timestamp", TypeKind::DateTime),
    ("time", TypeKind::Time),
    ("json", TypeKind::Json),
    ("enum", TypeKind::Enum),
    ("set", TypeKind::Set),
];

/// MySQL and MariaDB.
///
/// Identifiers are quoted with backticks, set `quoting_character` to `"` for servers running in
/// `ANSI_QUOTES` mode.
#[derive(Debug)]
pub struct MySQLDialect {
    writer: MySQLSqlWriter,
    registry: TypeRegistry,
    options: DialectOptions,
}

impl MySQLDialect {
    pub const DEFAULT_OPTIONS: DialectOptions = DialectOptions::new('`', "1", "0");

    pub fn new() -> Self {
        Self::with_options(Self::DEFAULT_OPTIONS)
    }

    pub fn with_options(options: DialectOptions) -> Self {
        Self {
            writer: MySQLSqlWriter::new(),
            registry: TypeRegistry::new(),
            options,
        }
    }

    fn column_definition(row: &RowLabeled) -> Result<ColumnDefinition> {
        let column_type = row.require_text("Type")?;
        let data_type = normalize_type(&column_type)
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_owned();
        let parameter = extract_parenthesis(&column_type);
        let number = || parameter.and_then(|v| v.split(',').next()?.trim().parse::<u32>().ok());
        let mut definition = ColumnDefinition {
            column_name: row.require_text("Field")?.into_owned(),
            column_type: column_type.to_string(),
            is_nullable: row.get_text("Null").is_some_and(|v| is_affirmative(&v)),
            column_default: row.get_text("Default").map(|v| v.into_owned()),
            auto_increment: row
                .get_text("Extra")
                .is_some_and(|v| v.to_ascii_lowercase().contains("auto_increment")),
            ..Default::default()
        };
        match data_type.as_str() {
            "varchar" | "char" => definition.character_maximum_length = number(),
            "datetime" | "timestamp" | "time" => definition.datetime_precision = number(),
            "enum" | "set" => {
                definition.enumeration_values =
                    Some(parameter.map(parse_enumeration_values).unwrap_or_default())
            }
            _ => {}
        }
        definition.data_type = data_type;
        Ok(definition)
    }
}

impl Default for MySQLDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for MySQLDialect {
    fn name(&self) -> &'static str {
        "mysql"
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
        MYSQL_TYPES
    }

    fn write_describe_query(&self, out: &mut String, table: &TableName) {
        let mut context = Context::new(Fragment::None, &self.options);
        out.push_str("DESCRIBE ");
        if let Some(schema) = &table.schema {
            self.writer.write_identifier_part(&mut context, out, schema);
            out.push(self.options.identifier_divider);
        }
        self.writer
            .write_identifier_part(&mut context, out, &table.name);
    }

    fn column_definitions(&self, rows: Vec<RowLabeled>) -> Result<Vec<ColumnDefinition>> {
        rows.iter().map(Self::column_definition).collect()
    }

    /// UPDATE, multi-table (`UPDATE t JOIN ... SET ...`) when joins are given.
    fn update(
        &self,
        table: &str,
        conditions: &[Condition],
        updates: &ValueMap,
        joins: &[&str],
    ) -> Result<String> {
        let mut out = String::new();
        let mut context = Context::new(Fragment::None, &self.options);
        if joins.is_empty() {
            statement::write_update(
                &self.writer,
                &mut context,
                &mut out,
                table,
                conditions,
                updates,
            );
        } else {
            statement::write_update_join(
                &self.writer,
                &mut context,
                &mut out,
                table,
                joins,
                conditions,
                updates,
            );
        }
        Ok(out)
    }
}
