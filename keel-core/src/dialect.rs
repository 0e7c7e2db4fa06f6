use crate::{
    Column, ColumnDefinition, DialectOptions, Error, Executor, Result, RowLabeled, TableName,
    Type, TypeFactory, TypeKind, TypeRegistry, Value, ValueMap,
    stream::TryStreamExt,
    truncate_long,
    writer::{Condition, Context, Fragment, GenericSqlWriter, SqlWriter, statement},
};
use std::{fmt::Debug, sync::Arc};

/// SQL flavor: introspection, type resolution and statement rendering for one database family.
pub trait Dialect: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn sql_writer(&self) -> &dyn SqlWriter;

    /// Custom types of this dialect instance.
    fn registry(&self) -> &TypeRegistry;

    fn options(&self) -> &DialectOptions;

    /// Lowercase native type token to built-in type.
    fn type_mapping(&self) -> &'static [(&'static str, TypeKind)];

    /// Type of the columns whose native type is not in the mapping.
    fn fallback_type(&self) -> TypeKind {
        TypeKind::Text
    }

    /// Write the query listing the columns of `table`.
    fn write_describe_query(&self, out: &mut String, table: &TableName);

    /// Normalize the rows returned by the describe query.
    fn column_definitions(&self, rows: Vec<RowLabeled>) -> Result<Vec<ColumnDefinition>>;

    /// Resolve the type of a column: registered types newest first, then the built-in types.
    fn resolve_type(&self, definition: &ColumnDefinition) -> Type {
        let options = self.options();
        if let Some(result) = self.registry().resolve(definition, options) {
            return result;
        }
        if let Some(result) = Type::from_definition(definition, options) {
            return result;
        }
        let kind = self
            .type_mapping()
            .iter()
            .find_map(|(k, v)| (*k == definition.data_type).then_some(*v))
            .unwrap_or_else(|| {
                let fallback = self.fallback_type();
                log::warn!(
                    "Unknown {} type `{}` of column {}, falling back to {:?}",
                    self.name(),
                    definition.column_type,
                    definition.column_name,
                    fallback
                );
                fallback
            });
        Type::from_kind(kind, definition, options)
    }

    /// Push a custom type factory, consulted before the ones registered earlier. Registering a
    /// factory already present does nothing and returns `false`.
    fn register_type(&self, factory: Arc<dyn TypeFactory>) -> bool {
        self.registry().register_shared(factory)
    }

    fn reset_registered_types(&self) {
        self.registry().reset();
    }

    /// Columns of `table` (`schema.table` or `table`), in table order.
    fn describe<E: Executor>(
        &self,
        executor: &mut E,
        table: &str,
    ) -> impl Future<Output = Result<Vec<Column>>> + Send
    where
        Self: Sized,
    {
        describe(self, executor, table)
    }

    fn escape_identifier(&self, identifier: &str) -> String {
        let mut out = String::with_capacity(identifier.len() + 4);
        let mut context = Context::new(Fragment::None, self.options());
        self.sql_writer()
            .write_identifier_quoted(&mut context, &mut out, identifier);
        out
    }

    fn escape_value(&self, value: &Value) -> String {
        let mut out = String::new();
        let mut context = Context::new(Fragment::None, self.options());
        self.sql_writer().write_value(&mut context, &mut out, value);
        out
    }

    /// ` WHERE ...`, empty for no condition.
    fn where_clause(&self, conditions: &[Condition]) -> String {
        let mut out = String::new();
        let mut context = Context::new(Fragment::None, self.options());
        statement::write_where(self.sql_writer(), &mut context, &mut out, conditions);
        out
    }

    fn set_clause(&self, updates: &ValueMap) -> String {
        let mut out = String::new();
        let mut context = Context::new(Fragment::None, self.options());
        statement::write_set(self.sql_writer(), &mut context, &mut out, updates);
        out
    }

    /// Multi-row INSERT, empty when there are no rows.
    fn insert(&self, table: &str, rows: &[ValueMap]) -> String {
        let mut out = String::new();
        let mut context = Context::new(Fragment::None, self.options());
        statement::write_insert(self.sql_writer(), &mut context, &mut out, table, rows);
        out
    }

    fn delete(&self, table: &str, conditions: &[Condition]) -> String {
        let mut out = String::new();
        let mut context = Context::new(Fragment::None, self.options());
        statement::write_delete(self.sql_writer(), &mut context, &mut out, table, conditions);
        out
    }

    /// UPDATE statement, `joins` are `JOIN <table> ON <condition>` clauses.
    ///
    /// Dialects supporting multi-table updates override this, the default one fails when joins are
    /// given.
    fn update(
        &self,
        table: &str,
        conditions: &[Condition],
        updates: &ValueMap,
        joins: &[&str],
    ) -> Result<String> {
        if !joins.is_empty() {
            let error = Error::msg(format!(
                "Joins in update statements are not supported by {}",
                self.name()
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        let mut out = String::new();
        let mut context = Context::new(Fragment::None, self.options());
        statement::write_update(
            self.sql_writer(),
            &mut context,
            &mut out,
            table,
            conditions,
            updates,
        );
        Ok(out)
    }

    /// Composite membership test `(a,b) IN ((1,2),(3,4))`, `NOT IN` when `inverse`.
    fn composite_in(&self, columns: &[&str], values: &[Vec<Value>], inverse: bool) -> String {
        let mut out = String::new();
        let mut context = Context::new(Fragment::None, self.options());
        statement::write_composite_in(
            self.sql_writer(),
            &mut context,
            &mut out,
            columns,
            values,
            inverse,
            false,
        );
        out
    }
}

/// Describe `table` through `executor`, also for `dyn Dialect`.
pub async fn describe<D, E>(dialect: &D, executor: &mut E, table: &str) -> Result<Vec<Column>>
where
    D: Dialect + ?Sized,
    E: Executor,
{
    let table_name = TableName::parse(table, dialect.options().identifier_divider);
    let mut query = String::with_capacity(256);
    dialect.write_describe_query(&mut query, &table_name);
    log::debug!("Describe {} on {}: {}", table, dialect.name(), truncate_long!(query));
    let rows: Vec<RowLabeled> = executor.fetch(query).try_collect().await?;
    if rows.is_empty() {
        let error = Error::msg(format!("Unknown table {}", table));
        log::error!("{:#}", error);
        return Err(error);
    }
    let columns = dialect
        .column_definitions(rows)?
        .into_iter()
        .map(|definition| {
            let column_type = dialect.resolve_type(&definition);
            log::trace!(
                "Column {} of {} resolved to {}",
                definition.column_name,
                table,
                column_type
            );
            Column::new(definition, column_type)
        })
        .collect();
    Ok(columns)
}

static GENERIC_TYPES: &[(&str, TypeKind)] = &[
    ("integer", TypeKind::Integer),
    ("int", TypeKind::Integer),
    ("smallint", TypeKind::Integer),
    ("bigint", TypeKind::Integer),
    ("numeric", TypeKind::Number),
    ("decimal", TypeKind::Number),
    ("real", TypeKind::Number),
    ("double precision", TypeKind::Number),
    ("float", TypeKind::Number),
    ("character varying", TypeKind::VarChar),
    ("varchar", TypeKind::VarChar),
    ("character", TypeKind::VarChar),
    ("char", TypeKind::VarChar),
    ("text", TypeKind::Text),
    ("date", TypeKind::DateTime),
    ("timestamp", TypeKind::DateTime),
    ("time", TypeKind::Time),
    ("boolean", TypeKind::Boolean),
    ("json", TypeKind::Json),
];

/// ANSI dialect, used for databases without a dedicated one.
#[derive(Debug)]
pub struct GenericDialect {
    writer: GenericSqlWriter,
    registry: TypeRegistry,
    options: DialectOptions,
}

impl GenericDialect {
    pub const DEFAULT_OPTIONS: DialectOptions = DialectOptions::new('"', "1", "0");

    pub fn new() -> Self {
        Self::with_options(Self::DEFAULT_OPTIONS)
    }

    pub fn with_options(options: DialectOptions) -> Self {
        Self {
            writer: GenericSqlWriter::new(),
            registry: TypeRegistry::new(),
            options,
        }
    }
}

impl Default for GenericDialect {
    fn default() -> Self {
        Self::new()
    }
}

/// Write the `INFORMATION_SCHEMA.COLUMNS` query for `table` in `schema`.
pub fn write_information_schema_query(
    writer: &dyn SqlWriter,
    context: &mut Context,
    out: &mut String,
    table: &str,
    schema: Option<&str>,
) {
    out.push_str(
        "SELECT column_name,column_default,data_type,is_nullable,character_maximum_length,datetime_precision FROM INFORMATION_SCHEMA.COLUMNS WHERE table_name = ",
    );
    writer.write_value_string(context, out, table);
    if let Some(schema) = schema {
        out.push_str(" AND table_schema = ");
        writer.write_value_string(context, out, schema);
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
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
        GENERIC_TYPES
    }

    fn write_describe_query(&self, out: &mut String, table: &TableName) {
        let mut context = Context::new(Fragment::None, &self.options);
        write_information_schema_query(
            &self.writer,
            &mut context,
            out,
            &table.name,
            table.schema.as_deref(),
        );
    }

    fn column_definitions(&self, rows: Vec<RowLabeled>) -> Result<Vec<ColumnDefinition>> {
        rows.iter()
            .map(ColumnDefinition::from_information_schema)
            .collect()
    }
}
