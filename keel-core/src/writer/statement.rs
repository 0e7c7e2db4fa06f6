//! Statement fragments shared by every dialect.
//!
//! Each function appends to `out` and takes the escaping capability of the dialect as a
//! `&dyn SqlWriter`, dialects compose them into their statement variants.

use crate::{
    Error, JoinClause, Result, Value, ValueMap, separated_by,
    writer::{Condition, Context, Fragment, SqlWriter},
};
use indexmap::IndexSet;

/// Write ` WHERE <conditions>`, nothing for an empty list.
pub fn write_where(
    writer: &dyn SqlWriter,
    context: &mut Context,
    out: &mut String,
    conditions: &[Condition],
) {
    if conditions.is_empty() {
        return;
    }
    let mut context = context.switch_fragment(Fragment::SqlWhere);
    out.push_str(" WHERE ");
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            out.push(' ');
            if !condition.has_operator() {
                out.push_str("AND ");
            }
        }
        write_condition(writer, &mut context, out, condition);
    }
}

pub fn write_condition(
    writer: &dyn SqlWriter,
    context: &mut Context,
    out: &mut String,
    condition: &Condition,
) {
    match condition {
        Condition::Eq(column, value) => {
            writer.write_identifier_quoted(context, out, column);
            if value.is_null() && context.fragment == Fragment::SqlWhere {
                out.push_str(" IS NULL");
            } else {
                out.push_str(" = ");
                writer.write_value(context, out, value);
            }
        }
        Condition::Raw(fragment) => out.push_str(fragment.trim()),
    }
}

/// Write `"column" = value` pairs in insertion order.
pub fn write_set(
    writer: &dyn SqlWriter,
    context: &mut Context,
    out: &mut String,
    updates: &ValueMap,
) {
    separated_by(
        out,
        updates,
        |out, (column, value)| {
            writer.write_identifier_quoted(context, out, column);
            out.push_str(" = ");
            writer.write_value(context, out, value);
        },
        ", ",
    );
}

/// Emit a multi-row INSERT over the union of the columns of `rows`, in first seen order.
///
/// A row missing a column gets `NULL` for it. Nothing is written when there are no rows.
pub fn write_insert(
    writer: &dyn SqlWriter,
    context: &mut Context,
    out: &mut String,
    table: &str,
    rows: &[ValueMap],
) {
    let columns: IndexSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(|k| k.as_ref()))
        .collect();
    if columns.is_empty() {
        return;
    }
    out.reserve(64 + rows.len() * columns.len() * 8);
    out.push_str("INSERT INTO ");
    writer.write_identifier_quoted(context, out, table);
    out.push_str(" (");
    separated_by(
        out,
        &columns,
        |out, column| writer.write_identifier_quoted(context, out, column),
        ",",
    );
    out.push_str(") VALUES ");
    separated_by(
        out,
        rows,
        |out, row| {
            out.push('(');
            separated_by(
                out,
                &columns,
                |out, column| {
                    writer.write_value(
                        context,
                        out,
                        row.get(*column).unwrap_or(&Value::Null),
                    )
                },
                ",",
            );
            out.push(')');
        },
        ",",
    );
}

/// Emit `DELETE FROM <table>` with its WHERE clause.
pub fn write_delete(
    writer: &dyn SqlWriter,
    context: &mut Context,
    out: &mut String,
    table: &str,
    conditions: &[Condition],
) {
    out.push_str("DELETE FROM ");
    writer.write_identifier_quoted(context, out, table);
    write_where(writer, context, out, conditions);
}

/// Emit `(<columns>) [NOT ]IN ((v, v), ...)`, with `values_list` the tuples are wrapped in a
/// `VALUES` constructor.
///
/// Columns are expressions and are written verbatim. Testing against no tuple at all writes a
/// constant predicate, `1 = 0` for IN and `1 = 1` for NOT IN.
pub fn write_composite_in(
    writer: &dyn SqlWriter,
    context: &mut Context,
    out: &mut String,
    columns: &[&str],
    values: &[Vec<Value>],
    inverse: bool,
    values_list: bool,
) {
    if values.is_empty() {
        out.push_str(if inverse { "1 = 1" } else { "1 = 0" });
        return;
    }
    out.push('(');
    out.push_str(&columns.join(","));
    out.push_str(if inverse { ") NOT IN (" } else { ") IN (" });
    if values_list {
        out.push_str("VALUES ");
    }
    separated_by(
        out,
        values,
        |out, tuple| {
            out.push('(');
            separated_by(
                out,
                tuple,
                |out, v| writer.write_value(context, out, v),
                ",",
            );
            out.push(')');
        },
        ",",
    );
    out.push(')');
}

/// Emit `UPDATE <table> SET <updates>` with its WHERE clause.
pub fn write_update(
    writer: &dyn SqlWriter,
    context: &mut Context,
    out: &mut String,
    table: &str,
    conditions: &[Condition],
    updates: &ValueMap,
) {
    out.push_str("UPDATE ");
    writer.write_identifier_quoted(context, out, table);
    out.push_str(" SET ");
    write_set(writer, context, out, updates);
    write_where(writer, context, out, conditions);
}

/// Emit `UPDATE <table> <joins...> SET <updates>` with its WHERE clause.
///
/// The table is a reference the joins may qualify or alias, it is written verbatim like the
/// joins.
pub fn write_update_join(
    writer: &dyn SqlWriter,
    context: &mut Context,
    out: &mut String,
    table: &str,
    joins: &[&str],
    conditions: &[Condition],
    updates: &ValueMap,
) {
    out.push_str("UPDATE ");
    out.push_str(table);
    for join in joins {
        out.push(' ');
        out.push_str(join.trim());
    }
    out.push_str(" SET ");
    write_set(writer, context, out, updates);
    write_where(writer, context, out, conditions);
}

/// Emit `UPDATE <table> SET <updates> FROM <joined table> [<joins...>]`, the ON condition of the
/// first join becomes the first WHERE condition.
///
/// Only an inner join with an ON clause has this translation, any other first join is an error.
/// Without joins this is a plain UPDATE.
pub fn write_update_from(
    writer: &dyn SqlWriter,
    context: &mut Context,
    out: &mut String,
    table: &str,
    joins: &[&str],
    conditions: &[Condition],
    updates: &ValueMap,
) -> Result<()> {
    let Some((first, rest)) = joins.split_first() else {
        write_update(writer, context, out, table, conditions, updates);
        return Ok(());
    };
    let join = JoinClause::parse(first).map_err(|e| {
        let error = Error::new(e)
            .context("Only inner joins with on clause are allowed in update from statements");
        log::error!("{:#}", error);
        error
    })?;
    out.push_str("UPDATE ");
    out.push_str(table);
    out.push_str(" SET ");
    write_set(writer, context, out, updates);
    out.push_str(" FROM ");
    out.push_str(&join.table);
    for join in rest {
        out.push(' ');
        out.push_str(join.trim());
    }
    let conditions: Vec<Condition> = std::iter::once(Condition::Raw(join.on.into()))
        .chain(conditions.iter().cloned())
        .collect();
    write_where(writer, context, out, &conditions);
    Ok(())
}
