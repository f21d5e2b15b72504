use crate::{
    Accumulator, Predicate, Record, Result, Statement, StatementKind, Value, convert, joined_by,
    separated_by, writer::Context,
};
use std::borrow::Cow;

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
pub(super) use write_integer;

/// Printer turning the collected fragments into SQL text and arguments.
///
/// Identifiers, operators and order-by text are written verbatim, no quoting
/// or validation happens here. Dialects override single methods, typically
/// [`SqlWriter::write_placeholder`].
pub trait SqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter;

    /// Whether `where` fields skipped by `omitempty` still produce an empty
    /// fragment between the `AND` separators.
    fn keep_omitted_conditions(&self) -> bool {
        false
    }

    /// Render the placeholder of the argument just pushed to the context.
    fn write_placeholder(&self, _context: &mut Context, out: &mut String) {
        out.push('?');
    }

    /// Bind an argument and write its placeholder.
    fn write_argument(&self, context: &mut Context, out: &mut String, value: &Value) {
        context.arguments.push(value.clone());
        self.write_placeholder(context, out);
    }

    fn write_identifier(&self, _context: &mut Context, out: &mut String, value: &str) {
        out.push_str(value);
    }

    fn write_columns(&self, context: &mut Context, out: &mut String, columns: &[Cow<'static, str>]) {
        separated_by(
            out,
            columns,
            |out, v| self.write_identifier(context, out, v),
            ",",
        );
    }

    /// `<column> <operator> <placeholder>`
    fn write_predicate(&self, context: &mut Context, out: &mut String, predicate: &Predicate) {
        self.write_identifier(context, out, &predicate.column);
        out.push(' ');
        out.push_str(&predicate.operator);
        out.push(' ');
        self.write_argument(context, out, &predicate.argument);
    }

    fn write_where(&self, context: &mut Context, out: &mut String, conditions: &[Option<Predicate>]) {
        if self.keep_omitted_conditions() {
            if conditions.is_empty() {
                return;
            }
            out.push_str(" WHERE ");
            joined_by(
                out,
                conditions,
                |out, v| match v {
                    Some(v) => self.write_predicate(context, out, v),
                    None => log::warn!("Writing an empty fragment for an omitted condition"),
                },
                " AND ",
            );
        } else {
            let mut conditions = conditions.iter().flatten().peekable();
            if conditions.peek().is_none() {
                return;
            }
            out.push_str(" WHERE ");
            joined_by(
                out,
                conditions,
                |out, v| self.write_predicate(context, out, v),
                " AND ",
            );
        }
    }

    fn write_order_by(&self, _context: &mut Context, out: &mut String, order: &[Cow<'static, str>]) {
        if order.is_empty() {
            return;
        }
        out.push_str(" ORDER BY ");
        joined_by(out, order, |out, v| out.push_str(v), ",");
    }

    /// `LIMIT` then `OFFSET`, each only when positive.
    fn write_limit_offset(&self, _context: &mut Context, out: &mut String, limit: u64, offset: u64) {
        if limit > 0 {
            out.push_str(" LIMIT ");
            write_integer!(out, limit);
        }
        if offset > 0 {
            out.push_str(" OFFSET ");
            write_integer!(out, offset);
        }
    }

    /// `SELECT <columns> FROM <table> [WHERE] [ORDER BY] [LIMIT] [OFFSET]`
    fn write_select(&self, context: &mut Context, out: &mut String, table: &str, value: &Accumulator) {
        out.push_str("SELECT ");
        self.write_columns(context, out, value.columns());
        out.push_str(" FROM ");
        self.write_identifier(context, out, table);
        self.write_where(context, out, value.conditions());
        self.write_order_by(context, out, value.order());
        self.write_limit_offset(context, out, value.limit(), value.offset());
    }

    /// `INSERT INTO <table> (<columns>) VALUES (<placeholders>)`
    fn write_insert(&self, context: &mut Context, out: &mut String, table: &str, value: &Accumulator) {
        out.push_str("INSERT INTO ");
        self.write_identifier(context, out, table);
        out.push_str(" (");
        self.write_columns(context, out, value.columns());
        out.push_str(") VALUES (");
        joined_by(
            out,
            value.values(),
            |out, v| self.write_argument(context, out, v),
            ",",
        );
        out.push(')');
    }

    /// `UPDATE <table> SET <column> = <placeholder>, .. [WHERE] [ORDER BY] [LIMIT]`
    fn write_update(&self, context: &mut Context, out: &mut String, table: &str, value: &Accumulator) {
        out.push_str("UPDATE ");
        self.write_identifier(context, out, table);
        out.push_str(" SET ");
        joined_by(
            out,
            value.assignments(),
            |out, (column, v)| {
                self.write_identifier(context, out, column);
                out.push_str(" = ");
                self.write_argument(context, out, v);
            },
            ", ",
        );
        self.write_where(context, out, value.conditions());
        self.write_order_by(context, out, value.order());
        self.write_limit_offset(context, out, value.limit(), 0);
    }

    /// `DELETE FROM <table> [WHERE] [ORDER BY] [LIMIT]`
    fn write_delete(&self, context: &mut Context, out: &mut String, table: &str, value: &Accumulator) {
        out.push_str("DELETE FROM ");
        self.write_identifier(context, out, table);
        self.write_where(context, out, value.conditions());
        self.write_order_by(context, out, value.order());
        self.write_limit_offset(context, out, value.limit(), 0);
    }

    fn select_sql<R: Record + ?Sized>(&self, record: &R) -> Result<Statement>
    where
        Self: Sized,
    {
        convert(self.as_dyn(), StatementKind::Select, record)
    }

    fn insert_sql<R: Record + ?Sized>(&self, record: &R) -> Result<Statement>
    where
        Self: Sized,
    {
        convert(self.as_dyn(), StatementKind::Insert, record)
    }

    fn update_sql<R: Record + ?Sized>(&self, record: &R) -> Result<Statement>
    where
        Self: Sized,
    {
        convert(self.as_dyn(), StatementKind::Update, record)
    }

    fn delete_sql<R: Record + ?Sized>(&self, record: &R) -> Result<Statement>
    where
        Self: Sized,
    {
        convert(self.as_dyn(), StatementKind::Delete, record)
    }
}

/// `?` placeholders, omitted conditions leave no trace in the text.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }
}
