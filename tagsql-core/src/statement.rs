use crate::{
    Accumulator, Error, Record, Result, SqlWriter, StatementKind, Value, truncate_long, walk,
    writer::Context,
};
use std::fmt::{self, Display, Formatter};

/// Generated SQL text with one argument for each placeholder, in text order.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub arguments: Vec<Value>,
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Checks the collected state is enough for the statement and writes it.
pub fn assemble(writer: &dyn SqlWriter, value: &Accumulator) -> Result<Statement> {
    let Some(table) = value.table().filter(|v| !v.is_empty()) else {
        return Err(Error::msg("table can not be empty"));
    };
    let kind = value.kind();
    match kind {
        StatementKind::Select if value.columns().is_empty() => {
            return Err(Error::msg("no select columns"));
        }
        StatementKind::Insert if value.columns().is_empty() => {
            return Err(Error::msg("no insert columns"));
        }
        StatementKind::Update if value.columns().is_empty() => {
            return Err(Error::msg("no update column"));
        }
        _ => {}
    }
    let mut context = Context::new();
    let mut out = String::with_capacity(64 + table.len() + value.columns().len() * 16);
    match kind {
        StatementKind::Select => writer.write_select(&mut context, &mut out, table, value),
        StatementKind::Insert => writer.write_insert(&mut context, &mut out, table, value),
        StatementKind::Update => writer.write_update(&mut context, &mut out, table, value),
        StatementKind::Delete => writer.write_delete(&mut context, &mut out, table, value),
    }
    Ok(Statement {
        sql: out,
        arguments: context.arguments,
    })
}

/// Walks `record` with a fresh [`Accumulator`] for `kind` and writes the statement.
///
/// Nothing is written when the walk fails, the first error is returned as is.
pub fn convert<R: Record + ?Sized>(
    writer: &dyn SqlWriter,
    kind: StatementKind,
    record: &R,
) -> Result<Statement> {
    let mut accumulator = Accumulator::new(kind);
    walk(&mut accumulator, record)?;
    let statement = assemble(writer, &accumulator)?;
    log::debug!(
        "{} statement with {} arguments: {}",
        kind,
        statement.arguments.len(),
        truncate_long!(statement.sql)
    );
    Ok(statement)
}
