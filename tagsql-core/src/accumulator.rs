use crate::{Error, FieldDef, FieldVisitor, Predicate, Result, Tag, TagKind, Value};
use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
};

/// The four statements a record converts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    /// Whether tags of `kind` take part in this statement, the others are ignored.
    pub fn accepts(&self, kind: TagKind) -> bool {
        match kind {
            TagKind::Table => true,
            TagKind::Insert => *self == StatementKind::Insert,
            TagKind::Select => *self == StatementKind::Select,
            TagKind::Update => *self == StatementKind::Update,
            TagKind::Where | TagKind::Order | TagKind::Limit => *self != StatementKind::Insert,
            TagKind::Offset => *self == StatementKind::Select,
        }
    }
}

impl Display for StatementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        })
    }
}

/// State collected while walking a record, one instance per conversion.
///
/// `columns` and `values` stay aligned: for INSERT and UPDATE the value at
/// index `i` belongs to the column at index `i`, SELECT only fills `columns`.
/// A `None` condition is a `where` field skipped by `omitempty`.
#[derive(Debug, Clone)]
pub struct Accumulator {
    kind: StatementKind,
    table: Option<Cow<'static, str>>,
    columns: Vec<Cow<'static, str>>,
    values: Vec<Value>,
    conditions: Vec<Option<Predicate>>,
    order: Vec<Cow<'static, str>>,
    limit: u64,
    offset: u64,
}

impl Accumulator {
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            table: None,
            columns: Vec::new(),
            values: Vec::new(),
            conditions: Vec::new(),
            order: Vec::new(),
            limit: 0,
            offset: 0,
        }
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn columns(&self) -> &[Cow<'static, str>] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Column and value pairs, in the order they were collected.
    pub fn assignments(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + Clone {
        self.columns
            .iter()
            .map(|v| v.as_ref())
            .zip(self.values.iter())
    }

    pub fn conditions(&self) -> &[Option<Predicate>] {
        &self.conditions
    }

    pub fn order(&self) -> &[Cow<'static, str>] {
        &self.order
    }

    /// Zero means no `LIMIT` clause.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Zero means no `OFFSET` clause.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    fn set_table(&mut self, def: &FieldDef, table: &Cow<'static, str>) -> Result<()> {
        if let Some(current) = &self.table {
            return Err(Error::msg(format!(
                "table tag duplicate definition, field `{}` sets `{}` but the table is already `{}`",
                def.name, table, current
            )));
        }
        self.table = Some(table.clone());
        Ok(())
    }

    fn push_value(&mut self, column: &Cow<'static, str>, value: &Value) {
        if self.kind == StatementKind::Update {
            if let Some(i) = self.columns.iter().position(|v| v == column) {
                self.values[i] = value.clone();
                return;
            }
        }
        self.columns.push(column.clone());
        self.values.push(value.clone());
    }
}

/// Value of a field whose tag needs it.
fn readable<'v>(def: &FieldDef, kind: TagKind, value: Option<&'v Value>) -> Result<&'v Value> {
    value.ok_or_else(|| {
        Error::msg(format!(
            "Field `{}` has the `{}` tag but its value can not be read",
            def.name, kind
        ))
    })
}

fn count(def: &FieldDef, kind: TagKind, value: Option<&Value>) -> Result<u64> {
    readable(def, kind, value)?.as_unsigned().map_err(|e| {
        Error::msg(format!(
            "Field `{}` has an unexpected {} type, {}",
            def.name, kind, e
        ))
    })
}

impl FieldVisitor for Accumulator {
    fn visit(&mut self, def: &FieldDef, value: Option<&Value>) -> Result<()> {
        for kind in TagKind::ALL {
            if !self.kind.accepts(kind) {
                continue;
            }
            let Some(tag) = def.tag(kind) else {
                continue;
            };
            match tag {
                Tag::Table(table) => self.set_table(def, table)?,
                Tag::Insert(tag) => {
                    let value = readable(def, kind, value)?;
                    if value.is_zero() {
                        if tag.omitempty {
                            continue;
                        }
                        return Err(Error::msg(format!(
                            "Field `{}` insert value can not be empty",
                            def.name
                        )));
                    }
                    self.push_value(&tag.column, value);
                }
                Tag::Select(column) => self.columns.push(column.clone()),
                Tag::Update(tag) => {
                    let value = readable(def, kind, value)?;
                    if tag.omitempty && value.is_zero() {
                        continue;
                    }
                    self.push_value(&tag.column, value);
                }
                Tag::Where(condition) => {
                    let value = readable(def, kind, value)?;
                    let predicate = condition.predicate(value);
                    if predicate.is_none() {
                        log::trace!("Condition on `{}` omitted", condition.column);
                    }
                    self.conditions.push(predicate);
                }
                Tag::Order(order) => self.order.push(order.clone()),
                Tag::Limit => self.limit = count(def, kind, value)?,
                Tag::Offset => self.offset = count(def, kind, value)?,
            }
        }
        Ok(())
    }
}
