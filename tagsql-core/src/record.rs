use crate::{FieldDef, Value};
use std::{any, rc::Rc, sync::Arc};

/// A type whose fields describe a row: table name, columns, conditions,
/// ordering and paging.
///
/// Usually implemented with `#[derive(Record)]`, which builds the field
/// descriptors at compile time. Hand-written implementations build them once
/// with [`FieldDef::parse`].
pub trait Record {
    /// Fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// The record to walk when embedded, `None` when it is absent.
    fn as_present(&self) -> Option<&dyn Record>
    where
        Self: Sized,
    {
        Some(self)
    }
}

/// One entry of a record.
pub enum Field<'a> {
    /// Leaf field. `value` is `None` when the field value cannot be read.
    Column {
        def: &'a FieldDef,
        value: Option<Value>,
    },
    /// Nested record whose fields are flattened into the parent. `record` is
    /// `None` when the optional record is absent.
    Embedded {
        name: &'a str,
        record: Option<&'a dyn Record>,
    },
}

impl<'a> Field<'a> {
    pub fn column(def: &'a FieldDef, value: Option<Value>) -> Self {
        Field::Column { def, value }
    }

    pub fn embedded<R: Record>(name: &'a str, record: &'a R) -> Self {
        Field::Embedded {
            name,
            record: record.as_present(),
        }
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl<T: Record + ?Sized> Record for &mut T {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl<T: Record + ?Sized> Record for Rc<T> {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl<T: Record + ?Sized> Record for Arc<T> {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

/// Walked directly, an absent record shows up as a single absent embedded
/// entry named after `T`. Embedded, the optional level is unwrapped by
/// [`Field::embedded`] and the entry keeps the field name.
impl<T: Record> Record for Option<T> {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::Embedded {
            name: any::type_name::<T>(),
            record: self.as_present(),
        }]
    }

    fn as_present(&self) -> Option<&dyn Record> {
        self.as_ref().map(|v| v as &dyn Record)
    }
}
