use crate::{Error, Field, FieldDef, Record, Result, Value};

/// Receives the leaf fields of a record, in declaration order.
pub trait FieldVisitor {
    fn visit(&mut self, def: &FieldDef, value: Option<&Value>) -> Result<()>;
}

/// Visits every leaf field of `record` depth-first, flattening embedded records.
///
/// Each embedded entry unwraps exactly one level of optional indirection, an
/// absent record is an error. The first error aborts the walk.
pub fn walk<V, R>(visitor: &mut V, record: &R) -> Result<()>
where
    V: FieldVisitor + ?Sized,
    R: Record + ?Sized,
{
    walk_fields(visitor, record.fields())
}

fn walk_fields<V: FieldVisitor + ?Sized>(visitor: &mut V, fields: Vec<Field<'_>>) -> Result<()> {
    for field in fields {
        match field {
            Field::Column { def, value } => {
                log::trace!("Visiting field `{}`", def.name);
                visitor.visit(def, value.as_ref())?;
            }
            Field::Embedded { name, record } => {
                let Some(record) = record else {
                    return Err(Error::msg(format!("Embedded record `{}` is absent", name)));
                };
                walk_fields(visitor, record.fields())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{FieldVisitor, walk};
    use crate::{Error, Field, FieldDef, Record, Result, Value};
    use std::sync::LazyLock;

    static DEFS: LazyLock<[FieldDef; 3]> = LazyLock::new(|| {
        [
            FieldDef::untagged("a"),
            FieldDef::untagged("b"),
            FieldDef::untagged("c"),
        ]
    });

    struct Inner;
    impl Record for Inner {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![Field::column(&DEFS[1], Some(Value::Int32(Some(2))))]
        }
    }

    struct Outer {
        inner: Option<Inner>,
    }
    impl Record for Outer {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::column(&DEFS[0], Some(Value::Int32(Some(1)))),
                Field::embedded("inner", &self.inner),
                Field::column(&DEFS[2], None),
            ]
        }
    }

    #[derive(Default)]
    struct Names(Vec<String>);
    impl FieldVisitor for Names {
        fn visit(&mut self, def: &FieldDef, _value: Option<&Value>) -> Result<()> {
            if def.name == "c" && !self.0.is_empty() && self.0[0] == "stop" {
                return Err(Error::msg("stopped"));
            }
            self.0.push(def.name.to_string());
            Ok(())
        }
    }

    #[test]
    fn flattens_depth_first() {
        let mut names = Names::default();
        walk(&mut names, &Outer { inner: Some(Inner) }).unwrap();
        assert_eq!(names.0, ["a", "b", "c"]);
    }

    #[test]
    fn unwraps_one_level() {
        let mut names = Names::default();
        walk(&mut names, &Some(Outer { inner: Some(Inner) })).unwrap();
        assert_eq!(names.0, ["a", "b", "c"]);

        let mut names = Names::default();
        let error = walk(&mut names, &Outer { inner: None }).unwrap_err();
        assert_eq!(error.to_string(), "Embedded record `inner` is absent");
        assert_eq!(names.0, ["a"]);
    }

    #[test]
    fn one_level_per_option() {
        let mut names = Names::default();
        walk(&mut names, &Some(Some(Outer { inner: Some(Inner) }))).unwrap();
        assert_eq!(names.0, ["a", "b", "c"]);

        let mut names = Names::default();
        let error = walk(&mut names, &Some(Option::<Outer>::None)).unwrap_err();
        assert!(error.to_string().ends_with("Outer` is absent"));
        assert!(names.0.is_empty());
    }

    #[test]
    fn first_error_aborts() {
        let mut names = Names(vec!["stop".into()]);
        let error = walk(&mut names, &Outer { inner: Some(Inner) }).unwrap_err();
        assert_eq!(error.to_string(), "stopped");
        assert_eq!(names.0, ["stop", "a", "b"]);
    }
}
