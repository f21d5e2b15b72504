use super::sql_writer::write_integer;
use crate::{SqlWriter, writer::Context};

/// Numbered placeholders: `$1`, `$2`, ..
#[derive(Default, Debug, Clone, Copy)]
pub struct PostgresSqlWriter;

impl PostgresSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for PostgresSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_placeholder(&self, context: &mut Context, out: &mut String) {
        out.push('$');
        write_integer!(out, context.counter());
    }
}
