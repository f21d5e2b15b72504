use crate::SqlWriter;

/// `?` placeholders, and every `where` field skipped by `omitempty` still
/// leaves an empty fragment between the `AND` separators.
///
/// Reproduces text like `DELETE FROM t WHERE  AND name = ?` for consumers
/// that compare statements byte for byte.
#[derive(Default, Debug, Clone, Copy)]
pub struct LegacySqlWriter;

impl LegacySqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for LegacySqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn keep_omitted_conditions(&self) -> bool {
        true
    }
}
