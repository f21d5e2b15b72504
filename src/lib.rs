//! Parameterized `SELECT`, `INSERT`, `UPDATE` and `DELETE` statements derived
//! from per-field tags.
//!
//! ```ignore
//! use tagsql::Record;
//!
//! #[derive(Record)]
//! struct User {
//!     #[sql(table = "my_table", insert = "id", where = "id")]
//!     id: i32,
//!     #[sql(insert = "name", select = "name")]
//!     name: String,
//! }
//!
//! let statement = tagsql::insert_sql(&user)?;
//! assert_eq!(statement.sql, "INSERT INTO my_table (id,name) VALUES (?,?)");
//! ```
extern crate self as tagsql;

pub use tagsql_core::*;
pub use tagsql_macros::Record;

static WRITER: GenericSqlWriter = GenericSqlWriter::new();

/// `SELECT` with `?` placeholders.
pub fn select_sql<R: Record + ?Sized>(record: &R) -> Result<Statement> {
    WRITER.select_sql(record)
}

/// `INSERT` with `?` placeholders.
pub fn insert_sql<R: Record + ?Sized>(record: &R) -> Result<Statement> {
    WRITER.insert_sql(record)
}

/// `UPDATE` with `?` placeholders.
pub fn update_sql<R: Record + ?Sized>(record: &R) -> Result<Statement> {
    WRITER.update_sql(record)
}

/// `DELETE` with `?` placeholders.
pub fn delete_sql<R: Record + ?Sized>(record: &R) -> Result<Statement> {
    WRITER.delete_sql(record)
}
