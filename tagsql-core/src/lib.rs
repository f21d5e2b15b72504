mod accumulator;
mod as_value;
mod condition;
mod record;
mod statement;
mod tag;
mod util;
mod value;
mod walker;
pub mod writer;

pub use accumulator::*;
pub use as_value::*;
pub use condition::*;
pub use record::*;
pub use statement::*;
pub use tag::*;
pub use util::*;
pub use value::*;
pub use walker::*;
pub use writer::{GenericSqlWriter, LegacySqlWriter, PostgresSqlWriter, SqlWriter};

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
