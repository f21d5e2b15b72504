mod context;
mod legacy;
mod postgres;
mod sql_writer;

pub use context::*;
pub use legacy::*;
pub use postgres::*;
pub use sql_writer::*;
