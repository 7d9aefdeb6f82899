//! Data model for jagged tables of nullable text

mod cell;
mod table;

pub use cell::Cell;
pub use table::{Row, Table};
