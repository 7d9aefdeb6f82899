//! bsv - Binary Separated Values
//!
//! A binary format for jagged tables of nullable text. Rows and cells are
//! framed by four reserved bytes that cannot occur in UTF-8, so values are
//! stored verbatim with no escaping.

pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;
pub mod persist;

pub use codec::{decode, encode};
pub use config::Config;
pub use error::{DecodeError, EncodeError, PersistError};
pub use model::{Cell, Row, Table};
