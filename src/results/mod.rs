//! # Result Decoding
//!
//! SPARQL JSON bindings → typed [`Table`](crate::model::Table).
//! Pure functions — no I/O, no session state.

pub mod binding;
pub mod resolver;

pub use binding::{coerce, decode, Decoded};
pub use resolver::to_table;

use crate::model::{ResultSet, Table};
use crate::Result;

/// Parse a JSON results document and decode it into a table.
pub fn parse_table(json: &[u8]) -> Result<Table> {
    let results = ResultSet::from_slice(json)?;
    to_table(&results)
}
