//! # Data Model
//!
//! Plain DTOs shared by every stage: wire cells, decoded values, tables,
//! triples and visual elements.
//!
//! Design rule: NO transport types, NO Arrow types here.
//! This module is pure data — no I/O, no state, no async.

pub mod cell;
pub mod element;
pub mod table;
pub mod triple;
pub mod value;

pub use cell::{Binding, Cell, Head, RawCell, ResultSet, Results};
pub use element::{EdgeData, Element, NodeData};
pub use table::{Column, ColumnType, Table, XSD_NS};
pub use triple::Triple;
pub use value::Value;
