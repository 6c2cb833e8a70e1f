//! Generic row-store collaborator boundary.
//!
//! This module defines an infrastructure-facing abstraction over a hosted row
//! store exposing, per named collection, select/insert/update/delete on JSON
//! rows, without making any storage assumptions.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryRowStore;
pub use r#trait::{
    Direction, Filter, Order, Range, RowStore, Selection, StoreError, collections,
};
