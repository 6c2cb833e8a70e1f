//! Infrastructure layer: the row-store collaborator and its implementations.

pub mod row_store;

pub use row_store::{
    Direction, Filter, InMemoryRowStore, Order, Range, RowStore, Selection, StoreError,
    collections,
};
