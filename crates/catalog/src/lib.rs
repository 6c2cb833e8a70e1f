//! Product catalog domain module.
//!
//! This crate contains business rules for products and the classification
//! dictionaries, implemented purely as deterministic domain logic (no IO,
//! no HTTP, no storage).

pub mod dictionary;
pub mod product;

pub use dictionary::{DictionaryEntry, DictionaryKind, normalize_entry_name, sort_entries};
pub use product::{NewProduct, Product, validate_low_stock_level};
