//! Orchestration layer: inventory services composed over a row store.
//!
//! Reads flow straight from the catalog and dictionaries back to the caller;
//! every mutation goes through validation first, then exactly one store call
//! (or, for product creation, the explicit two-step product + movement
//! protocol in [`InventoryService`]).

mod codec;

pub mod dictionary_store;
pub mod inventory_service;
pub mod movement_ledger;
pub mod op_status;
pub mod product_catalog;

pub use dictionary_store::DictionaryStore;
pub use inventory_service::InventoryService;
pub use movement_ledger::MovementLedger;
pub use op_status::{OpState, OpStatus, ops};
pub use product_catalog::ProductCatalog;
