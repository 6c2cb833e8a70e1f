//! Movement ledger domain module.
//!
//! The ledger is an append-only log of stock-affecting events and the single
//! source of truth for how a product's quantity reached its current value.
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod movement;

pub use movement::{DraftMovement, Movement, MovementReason, MovementType, replay};
