//! Charging station inventory.
//!
//! Loads stations and their charger aggregates from a JSON inventory file
//! at startup; the inventory can be refreshed periodically while serving.

mod error;
mod inventory;
mod source;

pub use error::InventoryError;
pub use inventory::StationInventory;
pub use source::{ChargerRow, InventoryFile, InventorySource, StationRow};
