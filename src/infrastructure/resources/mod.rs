//! Resource query adapters

mod inventory;
mod retrying;

pub use inventory::InventoryResourceQuery;
pub use retrying::RetryingResourceQuery;
