//! Vault data model and orchestration.

pub mod entry;
pub mod service;

pub use entry::{Account, EntryView, VaultEntry, MASKED_SECRET};
pub use service::VaultService;
