//! Type definition module

mod account;

pub use account::AccountRecord;

// Re-export the wire types records are built from
pub use storage_cache_provider::{AccountKey, AccountProperties, StorageAccount};
