//! Cache service layer

mod account_registry;
mod credential_resolver;

pub use account_registry::AccountRegistry;
pub use credential_resolver::CredentialResolver;
